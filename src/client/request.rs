use tracing::{debug, warn};

use crate::api::{ApiResult, Student, StudentApi, StudentPayload};

/// A backend call the controller wants made.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingRequest {
    Load,
    Create(StudentPayload),
    Update { id: i64, payload: StudentPayload },
    Delete(i64),
    Logout,
}

/// The typed outcome of one [`PendingRequest`], fed back into
/// [`StudentListClient::apply`](super::StudentListClient::apply).
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Loaded(ApiResult<Vec<Student>>),
    Added(ApiResult<Student>),
    Updated { id: i64, result: ApiResult<()> },
    Deleted { id: i64, result: ApiResult<()> },
    LoggedOut(ApiResult<()>),
}

impl Completion {
    pub fn is_success(&self) -> bool {
        match self {
            Completion::Loaded(result) => result.is_ok(),
            Completion::Added(result) => result.is_ok(),
            Completion::Updated { result, .. }
            | Completion::Deleted { result, .. }
            | Completion::LoggedOut(result) => result.is_ok(),
        }
    }
}

/// Runs one request against `api`.
pub async fn perform<A: StudentApi>(api: &A, request: PendingRequest) -> Completion {
    debug!("Performing {:?}", request);

    let completion = match request {
        PendingRequest::Load => Completion::Loaded(api.list_students().await),
        PendingRequest::Create(payload) => Completion::Added(api.add_student(&payload).await),
        PendingRequest::Update { id, payload } => Completion::Updated {
            id,
            result: api.edit_student(id, &payload).await,
        },
        PendingRequest::Delete(id) => Completion::Deleted {
            id,
            result: api.delete_student(id).await,
        },
        PendingRequest::Logout => Completion::LoggedOut(api.logout().await),
    };

    if !completion.is_success() {
        warn!("Request failed: {:?}", completion);
    }
    completion
}
