//! Backend contract for the student records endpoints.
//!
//! [`StudentApi`] is the seam between the controller and the network. The
//! controller never talks to reqwest directly; it hands a
//! [`PendingRequest`](crate::client::PendingRequest) to
//! [`perform`](crate::client::perform), which drives one of these methods.

pub mod http;
pub mod types;

use std::future::Future;

use thiserror::Error;

pub use http::HttpStudentApi;
pub use types::{Student, StudentPayload};

/// Why a single backend operation did not succeed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure, timeout, or a body that could not be decoded.
    #[error("network failure: {0}")]
    Network(String),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The edit endpoint answered without redirecting; carries the raw body.
    #[error("{0}")]
    NotRedirected(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub trait StudentApi: Send + Sync + 'static {
    /// `GET /api/students/`
    fn list_students(&self) -> impl Future<Output = ApiResult<Vec<Student>>> + Send;

    /// `POST /api/add/`; resolves to the record the server stored.
    fn add_student(
        &self,
        payload: &StudentPayload,
    ) -> impl Future<Output = ApiResult<Student>> + Send;

    /// `POST /students/edit/{id}/`; success is the redirect itself.
    fn edit_student(
        &self,
        id: i64,
        payload: &StudentPayload,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    /// `POST /api/delete/{id}/`
    fn delete_student(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send;

    /// Ends the backend session.
    fn logout(&self) -> impl Future<Output = ApiResult<()>> + Send;
}
