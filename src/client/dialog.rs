/// Blocking dialogs. While one is up, no other input is handled.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete(i64),
    Logout,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::Delete(_) => "Are you sure you want to delete this student?",
            ConfirmAction::Logout => "Are you sure you want to logout?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Notice(Notice),
    Confirm(ConfirmAction),
}
