use std::fmt;

use serde::{Deserialize, Serialize};

/// One student record as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub mark: f64,
}

impl Student {
    /// Mark as shown in the table: `95` rather than `95.0`.
    pub fn display_mark(&self) -> String {
        format_mark(self.mark)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.name, self.subject, self.display_mark())
    }
}

pub fn format_mark(mark: f64) -> String {
    if mark.fract() == 0.0 && mark.abs() < 1e15 {
        format!("{}", mark as i64)
    } else {
        format!("{}", mark)
    }
}

/// Form body shared by the add and edit endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentPayload {
    pub name: String,
    pub subject: String,
    pub marks: String,
}

impl StudentPayload {
    pub fn new(name: &str, subject: &str, mark: f64) -> Self {
        Self {
            name: name.to_string(),
            subject: subject.to_string(),
            marks: format_mark(mark),
        }
    }
}

/// `GET /api/students/`
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    pub success: bool,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/add/`
#[derive(Debug, Deserialize)]
pub(crate) struct AddResponse {
    pub success: bool,
    #[serde(default)]
    pub student: Option<Student>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/delete/{id}/`
#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
