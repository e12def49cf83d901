use std::fmt;

use thiserror::Error;

use crate::api::{Student, StudentPayload};
use crate::api::types::format_mark;

pub const MARK_MIN: f64 = 0.0;
pub const MARK_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Subject,
    Mark,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Subject, FormField::Mark];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Subject,
            FormField::Subject => FormField::Mark,
            FormField::Mark => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Mark,
            FormField::Subject => FormField::Name,
            FormField::Mark => FormField::Subject,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Student Name",
            FormField::Subject => "Subject",
            FormField::Mark => "Mark",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("name is empty")]
    EmptyName,

    #[error("subject is empty")]
    EmptySubject,

    #[error("mark {0:?} is not a number")]
    MarkNotNumeric(String),

    #[error("mark {0} is outside 0-100")]
    MarkOutOfRange(f64),
}

/// Raw text of the modal's three inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    pub name: String,
    pub subject: String,
    pub mark: String,
}

/// A form that passed validation; name and subject are trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedStudent {
    pub name: String,
    pub subject: String,
    pub mark: f64,
}

impl ValidatedStudent {
    pub fn payload(&self) -> StudentPayload {
        StudentPayload::new(&self.name, &self.subject, self.mark)
    }
}

impl StudentForm {
    pub fn new(name: &str, subject: &str, mark: &str) -> Self {
        Self {
            name: name.to_string(),
            subject: subject.to_string(),
            mark: mark.to_string(),
        }
    }

    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            subject: student.subject.clone(),
            mark: format_mark(student.mark),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Subject => &self.subject,
            FormField::Mark => &self.mark,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Subject => &mut self.subject,
            FormField::Mark => &mut self.mark,
        }
    }

    pub fn validate(&self) -> Result<ValidatedStudent, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::EmptySubject);
        }

        let raw_mark = self.mark.trim();
        let mark = raw_mark
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .ok_or_else(|| ValidationError::MarkNotNumeric(raw_mark.to_string()))?;

        if !(MARK_MIN..=MARK_MAX).contains(&mark) {
            return Err(ValidationError::MarkOutOfRange(mark));
        }

        Ok(ValidatedStudent {
            name: name.to_string(),
            subject: subject.to_string(),
            mark,
        })
    }
}
