//! Pure mapping from controller state to what the screen shows.
//!
//! Nothing here knows about ratatui; `ui` turns these nodes into widgets.

use crate::api::Student;
use crate::client::{ConfirmAction, Dialog, FormField, ModalState, NoticeKind};

pub const PLACEHOLDER_TEXT: &str = "No records found.";
pub const COLUMNS: [&str; 4] = ["Name", "Subject", "Mark", "Actions"];

#[derive(Debug, Clone, PartialEq)]
pub enum RowView {
    /// Single row spanning every column when there are no records.
    Placeholder,
    Record {
        id: i64,
        name: String,
        subject: String,
        mark: String,
        menu_open: bool,
    },
}

impl RowView {
    /// Indicator on the row's action control.
    pub fn indicator(&self) -> &'static str {
        match self {
            RowView::Record { menu_open: true, .. } => "▾",
            _ => "▸",
        }
    }
}

pub fn table_rows(students: &[Student], open_menu: Option<i64>) -> Vec<RowView> {
    if students.is_empty() {
        return vec![RowView::Placeholder];
    }

    students
        .iter()
        .map(|student| RowView::Record {
            id: student.id,
            name: student.name.clone(),
            subject: student.subject.clone(),
            mark: student.display_mark(),
            menu_open: open_menu == Some(student.id),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub visible: bool,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
}

pub fn modal_view(modal: &ModalState, editing_id: Option<i64>) -> ModalView {
    let (title, submit_label) = match editing_id {
        None => ("Add New Student", "Add Student"),
        Some(_) => ("Edit Student", "Update Student"),
    };

    let fields = FormField::ALL
        .iter()
        .map(|&field| FieldView {
            label: field.label(),
            value: modal.form.field(field).to_string(),
            focused: modal.focus == Some(field),
        })
        .collect();

    ModalView {
        visible: modal.open,
        title,
        submit_label,
        fields,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogView {
    pub title: &'static str,
    pub message: String,
    pub hint: &'static str,
    pub is_error: bool,
}

pub fn dialog_view(dialog: &Dialog) -> DialogView {
    match dialog {
        Dialog::Notice(notice) => DialogView {
            title: match notice.kind {
                NoticeKind::Success => " Done ",
                NoticeKind::Error => " Error ",
            },
            message: notice.message.clone(),
            hint: "[Enter] OK",
            is_error: notice.kind == NoticeKind::Error,
        },
        Dialog::Confirm(action) => DialogView {
            title: match action {
                ConfirmAction::Delete(_) => " Delete Student ",
                ConfirmAction::Logout => " Logout ",
            },
            message: action.prompt().to_string(),
            hint: "[y] Yes  [n] No",
            is_error: false,
        },
    }
}
