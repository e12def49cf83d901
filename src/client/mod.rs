//! The student list controller.
//!
//! [`StudentListClient`] owns everything the page keeps between events: the
//! cached records, the modal form, the open action menu and the queue of
//! blocking dialogs. It never performs I/O. Intent methods return a
//! [`PendingRequest`]; the caller runs it with [`perform`] and feeds the
//! resulting [`Completion`] back through [`StudentListClient::apply`].

pub mod dialog;
pub mod form;
pub mod request;

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::api::{ApiError, Student};
use crate::view::{self, ModalView, RowView};

pub use dialog::{ConfirmAction, Dialog, Notice, NoticeKind};
pub use form::{FormField, StudentForm, ValidatedStudent, ValidationError};
pub use request::{perform, Completion, PendingRequest};

pub const INVALID_FORM_MESSAGE: &str = "Please enter valid data.";

/// Where a dismiss of the modal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissSource {
    /// The dimmed background around the form, or an explicit cancel.
    Overlay,
    /// Somewhere inside the form box.
    Inside,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub open: bool,
    pub form: StudentForm,
    pub focus: Option<FormField>,
}

/// What the caller should do after [`StudentListClient::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    /// Already queued as a dialog; returned for logging and tests.
    pub notice: Option<Notice>,
    pub follow_up: Option<PendingRequest>,
    pub quit: bool,
}

#[derive(Debug, Default)]
pub struct StudentListClient {
    students: Vec<Student>,
    editing_id: Option<i64>,
    modal: ModalState,
    open_menu: Option<i64>,
    selected: usize,
    dialogs: VecDeque<Dialog>,
}

impl StudentListClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.open
    }

    pub fn open_menu(&self) -> Option<i64> {
        self.open_menu
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.students.get(self.selected).map(|s| s.id)
    }

    /// The dialog currently blocking input, if any.
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    pub fn rows(&self) -> Vec<RowView> {
        view::table_rows(&self.students, self.open_menu)
    }

    pub fn modal_view(&self) -> ModalView {
        view::modal_view(&self.modal, self.editing_id)
    }

    // Intents

    pub fn load(&self) -> PendingRequest {
        PendingRequest::Load
    }

    pub fn open_create(&mut self) {
        self.modal.form.reset();
        self.editing_id = None;
        self.show_modal();
    }

    /// Unknown ids are ignored without a dialog.
    pub fn open_edit(&mut self, id: i64) {
        let Some(student) = self.students.iter().find(|s| s.id == id) else {
            debug!("Edit requested for unknown student {}", id);
            return;
        };

        self.modal.form = StudentForm::from_student(student);
        self.editing_id = Some(id);
        self.close_all_menus();
        self.show_modal();
    }

    pub fn close_modal(&mut self, source: DismissSource) {
        if source == DismissSource::Inside {
            return;
        }
        self.hide_modal();
        self.close_all_menus();
    }

    pub fn focus_next(&mut self) {
        self.modal.focus = self.modal.focus.map(FormField::next);
    }

    pub fn focus_prev(&mut self) {
        self.modal.focus = self.modal.focus.map(FormField::prev);
    }

    pub fn input_char(&mut self, ch: char) {
        if let Some(field) = self.modal.focus {
            self.modal.form.field_mut(field).push(ch);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(field) = self.modal.focus {
            self.modal.form.field_mut(field).pop();
        }
    }

    pub fn form_mut(&mut self) -> &mut StudentForm {
        &mut self.modal.form
    }

    /// Validates the modal form and builds the create or update request.
    ///
    /// A rejected form queues the validation dialog and produces no request.
    pub fn submit(&mut self) -> Result<PendingRequest, ValidationError> {
        let valid = match self.modal.form.validate() {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Form rejected: {}", e);
                self.notify(Notice::error(INVALID_FORM_MESSAGE));
                return Err(e);
            }
        };

        let payload = valid.payload();
        Ok(match self.editing_id {
            None => PendingRequest::Create(payload),
            Some(id) => PendingRequest::Update { id, payload },
        })
    }

    /// Asks for confirmation; the request is built by [`Self::confirm`].
    pub fn delete(&mut self, id: i64) {
        self.dialogs.push_back(Dialog::Confirm(ConfirmAction::Delete(id)));
    }

    pub fn logout(&mut self) {
        self.dialogs.push_back(Dialog::Confirm(ConfirmAction::Logout));
    }

    /// Answers the confirmation at the front of the dialog queue.
    pub fn confirm(&mut self, accepted: bool) -> Option<PendingRequest> {
        let Some(Dialog::Confirm(action)) = self.dialogs.front().cloned() else {
            return None;
        };
        self.dialogs.pop_front();

        if !accepted {
            return None;
        }
        Some(match action {
            ConfirmAction::Delete(id) => PendingRequest::Delete(id),
            ConfirmAction::Logout => PendingRequest::Logout,
        })
    }

    /// Dismisses the notice at the front of the dialog queue.
    pub fn dismiss_notice(&mut self) {
        if matches!(self.dialogs.front(), Some(Dialog::Notice(_))) {
            self.dialogs.pop_front();
        }
    }

    /// Closes every menu, then opens the one for `id` unless it was the one open.
    pub fn toggle_action_menu(&mut self, id: i64) {
        let was_open = self.open_menu == Some(id);
        self.close_all_menus();
        if !was_open && self.students.iter().any(|s| s.id == id) {
            self.open_menu = Some(id);
        }
    }

    pub fn close_all_menus(&mut self) {
        self.open_menu = None;
    }

    /// A click that landed outside every action-menu region.
    pub fn click_outside_menus(&mut self) {
        self.close_all_menus();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.students.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.students.len() {
            self.selected = index;
        }
    }

    // Completions

    pub fn apply(&mut self, completion: Completion) -> Reaction {
        let mut reaction = Reaction::default();

        let notice = match completion {
            Completion::Loaded(Ok(students)) => {
                info!("Loaded {} students", students.len());
                self.replace_students(students);
                None
            }
            Completion::Loaded(Err(e)) => Some(failure_notice(
                e,
                "Failed to load students",
                "Error fetching students from server.",
            )),

            Completion::Added(Ok(student)) => {
                info!("Added student {} ({})", student.id, student.name);
                self.students.push(student);
                self.after_rows_changed();
                self.hide_modal();
                Some(Notice::success("Student added successfully!"))
            }
            Completion::Added(Err(e)) => {
                Some(failure_notice(e, "Add failed", "Error adding student."))
            }

            Completion::Updated { id, result: Ok(()) } => {
                info!("Updated student {}", id);
                reaction.follow_up = Some(PendingRequest::Load);
                self.hide_modal();
                self.close_all_menus();
                Some(Notice::success("Student updated successfully!"))
            }
            Completion::Updated { result: Err(e), .. } => {
                Some(failure_notice(e, "Update failed", "Error updating student."))
            }

            Completion::Deleted { id, result: Ok(()) } => {
                info!("Deleted student {}", id);
                self.students.retain(|s| s.id != id);
                self.after_rows_changed();
                Some(Notice::success("Student deleted successfully!"))
            }
            Completion::Deleted { result: Err(e), .. } => {
                Some(failure_notice(e, "Delete failed", "Error deleting student."))
            }

            Completion::LoggedOut(Ok(())) => {
                info!("Logged out");
                reaction.quit = true;
                None
            }
            Completion::LoggedOut(Err(e)) => {
                Some(failure_notice(e, "Logout failed", "Error logging out."))
            }
        };

        if let Some(notice) = notice {
            self.notify(notice.clone());
            reaction.notice = Some(notice);
        }
        reaction
    }

    fn notify(&mut self, notice: Notice) {
        self.dialogs.push_back(Dialog::Notice(notice));
    }

    fn replace_students(&mut self, students: Vec<Student>) {
        self.students = students;
        self.after_rows_changed();
    }

    /// Rows are rebuilt from scratch, so no menu survives a change.
    fn after_rows_changed(&mut self) {
        self.close_all_menus();
        if self.selected >= self.students.len() {
            self.selected = self.students.len().saturating_sub(1);
        }
    }

    fn show_modal(&mut self) {
        self.modal.open = true;
        self.modal.focus = Some(FormField::Name);
    }

    fn hide_modal(&mut self) {
        self.modal.open = false;
        self.modal.focus = None;
        self.editing_id = None;
    }
}

fn failure_notice(error: ApiError, prefix: &str, network_message: &str) -> Notice {
    match error {
        ApiError::Network(detail) => {
            warn!("{}: {}", network_message, detail);
            Notice::error(network_message)
        }
        ApiError::Rejected(message) | ApiError::NotRedirected(message) => {
            let message = if message.trim().is_empty() {
                "unknown error".to_string()
            } else {
                message
            };
            Notice::error(format!("{}: {}", prefix, message))
        }
    }
}
