pub mod components;
pub mod dialog;
pub mod modal;
pub mod style;
pub mod table;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    widgets::Widget,
};

use crate::api::StudentApi;
use crate::app::App;

/// Clickable action inside an open row menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Edit(i64),
    Delete(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub index: usize,
    pub id: i64,
    pub row: Rect,
    pub toggle: Rect,
}

/// Regions recorded while drawing, consulted when a click arrives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitAreas {
    pub modal: Option<Rect>,
    pub rows: Vec<RowHit>,
    pub menu_items: Vec<(Rect, MenuAction)>,
}

impl HitAreas {
    pub fn clear(&mut self) {
        self.modal = None;
        self.rows.clear();
        self.menu_items.clear();
    }

    pub fn menu_action_at(&self, position: Position) -> Option<MenuAction> {
        self.menu_items
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, action)| *action)
    }

    /// Row index and id whose action control is under `position`.
    pub fn toggle_at(&self, position: Position) -> Option<(usize, i64)> {
        self.rows
            .iter()
            .find(|hit| hit.toggle.contains(position))
            .map(|hit| (hit.index, hit.id))
    }

    pub fn row_at(&self, position: Position) -> Option<usize> {
        self.rows
            .iter()
            .find(|hit| hit.row.contains(position))
            .map(|hit| hit.index)
    }
}

impl<A: StudentApi> Widget for &mut App<A> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.hit_areas.clear();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(3),    // Table
                Constraint::Length(3), // Help
            ])
            .split(area);

        components::UiComponent::header(&self.backend_label, self.client.students().len(), self.in_flight)
            .render(chunks[0], buf);

        let rows = self.client.rows();
        table::render_table(&rows, self.client.selected(), chunks[1], buf, &mut self.hit_areas);

        if let Some(id) = self.client.open_menu() {
            table::render_action_menu(id, area, buf, &mut self.hit_areas);
        }

        components::UiComponent::help(help_text(&self.client)).render(chunks[2], buf);

        let modal = self.client.modal_view();
        if modal.visible {
            self.hit_areas.modal = Some(modal::render_modal(&modal, area, buf));
        }

        if let Some(dialog) = self.client.dialog() {
            dialog::render_dialog(dialog, area, buf);
        }
    }
}

fn help_text(client: &crate::client::StudentListClient) -> &'static str {
    if client.is_modal_open() {
        "[Tab] Next field | [Enter] Save | [Esc] Cancel"
    } else if client.open_menu().is_some() {
        "[e] Edit | [d] Delete | [Esc] Close menu"
    } else {
        "[a] Add | [Enter] Actions | [r] Reload | [L] Logout | [q] Quit"
    }
}

/// A `width` x `height` box centered in `r`, shrunk to fit.
pub(crate) fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
