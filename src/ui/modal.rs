use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Color, Modifier, Style, Widget},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::centered_fixed;
use super::style::{dim_unless_focused, ACCENT};
use crate::view::ModalView;

const MODAL_WIDTH: u16 = 50;
/// Border, three 3-line fields, a blank line, the submit hint, border.
const MODAL_HEIGHT: u16 = 13;

/// Dims the screen and draws the form box; returns the box for hit-testing.
pub fn render_modal(modal: &ModalView, area: Rect, buf: &mut Buffer) -> Rect {
    buf.set_style(area, Style::default().add_modifier(Modifier::DIM));

    let popup = centered_fixed(MODAL_WIDTH, MODAL_HEIGHT, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", modal.title))
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let mut constraints: Vec<Constraint> = modal.fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, chunk) in modal.fields.iter().zip(chunks.iter()) {
        let border_color = if field.focused { ACCENT } else { Color::DarkGray };
        let value = if field.focused {
            format!("{}_", field.value)
        } else {
            field.value.clone()
        };

        Paragraph::new(value)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(format!(" {} ", field.label)),
            )
            .style(dim_unless_focused(field.focused, Style::default().fg(Color::White)))
            .render(*chunk, buf);
    }

    if let Some(hint_area) = chunks.last() {
        Paragraph::new(format!("[Enter] {}   [Esc] Cancel", modal.submit_label))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .render(*hint_area, buf);
    }

    popup
}
