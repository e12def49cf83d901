use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Color, Modifier, Style, Widget},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::centered_fixed;
use super::style::{DANGER, SUCCESS};
use crate::client::{Dialog, NoticeKind};
use crate::view::dialog_view;

pub fn render_dialog(dialog: &Dialog, area: Rect, buf: &mut Buffer) {
    let view = dialog_view(dialog);
    let color = match dialog {
        Dialog::Notice(notice) if notice.kind == NoticeKind::Success => SUCCESS,
        Dialog::Notice(_) => DANGER,
        Dialog::Confirm(_) => Color::Yellow,
    };

    let popup = centered_fixed(56, 9, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(view.title)
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    Paragraph::new(view.message)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    Paragraph::new(view.hint)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}
