use ratatui::{
    layout::Alignment,
    prelude::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::util::string::maybe_pluralize_count;

pub struct UiComponent;

impl UiComponent {
    pub fn header(backend: &str, count: usize, in_flight: usize) -> Paragraph<'static> {
        let mut title = format!(
            "🎓 Student Records ({}) - {}",
            maybe_pluralize_count(count, ("record", "records")),
            backend
        );
        if in_flight > 0 {
            title.push_str(" ⟳");
        }

        Paragraph::new(title)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            )
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
    }

    pub fn help(text: &str) -> Paragraph<'_> {
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
    }

    pub fn empty_message(text: &str) -> Paragraph<'_> {
        Paragraph::new(text)
            .block(Block::default().padding(Padding::symmetric(1, 1)))
            .style(Style::default().fg(Color::Gray).italic())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }
}
