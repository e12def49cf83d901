use ratatui::style::{Color, Style, Stylize};

pub const ACCENT: Color = Color::Cyan;
pub const DANGER: Color = Color::Red;
pub const SUCCESS: Color = Color::Green;

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold() } else { style.dim() }
}

pub fn selected_row() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT).bold()
}
