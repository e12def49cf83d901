use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    prelude::{Color, Modifier, Style, StatefulWidget, Widget},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Row, Table, TableState},
};

use super::components::UiComponent;
use super::style::{selected_row, ACCENT, DANGER};
use super::{HitAreas, MenuAction, RowHit};
use crate::view::{RowView, COLUMNS, PLACEHOLDER_TEXT};

pub const ACTIONS_WIDTH: u16 = 9;
const MARK_WIDTH: u16 = 6;
const MENU_WIDTH: u16 = 14;
const MENU_HEIGHT: u16 = 4;
/// Header line plus its bottom margin.
const HEADER_HEIGHT: u16 = 2;

fn widths() -> [Constraint; 4] {
    [
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Length(MARK_WIDTH),
        Constraint::Length(ACTIONS_WIDTH),
    ]
}

fn header() -> Row<'static> {
    Row::new(COLUMNS.map(Cell::from))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .bottom_margin(1)
}

pub fn render_table(
    rows: &[RowView],
    selected: usize,
    area: Rect,
    buf: &mut Buffer,
    hits: &mut HitAreas,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Students ");
    let inner = block.inner(area);
    Widget::render(block, area, buf);

    let body = Rect {
        y: inner.y + HEADER_HEIGHT.min(inner.height),
        height: inner.height.saturating_sub(HEADER_HEIGHT),
        ..inner
    };

    if matches!(rows, [RowView::Placeholder] | []) {
        let table = Table::new(Vec::<Row>::new(), widths()).header(header());
        Widget::render(table, inner, buf);
        Widget::render(UiComponent::empty_message(PLACEHOLDER_TEXT), body, buf);
        return;
    }

    let table_rows: Vec<Row> = rows
        .iter()
        .filter_map(|row| match row {
            RowView::Record { name, subject, mark, .. } => Some(Row::new(vec![
                Cell::from(name.clone()),
                Cell::from(subject.clone()),
                Cell::from(mark.clone()),
                Cell::from(format!("   {}", row.indicator())),
            ])),
            RowView::Placeholder => None,
        })
        .collect();

    let table = Table::new(table_rows, widths())
        .header(header())
        .column_spacing(1)
        .row_highlight_style(selected_row());

    let mut state = TableState::default().with_selected(Some(selected));
    StatefulWidget::render(table, inner, buf, &mut state);

    let toggle_width = ACTIONS_WIDTH.min(body.width);
    let visible = rows
        .iter()
        .enumerate()
        .skip(state.offset())
        .take(body.height as usize);

    for (line, (index, row)) in visible.enumerate() {
        if let RowView::Record { id, .. } = row {
            let y = body.y + line as u16;
            hits.rows.push(RowHit {
                index,
                id: *id,
                row: Rect::new(body.x, y, body.width, 1),
                toggle: Rect::new(body.right() - toggle_width, y, toggle_width, 1),
            });
        }
    }
}

/// Popover under the row's action control with the edit/delete entries.
pub fn render_action_menu(id: i64, bounds: Rect, buf: &mut Buffer, hits: &mut HitAreas) {
    let Some(row) = hits.rows.iter().find(|hit| hit.id == id).copied() else {
        return;
    };

    let width = MENU_WIDTH.min(bounds.width);
    let x = row.toggle.right().saturating_sub(width).max(bounds.x);
    let y = if row.row.y + 1 + MENU_HEIGHT <= bounds.bottom() {
        row.row.y + 1
    } else {
        row.row.y.saturating_sub(MENU_HEIGHT).max(bounds.y)
    };
    let area = Rect::new(x, y, width, MENU_HEIGHT.min(bounds.height));

    Widget::render(Clear, area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    Widget::render(block, area, buf);

    let items = [
        (MenuAction::Edit(id), "✎ Edit    [e]", Style::default().fg(Color::White)),
        (MenuAction::Delete(id), "✖ Delete  [d]", Style::default().fg(DANGER)),
    ];

    for (line, (action, label, style)) in items.into_iter().enumerate() {
        if line as u16 >= inner.height {
            break;
        }
        let item_area = Rect::new(inner.x, inner.y + line as u16, inner.width, 1);
        Widget::render(Line::styled(label, style), item_area, buf);
        hits.menu_items.push((item_area, action));
    }
}
