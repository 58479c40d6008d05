//! Field rendering utilities for forms

use crate::wizard::{FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs, borders included
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        6
    } else {
        3
    }
}

fn placeholder(field: &FormField) -> &'static str {
    match field.kind {
        FieldKind::Date(_) => "YYYY-MM-DD (←/→ to pick)",
        FieldKind::File => "/path/to/file",
        FieldKind::Number => "0",
        _ => "(empty)",
    }
}

/// Draw a form field; a validation `error` is shown on the bottom border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let accent = match (error, is_active) {
        (Some(_), _) => Color::Red,
        (None, true) => Color::Cyan,
        (None, false) => Color::DarkGray,
    };
    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let value = field.display_value();
    let cursor = if is_active && !matches!(field.kind, FieldKind::Choice(_)) {
        "▌"
    } else {
        ""
    };

    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(
            placeholder(field),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect()
    };
    if !cursor.is_empty() {
        if value.is_empty() {
            lines = vec![Line::from(Span::styled(cursor, Style::default().fg(Color::Cyan)))];
        } else if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
    }

    let required = if field.is_required() { " *" } else { "" };
    let mut block = Block::default()
        .title(format!(" {}{required} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
