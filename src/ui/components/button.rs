//! Boxed buttons for the sidebar and action panels

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Sidebar navigation entry; the current view is marked and highlighted
pub fn render_sidebar_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let (marker, color) = match (is_selected, is_enabled) {
        (true, _) => ("▸", Color::Cyan),
        (false, true) => (" ", Color::Gray),
        (false, false) => (" ", Color::DarkGray),
    };
    let mut label_style = Style::default().fg(color);
    if is_selected {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let paragraph = Paragraph::new(format!("{marker}{label}"))
        .style(label_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if is_selected {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        );
    frame.render_widget(paragraph, area);
}

/// Centered action button; `accent` colours the label and border when enabled
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let color = match (is_enabled, accent) {
        (false, _) => Color::DarkGray,
        (true, Some(color)) => color,
        (true, None) => Color::White,
    };
    let paragraph = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}
