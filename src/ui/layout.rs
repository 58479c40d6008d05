//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{ADD_RECORD_SHORTCUT, EARLY_ACCESS_SHORTCUT, REMOVE_RECORD_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items
const SIDEBAR_ITEMS: &[View] = &[View::Home, View::Marketplace, View::Wizard];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Create full-width layout without sidebar (sign-in screen)
pub fn create_layout_no_sidebar(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area)[0]
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(SIDEBAR_ITEMS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, view) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = app.state.current_view == *view;
        let (label, is_enabled) = match view {
            View::Wizard => match &app.state.wizard {
                Some(wizard) => (wizard.kind.title(), true),
                None => ("Wizard", false),
            },
            _ => (view.label(), true),
        };
        render_sidebar_button(frame, chunks[idx + 1], label, is_selected, is_enabled);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Identity
    match &app.state.user_id {
        Some(user_id) => {
            spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
            spans.push(Span::styled(
                format!("{user_id}  "),
                Style::default().fg(Color::White),
            ));
        }
        None => spans.push(Span::styled(" ○ ", Style::default().fg(Color::Red))),
    }

    if app.is_submitting() {
        spans.push(Span::styled("Submitting… ", Style::default().fg(Color::Yellow)));
    }

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Login => format!("Enter:sign in  {EARLY_ACCESS_SHORTCUT}:early access"),
        View::Home => "j/k:nav  Enter:open  m:marketplace  r:refresh  q:quit".to_string(),
        View::Marketplace => "j/k:nav  n:new campaign  r:reload  Esc:back".to_string(),
        View::Wizard => {
            let on_records = app
                .state
                .wizard
                .as_ref()
                .is_some_and(|w| w.records().is_some());
            if on_records {
                format!(
                    "Tab:next  {ADD_RECORD_SHORTCUT}:add  {REMOVE_RECORD_SHORTCUT}:remove  {SUBMIT_SHORTCUT}:continue  Esc:back"
                )
            } else {
                format!("Tab:next  ←/→:choose  {SUBMIT_SHORTCUT}:continue  Esc:back")
            }
        }
    }
}
