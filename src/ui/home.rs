//! Home dashboard

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::HomeAction;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the home dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Account summary
            Constraint::Min(0),    // Actions
        ])
        .split(area);

    draw_account(frame, chunks[0], app);
    draw_actions(frame, chunks[1], app);
}

fn draw_account(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::DarkGray);
    let user = app.state.user_id.as_deref().unwrap_or("not signed in");
    let role = app.state.role().map(|r| r.label()).unwrap_or("unknown");
    let (onboarding, onboarding_color) = match &app.state.onboarding {
        Some(status) if status.completed => ("complete", Color::Green),
        Some(_) => ("profile setup pending", Color::Yellow),
        None => ("unknown", Color::DarkGray),
    };

    let lines = vec![
        Line::from(vec![Span::styled("User:       ", label), Span::raw(user)]),
        Line::from(vec![Span::styled("Role:       ", label), Span::raw(role)]),
        Line::from(vec![
            Span::styled("Onboarding: ", label),
            Span::styled(onboarding, Style::default().fg(onboarding_color)),
        ]),
    ];
    let content = Paragraph::new(lines).block(
        Block::default()
            .title(" Account ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(content, area);
}

fn draw_actions(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .state
        .home_actions()
        .iter()
        .map(|action| {
            let style = match action {
                HomeAction::SignOut => Style::default().fg(Color::Red),
                HomeAction::Open(_) => Style::default().fg(Color::White),
                HomeAction::Browse => Style::default().fg(Color::Cyan),
            };
            ListItem::new(Line::from(Span::styled(format!("  {}", action.label()), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Launchpad ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸");

    render_scrollable_list(frame, area, list, app.state.selected_index);
}
