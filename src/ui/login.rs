//! Sign-in screen

use crate::app::App;
use crate::platform::EARLY_ACCESS_SHORTCUT;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PANEL_WIDTH: u16 = 56;

/// Draw the centered sign-in panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let width = PANEL_WIDTH.min(area.width);
    let height = 11.min(area.height);
    let panel = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(" Launchpad · Sign in ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Intro
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Hints
        ])
        .margin(1)
        .split(inner);

    let intro = if app.state.wizard.is_some() {
        "Sign in to continue your submission."
    } else {
        "Enter your user id to sign in."
    };
    frame.render_widget(
        Paragraph::new(intro).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.state.login_input.as_str()),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" User id ")
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(input, chunks[1]);

    let hints = Paragraph::new(format!(
        "Enter: sign in   {EARLY_ACCESS_SHORTCUT}: join early access"
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}
