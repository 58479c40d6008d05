//! Wizard rendering: step progress, step body and action panel

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use crate::ui::widgets::render_scrollable_list;
use crate::wizard::{FormField, ListEditor, StepBody, SubmitPhase, Wizard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the active wizard with its action panel
pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let Some(wizard) = app.state.wizard.as_ref() else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(24), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], wizard);
    draw_action_panel(frame, main_chunks[1], wizard);
}

fn draw_form(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let step = wizard.current_step();
    let block = Block::default()
        .title(format!(
            " {} · Step {}/{}: {} ",
            wizard.kind.title(),
            wizard.current_index() + 1,
            wizard.step_count(),
            step.title
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Progress
            Constraint::Min(0),    // Step body
        ])
        .horizontal_margin(1)
        .split(inner);

    frame.render_widget(Paragraph::new(progress_line(wizard)), chunks[0]);

    match &step.body {
        StepBody::Fields(fields) => draw_fields(frame, chunks[1], wizard, fields),
        StepBody::Records { name, editor } => {
            draw_records(frame, chunks[1], editor, wizard.error_for(name))
        }
    }
}

/// "1 Basics › 2 Funding › 3 FAQs" with the current step highlighted
fn progress_line(wizard: &Wizard) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, step) in wizard.steps().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = match idx.cmp(&wizard.current_index()) {
            std::cmp::Ordering::Less => Style::default().fg(Color::Green),
            std::cmp::Ordering::Equal => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            std::cmp::Ordering::Greater => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(format!("{} {}", idx + 1, step.title), style));
    }
    Line::from(spans)
}

fn draw_fields(frame: &mut Frame, area: Rect, wizard: &Wizard, fields: &[FormField]) {
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            field,
            idx == wizard.active_field,
            wizard.error_for(field.name),
        );
    }
}

fn draw_records(frame: &mut Frame, area: Rect, editor: &ListEditor, summary: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(area);

    let (min, max) = editor.bounds();
    let items: Vec<ListItem> = editor
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let preview = record
                .fields
                .first()
                .map(|f| f.input.lines().next().unwrap_or("").to_string())
                .unwrap_or_default();
            let marker = if editor.errors().contains_key(&record.id) {
                Span::styled("! ", Style::default().fg(Color::Red))
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::raw(format!("{} {}: {preview}", editor.item_label, idx + 1)),
            ]))
        })
        .collect();
    let mut list_block = Block::default()
        .title(format!(" {} ({}/{max}) ", editor.item_label, editor.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    if let Some(message) = summary {
        list_block = list_block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    } else if editor.len() <= min {
        list_block = list_block.title_bottom(format!(" at least {min} "));
    }
    let list = List::new(items)
        .block(list_block)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    render_scrollable_list(frame, chunks[0], list, editor.selected);

    let Some(record) = editor.selected_record() else {
        return;
    };
    let mut constraints: Vec<Constraint> = record
        .fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Min(0));
    let field_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(chunks[1]);
    for (idx, field) in record.fields.iter().enumerate() {
        draw_field(
            frame,
            field_chunks[idx],
            field,
            idx == editor.active_field,
            editor.error_for(record.id, field.name),
        );
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Continue / Submit
            Constraint::Length(BUTTON_HEIGHT), // Back
            Constraint::Length(BUTTON_HEIGHT), // Add record
            Constraint::Length(BUTTON_HEIGHT), // Remove record
            Constraint::Min(0),                // Phase
        ])
        .split(inner);

    let submitting = wizard.is_submitting();
    let primary = if submitting {
        "Submitting…"
    } else if wizard.is_last_step() {
        "Submit"
    } else {
        "Continue"
    };
    render_action_button(frame, chunks[0], primary, !submitting, Some(Color::Green));
    render_action_button(
        frame,
        chunks[1],
        "Back",
        !submitting && !wizard.is_first_step(),
        Some(Color::Gray),
    );

    if let Some(editor) = wizard.records() {
        render_action_button(
            frame,
            chunks[2],
            &format!("Add {}", editor.item_label),
            !submitting && editor.can_add(),
            Some(Color::Blue),
        );
        render_action_button(
            frame,
            chunks[3],
            "Remove",
            !submitting && editor.can_remove(),
            Some(Color::Yellow),
        );
    }

    let status = match wizard.phase() {
        SubmitPhase::Idle => None,
        SubmitPhase::Submitting => Some(("Sending…".to_string(), Color::Yellow)),
        SubmitPhase::Succeeded => Some(("Sent".to_string(), Color::Green)),
        SubmitPhase::Failed(message) => Some((format!("Failed: {message}"), Color::Red)),
    };
    if let Some((text, color)) = status {
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true }),
            chunks[4],
        );
    }
}
