//! Marketplace campaign listing

use super::widgets::{format_amount, render_scrollable_list};
use crate::api::CampaignListing;
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the campaign list with a detail pane for the selection
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let campaigns = &app.state.campaigns;

    if campaigns.is_empty() {
        let content = Paragraph::new("No campaigns yet.\nPress 'n' to start one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" Marketplace ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = campaigns.iter().map(campaign_item).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Marketplace ({}) ", campaigns.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸");
    render_scrollable_list(frame, chunks[0], list, app.state.selected_index);

    if let Some(campaign) = campaigns.get(app.state.selected_index) {
        draw_detail(frame, chunks[1], campaign);
    }
}

fn campaign_item(campaign: &CampaignListing) -> ListItem<'static> {
    let progress = match campaign.progress_percent() {
        Some(pct) => Span::styled(
            format!("{pct:>3}% "),
            Style::default().fg(if pct >= 100 { Color::Green } else { Color::Yellow }),
        ),
        None => Span::styled("  -  ", Style::default().fg(Color::DarkGray)),
    };
    let category = campaign
        .category
        .as_deref()
        .map(|c| format!(" [{c}]"))
        .unwrap_or_default();
    ListItem::new(Line::from(vec![
        Span::raw(" "),
        progress,
        Span::styled(campaign.title.clone(), Style::default().fg(Color::White)),
        Span::styled(category, Style::default().fg(Color::DarkGray)),
    ]))
}

fn draw_detail(frame: &mut Frame, area: Rect, campaign: &CampaignListing) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::styled(
        campaign.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(tagline) = &campaign.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::raw(""));
    let raised = campaign.amount_raised.map(format_amount);
    let target = campaign.funding_target.map(format_amount);
    lines.push(Line::from(vec![
        Span::styled("Raised:   ", label),
        Span::raw(format!(
            "{} / {}",
            raised.as_deref().unwrap_or("-"),
            target.as_deref().unwrap_or("-")
        )),
    ]));
    if let Some(deadline) = &campaign.funding_deadline {
        lines.push(Line::from(vec![
            Span::styled("Deadline: ", label),
            Span::raw(deadline.clone()),
        ]));
    }

    let content = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Details ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(content, area);
}
