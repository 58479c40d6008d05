//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;
mod login;
mod marketplace;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.state.current_view == View::Login {
        let main_area = layout::create_layout_no_sidebar(area);
        login::draw(frame, main_area, app);
    } else {
        let (sidebar_area, main_area) = layout::create_layout(area);
        layout::draw_sidebar(frame, sidebar_area, app);

        match app.state.current_view {
            View::Home => home::draw(frame, main_area, app),
            View::Marketplace => marketplace::draw(frame, main_area, app),
            View::Wizard => forms::draw_wizard(frame, main_area, app),
            View::Login => {}
        }
    }

    layout::draw_status_bar(frame, app);

    // Error modal goes on top of everything
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.queued_errors());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CampaignListing, MockMarketplaceApi};
    use crate::config::TuiConfig;
    use crate::flows::WizardKind;
    use crate::wizard::Wizard;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app(user_id: Option<&str>) -> App {
        let config = TuiConfig {
            user_id: user_id.map(str::to_string),
            ..Default::default()
        };
        App::new(Arc::new(MockMarketplaceApi::new()), config, None)
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_login_screen_renders() {
        let screen = render(&app(None));
        assert!(screen.contains("Sign in"));
        assert!(screen.contains("User id"));
    }

    #[test]
    fn test_home_lists_actions() {
        let screen = render(&app(Some("u-1")));
        assert!(screen.contains("Browse campaigns"));
        assert!(screen.contains("Sign out"));
    }

    #[test]
    fn test_marketplace_shows_campaigns() {
        let mut app = app(Some("u-1"));
        app.state.campaigns = vec![CampaignListing {
            id: "c1".to_string(),
            title: "Solar Grid".to_string(),
            tagline: None,
            category: Some("Energy".to_string()),
            funding_target: Some(10_000.0),
            amount_raised: Some(2_500.0),
            funding_deadline: None,
        }];
        app.navigate(View::Marketplace);
        let screen = render(&app);
        assert!(screen.contains("Solar Grid"));
        assert!(screen.contains("25%"));
    }

    #[test]
    fn test_wizard_shows_step_and_errors() {
        let mut app = app(Some("u-1"));
        app.state.wizard = Some(Wizard::new(WizardKind::EarlyAccess));
        app.navigate(View::Wizard);
        let screen = render(&app);
        assert!(screen.contains("Step 1/1"));
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_error_dialog_overlays_view() {
        let mut app = app(Some("u-1"));
        app.push_error("Network unreachable");
        let screen = render(&app);
        assert!(screen.contains("Network unreachable"));
    }
}
