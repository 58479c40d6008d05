//! Application state definitions

use crate::api::{CampaignListing, OnboardingStatus, Role};
use crate::flows::WizardKind;
use crate::wizard::Wizard;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Enter the user id used as identity
    Login,
    #[default]
    Home,
    Marketplace,
    /// The wizard held in [`AppState::wizard`]
    Wizard,
}

impl View {
    /// Views skipped when going back through history
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Wizard | View::Login)
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Home => "Home",
            View::Marketplace => "Marketplace",
            View::Wizard => "Wizard",
        }
    }
}

/// Entry points offered on the home dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    Browse,
    Open(WizardKind),
    SignOut,
}

impl HomeAction {
    pub fn label(&self) -> &'static str {
        match self {
            HomeAction::Browse => "Browse campaigns",
            HomeAction::Open(kind) => kind.title(),
            HomeAction::SignOut => "Sign out",
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Identity
    pub user_id: Option<String>,
    pub onboarding: Option<OnboardingStatus>,
    pub login_input: String,

    // Data
    pub campaigns: Vec<CampaignListing>,
    pub wizard: Option<Wizard>,

    // Selection
    pub selected_index: usize,

    // Feedback
    pub status_message: Option<String>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_queue.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Errors waiting behind the one shown
    pub fn queued_errors(&self) -> usize {
        self.error_queue.len().saturating_sub(1)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn role(&self) -> Option<Role> {
        self.onboarding.as_ref().and_then(|o| o.role)
    }

    /// Signed in but profile setup not finished
    pub fn needs_profile_setup(&self) -> bool {
        self.user_id.is_some() && self.onboarding.as_ref().is_some_and(|o| !o.completed)
    }

    /// Actions on the home dashboard for the current role.
    ///
    /// Founder flows are hidden only when the role is known and not a founder.
    pub fn home_actions(&self) -> Vec<HomeAction> {
        let founder = matches!(self.role(), None | Some(Role::Founder));
        let mut actions = vec![HomeAction::Browse];
        if self.needs_profile_setup() {
            actions.insert(0, HomeAction::Open(WizardKind::Profile));
        } else {
            actions.push(HomeAction::Open(WizardKind::Profile));
        }
        if founder {
            actions.push(HomeAction::Open(WizardKind::Campaign));
            actions.push(HomeAction::Open(WizardKind::Startup));
        }
        actions.push(HomeAction::Open(WizardKind::EarlyAccess));
        actions.push(HomeAction::SignOut);
        actions
    }

    /// Forget the signed-in user
    pub fn clear_identity(&mut self) {
        self.user_id = None;
        self.onboarding = None;
        self.login_input.clear();
        self.wizard = None;
        self.view_history.clear();
    }
}
