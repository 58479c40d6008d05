//! Application state and core logic

use crate::api::{ApiError, ApiResponse, MarketplaceApi, GENERIC_ERROR};
use crate::config::TuiConfig;
use crate::flows::{AfterSubmit, WizardKind};
use crate::platform::is_shortcut;
use crate::state::{AppState, HomeAction, View};
use crate::wizard::{SubmitAttempt, ValidationContext, Wizard};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

type SubmissionResult = Result<ApiResponse, ApiError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Marketplace API
    api: Arc<dyn MarketplaceApi>,
    config: TuiConfig,
    /// Where the config is saved on sign in/out; `None` keeps it in memory
    config_path: Option<PathBuf>,
    /// Result of the submission running in the background
    pending: Option<oneshot::Receiver<SubmissionResult>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Arc<dyn MarketplaceApi>, config: TuiConfig, config_path: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        state.user_id = config.user_id().map(str::to_string);
        if state.user_id.is_none() {
            state.current_view = View::Login;
        }
        Self {
            state,
            api,
            config,
            config_path,
            pending: None,
            quit: false,
        }
    }

    /// Load the data the home view shows
    pub async fn start(&mut self) {
        if self.state.user_id.is_some() {
            self.refresh_onboarding().await;
        }
        if let Err(e) = self.load_campaigns().await {
            tracing::warn!("Initial campaign load failed: {e}");
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await?,
            View::Home => self.handle_home_key(key).await?,
            View::Marketplace => self.handle_marketplace_key(key).await?,
            View::Wizard => self.handle_wizard_key(key).await?,
        }
        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view != view {
            self.state.view_history.push(self.state.current_view);
        }
        self.state.current_view = view;
        self.state.reset_selection();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.reset_selection();
            return;
        }
        if self.state.current_view == View::Wizard {
            self.state.current_view = if self.state.user_id.is_some() {
                View::Home
            } else {
                View::Login
            };
        }
    }

    async fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('e') if is_shortcut(&key) => {
                self.open_wizard(WizardKind::EarlyAccess).await;
            }
            KeyCode::Char(c) if !is_shortcut(&key) => self.state.login_input.push(c),
            KeyCode::Backspace => {
                self.state.login_input.pop();
            }
            KeyCode::Enter => self.sign_in().await,
            KeyCode::Esc => {
                if self.state.user_id.is_some() {
                    self.go_back();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        let actions = self.state.home_actions();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(actions.len()),
            KeyCode::Enter => {
                if let Some(action) = actions.get(self.state.selected_index).copied() {
                    self.run_home_action(action).await;
                }
            }
            KeyCode::Char('m') => self.run_home_action(HomeAction::Browse).await,
            KeyCode::Char('r') => self.refresh_onboarding().await,
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    async fn run_home_action(&mut self, action: HomeAction) {
        match action {
            HomeAction::Browse => {
                self.navigate(View::Marketplace);
                if self.state.campaigns.is_empty() {
                    self.reload_campaigns().await;
                }
            }
            HomeAction::Open(kind) => self.open_wizard(kind).await,
            HomeAction::SignOut => self.sign_out(),
        }
    }

    async fn handle_marketplace_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.state.campaigns.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(count),
            KeyCode::Char('r') => self.reload_campaigns().await,
            KeyCode::Char('n') => self.open_wizard(WizardKind::Campaign).await,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.go_back(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let today = ValidationContext::now().today;
        let Some(wizard) = self.state.wizard.as_mut() else {
            self.go_back();
            return Ok(());
        };
        // Keys are ignored while a submission is in flight
        if wizard.is_submitting() {
            return Ok(());
        }
        let multiline = wizard.focused_field().is_some_and(|f| f.is_multiline());

        match key.code {
            KeyCode::Char('s') if is_shortcut(&key) => self.submit_wizard(),
            KeyCode::Char('a') if is_shortcut(&key) => {
                if let Some(records) = wizard.records_mut() {
                    if !records.add_and_select() {
                        self.state.status_message =
                            Some(format!("At most {} entries", records.bounds().1));
                    }
                }
            }
            KeyCode::Char('d') if is_shortcut(&key) => {
                if let Some(records) = wizard.records_mut() {
                    if !records.remove_selected() {
                        self.state.status_message =
                            Some(format!("At least {} entry required", records.bounds().0));
                    }
                }
            }
            KeyCode::Char('b') if is_shortcut(&key) => {
                wizard.go_back();
            }
            KeyCode::Tab => wizard.next_field(),
            KeyCode::BackTab => wizard.prev_field(),
            KeyCode::Left => wizard.adjust_active(false, today),
            KeyCode::Right => wizard.adjust_active(true, today),
            KeyCode::Up | KeyCode::Down => {
                if let Some(records) = wizard.records_mut() {
                    if key.code == KeyCode::Up {
                        records.selected = records.selected.saturating_sub(1);
                    } else if records.selected + 1 < records.len() {
                        records.selected += 1;
                    }
                    records.active_field = 0;
                } else if key.code == KeyCode::Up {
                    wizard.prev_field();
                } else {
                    wizard.next_field();
                }
            }
            KeyCode::Enter if multiline => wizard.newline(),
            KeyCode::Enter => self.submit_wizard(),
            KeyCode::Esc => {
                if !wizard.go_back() {
                    self.close_wizard();
                }
            }
            KeyCode::Backspace => wizard.backspace(),
            KeyCode::Char(c) if !is_shortcut(&key) => wizard.input_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Open a wizard, pre-filling it when it edits stored details
    pub async fn open_wizard(&mut self, kind: WizardKind) {
        let needs_identity = kind != WizardKind::EarlyAccess;
        if needs_identity && self.state.user_id.is_none() {
            self.state.status_message = Some("Sign in to continue".to_string());
            self.navigate(View::Login);
            return;
        }

        let mut wizard = Wizard::new(kind);
        if kind.prefills_personal_details() {
            if let Some(user_id) = self.state.user_id.clone() {
                match self.api.personal_details(&user_id).await {
                    Ok(stored) if stored.is_empty() => tracing::debug!("No stored details"),
                    Ok(stored) => wizard.prefill(stored),
                    Err(e) => tracing::warn!("Could not load stored details: {e}"),
                }
            }
        }
        tracing::debug!("Opening {}", kind.title());
        self.state.wizard = Some(wizard);
        self.navigate(View::Wizard);
    }

    fn close_wizard(&mut self) {
        self.state.wizard = None;
        self.go_back();
    }

    /// Advance the active wizard, or submit it from the last step
    pub fn submit_wizard(&mut self) {
        let ctx = ValidationContext::now();
        let user_id = self.state.user_id.clone();
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        match wizard.submit(&ctx, user_id.as_deref()) {
            SubmitAttempt::Send(request) => {
                let api = Arc::clone(&self.api);
                let (tx, rx) = oneshot::channel();
                tokio::spawn(async move {
                    // The receiver is gone only if the app has shut down
                    let _ = tx.send(api.submit(request).await);
                });
                self.pending = Some(rx);
            }
            SubmitAttempt::InFlight => {}
            SubmitAttempt::NotFinalStep => {
                wizard.go_next(&ctx);
            }
            SubmitAttempt::Invalid { step } => {
                self.state.status_message =
                    Some(format!("Fix the highlighted fields on step {}", step + 1));
            }
            SubmitAttempt::Failed(message) => self.push_error(message),
        }
    }

    /// Pick up the result of a finished submission, if any
    pub async fn poll_submission(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(ApiError::Http {
                status: 0,
                message: GENERIC_ERROR.to_string(),
            }),
        };
        self.pending = None;
        self.finish_submission(result).await;
    }

    #[cfg(test)]
    async fn wait_for_submission(&mut self) {
        if let Some(rx) = self.pending.take() {
            let result = rx.await.unwrap_or_else(|_| {
                Err(ApiError::Http {
                    status: 0,
                    message: GENERIC_ERROR.to_string(),
                })
            });
            self.finish_submission(result).await;
        }
    }

    async fn finish_submission(&mut self, result: SubmissionResult) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        let kind = wizard.kind;
        match result {
            Ok(response) => {
                tracing::info!("{} submitted ({})", kind.title(), response.status);
                wizard.finish_submit(Ok(()));
                self.state.wizard = None;
                match kind.after_submit() {
                    AfterSubmit::Marketplace => {
                        self.go_back();
                        if self.state.current_view != View::Marketplace {
                            self.navigate(View::Marketplace);
                        }
                        if let Err(e) = self.load_campaigns().await {
                            tracing::warn!("Could not refresh campaigns: {e}");
                        }
                    }
                    AfterSubmit::Home => {
                        if kind == WizardKind::Profile {
                            self.refresh_onboarding().await;
                        }
                        self.go_back();
                    }
                }
                self.state.status_message = Some(kind.success_message().to_string());
            }
            Err(e) if e.is_missing_identity() => {
                wizard.finish_submit(Err(e.user_message()));
                self.state.status_message = Some("Sign in to continue".to_string());
                self.navigate(View::Login);
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), "{} submission failed: {e}", kind.title());
                let message = e.user_message();
                wizard.finish_submit(Err(message.clone()));
                self.push_error(message);
            }
        }
    }

    /// Sign in with the typed user id
    pub async fn sign_in(&mut self) {
        let user_id = self.state.login_input.trim().to_string();
        if user_id.is_empty() {
            self.push_error("Enter your user id");
            return;
        }
        tracing::info!("Signed in as {user_id}");
        self.state.user_id = Some(user_id.clone());
        self.config.user_id = Some(user_id);
        self.save_config();
        self.refresh_onboarding().await;

        if self.state.wizard.is_some() {
            // Resume the wizard that needed an identity
            self.state.current_view = View::Wizard;
        } else {
            self.state.view_history.clear();
            self.state.current_view = View::Home;
            self.state.reset_selection();
        }
    }

    pub fn sign_out(&mut self) {
        tracing::info!("Signed out");
        self.state.clear_identity();
        self.config.user_id = None;
        self.save_config();
        self.state.current_view = View::Login;
    }

    fn save_config(&self) {
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::warn!("Could not save config: {e}");
            }
        }
    }

    /// Fetch onboarding status for the signed-in user
    pub async fn refresh_onboarding(&mut self) {
        let Some(user_id) = self.state.user_id.clone() else {
            return;
        };
        match self.api.onboarding_status(&user_id).await {
            Ok(status) => {
                if !status.completed {
                    self.state.status_message =
                        Some("Finish your profile to unlock the marketplace".to_string());
                }
                self.state.onboarding = Some(status);
            }
            Err(e) => {
                tracing::warn!("Could not load onboarding status: {e}");
                self.state.status_message = Some(e.user_message());
            }
        }
    }

    async fn load_campaigns(&mut self) -> Result<(), ApiError> {
        let campaigns = self.api.list_campaigns().await?;
        tracing::debug!("Loaded {} campaigns", campaigns.len());
        self.state.campaigns = campaigns;
        self.state.reset_selection();
        Ok(())
    }

    /// Reload campaigns, reporting failures in the error dialog
    async fn reload_campaigns(&mut self) {
        if let Err(e) = self.load_campaigns().await {
            self.push_error(e.user_message());
        }
    }
}
