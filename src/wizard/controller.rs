//! Generic multi-step wizard
//!
//! Every multi-step form in the client (campaign, profile, startup setup, early
//! access) is a [`Wizard`] over a list of [`Step`]s. A step is either a set of
//! fields or a bounded record list; the wizard validates the active step before
//! advancing and assembles the final request on submit.

use super::field::{FieldKind, FormField, FormValues};
use super::list_editor::ListEditor;
use super::validation::{validate_fields, FieldErrors, ValidationContext};
use crate::api::{ApiRequest, StoredDetails};
use crate::flows::{SubmitContext, WizardKind};
use chrono::NaiveDate;

/// Body of a wizard step
#[derive(Debug, Clone)]
pub enum StepBody {
    Fields(Vec<FormField>),
    /// Record list submitted under `name`
    Records {
        name: &'static str,
        editor: ListEditor,
    },
}

/// One screen of a wizard
#[derive(Debug, Clone)]
pub struct Step {
    pub title: &'static str,
    pub body: StepBody,
}

impl Step {
    pub fn fields(title: &'static str, fields: Vec<FormField>) -> Self {
        Self {
            title,
            body: StepBody::Fields(fields),
        }
    }

    pub fn records(title: &'static str, name: &'static str, editor: ListEditor) -> Self {
        Self {
            title,
            body: StepBody::Records { name, editor },
        }
    }

    /// Validate this step; record lists keep their per-record errors internally
    fn validate(&mut self, ctx: &ValidationContext) -> FieldErrors {
        match &mut self.body {
            StepBody::Fields(fields) => validate_fields(fields, ctx),
            StepBody::Records { name, editor } => {
                let result = editor.validate_all(ctx);
                let mut errors = FieldErrors::new();
                if !result.valid {
                    errors.insert(
                        *name,
                        format!("Complete every {} entry", editor.item_label),
                    );
                }
                errors
            }
        }
    }

    /// Merge this step's current values into `values`; emptied fields are removed
    fn merge_into(&self, values: &mut FormValues) {
        match &self.body {
            StepBody::Fields(fields) => {
                for field in fields {
                    match field.value() {
                        Some(value) => {
                            values.insert(field.name.to_string(), value);
                        }
                        None => {
                            values.remove(field.name);
                        }
                    }
                }
            }
            StepBody::Records { name, editor } => {
                values.insert(name.to_string(), editor.value());
            }
        }
    }
}

/// Submission lifecycle of one wizard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Result of asking the wizard to submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// Send this request; the wizard is now `Submitting`
    Send(ApiRequest),
    /// A submission is already in flight
    InFlight,
    /// Submit is only available on the last step
    NotFinalStep,
    /// Validation failed; the wizard now shows `step`
    Invalid { step: usize },
    /// The payload could not be assembled
    Failed(String),
}

/// Multi-step form state machine
#[derive(Debug, Clone)]
pub struct Wizard {
    pub kind: WizardKind,
    steps: Vec<Step>,
    current: usize,
    /// Focused field within a fields step
    pub active_field: usize,
    errors: FieldErrors,
    values: FormValues,
    stored: StoredDetails,
    phase: SubmitPhase,
}

impl Wizard {
    pub fn new(kind: WizardKind) -> Self {
        Self::with_steps(kind, kind.steps())
    }

    pub fn with_steps(kind: WizardKind, steps: Vec<Step>) -> Self {
        Self {
            kind,
            steps,
            current: 0,
            active_field: 0,
            errors: FieldErrors::new(),
            values: FormValues::new(),
            stored: StoredDetails::default(),
            phase: SubmitPhase::Idle,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    fn current_step_mut(&mut self) -> &mut Step {
        &mut self.steps[self.current]
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Values accumulated from the steps that have been advanced past
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn stored(&self) -> &StoredDetails {
        &self.stored
    }

    /// Validate the active step and advance when it passes.
    ///
    /// Returns whether the step index changed. On the last step a valid form
    /// stays where it is.
    pub fn go_next(&mut self, ctx: &ValidationContext) -> bool {
        if self.is_submitting() {
            return false;
        }
        let errors = self.current_step_mut().validate(ctx);
        if !errors.is_empty() {
            tracing::debug!(
                "{} step {} has {} invalid field(s)",
                self.kind.title(),
                self.current + 1,
                errors.len()
            );
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        self.steps[self.current].merge_into(&mut self.values);
        if self.is_last_step() {
            return false;
        }
        self.current += 1;
        self.active_field = 0;
        true
    }

    /// Return to the previous step without validating
    pub fn go_back(&mut self) -> bool {
        if self.is_submitting() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.active_field = 0;
        self.errors.clear();
        true
    }

    /// Validate every step, merge all values, adjust and build the request.
    ///
    /// Steps are re-validated from the first one because going back skips
    /// validation; the first invalid step becomes the current step.
    pub fn submit(&mut self, ctx: &ValidationContext, user_id: Option<&str>) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::InFlight;
        }
        if !self.is_last_step() {
            return SubmitAttempt::NotFinalStep;
        }

        let mut merged = FormValues::new();
        for index in 0..self.steps.len() {
            let errors = self.steps[index].validate(ctx);
            if !errors.is_empty() {
                self.current = index;
                self.active_field = 0;
                self.errors = errors;
                return SubmitAttempt::Invalid { step: index };
            }
            self.steps[index].merge_into(&mut merged);
        }
        self.errors.clear();
        self.kind.adjust(&mut merged);
        self.values = merged;

        let submit_ctx = SubmitContext {
            user_id,
            stored: &self.stored,
        };
        match self.kind.build_request(&self.values, &submit_ctx) {
            Ok(request) => {
                tracing::info!("Submitting {}", self.kind.title());
                self.phase = SubmitPhase::Submitting;
                SubmitAttempt::Send(request)
            }
            Err(message) => {
                self.phase = SubmitPhase::Failed(message.clone());
                SubmitAttempt::Failed(message)
            }
        }
    }

    /// Record the outcome of the request returned by [`Wizard::submit`]
    pub fn finish_submit(&mut self, result: Result<(), String>) {
        self.phase = match result {
            Ok(()) => SubmitPhase::Succeeded,
            Err(message) => SubmitPhase::Failed(message),
        };
    }

    /// Fill fields and record lists from stored details and remember stored file URLs
    pub fn prefill(&mut self, stored: StoredDetails) {
        for step in &mut self.steps {
            match &mut step.body {
                StepBody::Fields(fields) => {
                    for field in fields.iter_mut() {
                        if field.kind == FieldKind::File {
                            continue;
                        }
                        if let Some(value) = stored.get(field.name) {
                            field.set_input(value);
                        }
                    }
                }
                StepBody::Records { name, editor } => {
                    if let Some(entries) = stored.records(*name) {
                        editor.load(&entries);
                    }
                }
            }
        }
        self.stored = stored;
    }

    /// Move focus to the next field of the current step
    pub fn next_field(&mut self) {
        let current = self.current;
        match &mut self.steps[current].body {
            StepBody::Fields(fields) => {
                if !fields.is_empty() {
                    self.active_field = (self.active_field + 1) % fields.len();
                }
            }
            StepBody::Records { editor, .. } => editor.next_field(),
        }
    }

    /// Move focus to the previous field of the current step
    pub fn prev_field(&mut self) {
        let current = self.current;
        match &mut self.steps[current].body {
            StepBody::Fields(fields) => {
                if !fields.is_empty() {
                    self.active_field = if self.active_field == 0 {
                        fields.len() - 1
                    } else {
                        self.active_field - 1
                    };
                }
            }
            StepBody::Records { editor, .. } => editor.prev_field(),
        }
    }

    /// Focused field of the current step
    pub fn focused_field(&self) -> Option<&FormField> {
        match &self.current_step().body {
            StepBody::Fields(fields) => fields.get(self.active_field),
            StepBody::Records { editor, .. } => editor
                .selected_record()
                .and_then(|r| r.fields.get(editor.active_field)),
        }
    }

    /// Apply `edit` to the focused field and clear its error
    fn edit_active(&mut self, edit: impl FnOnce(&mut FormField)) {
        if self.is_submitting() {
            return;
        }
        let active = self.active_field;
        let mut edited = None;
        match &mut self.steps[self.current].body {
            StepBody::Fields(fields) => {
                if let Some(field) = fields.get_mut(active) {
                    edit(field);
                    edited = Some(field.name);
                }
            }
            StepBody::Records { name, editor } => {
                editor.edit_active(edit);
                if editor.errors().is_empty() {
                    edited = Some(*name);
                }
            }
        }
        if let Some(name) = edited {
            self.errors.remove(name);
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_active(|f| f.push_char(c));
    }

    pub fn backspace(&mut self) {
        self.edit_active(FormField::pop_char);
    }

    pub fn newline(&mut self) {
        self.edit_active(FormField::newline);
    }

    /// Left/Right on the focused field: cycle a choice or step a date by a day
    pub fn adjust_active(&mut self, forward: bool, today: NaiveDate) {
        self.edit_active(|f| match f.kind {
            FieldKind::Choice(_) => f.cycle_choice(forward),
            FieldKind::Date(_) => {
                f.step_date(if forward { 1 } else { -1 }, today);
            }
            _ => {}
        });
    }

    /// Set a field on the current step by name
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let current = self.current;
        let StepBody::Fields(fields) = &mut self.steps[current].body else {
            return false;
        };
        let Some(field) = fields.iter_mut().find(|f| f.name == name) else {
            return false;
        };
        field.set_input(value);
        let name = field.name;
        self.errors.remove(name);
        true
    }

    /// Record list of the current step, if it is a records step
    pub fn records_mut(&mut self) -> Option<&mut ListEditor> {
        if self.is_submitting() {
            return None;
        }
        match &mut self.current_step_mut().body {
            StepBody::Records { editor, .. } => Some(editor),
            StepBody::Fields(_) => None,
        }
    }

    pub fn records(&self) -> Option<&ListEditor> {
        match &self.current_step().body {
            StepBody::Records { editor, .. } => Some(editor),
            StepBody::Fields(_) => None,
        }
    }
}
