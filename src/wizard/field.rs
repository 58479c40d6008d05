//! Form field value objects

use super::validation::{DateWindow, Rule};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Date format accepted by date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What kind of input a field accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Whole-number amount (digits only)
    Number,
    /// Date typed as YYYY-MM-DD or stepped with the picker
    Date(DateWindow),
    /// One of a fixed set of options, cycled with Left/Right
    Choice(&'static [&'static str]),
    /// Local file path to upload
    File,
}

/// Typed value produced from a field once it has passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    Date(NaiveDate),
    Records(Vec<BTreeMap<String, String>>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn normalize_option(value: &str) -> String {
    value.trim().to_lowercase().replace(['_', '-'], " ")
}

/// Accumulated wizard values keyed by field name
pub type FormValues = BTreeMap<String, FieldValue>;

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
    pub input: String,
}

impl FormField {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rules: Vec::new(),
            input: String::new(),
        }
    }

    /// Create a new single-line text field
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Create a new multiline text field
    pub fn multiline(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Multiline)
    }

    /// Create a new whole-number field
    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    /// Create a new date field with a selectable window
    pub fn date(name: &'static str, label: &'static str, window: DateWindow) -> Self {
        let mut field = Self::new(name, label, FieldKind::Date(window));
        field.rules.push(Rule::DateWithin(window));
        field
    }

    /// Create a new choice field; the first option is preselected
    pub fn choice(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        let mut field = Self::new(name, label, FieldKind::Choice(options));
        field.input = options.first().map(|o| o.to_string()).unwrap_or_default();
        field
    }

    /// Create a new file path field
    pub fn file(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::File)
    }

    /// Add a validation rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Shorthand for `rule(Rule::Required)`
    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline)
    }

    /// Set the raw input. Choice fields only accept one of their options,
    /// matched ignoring case and `_`/`-` separators (`service_provider`).
    pub fn set_input(&mut self, value: impl Into<String>) {
        let value = value.into();
        if let FieldKind::Choice(options) = self.kind {
            let wanted = normalize_option(&value);
            if let Some(option) = options.iter().find(|o| normalize_option(o) == wanted) {
                self.input = option.to_string();
            }
            return;
        }
        self.input = value;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match self.kind {
            FieldKind::Text | FieldKind::Multiline | FieldKind::File => self.input.push(c),
            FieldKind::Number => {
                if c.is_ascii_digit() {
                    self.input.push(c);
                }
            }
            FieldKind::Date(_) => {
                if (c.is_ascii_digit() || c == '-') && self.input.len() < 10 {
                    self.input.push(c);
                }
            }
            FieldKind::Choice(_) => {}
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if !matches!(self.kind, FieldKind::Choice(_)) {
            self.input.pop();
        }
    }

    /// Insert a newline (multiline fields only)
    pub fn newline(&mut self) {
        if self.is_multiline() {
            self.input.push('\n');
        }
    }

    /// Cycle a choice field forward or backward
    pub fn cycle_choice(&mut self, forward: bool) {
        let FieldKind::Choice(options) = self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| *o == self.input)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else if current == 0 {
            options.len() - 1
        } else {
            current - 1
        };
        self.input = options[next].to_string();
    }

    /// Move a date field by `days`, staying inside the selectable window.
    ///
    /// An empty or unparsable field starts from `today`; a date outside the
    /// window snaps to its nearest end. Returns false when the target date is
    /// not selectable and the value was left unchanged.
    pub fn step_date(&mut self, days: i64, today: NaiveDate) -> bool {
        let FieldKind::Date(window) = self.kind else {
            return false;
        };
        let current = NaiveDate::parse_from_str(&self.input, DATE_FORMAT).ok();
        let latest = window.latest(today);
        let target = match current {
            Some(date) if date < today => today,
            Some(date) if date > latest => latest,
            Some(date) => date + Duration::days(days),
            None => today,
        };
        if !window.is_selectable(target, today) {
            return false;
        }
        self.input = target.format(DATE_FORMAT).to_string();
        true
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Choice(_) => format!("◂ {} ▸", self.input),
            _ => self.input.clone(),
        }
    }

    /// Convert the raw input into a typed value.
    ///
    /// Returns `None` for empty input or input that does not parse; callers
    /// validate first, so a `None` here means "leave it out of the payload".
    pub fn value(&self) -> Option<FieldValue> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self.kind {
            FieldKind::Number => trimmed.parse().ok().map(FieldValue::Number),
            FieldKind::Date(_) => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .map(FieldValue::Date),
            FieldKind::Multiline => Some(FieldValue::Text(self.input.trim_end().to_string())),
            _ => Some(FieldValue::Text(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STAGES: &[&str] = &["Idea", "MVP", "Growth"];

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_number_field_ignores_non_digits() {
        let mut field = FormField::number("target", "Target");
        for c in "1a0,0x0".chars() {
            field.push_char(c);
        }
        assert_eq!(field.input, "1000");
        assert_eq!(field.value(), Some(FieldValue::Number(1000)));
    }

    #[test]
    fn test_choice_defaults_to_first_option() {
        let field = FormField::choice("stage", "Stage", STAGES);
        assert_eq!(field.input, "Idea");
        assert_eq!(field.display_value(), "◂ Idea ▸");
    }

    #[test]
    fn test_choice_cycles_both_ways() {
        let mut field = FormField::choice("stage", "Stage", STAGES);
        field.cycle_choice(false);
        assert_eq!(field.input, "Growth");
        field.cycle_choice(true);
        assert_eq!(field.input, "Idea");
        field.cycle_choice(true);
        assert_eq!(field.input, "MVP");
    }

    #[test]
    fn test_choice_rejects_typing_and_unknown_values() {
        let mut field = FormField::choice("stage", "Stage", STAGES);
        field.push_char('x');
        field.pop_char();
        field.set_input("Series Z");
        assert_eq!(field.input, "Idea");
        field.set_input("MVP");
        assert_eq!(field.input, "MVP");
    }

    #[test]
    fn test_choice_accepts_wire_spelling() {
        let mut field = FormField::choice("role", "Role", &["Founder", "Service Provider"]);
        field.set_input("service_provider");
        assert_eq!(field.input, "Service Provider");
    }

    #[test]
    fn test_multiline_newline_only_for_multiline() {
        let mut text = FormField::text("title", "Title");
        text.newline();
        assert_eq!(text.input, "");

        let mut body = FormField::multiline("bio", "Bio");
        body.push_char('a');
        body.newline();
        body.push_char('b');
        assert_eq!(body.input, "a\nb");
    }

    #[test]
    fn test_step_date_starts_at_today() {
        let mut field = FormField::date("deadline", "Deadline", DateWindow::months_ahead(1));
        assert!(field.step_date(1, today()));
        assert_eq!(field.input, "2026-03-10");
        assert!(field.step_date(1, today()));
        assert_eq!(field.input, "2026-03-11");
    }

    #[test]
    fn test_step_date_cannot_pass_one_month() {
        let mut field = FormField::date("deadline", "Deadline", DateWindow::months_ahead(1));
        field.set_input("2026-04-10");
        assert!(!field.step_date(1, today()));
        assert_eq!(field.input, "2026-04-10");
    }

    #[test]
    fn test_step_date_cannot_go_into_the_past() {
        let mut field = FormField::date("deadline", "Deadline", DateWindow::months_ahead(1));
        field.set_input("2026-03-10");
        assert!(!field.step_date(-1, today()));
        assert_eq!(field.input, "2026-03-10");
    }

    #[test]
    fn test_step_date_snaps_stale_value_into_window() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
        let mut field = FormField::date("deadline", "Deadline", DateWindow::months_ahead(1));
        field.set_input("2026-06-30");
        assert!(field.step_date(-1, today));
        assert_eq!(field.input, "2026-05-15");

        field.set_input("2026-04-01");
        assert!(field.step_date(1, today));
        assert_eq!(field.input, "2026-04-15");
    }

    #[test]
    fn test_date_value_parses() {
        let mut field = FormField::date("deadline", "Deadline", DateWindow::months_ahead(1));
        field.set_input("2026-03-20");
        assert_eq!(
            field.value(),
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()))
        );
    }

    #[test]
    fn test_empty_value_is_none() {
        let field = FormField::text("tagline", "Tagline");
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let value = FieldValue::Date(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
        assert_eq!(serde_json::to_value(&value).unwrap(), serde_json::json!("2026-03-20"));
        assert_eq!(
            serde_json::to_value(FieldValue::Number(5)).unwrap(),
            serde_json::json!(5)
        );
    }
}
