//! Field validation rules

use super::field::{FieldKind, FormField, DATE_FORMAT};
use chrono::{Months, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Per-field error messages keyed by field name
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Inputs validation needs from outside the form
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the local calendar day
    pub fn now() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

/// Range of dates a date picker lets the user select: today up to
/// `months_ahead` calendar months out, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub months_ahead: u32,
}

impl DateWindow {
    pub fn months_ahead(months_ahead: u32) -> Self {
        Self { months_ahead }
    }

    /// Last selectable date
    pub fn latest(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_months(Months::new(self.months_ahead))
            .unwrap_or(today)
    }

    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && date <= self.latest(today)
    }
}

/// A single validation rule attached to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    /// Absolute http(s) URL
    Url,
    Email,
    /// Minimum for whole-number fields
    Min(u64),
    DateWithin(DateWindow),
    /// Path to a readable file on disk
    ExistingFile,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

impl Rule {
    /// Check a non-empty, trimmed input against this rule
    fn check(&self, field: &FormField, input: &str, ctx: &ValidationContext) -> Result<(), String> {
        match self {
            Rule::Required => Ok(()),
            Rule::MinLen(min) => {
                if input.chars().count() < *min {
                    Err(format!("{} must be at least {min} characters", field.label))
                } else {
                    Ok(())
                }
            }
            Rule::MaxLen(max) => {
                if input.chars().count() > *max {
                    Err(format!("{} must be at most {max} characters", field.label))
                } else {
                    Ok(())
                }
            }
            Rule::Url => {
                if is_http_url(input) {
                    Ok(())
                } else {
                    Err("Enter a valid URL (https://...)".to_string())
                }
            }
            Rule::Email => {
                if email_regex().is_match(input) {
                    Ok(())
                } else {
                    Err("Enter a valid email address".to_string())
                }
            }
            Rule::Min(min) => match input.parse::<u64>() {
                Ok(n) if n >= *min => Ok(()),
                Ok(_) => Err(format!("{} must be at least {min}", field.label)),
                Err(_) => Err("Enter a whole number".to_string()),
            },
            Rule::DateWithin(window) => match NaiveDate::parse_from_str(input, DATE_FORMAT) {
                Ok(date) if window.is_selectable(date, ctx.today) => Ok(()),
                Ok(_) => Err(format!(
                    "Pick a date between {} and {}",
                    ctx.today.format(DATE_FORMAT),
                    window.latest(ctx.today).format(DATE_FORMAT)
                )),
                Err(_) => Err("Use the format YYYY-MM-DD".to_string()),
            },
            Rule::ExistingFile => {
                if Path::new(input).is_file() {
                    Ok(())
                } else {
                    Err(format!("No file found at {input}"))
                }
            }
        }
    }
}

/// Validate one field. Returns the first failing rule's message.
///
/// Empty optional fields pass without running their other rules.
pub fn validate_field(field: &FormField, ctx: &ValidationContext) -> Option<String> {
    let input = field.input.trim();
    if input.is_empty() {
        return field
            .is_required()
            .then(|| format!("{} is required", field.label));
    }

    if field.kind == FieldKind::Number && input.parse::<u64>().is_err() {
        return Some("Enter a whole number".to_string());
    }

    field
        .rules
        .iter()
        .find_map(|rule| rule.check(field, input, ctx).err())
}

/// Validate a set of fields, collecting every failure
pub fn validate_fields(fields: &[FormField], ctx: &ValidationContext) -> FieldErrors {
    fields
        .iter()
        .filter_map(|f| validate_field(f, ctx).map(|msg| (f.name, msg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
    }

    fn with_input(mut field: FormField, input: &str) -> FormField {
        field.input = input.to_string();
        field
    }

    #[test]
    fn test_required_empty_fails() {
        let field = FormField::text("title", "Title").required();
        assert_eq!(
            validate_field(&field, &ctx()),
            Some("Title is required".to_string())
        );
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let field = with_input(FormField::text("title", "Title").required(), "   ");
        assert!(validate_field(&field, &ctx()).is_some());
    }

    #[test]
    fn test_optional_empty_skips_rules() {
        let field = FormField::text("website", "Website").rule(Rule::Url);
        assert_eq!(validate_field(&field, &ctx()), None);
    }

    #[test]
    fn test_length_bounds() {
        let field = FormField::text("title", "Title")
            .rule(Rule::MinLen(3))
            .rule(Rule::MaxLen(5));
        assert!(validate_field(&with_input(field.clone(), "ab"), &ctx()).is_some());
        assert_eq!(validate_field(&with_input(field.clone(), "abcd"), &ctx()), None);
        assert!(validate_field(&with_input(field, "abcdef"), &ctx()).is_some());
    }

    #[test]
    fn test_url_rule() {
        let field = FormField::text("website", "Website").rule(Rule::Url);
        assert_eq!(
            validate_field(&with_input(field.clone(), "https://example.io"), &ctx()),
            None
        );
        assert!(validate_field(&with_input(field.clone(), "example.io"), &ctx()).is_some());
        assert!(validate_field(&with_input(field, "ftp://example.io"), &ctx()).is_some());
    }

    #[test]
    fn test_email_rule() {
        let field = FormField::text("email", "Email").rule(Rule::Email);
        assert_eq!(
            validate_field(&with_input(field.clone(), "ada@example.com"), &ctx()),
            None
        );
        assert!(validate_field(&with_input(field, "ada@example"), &ctx()).is_some());
    }

    #[test]
    fn test_number_minimum() {
        let field = FormField::number("target", "Funding target").rule(Rule::Min(1000));
        assert_eq!(
            validate_field(&with_input(field.clone(), "999"), &ctx()),
            Some("Funding target must be at least 1000".to_string())
        );
        assert_eq!(validate_field(&with_input(field, "100000"), &ctx()), None);
    }

    #[test]
    fn test_number_field_rejects_garbage_even_without_rules() {
        let field = with_input(FormField::number("amount", "Amount"), "12x");
        assert_eq!(
            validate_field(&field, &ctx()),
            Some("Enter a whole number".to_string())
        );
    }

    #[test]
    fn test_date_window_clamps_at_month_end() {
        // Jan 31 + 1 month lands on the last day of February
        let window = DateWindow::months_ahead(1);
        assert_eq!(
            window.latest(ctx().today),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_date_more_than_a_month_out_rejected() {
        let field = FormField::date("deadline", "Deadline", DateWindow::months_ahead(1));
        assert!(validate_field(&with_input(field.clone(), "2026-03-01"), &ctx()).is_some());
        assert_eq!(
            validate_field(&with_input(field.clone(), "2026-02-28"), &ctx()),
            None
        );
        assert_eq!(
            validate_field(&with_input(field, "not-a-date"), &ctx()),
            Some("Use the format YYYY-MM-DD".to_string())
        );
    }

    #[test]
    fn test_existing_file_rule() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let field = FormField::file("logo", "Logo").rule(Rule::ExistingFile);
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(validate_field(&with_input(field.clone(), &path), &ctx()), None);
        assert!(validate_field(&with_input(field.clone(), "/no/such/logo.png"), &ctx()).is_some());
        // Optional and empty is fine
        assert_eq!(validate_field(&field, &ctx()), None);
    }

    #[test]
    fn test_validate_fields_collects_all() {
        let fields = vec![
            FormField::text("title", "Title").required(),
            FormField::text("email", "Email").required().rule(Rule::Email),
            FormField::text("note", "Note"),
        ];
        let errors = validate_fields(&fields, &ctx());
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("email"));
    }
}
