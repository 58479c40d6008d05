//! Concrete wizards offered by the client
//!
//! Each flow module describes its steps, the cross-field adjustments applied
//! before submission, and how the merged values become an [`ApiRequest`].

pub mod campaign;
pub mod early_access;
pub mod profile;
pub mod startup;

use crate::api::{ApiRequest, StoredDetails};
use crate::wizard::{FieldValue, FormValues, Step};
use std::path::Path;

/// Inputs a flow needs besides the form values
#[derive(Debug, Clone, Copy)]
pub struct SubmitContext<'a> {
    pub user_id: Option<&'a str>,
    /// Details submitted earlier; file fields fall back to their stored URLs
    pub stored: &'a StoredDetails,
}

/// Where the client goes after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSubmit {
    Home,
    Marketplace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardKind {
    Campaign,
    Profile,
    Startup,
    EarlyAccess,
}

impl WizardKind {
    pub const ALL: [WizardKind; 4] = [
        WizardKind::Campaign,
        WizardKind::Startup,
        WizardKind::Profile,
        WizardKind::EarlyAccess,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            WizardKind::Campaign => "Create Campaign",
            WizardKind::Profile => "Profile Setup",
            WizardKind::Startup => "Startup Setup",
            WizardKind::EarlyAccess => "Early Access",
        }
    }

    pub fn steps(&self) -> Vec<Step> {
        match self {
            WizardKind::Campaign => campaign::steps(),
            WizardKind::Profile => profile::steps(),
            WizardKind::Startup => startup::steps(),
            WizardKind::EarlyAccess => early_access::steps(),
        }
    }

    /// Cross-field adjustments applied to the merged values before sending
    pub fn adjust(&self, values: &mut FormValues) {
        if let WizardKind::Campaign = self {
            campaign::adjust(values);
        }
    }

    pub fn build_request(
        &self,
        values: &FormValues,
        ctx: &SubmitContext<'_>,
    ) -> Result<ApiRequest, String> {
        let built = match self {
            WizardKind::Campaign => campaign::build_request(values, ctx),
            WizardKind::Profile => profile::build_request(values, ctx),
            WizardKind::Startup => startup::build_request(values, ctx),
            WizardKind::EarlyAccess => early_access::build_request(values),
        };
        built.map_err(|e| format!("Could not prepare {}: {e}", self.title()))
    }

    /// Whether the wizard should be pre-filled from stored personal details
    pub fn prefills_personal_details(&self) -> bool {
        matches!(self, WizardKind::Profile)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            WizardKind::Campaign => "Campaign created",
            WizardKind::Profile => "Profile saved",
            WizardKind::Startup => "Startup details saved",
            WizardKind::EarlyAccess => "You're on the early access list",
        }
    }

    pub fn after_submit(&self) -> AfterSubmit {
        match self {
            WizardKind::Campaign => AfterSubmit::Marketplace,
            _ => AfterSubmit::Home,
        }
    }
}

/// Text value of `name`, or an empty string
pub(crate) fn text<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).and_then(FieldValue::as_text).unwrap_or("")
}

/// Local file path entered for `name`, if any
pub(crate) fn path<'a>(values: &'a FormValues, name: &str) -> Option<&'a Path> {
    values
        .get(name)
        .and_then(FieldValue::as_text)
        .map(Path::new)
}

/// Stored URL for a file field, under `{name}_url` or `{name}`
pub(crate) fn stored_url<'a>(stored: &'a StoredDetails, name: &str) -> Option<&'a str> {
    stored
        .get(&format!("{name}_url"))
        .or_else(|| stored.get(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_kind_has_steps() {
        for kind in WizardKind::ALL {
            assert!(!kind.steps().is_empty(), "{} has no steps", kind.title());
        }
    }

    #[test]
    fn test_after_submit() {
        assert_eq!(WizardKind::Campaign.after_submit(), AfterSubmit::Marketplace);
        assert_eq!(WizardKind::Profile.after_submit(), AfterSubmit::Home);
    }

    #[test]
    fn test_stored_url_prefers_suffixed_key() {
        let stored = StoredDetails(
            [
                ("avatar".to_string(), "a".to_string()),
                ("avatar_url".to_string(), "b".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(stored_url(&stored, "avatar"), Some("b"));
        assert_eq!(stored_url(&stored, "banner"), None);
    }
}
