//! Profile setup wizard

use super::{path, stored_url, text, SubmitContext};
use crate::api::{ApiRequest, MultipartBody, Role};
use crate::wizard::{FormField, FormValues, Rule, Step};
use std::collections::BTreeMap;

pub const SUBMIT_PATH: &str = "/api/profile/submit-personal-details";

pub const COUNTRIES: &[&str] = &[
    "United States",
    "United Kingdom",
    "Canada",
    "Germany",
    "France",
    "Netherlands",
    "Switzerland",
    "Singapore",
    "United Arab Emirates",
    "India",
    "Nigeria",
    "Kenya",
    "Brazil",
    "Argentina",
    "Japan",
    "South Korea",
    "Australia",
    "Other",
];

/// Social link fields, sent together as one JSON object
pub const SOCIAL_LINKS: &[&str] = &["website", "twitter", "linkedin", "telegram"];

/// Uploaded images
pub const MEDIA: &[&str] = &["avatar", "banner"];

pub fn steps() -> Vec<Step> {
    vec![
        Step::fields(
            "Personal details",
            vec![
                FormField::text("full_name", "Full name")
                    .required()
                    .rule(Rule::MinLen(2)),
                FormField::choice("role", "Role", Role::LABELS),
                FormField::choice("country", "Country", COUNTRIES),
                FormField::multiline("bio", "Bio").rule(Rule::MaxLen(500)),
            ],
        ),
        Step::fields(
            "Social links",
            vec![
                FormField::text("website", "Website").rule(Rule::Url),
                FormField::text("twitter", "Twitter").rule(Rule::Url),
                FormField::text("linkedin", "LinkedIn").rule(Rule::Url),
                FormField::text("telegram", "Telegram").rule(Rule::Url),
            ],
        ),
        Step::fields(
            "Media",
            vec![
                FormField::file("avatar", "Avatar image").rule(Rule::ExistingFile),
                FormField::file("banner", "Banner image").rule(Rule::ExistingFile),
            ],
        ),
    ]
}

pub fn build_request(
    values: &FormValues,
    ctx: &SubmitContext<'_>,
) -> Result<ApiRequest, serde_json::Error> {
    let role = Role::parse(text(values, "role"))
        .map(|r| r.as_wire())
        .unwrap_or_default();

    let social_links: BTreeMap<&str, &str> = SOCIAL_LINKS
        .iter()
        .map(|name| (*name, text(values, name)))
        .filter(|(_, link)| !link.is_empty())
        .collect();

    let mut body = MultipartBody::new()
        .text("full_name", text(values, "full_name"))
        .text("role", role)
        .text("country", text(values, "country"))
        .text("bio", text(values, "bio"))
        .json("social_links", &social_links)?;
    for name in MEDIA {
        body = body.file_or_url(name, path(values, name), stored_url(ctx.stored, name));
    }

    Ok(ApiRequest::post_multipart(SUBMIT_PATH, body)
        .identified(ctx.user_id)
        .with_fallback("Could not save your profile. Please try again."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RequestBody, StoredDetails};
    use crate::flows::WizardKind;
    use crate::wizard::{SubmitAttempt, ValidationContext, Wizard};
    use pretty_assertions::assert_eq;

    fn ctx() -> ValidationContext {
        ValidationContext::now()
    }

    fn multipart(attempt: SubmitAttempt) -> (ApiRequest, MultipartBody) {
        let request = match attempt {
            SubmitAttempt::Send(request) => request,
            other => panic!("expected a request, got {other:?}"),
        };
        let RequestBody::Multipart(body) = request.body.clone() else {
            panic!("expected a multipart body");
        };
        (request, body)
    }

    fn fill_personal(wizard: &mut Wizard) {
        wizard.set_field("full_name", "Ada Lovelace");
        wizard.set_field("role", "Service Provider");
        wizard.set_field("country", "United Kingdom");
        assert!(wizard.go_next(&ctx()));
    }

    #[test]
    fn test_profile_multipart_with_nested_links_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let avatar = dir.path().join("ada.png");
        std::fs::write(&avatar, b"png").unwrap();

        let mut wizard = Wizard::new(WizardKind::Profile);
        fill_personal(&mut wizard);
        wizard.set_field("twitter", "https://x.com/ada");
        wizard.set_field("website", "https://ada.dev");
        assert!(wizard.go_next(&ctx()));
        wizard.set_field("avatar", &avatar.to_string_lossy());

        let (request, body) = multipart(wizard.submit(&ctx(), Some("u-1")));
        assert_eq!(request.path, SUBMIT_PATH);
        assert_eq!(request.user_id.as_deref(), Some("u-1"));
        assert_eq!(body.field("full_name"), Some("Ada Lovelace"));
        assert_eq!(body.field("role"), Some("service_provider"));
        assert_eq!(
            body.field("social_links"),
            Some(r#"{"twitter":"https://x.com/ada","website":"https://ada.dev"}"#)
        );
        assert_eq!(body.file("avatar").unwrap().path, avatar);
        assert!(body.file("banner").is_none());
        assert!(body.field("bio").is_none());
    }

    #[test]
    fn test_stored_urls_kept_when_no_new_file() {
        let stored = StoredDetails(
            [
                ("full_name".to_string(), "Ada".to_string()),
                ("avatar_url".to_string(), "https://cdn/ada.png".to_string()),
                ("twitter".to_string(), "https://x.com/ada".to_string()),
            ]
            .into_iter()
            .collect(),
        );
        let mut wizard = Wizard::new(WizardKind::Profile);
        wizard.prefill(stored);
        assert!(wizard.go_next(&ctx()));
        assert!(wizard.go_next(&ctx()));

        let (_, body) = multipart(wizard.submit(&ctx(), Some("u-1")));
        assert_eq!(body.field("full_name"), Some("Ada"));
        assert_eq!(body.field("avatar"), Some("https://cdn/ada.png"));
        assert!(body.files.is_empty());
        assert_eq!(
            body.field("social_links"),
            Some(r#"{"twitter":"https://x.com/ada"}"#)
        );
    }

    #[test]
    fn test_invalid_social_link_blocks_step() {
        let mut wizard = Wizard::new(WizardKind::Profile);
        fill_personal(&mut wizard);
        wizard.set_field("linkedin", "linkedin.com/in/ada");
        assert!(!wizard.go_next(&ctx()));
        assert_eq!(wizard.error_for("linkedin"), Some("Enter a valid URL (https://...)"));
    }

    #[test]
    fn test_missing_media_file_blocks_step() {
        let mut wizard = Wizard::new(WizardKind::Profile);
        fill_personal(&mut wizard);
        assert!(wizard.go_next(&ctx()));
        wizard.set_field("banner", "/not/a/real/banner.png");
        assert!(matches!(
            wizard.submit(&ctx(), Some("u-1")),
            SubmitAttempt::Invalid { step: 2 }
        ));
    }
}
