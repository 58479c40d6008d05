//! Early access sign-up

use crate::api::{ApiRequest, Role};
use crate::wizard::{FieldValue, FormField, FormValues, Rule, Step};

pub const SUBMIT_PATH: &str = "/api/auth/store-early-access-user";

pub const ALREADY_REGISTERED: &str = "This email is already registered for early access";

pub fn steps() -> Vec<Step> {
    vec![Step::fields(
        "Join the waitlist",
        vec![
            FormField::text("name", "Name").required(),
            FormField::text("email", "Email").required().rule(Rule::Email),
            FormField::choice("role", "Role", Role::LABELS),
        ],
    )]
}

/// Sign-up needs no identity; the role is sent in its wire spelling
pub fn build_request(values: &FormValues) -> Result<ApiRequest, serde_json::Error> {
    let mut values = values.clone();
    if let Some(role) = values
        .get("role")
        .and_then(FieldValue::as_text)
        .and_then(Role::parse)
    {
        values.insert("role".to_string(), FieldValue::Text(role.as_wire().to_string()));
    }
    Ok(ApiRequest::post_json(SUBMIT_PATH, serde_json::to_value(&values)?)
        .with_status_hint(400, ALREADY_REGISTERED)
        .with_fallback("Could not join the waitlist. Please try again."))
}
