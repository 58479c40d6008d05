//! Startup setup wizard

use super::{path, stored_url, text, SubmitContext};
use crate::api::{ApiRequest, MultipartBody};
use crate::wizard::{FieldValue, FormField, FormValues, ListEditor, Rule, Step};

pub const SUBMIT_PATH: &str = "/api/startup/submit-startup-details";

pub const INDUSTRIES: &[&str] = &[
    "DeFi",
    "Infrastructure",
    "Gaming",
    "NFT / Creator",
    "Payments",
    "Identity",
    "Data / AI",
    "Other",
];

pub const STAGES: &[&str] = &["Idea", "Prototype", "MVP", "Live", "Scaling"];

pub const PLATFORMS: &[&str] = &[
    "Ethereum",
    "Solana",
    "Polygon",
    "BNB Chain",
    "Arbitrum",
    "Optimism",
    "Base",
    "Avalanche",
    "Other",
];

pub const MAX_PLATFORMS: usize = 3;

/// Uploaded documents
pub const DOCUMENTS: &[&str] = &["logo", "banner", "pitch_deck"];

fn platform_fields() -> Vec<FormField> {
    vec![
        FormField::choice("platform", "Platform", PLATFORMS),
        FormField::text("contract_address", "Contract address").rule(Rule::MaxLen(128)),
    ]
}

pub fn steps() -> Vec<Step> {
    vec![
        Step::fields(
            "Company",
            vec![
                FormField::text("company_name", "Company name")
                    .required()
                    .rule(Rule::MaxLen(100)),
                FormField::text("website", "Website").required().rule(Rule::Url),
                FormField::choice("industry", "Industry", INDUSTRIES),
                FormField::choice("stage", "Stage", STAGES),
                FormField::multiline("description", "Description")
                    .required()
                    .rule(Rule::MinLen(20)),
            ],
        ),
        Step::records(
            "Blockchain platforms",
            "blockchain_platforms",
            ListEditor::new("Platform", 1, MAX_PLATFORMS, platform_fields),
        ),
        Step::fields(
            "Documents",
            vec![
                FormField::file("logo", "Logo").rule(Rule::ExistingFile),
                FormField::file("banner", "Banner image").rule(Rule::ExistingFile),
                FormField::file("pitch_deck", "Pitch deck (PDF)").rule(Rule::ExistingFile),
            ],
        ),
    ]
}

pub fn build_request(
    values: &FormValues,
    ctx: &SubmitContext<'_>,
) -> Result<ApiRequest, serde_json::Error> {
    let platforms = match values.get("blockchain_platforms") {
        Some(FieldValue::Records(records)) => records.clone(),
        _ => Vec::new(),
    };

    let mut body = MultipartBody::new()
        .text("company_name", text(values, "company_name"))
        .text("website", text(values, "website"))
        .text("industry", text(values, "industry"))
        .text("stage", text(values, "stage"))
        .text("description", text(values, "description"))
        .json("blockchain_platforms", &platforms)?;
    for name in DOCUMENTS {
        body = body.file_or_url(name, path(values, name), stored_url(ctx.stored, name));
    }

    Ok(ApiRequest::post_multipart(SUBMIT_PATH, body)
        .identified(ctx.user_id)
        .with_fallback("Could not save your startup details. Please try again."))
}
