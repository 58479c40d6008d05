//! Campaign creation wizard

use super::SubmitContext;
use crate::api::{ApiRequest, CAMPAIGNS_PATH};
use crate::wizard::{DateWindow, FormField, FormValues, ListEditor, Rule, Step};

pub const CATEGORIES: &[&str] = &[
    "DeFi",
    "NFT",
    "Gaming",
    "Infrastructure",
    "DAO",
    "Social",
    "AI",
    "Other",
];

pub const MIN_FUNDING_TARGET: u64 = 1000;
pub const MAX_FAQS: usize = 5;

/// Deadlines can be at most one calendar month out
pub fn deadline_window() -> DateWindow {
    DateWindow::months_ahead(1)
}

fn faq_fields() -> Vec<FormField> {
    vec![
        FormField::text("question", "Question")
            .required()
            .rule(Rule::MaxLen(200)),
        FormField::multiline("answer", "Answer")
            .required()
            .rule(Rule::MaxLen(1000)),
    ]
}

pub fn steps() -> Vec<Step> {
    vec![
        Step::fields(
            "Basics",
            vec![
                FormField::text("title", "Title")
                    .required()
                    .rule(Rule::MinLen(3))
                    .rule(Rule::MaxLen(80)),
                FormField::text("tagline", "Tagline")
                    .required()
                    .rule(Rule::MaxLen(120)),
                FormField::choice("category", "Category", CATEGORIES),
                FormField::multiline("description", "Description")
                    .required()
                    .rule(Rule::MinLen(20)),
                FormField::text("banner_image", "Banner image URL")
                    .required()
                    .rule(Rule::Url),
            ],
        ),
        Step::fields(
            "Funding",
            vec![
                FormField::number("funding_target", "Funding target")
                    .required()
                    .rule(Rule::Min(MIN_FUNDING_TARGET)),
                FormField::number("min_investment", "Minimum investment")
                    .required()
                    .rule(Rule::Min(1)),
                FormField::date("funding_deadline", "Funding deadline", deadline_window()).required(),
            ],
        ),
        Step::records("FAQs", "faqs", ListEditor::new("FAQ", 1, MAX_FAQS, faq_fields)),
    ]
}

/// The header image is the banner image
pub fn adjust(values: &mut FormValues) {
    if let Some(banner) = values.get("banner_image").cloned() {
        values.insert("header_image".to_string(), banner);
    }
}

pub fn build_request(
    values: &FormValues,
    ctx: &SubmitContext<'_>,
) -> Result<ApiRequest, serde_json::Error> {
    let body = serde_json::to_value(values)?;
    Ok(ApiRequest::post_json(CAMPAIGNS_PATH, body)
        .identified(ctx.user_id)
        .with_fallback("Could not create the campaign. Please try again."))
}
