//! Response types returned by the marketplace API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Marketplace role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Founder,
    Investor,
    #[serde(alias = "service-provider", alias = "serviceProvider")]
    ServiceProvider,
}

impl Role {
    pub const LABELS: &'static [&'static str] = &["Founder", "Investor", "Service Provider"];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Founder => "Founder",
            Self::Investor => "Investor",
            Self::ServiceProvider => "Service Provider",
        }
    }

    /// Wire value sent in form payloads
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Investor => "investor",
            Self::ServiceProvider => "service_provider",
        }
    }

    /// Parse a display label or a wire value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "founder" => Some(Self::Founder),
            "investor" => Some(Self::Investor),
            "service_provider" | "serviceprovider" => Some(Self::ServiceProvider),
            _ => None,
        }
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(Role::parse))
}

/// The backend reports onboarding as either a boolean or a status word
fn completed_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "completed" | "complete" | "done" | "true"
        ),
        _ => false,
    })
}

/// `GET /api/profile/get-onboarding-status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OnboardingStatus {
    #[serde(rename = "status", default, deserialize_with = "completed_flag")]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
}

/// One entry in the marketplace listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListing {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "funding_target", alias = "targetAmount")]
    pub funding_target: Option<f64>,
    #[serde(default, alias = "amount_raised", alias = "raisedAmount")]
    pub amount_raised: Option<f64>,
    #[serde(default, alias = "funding_deadline", alias = "deadline")]
    pub funding_deadline: Option<String>,
}

impl CampaignListing {
    /// Raised / target as a percentage, when both are known
    pub fn progress_percent(&self) -> Option<u16> {
        match (self.amount_raised, self.funding_target) {
            (Some(raised), Some(target)) if target > 0.0 => {
                Some(((raised / target) * 100.0).clamp(0.0, 999.0) as u16)
            }
            _ => None,
        }
    }
}

/// Listing endpoints return either a bare array or `{ "campaigns": [...] }` / `{ "data": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CampaignPage {
    List(Vec<CampaignListing>),
    Wrapped {
        #[serde(alias = "data")]
        campaigns: Vec<CampaignListing>,
    },
}

impl CampaignPage {
    pub(crate) fn into_vec(self) -> Vec<CampaignListing> {
        match self {
            CampaignPage::List(v) | CampaignPage::Wrapped { campaigns: v } => v,
        }
    }
}

/// Previously submitted details used to pre-fill a wizard, flattened to strings.
///
/// Nested objects (e.g. social links) are flattened one level deep so their
/// keys line up with wizard field names. Arrays are kept as JSON text and
/// read back with [`StoredDetails::records`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredDetails(pub BTreeMap<String, String>);

impl StoredDetails {
    pub fn from_json(value: &Value) -> Self {
        let mut out = BTreeMap::new();
        let object = value
            .get("data")
            .filter(|d| d.is_object())
            .unwrap_or(value);
        if let Some(map) = object.as_object() {
            for (key, val) in map {
                match val {
                    Value::String(s) => {
                        out.insert(key.clone(), s.clone());
                    }
                    Value::Number(n) => {
                        out.insert(key.clone(), n.to_string());
                    }
                    Value::Object(inner) => {
                        for (k, v) in inner {
                            if let Some(s) = v.as_str() {
                                out.insert(k.clone(), s.to_string());
                            }
                        }
                    }
                    Value::Array(_) => {
                        out.insert(key.clone(), val.to_string());
                    }
                    _ => {}
                }
            }
        }
        Self(out)
    }

    /// Stored list of sub-records under `key`, with text and number values
    pub fn records(&self, key: &str) -> Option<Vec<BTreeMap<String, String>>> {
        let entries: Vec<serde_json::Map<String, Value>> =
            serde_json::from_str(self.get(key)?).ok()?;
        let records = entries
            .into_iter()
            .map(|entry| {
                entry
                    .into_iter()
                    .filter_map(|(k, v)| match v {
                        Value::String(s) => Some((k, s)),
                        Value::Number(n) => Some((k, n.to_string())),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        Some(records)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_onboarding_status_bool() {
        let status: OnboardingStatus =
            serde_json::from_value(json!({"status": true, "role": "founder"})).unwrap();
        assert!(status.completed);
        assert_eq!(status.role, Some(Role::Founder));
    }

    #[test]
    fn test_onboarding_status_string() {
        let status: OnboardingStatus =
            serde_json::from_value(json!({"status": "pending", "role": "service-provider"}))
                .unwrap();
        assert!(!status.completed);
        assert_eq!(status.role, Some(Role::ServiceProvider));

        let status: OnboardingStatus =
            serde_json::from_value(json!({"status": "Completed"})).unwrap();
        assert!(status.completed);
        assert_eq!(status.role, None);
    }

    #[test]
    fn test_onboarding_unknown_role_is_none() {
        let status: OnboardingStatus =
            serde_json::from_value(json!({"status": false, "role": "admin"})).unwrap();
        assert_eq!(status.role, None);
    }

    #[test]
    fn test_role_parse_labels_and_wire() {
        for role in [Role::Founder, Role::Investor, Role::ServiceProvider] {
            assert_eq!(Role::parse(role.label()), Some(role));
            assert_eq!(Role::parse(role.as_wire()), Some(role));
        }
    }

    #[test]
    fn test_campaign_page_shapes() {
        let bare: CampaignPage =
            serde_json::from_value(json!([{"id": "1", "title": "Alpha"}])).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: CampaignPage = serde_json::from_value(json!({
            "data": [{"_id": "2", "title": "Beta", "fundingTarget": 100000, "amountRaised": 25000}]
        }))
        .unwrap();
        let campaigns = wrapped.into_vec();
        assert_eq!(campaigns[0].id, "2");
        assert_eq!(campaigns[0].progress_percent(), Some(25));
    }

    #[test]
    fn test_stored_details_flattens_nested() {
        let details = StoredDetails::from_json(&json!({
            "data": {
                "full_name": "Ada",
                "avatar_url": "https://cdn/ada.png",
                "social_links": {"twitter": "https://x.com/ada"},
                "followers": 12
            }
        }));
        assert_eq!(details.get("full_name"), Some("Ada"));
        assert_eq!(details.get("twitter"), Some("https://x.com/ada"));
        assert_eq!(details.get("followers"), Some("12"));
    }

    #[test]
    fn test_stored_details_keeps_record_lists() {
        let details = StoredDetails::from_json(&json!({
            "faqs": [
                {"question": "When is the TGE?", "answer": "Q3"},
                {"question": "Vesting?", "answer": "12 months", "order": 2}
            ],
            "title": "Solar DAO"
        }));
        let faqs = details.records("faqs").unwrap();
        assert_eq!(faqs.len(), 2);
        assert_eq!(faqs[0].get("question"), Some(&"When is the TGE?".to_string()));
        assert_eq!(faqs[1].get("order"), Some(&"2".to_string()));
        assert_eq!(details.records("title"), None);
        assert_eq!(details.records("missing"), None);
    }
}
