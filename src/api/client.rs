//! HTTP client for the marketplace REST API
//!
//! Translates [`ApiRequest`]s into reqwest calls against a fixed base URL,
//! attaching the `user_id` identity header and turning non-2xx responses into
//! [`ApiError::Http`] with the most specific message available.

use super::error::ApiError;
use super::request::{ApiRequest, ApiResponse, Method, MultipartBody, RequestBody};
use super::traits::MarketplaceApi;
use super::types::{CampaignListing, CampaignPage, OnboardingStatus, StoredDetails};
use crate::config::TuiConfig;
use async_trait::async_trait;
use reqwest::multipart;
use serde_json::Value;
use std::time::Duration;

/// Default API address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "LAUNCHPAD_API_URL";

/// Identity header expected by the backend
pub const USER_ID_HEADER: &str = "user_id";

pub const ONBOARDING_STATUS_PATH: &str = "/api/profile/get-onboarding-status";
pub const PERSONAL_DETAILS_PATH: &str = "/api/profile/get-personal-details";
pub const CAMPAIGNS_PATH: &str = "/api/campaigns";

/// Client for the marketplace API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configuration, honouring `LAUNCHPAD_API_URL`
    pub fn from_config(config: &TuiConfig) -> Result<Self, ApiError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(
            base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Read attachments from disk and build the reqwest form
    async fn build_form(body: &MultipartBody) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new();
        for (name, value) in &body.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &body.files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| ApiError::Attachment {
                    path: file.path.clone(),
                    source,
                })?;
            let part = multipart::Part::bytes(bytes)
                .file_name(file.file_name())
                .mime_str(file.mime_type())?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }

    /// Send a request and interpret the response
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        if request.requires_identity && request.user_id.is_none() {
            tracing::warn!("Refusing to call {} without a user id", request.path);
            return Err(ApiError::MissingIdentity);
        }

        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        if let Some(user_id) = &request.user_id {
            builder = builder.header(USER_ID_HEADER, user_id);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(body) => builder.multipart(Self::build_form(body).await?),
        };

        tracing::debug!("{:?} {}", request.method, url);
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = request.failure_message(status.as_u16(), &text);
            tracing::warn!("{} returned {}: {}", request.path, status, message);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        tracing::info!("{} succeeded with {}", request.path, status);
        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MarketplaceApi for ApiClient {
    async fn onboarding_status(&self, user_id: &str) -> Result<OnboardingStatus, ApiError> {
        let request = ApiRequest::get(ONBOARDING_STATUS_PATH)
            .identified(Some(user_id))
            .with_fallback("Could not load onboarding status");
        let response = self.send(&request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    async fn personal_details(&self, user_id: &str) -> Result<StoredDetails, ApiError> {
        let request = ApiRequest::get(PERSONAL_DETAILS_PATH)
            .identified(Some(user_id))
            .with_fallback("Could not load your profile");
        match self.send(&request).await {
            Ok(response) => Ok(StoredDetails::from_json(&response.body)),
            // Nothing stored yet
            Err(ApiError::Http { status: 404, .. }) => Ok(StoredDetails::default()),
            Err(e) => Err(e),
        }
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignListing>, ApiError> {
        let request = ApiRequest::get(CAMPAIGNS_PATH).with_fallback("Could not load campaigns");
        let response = self.send(&request).await?;
        let page: CampaignPage = serde_json::from_value(response.body)?;
        Ok(page.into_vec())
    }

    async fn submit(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.send(&request).await
    }
}
