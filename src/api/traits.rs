//! Trait abstraction for the marketplace API to enable mocking in tests

use super::error::ApiError;
use super::request::{ApiRequest, ApiResponse};
use super::types::{CampaignListing, OnboardingStatus, StoredDetails};
use async_trait::async_trait;

/// Marketplace API operations used by the client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Whether the user has finished profile setup, and their role
    async fn onboarding_status(&self, user_id: &str) -> Result<OnboardingStatus, ApiError>;

    /// Previously submitted personal details, for pre-filling the profile wizard
    async fn personal_details(&self, user_id: &str) -> Result<StoredDetails, ApiError>;

    /// Campaigns shown in the marketplace
    async fn list_campaigns(&self) -> Result<Vec<CampaignListing>, ApiError>;

    /// Send a wizard submission
    async fn submit(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}
