//! Marketplace API client module

mod client;
mod error;
mod request;
mod traits;
mod types;

pub use client::{ApiClient, CAMPAIGNS_PATH};
pub use error::{ApiError, GENERIC_ERROR};
pub use request::{ApiRequest, ApiResponse, MultipartBody, RequestBody};
pub use traits::MarketplaceApi;
pub use types::{CampaignListing, OnboardingStatus, Role, StoredDetails};

#[cfg(test)]
pub use traits::MockMarketplaceApi;
