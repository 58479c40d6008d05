//! Errors surfaced by the marketplace API client

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when neither the server nor the caller supplies one
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request needs a `user_id` header and none is known
    #[error("You need to sign in first")]
    MissingIdentity,

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not read {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text for the error dialog
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_missing_identity(&self) -> bool {
        matches!(self, ApiError::MissingIdentity)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_message_only() {
        let err = ApiError::Http {
            status: 400,
            message: "Email already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_missing_identity() {
        let err = ApiError::MissingIdentity;
        assert!(err.is_missing_identity());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_attachment_error_names_path() {
        let err = ApiError::Attachment {
            path: PathBuf::from("/tmp/avatar.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.user_message().contains("/tmp/avatar.png"));
    }
}
