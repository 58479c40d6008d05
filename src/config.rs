//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Marketplace API base URL
    pub api_base_url: Option<String>,
    /// Identity sent as the `user_id` header
    pub user_id: Option<String>,
    /// Request timeout in seconds (no timeout when unset)
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "launchpad", "launchpad-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Saved identity, ignoring blank values
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.user_id.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_base_url: Some("https://api.launchpad.example".to_string()),
            user_id: Some("user-1".to_string()),
            request_timeout_secs: Some(30),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.api_base_url,
            Some("https://api.launchpad.example".to_string())
        );
        assert_eq!(parsed.user_id, Some("user-1".to_string()));
        assert_eq!(parsed.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"user_id": "u-9", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.user_id, Some("u-9".to_string()));
    }

    #[test]
    fn test_blank_user_id_is_none() {
        let config = TuiConfig {
            user_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.user_id(), None);
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = TuiConfig {
            user_id: Some("u-7".to_string()),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = TuiConfig::load_from(&path).unwrap();
        assert_eq!(loaded.user_id(), Some("u-7"));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = TuiConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.user_id.is_none());
    }
}
