//! Application configuration supplied by the embedding frontend at startup

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image catalog (Pixabay-compatible) client settings
///
/// The API key is always injected by the caller; there is no default
/// credential baked into the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key passed as the `key` query parameter
    pub api_key: String,
    /// Catalog endpoint URL
    pub endpoint: String,
    /// Maximum number of results per search
    pub per_page: u32,
}

impl ProviderConfig {
    /// Default catalog endpoint
    pub const DEFAULT_ENDPOINT: &'static str = "https://pixabay.com/api/";
    /// Default page size for search results
    pub const DEFAULT_PER_PAGE: u32 = 30;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// Fixed dimensions of the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        // Matches the on-screen editor surface
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Application configuration assembled once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Image catalog client settings
    pub provider: ProviderConfig,
    /// Editing surface dimensions
    pub canvas: CanvasConfig,
    /// Font file for text annotations (None = probe common system locations)
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

impl AppConfig {
    /// Build a configuration with defaults for everything except the
    /// required catalog credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            provider: ProviderConfig::new(api_key),
            canvas: CanvasConfig::default(),
            font_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("test-key");
        assert_eq!(config.provider.api_key, "test-key");
        assert_eq!(config.provider.endpoint, ProviderConfig::DEFAULT_ENDPOINT);
        assert_eq!(config.provider.per_page, 30);
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.height, 600);
        assert!(config.font_path.is_none());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = AppConfig::new("k");
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
