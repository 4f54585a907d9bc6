use serde::{Deserialize, Serialize};

/// Default endpoint of the link preview service.
pub const DEFAULT_PREVIEW_ENDPOINT: &str = "https://api.linkpreview.net/";

/// Top-level configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
}

/// Where and how the item list is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Database file path. `None` means the platform data directory.
    pub database_path: Option<String>,
    pub on_corrupt: CorruptDataPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            on_corrupt: CorruptDataPolicy::Reset,
        }
    }
}

/// What loading does when the persisted list cannot be parsed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CorruptDataPolicy {
    /// Log and start from an empty list.
    Reset,
    /// Return the parse error to the caller.
    Propagate,
}

/// Link preview service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub policy: PreviewPolicy,
    pub timeout_secs: Option<u64>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_PREVIEW_ENDPOINT.to_string(),
            api_key: None,
            policy: PreviewPolicy::Always,
            timeout_secs: None,
        }
    }
}

/// Which inputs trigger a preview request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PreviewPolicy {
    /// Every non-empty input, URL-like or not.
    Always,
    /// Only inputs accepted by `is_valid_url`.
    UrlOnly,
    Never,
}
