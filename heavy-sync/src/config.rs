//! Configuration for the sync layer.

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Configuration shared by every resource engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the REST API (e.g. `http://localhost:8000/api/v1`).
    pub api_base_url: String,
    /// Per-request timeout in milliseconds. `0` disables it.
    pub timeout_ms: u64,
    /// Page size used when a list query does not set one.
    pub default_per_page: u32,
    /// Buffered notices per subscriber before the oldest are dropped.
    pub notice_capacity: usize,
    /// Bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_ms: 30_000,
            default_per_page: 15,
            notice_capacity: 64,
            bearer_token: None,
        }
    }
}

impl SyncConfig {
    /// Parses a JSON config document; missing keys take their defaults.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that would otherwise fail at request time.
    pub fn validate(&self) -> SyncResult<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(SyncError::Config("api_base_url is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SyncError::Config(format!(
                "api_base_url must be http(s): {url}"
            )));
        }
        if self.default_per_page == 0 {
            return Err(SyncError::Config("default_per_page must be positive".into()));
        }
        if self.notice_capacity == 0 {
            return Err(SyncError::Config("notice_capacity must be positive".into()));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}
