//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// REST API root of the production CMS.
pub const DEFAULT_API_BASE_URL: &str = "https://cockpit4me.de/wp-json/wp/v2";

/// Per-request deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Records returned per collection page when the caller does not ask for a
/// specific count.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// REST API root (e.g. `https://example.com/wp-json/wp/v2`).
    pub api_base_url: String,

    /// Per-request deadline in seconds. Applies to each candidate attempt
    /// independently, never to a whole fallback chain.
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: "Pressroom-Gateway/1.0".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Configuration pointed at a different CMS installation.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}
