use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.colloquy.dev";

/// Environment variable overriding the remote service base URL
pub const BASE_URL_ENV: &str = "COLLOQUY_API_URL";

/// Location of the remote assistant execution service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from `COLLOQUY_API_URL`, falling back to the
    /// compiled-in default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
