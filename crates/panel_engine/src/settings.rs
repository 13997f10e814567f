use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Backend root; endpoint paths are resolved relative to it.
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_upload_bytes: u64,
    pub max_response_bytes: u64,
}

impl ClientSettings {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(10),
            // Scoring round-trips through a language model on the backend.
            request_timeout: Duration::from_secs(60),
            max_upload_bytes: 10 * 1024 * 1024,
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}
