//! Backend address configuration.

/// Default backend base address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/";

/// Where the backend lives.
///
/// The default reads the `API_BASE_URL` compile-time environment variable,
/// falling back to [`DEFAULT_BASE_URL`]. A trailing slash is normalized by
/// [`crate::ApiClient::new`], so both forms are accepted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("API_BASE_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}
