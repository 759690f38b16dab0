use std::time::Duration;

/// Base URL of the analysis service when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Connection settings for the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port, without a trailing path.
    pub base_url: String,
    /// Applied to every request by the HTTP client.
    pub request_timeout: Duration,
    /// Upper bound on export submissions, which wait on document composition.
    pub submit_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            submit_timeout: Duration::from_secs(120),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Join an `/api/...` path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
