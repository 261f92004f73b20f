//! Client configuration, resolved once at startup.

use std::time::Duration;

/// Where the todo service lives and how the client behaves around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// How long an error message stays visible before it clears itself.
    pub error_display: Duration,
    /// Per-request timeout. `None` leaves it to the HTTP stack's default.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            error_display: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_error_display(mut self, error_display: Duration) -> Self {
        self.error_display = error_display;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
