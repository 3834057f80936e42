//! Client configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::Error;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://www.fetchserp.com";

/// Connect and read timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings a [`Client`](crate::Client) is built from. Frozen once the client exists.
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request. Must not be blank.
    pub api_key: String,
    /// Base URL that endpoint paths are resolved against.
    pub base_url: String,
    /// Applied separately to connection establishment and to each read.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Duration::from_secs(secs))
    }

    /// Checks the settings and returns the parsed base URL.
    pub(crate) fn validate(&self) -> Result<Url, Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Validation("api_key is required".to_string()));
        }
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            Error::Validation(format!("invalid base_url {:?}: {}", self.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Validation(format!(
                "invalid base_url {:?}: not a hierarchical URL",
                self.base_url
            )));
        }
        Ok(base_url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
