//! Client configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{API_VERSION_SEGMENT, DEFAULT_CONTEXT_PATH};
use crate::errors::{NacosError, Result};

/// Connection settings for one upstream Nacos server.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server address including scheme, e.g. `http://127.0.0.1:8848`
    pub address: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default = "default_context_path")]
    pub context_path: String,
    /// Per-request timeout. `None` leaves deadlines to the caller.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_context_path() -> String {
    DEFAULT_CONTEXT_PATH.to_string()
}

impl ClientConfig {
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
            context_path: default_context_path(),
            request_timeout_secs: None,
        }
    }

    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// Per-request timeout, rounded up to whole seconds.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Context path with surrounding slashes removed; empty falls back to the default.
    pub fn effective_context_path(&self) -> &str {
        let trimmed = self.context_path.trim_matches('/');
        if trimmed.is_empty() {
            DEFAULT_CONTEXT_PATH
        } else {
            trimmed
        }
    }

    /// `{address}/{context_path}/v1/`
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.address.trim_end_matches('/'),
            self.effective_context_path(),
            API_VERSION_SEGMENT
        )
    }

    /// Check that the address is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `NacosError::Config` when the address is empty or lacks a
    /// supported scheme, or when the request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(NacosError::Config("server address is empty".to_string()));
        }
        if !(address.starts_with("http://") || address.starts_with("https://")) {
            return Err(NacosError::Config(format!(
                "server address must start with http:// or https://: {}",
                address
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(NacosError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("context_path", &self.context_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
