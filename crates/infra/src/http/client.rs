use std::fmt;
use std::time::Duration;

use nacos_config_domain::{NacosError, Result};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::request::RequestSpec;
use crate::errors::InfraError;

/// Single-shot HTTP transport.
///
/// Executes a [`RequestSpec`], reads the whole body, and classifies the
/// outcome. There is no retry here; expiry handling lives in the session.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Execute a request and decode its JSON body into `T`.
    ///
    /// Returns `Ok(None)` for an empty body.
    ///
    /// # Errors
    /// - `NacosError::Transport` when the request cannot be sent or the body
    ///   cannot be read
    /// - `NacosError::RequestFailed` for any status >= 300, with the raw body
    /// - `NacosError::ResponseDecodeFailed` when a non-empty body is not valid
    ///   JSON for `T`
    pub async fn execute<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<Option<T>> {
        let method = spec.method().clone();
        // The query string carries the access token; only the path is logged.
        let path = spec.url().path().to_string();

        let request = spec.into_reqwest(&self.client).build().map_err(|err| {
            let infra: InfraError = err.into();
            NacosError::from(infra)
        })?;

        debug!(%method, %path, "sending HTTP request");

        let response = self.client.execute(request).await.map_err(|err| {
            debug!(%method, %path, error = %err, "HTTP request failed");
            let infra: InfraError = err.into();
            NacosError::from(infra)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            let infra: InfraError = err.into();
            NacosError::from(infra)
        })?;

        debug!(%method, %path, %status, body_len = body.len(), "received HTTP response");

        if status.as_u16() >= 300 {
            return Err(NacosError::RequestFailed {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&body).map(Some).map_err(|err| NacosError::ResponseDecodeFailed {
            body: String::from_utf8_lossy(&body).into_owned(),
            reason: err.to_string(),
        })
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

/// Sent unless overridden with [`HttpClientBuilder::user_agent`].
pub const DEFAULT_USER_AGENT: &str = concat!("nacos-config/", env!("CARGO_PKG_VERSION"));

/// Options for [`HttpClient`]. Proxies from the environment are ignored.
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout. Unset by default: callers own their deadlines.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// # Errors
    /// Returns `NacosError::RequestBuild` when reqwest rejects the settings.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().no_proxy().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            NacosError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}
