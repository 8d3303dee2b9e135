//! Access token lifecycle and expiry-driven re-authentication.
//!
//! The session owns the credentials and the current access token. Every
//! authenticated operation runs through [`Session::with_reauth`], which
//! retries exactly once after a fresh login when the upstream reports an
//! expired token.

use std::fmt;
use std::future::Future;

use nacos_config_domain::constants::{PASSWORD_PARAM, USERNAME_PARAM};
use nacos_config_domain::{NacosError, Result};
use parking_lot::RwLock;
use reqwest::Method;
use tracing::{error, info, instrument, warn};

use super::types::LoginResponse;
use crate::http::{HttpClient, RequestBuilder};

/// Username/password pair posted to the login endpoint.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Concurrency-safe single-value token cell.
///
/// Readers take the shared lock; replacing the token takes the exclusive
/// lock. The lock is never held across an await point.
#[derive(Default)]
pub struct TokenCell {
    inner: RwLock<Option<String>>,
}

impl TokenCell {
    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    pub fn replace(&self, token: String) {
        *self.inner.write() = Some(token);
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }
}

impl fmt::Debug for TokenCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCell").field("is_set", &self.is_set()).finish()
    }
}

/// Authenticated session against one Nacos server.
#[derive(Debug)]
pub struct Session {
    http: HttpClient,
    login_url: String,
    credentials: Credentials,
    token: TokenCell,
}

impl Session {
    /// Create an unauthenticated session. `login_url` is the absolute login endpoint.
    pub fn new(http: HttpClient, login_url: impl Into<String>, credentials: Credentials) -> Self {
        Self { http, login_url: login_url.into(), credentials, token: TokenCell::default() }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_set()
    }

    /// Current token.
    ///
    /// # Errors
    /// Returns `NacosError::Unauthenticated` before the first successful login.
    pub fn access_token(&self) -> Result<String> {
        self.token.get().ok_or(NacosError::Unauthenticated)
    }

    /// Exchange the stored credentials for a new access token.
    ///
    /// On failure any previously held token is left in place.
    ///
    /// # Errors
    /// Returns `NacosError::AuthenticationFailed` wrapping the transport or
    /// decode failure.
    #[instrument(skip(self), fields(username = %self.credentials.username))]
    pub async fn login(&self) -> Result<()> {
        let outcome = match RequestBuilder::new(Method::POST, self.login_url.as_str())
            .form(&[
                USERNAME_PARAM,
                self.credentials.username.as_str(),
                PASSWORD_PARAM,
                self.credentials.password.as_str(),
            ])
            .build()
        {
            Ok(request) => self.http.execute::<LoginResponse>(request).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(Some(login)) => {
                self.token.replace(login.access_token);
                info!(token_ttl_secs = login.token_ttl, "login succeeded");
                Ok(())
            }
            Ok(None) => {
                error!("login returned an empty body");
                Err(NacosError::AuthenticationFailed(Box::new(NacosError::ResponseDecodeFailed {
                    body: String::new(),
                    reason: "empty login response".to_string(),
                })))
            }
            Err(err) => {
                error!(error = %err, error_kind = err.label(), "login failed");
                Err(NacosError::AuthenticationFailed(Box::new(err)))
            }
        }
    }

    /// Run an authenticated attempt, re-authenticating once on token expiry.
    ///
    /// `attempt` receives the token current at call time. If its error is
    /// the expired-token signature, one login is performed and `attempt` is
    /// run exactly once more; that second outcome is returned as is.
    ///
    /// # Errors
    /// Returns the attempt's own error, or
    /// `NacosError::ReauthenticationFailed` naming both the expiry and the
    /// failed login.
    pub async fn with_reauth<T, F, Fut>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let token = self.access_token()?;
        match attempt(token).await {
            Err(err) if err.is_token_expired() => {
                warn!("access token expired, re-authenticating");
                if let Err(relogin) = self.login().await {
                    return Err(NacosError::ReauthenticationFailed {
                        original: Box::new(err),
                        relogin: Box::new(relogin),
                    });
                }

                let token = self.access_token()?;
                attempt(token).await
            }
            outcome => outcome,
        }
    }
}
