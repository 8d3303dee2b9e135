//! Nacos configuration client.
//!
//! [`NacosClient`] logs in on construction and exposes fetch, publish and
//! delete over the `cs/configs` endpoint. Each operation goes through the
//! session so that an expired token is refreshed once before the error
//! reaches the caller.

use async_trait::async_trait;
use nacos_config_core::ConfigurationStore;
use nacos_config_domain::constants::{
    CONFIGURATION_PATH, CONTENT_PARAM, DATA_ID_PARAM, DESCRIPTION_PARAM, GROUP_PARAM, LOGIN_PATH,
    SHOW_ALL, SHOW_PARAM, TENANT_PARAM,
};
use nacos_config_domain::{
    ClientConfig, ConfigurationIdentity, ConfigurationRecord, NacosError, Result,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::session::{Credentials, Session};
use super::types::ConfigurationPayload;
use crate::http::{HttpClient, RequestBuilder, RequestSpec};

/// Authenticated client for one Nacos server.
///
/// Cheap to share behind an `Arc`; concurrent calls only contend on the
/// token lock.
#[derive(Debug)]
pub struct NacosClient {
    http: HttpClient,
    session: Session,
    configs_url: String,
}

impl NacosClient {
    /// Build a client without logging in.
    ///
    /// Authenticated calls fail with `NacosError::Unauthenticated` until
    /// [`login`](Self::login) succeeds.
    ///
    /// # Errors
    /// Returns `NacosError::Config` for an unusable address and
    /// `NacosError::RequestBuild` when the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::builder().timeout(config.request_timeout()).build()?;
        let base_url = config.base_url();
        let session = Session::new(
            http.clone(),
            format!("{}{}", base_url, LOGIN_PATH),
            Credentials::new(config.username.as_str(), config.password.as_str()),
        );

        Ok(Self { http, session, configs_url: format!("{}{}", base_url, CONFIGURATION_PATH) })
    }

    /// Build a client and perform the initial login.
    ///
    /// # Errors
    /// Returns `NacosError::AuthenticationFailed` when the login call fails,
    /// plus the errors of [`new`](Self::new).
    #[instrument(skip(config), fields(address = %config.address))]
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let client = Self::new(config)?;
        client.login().await?;
        info!("connected to Nacos");
        Ok(client)
    }

    /// Exchange the configured credentials for a fresh access token.
    pub async fn login(&self) -> Result<()> {
        self.session.login().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Fetch one configuration entry.
    ///
    /// # Errors
    /// - `NacosError::NotFound` when the server answers with an empty record
    /// - `NacosError::FetchFailed` wrapping any other failure
    #[instrument(
        skip(self, identity),
        fields(namespace = %identity.namespace(), group = %identity.group(), key = %identity.key())
    )]
    pub async fn fetch(&self, identity: &ConfigurationIdentity) -> Result<ConfigurationRecord> {
        let payload = self
            .send_authenticated::<ConfigurationPayload, _>(|token| {
                RequestBuilder::new(Method::GET, self.configs_url.as_str())
                    .auth(token)
                    .query(&[
                        TENANT_PARAM,
                        identity.namespace(),
                        GROUP_PARAM,
                        identity.group(),
                        DATA_ID_PARAM,
                        identity.key(),
                        SHOW_PARAM,
                        SHOW_ALL,
                    ])
                    .build()
            })
            .await
            .map_err(|err| NacosError::FetchFailed(Box::new(err)))?;

        let record = payload.map(ConfigurationRecord::from).unwrap_or_default();
        if record.is_absent() {
            warn!("configuration not found");
            return Err(NacosError::NotFound(identity.clone()));
        }

        debug!(value_len = record.value.len(), "configuration fetched");
        Ok(record)
    }

    /// Create or replace a configuration entry.
    ///
    /// # Errors
    /// Returns `NacosError::PublishFailed` wrapping the underlying failure.
    #[instrument(
        skip(self, record),
        fields(namespace = %record.namespace, group = %record.group, key = %record.key)
    )]
    pub async fn publish(&self, record: &ConfigurationRecord) -> Result<()> {
        let accepted = self
            .send_authenticated::<bool, _>(|token| {
                RequestBuilder::new(Method::POST, self.configs_url.as_str())
                    .auth(token)
                    .form(&[
                        TENANT_PARAM,
                        record.namespace.as_str(),
                        GROUP_PARAM,
                        record.group.as_str(),
                        DATA_ID_PARAM,
                        record.key.as_str(),
                        CONTENT_PARAM,
                        record.value.as_str(),
                        DESCRIPTION_PARAM,
                        record.description.as_str(),
                    ])
                    .build()
            })
            .await
            .map_err(|err| NacosError::PublishFailed(Box::new(err)))?;

        if accepted == Some(false) {
            warn!("server answered false to publish");
        } else {
            info!("configuration published");
        }
        Ok(())
    }

    /// Delete one configuration entry.
    ///
    /// # Errors
    /// - `NacosError::DeleteRejected` when the server answers `false`
    /// - `NacosError::DeleteFailed` wrapping any other failure
    #[instrument(
        skip(self, identity),
        fields(namespace = %identity.namespace(), group = %identity.group(), key = %identity.key())
    )]
    pub async fn delete(&self, identity: &ConfigurationIdentity) -> Result<()> {
        let deleted = self
            .send_authenticated::<bool, _>(|token| {
                RequestBuilder::new(Method::DELETE, self.configs_url.as_str())
                    .auth(token)
                    .query(&[
                        TENANT_PARAM,
                        identity.namespace(),
                        GROUP_PARAM,
                        identity.group(),
                        DATA_ID_PARAM,
                        identity.key(),
                    ])
                    .build()
            })
            .await
            .map_err(|err| NacosError::DeleteFailed(Box::new(err)))?;

        if deleted == Some(false) {
            warn!("server answered false to delete");
            return Err(NacosError::DeleteRejected(identity.clone()));
        }

        info!("configuration deleted");
        Ok(())
    }

    /// Build a request with the current token and execute it, re-running
    /// `build` with a fresh token after a single re-login on expiry.
    async fn send_authenticated<T, B>(&self, build: B) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Fn(&str) -> Result<RequestSpec>,
    {
        self.session
            .with_reauth(|token| {
                let request = build(&token);
                async move { self.http.execute::<T>(request?).await }
            })
            .await
    }
}

#[async_trait]
impl ConfigurationStore for NacosClient {
    async fn fetch(&self, identity: &ConfigurationIdentity) -> Result<ConfigurationRecord> {
        NacosClient::fetch(self, identity).await
    }

    async fn publish(&self, record: &ConfigurationRecord) -> Result<()> {
        NacosClient::publish(self, record).await
    }

    async fn delete(&self, identity: &ConfigurationIdentity) -> Result<()> {
        NacosClient::delete(self, identity).await
    }
}
