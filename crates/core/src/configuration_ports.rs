//! Port for the remote configuration store.
//!
//! The infrastructure layer implements this against the Nacos HTTP API;
//! lifecycle logic in this crate depends only on the trait.
//!
//! # Example
//!
//! ```no_run
//! use nacos_config_core::ConfigurationStore;
//! use nacos_config_domain::ConfigurationIdentity;
//!
//! async fn current_value(store: &impl ConfigurationStore) -> Option<String> {
//!     let identity = ConfigurationIdentity::new("public", "DEFAULT_GROUP", "app.yaml");
//!     store.fetch(&identity).await.ok().map(|record| record.value)
//! }
//! ```

use async_trait::async_trait;
use nacos_config_domain::{ConfigurationIdentity, ConfigurationRecord, Result};

/// Remote key/value configuration store addressed by namespace, group and key.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Fetch one entry.
    ///
    /// Returns `NacosError::NotFound` when the entry does not exist upstream.
    async fn fetch(&self, identity: &ConfigurationIdentity) -> Result<ConfigurationRecord>;

    /// Create or replace an entry.
    async fn publish(&self, record: &ConfigurationRecord) -> Result<()>;

    /// Delete an entry.
    ///
    /// Returns `NacosError::DeleteRejected` when the server reports that
    /// nothing was deleted.
    async fn delete(&self, identity: &ConfigurationIdentity) -> Result<()>;
}
