//! In-memory mock for `ConfigurationStore`
//!
//! Mirrors the upstream's create-or-replace semantics and counts publishes so
//! lifecycle tests can assert on skipped writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nacos_config_core::ConfigurationStore;
use nacos_config_domain::{
    ConfigurationIdentity, ConfigurationRecord, NacosError, Result as DomainResult,
};
use parking_lot::Mutex;

#[derive(Default)]
pub struct MockConfigurationStore {
    entries: Mutex<HashMap<ConfigurationIdentity, ConfigurationRecord>>,
    publishes: AtomicUsize,
    reject_deletes: bool,
}

impl MockConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that answers `false` to every delete.
    pub fn rejecting_deletes() -> Self {
        Self { reject_deletes: true, ..Self::default() }
    }

    pub fn with_record(self, record: ConfigurationRecord) -> Self {
        self.entries.lock().insert(record.identity(), record);
        self
    }

    pub fn publish_count(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }

    pub fn contains(&self, identity: &ConfigurationIdentity) -> bool {
        self.entries.lock().contains_key(identity)
    }
}

#[async_trait]
impl ConfigurationStore for MockConfigurationStore {
    async fn fetch(&self, identity: &ConfigurationIdentity) -> DomainResult<ConfigurationRecord> {
        self.entries
            .lock()
            .get(identity)
            .cloned()
            .ok_or_else(|| NacosError::NotFound(identity.clone()))
    }

    async fn publish(&self, record: &ConfigurationRecord) -> DomainResult<()> {
        self.publishes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().insert(record.identity(), record.clone());
        Ok(())
    }

    async fn delete(&self, identity: &ConfigurationIdentity) -> DomainResult<()> {
        if self.reject_deletes {
            return Err(NacosError::DeleteRejected(identity.clone()));
        }
        self.entries.lock().remove(identity);
        Ok(())
    }
}
