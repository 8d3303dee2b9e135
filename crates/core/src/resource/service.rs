//! Configuration resource lifecycle - create/read/update/delete on top of a store

use std::sync::Arc;

use nacos_config_domain::{ConfigurationIdentity, ConfigurationRecord, NacosError, Result};
use tracing::{debug, info, warn};

use crate::configuration_ports::ConfigurationStore;

/// Observed state of a managed configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceState {
    /// Encoded `namespace/group/key`
    pub id: String,
    pub record: ConfigurationRecord,
}

impl ResourceState {
    fn from_record(record: ConfigurationRecord) -> Self {
        Self { id: record.identity().resource_id(), record }
    }
}

/// Maps lifecycle verbs onto a [`ConfigurationStore`].
pub struct ConfigurationResourceService {
    store: Arc<dyn ConfigurationStore>,
}

impl ConfigurationResourceService {
    pub fn new(store: Arc<dyn ConfigurationStore>) -> Self {
        Self { store }
    }

    /// Publish the record, then read it back.
    pub async fn create(&self, record: ConfigurationRecord) -> Result<ResourceState> {
        let identity = record.identity();
        self.store.publish(&record).await?;
        info!(resource_id = %identity.resource_id(), "configuration created");

        self.read_identity(&identity).await
    }

    /// Fetch the current upstream state for a resource id.
    pub async fn read(&self, resource_id: &str) -> Result<ResourceState> {
        let identity: ConfigurationIdentity = resource_id.parse()?;
        self.read_identity(&identity).await
    }

    /// Apply a desired record to an existing resource.
    ///
    /// Identity fields cannot change in place. The record is only published
    /// when its value or description differs from the upstream state, or
    /// when the entry has disappeared upstream.
    pub async fn update(
        &self,
        resource_id: &str,
        desired: ConfigurationRecord,
    ) -> Result<ResourceState> {
        let identity: ConfigurationIdentity = resource_id.parse()?;
        if desired.identity() != identity {
            return Err(NacosError::InvalidInput(format!(
                "namespace, group and key are immutable: {} cannot become {}",
                identity,
                desired.identity()
            )));
        }

        let needs_publish = match self.store.fetch(&identity).await {
            Ok(current) => current.content_differs(&desired),
            Err(err) if err.is_not_found() => {
                warn!(%resource_id, "configuration missing upstream, republishing");
                true
            }
            Err(err) => return Err(err),
        };
        if needs_publish {
            self.store.publish(&desired).await?;
            info!(%resource_id, "configuration updated");
        } else {
            debug!(%resource_id, "configuration unchanged, skipping publish");
        }

        self.read_identity(&identity).await
    }

    pub async fn delete(&self, resource_id: &str) -> Result<()> {
        let identity: ConfigurationIdentity = resource_id.parse()?;
        self.store.delete(&identity).await?;
        info!(%resource_id, "configuration deleted");
        Ok(())
    }

    async fn read_identity(&self, identity: &ConfigurationIdentity) -> Result<ResourceState> {
        let record = self.store.fetch(identity).await?;
        Ok(ResourceState::from_record(record))
    }
}
