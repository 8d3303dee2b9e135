//! Configuration entry types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::RESOURCE_ID_SEPARATOR;
use crate::errors::NacosError;

/// Address of one configuration entry upstream.
///
/// Equality is exact and case-sensitive on all three parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationIdentity {
    namespace: String,
    group: String,
    key: String,
}

impl ConfigurationIdentity {
    pub fn new(
        namespace: impl Into<String>,
        group: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self { namespace: namespace.into(), group: group.into(), key: key.into() }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// The upstream `dataId`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encode as `namespace/group/key`.
    pub fn resource_id(&self) -> String {
        [self.namespace.as_str(), self.group.as_str(), self.key.as_str()]
            .join(RESOURCE_ID_SEPARATOR)
    }
}

impl fmt::Display for ConfigurationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{namespace: {}, group: {}, key: {}}}", self.namespace, self.group, self.key)
    }
}

/// Decodes a resource id. Exactly three separator-delimited parts are
/// required, so keys containing the separator cannot round-trip.
impl FromStr for ConfigurationIdentity {
    type Err = NacosError;

    fn from_str(resource_id: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = resource_id.split(RESOURCE_ID_SEPARATOR).collect();
        match parts.as_slice() {
            [namespace, group, key] => Ok(Self::new(*namespace, *group, *key)),
            _ => Err(NacosError::InvalidResourceId(resource_id.to_string())),
        }
    }
}

/// A full configuration entry.
///
/// `ConfigurationRecord::default()` is the sentinel the upstream returns for
/// a missing entry. An entry that genuinely has every field empty is
/// indistinguishable from absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    pub namespace: String,
    pub group: String,
    pub key: String,
    pub value: String,
    pub description: String,
}

impl ConfigurationRecord {
    pub fn new(
        identity: &ConfigurationIdentity,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            namespace: identity.namespace().to_string(),
            group: identity.group().to_string(),
            key: identity.key().to_string(),
            value: value.into(),
            description: description.into(),
        }
    }

    pub fn identity(&self) -> ConfigurationIdentity {
        ConfigurationIdentity::new(&self.namespace, &self.group, &self.key)
    }

    /// True for the all-empty sentinel.
    pub fn is_absent(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the mutable payload (value or description) differs.
    pub fn content_differs(&self, other: &Self) -> bool {
        self.value != other.value || self.description != other.description
    }
}
