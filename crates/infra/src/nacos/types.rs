//! Wire types for the Nacos v1 HTTP API

use nacos_config_domain::ConfigurationRecord;
use serde::Deserialize;

/// Body of a successful `auth/login` call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds
    #[serde(default)]
    pub token_ttl: i64,
}

/// Body of a `cs/configs` GET. Missing or null fields decode as empty
/// strings so that `{}` becomes the absent-record sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigurationPayload {
    pub tenant: Option<String>,
    pub group: Option<String>,
    #[serde(rename = "dataId")]
    pub data_id: Option<String>,
    pub content: Option<String>,
    pub desc: Option<String>,
}

impl From<ConfigurationPayload> for ConfigurationRecord {
    fn from(payload: ConfigurationPayload) -> Self {
        Self {
            namespace: payload.tenant.unwrap_or_default(),
            group: payload.group.unwrap_or_default(),
            key: payload.data_id.unwrap_or_default(),
            value: payload.content.unwrap_or_default(),
            description: payload.desc.unwrap_or_default(),
        }
    }
}
