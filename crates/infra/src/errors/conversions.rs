//! Conversions from external infrastructure errors into domain errors.

use nacos_config_domain::NacosError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub NacosError);

impl From<InfraError> for NacosError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<NacosError> for InfraError {
    fn from(value: NacosError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoNacosError {
    fn into_nacos(self) -> NacosError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → NacosError */
/* -------------------------------------------------------------------------- */

impl IntoNacosError for HttpError {
    fn into_nacos(self) -> NacosError {
        if self.is_builder() {
            return NacosError::RequestBuild(self.to_string());
        }

        if self.is_timeout() {
            return NacosError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return NacosError::Transport(format!("HTTP connection failure: {}", self));
        }

        if self.is_body() || self.is_decode() {
            return NacosError::Transport(format!("failed to read response body: {}", self));
        }

        NacosError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_nacos())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → NacosError */
/* -------------------------------------------------------------------------- */

impl IntoNacosError for UrlError {
    fn into_nacos(self) -> NacosError {
        NacosError::RequestBuild(format!("invalid URL: {}", self))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_nacos())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
