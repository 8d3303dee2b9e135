//! # Nacos Config Infrastructure
//!
//! HTTP implementation of the `nacos-config-core` ports.
//!
//! This crate contains:
//! - Request construction and a single-shot reqwest transport
//! - The authenticated Nacos session and configuration client
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements [`ConfigurationStore`](nacos_config_core::ConfigurationStore)
//!   for [`NacosClient`]
//! - Depends on `nacos-config-domain` and `nacos-config-core`
//! - Contains all network and filesystem I/O

pub mod config;
pub mod errors;
pub mod http;
pub mod nacos;

pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RequestBuilder, RequestSpec};
pub use nacos::{Credentials, NacosClient, Session};
