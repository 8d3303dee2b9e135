//! Nacos v1 configuration API
//!
//! - [`session`]: access token storage, login and expiry-driven re-login
//! - [`client`]: fetch, publish and delete against `cs/configs`
//! - [`types`]: wire payloads

pub mod client;
pub mod session;
pub mod types;

pub use client::NacosClient;
pub use session::{Credentials, Session, TokenCell};
