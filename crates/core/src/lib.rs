//! # Nacos Config Core
//!
//! Pure lifecycle logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the remote configuration store
//! - The resource lifecycle service built on those ports
//!
//! ## Architecture Principles
//! - Only depends on `nacos-config-domain`
//! - No HTTP code
//! - All external dependencies via traits

pub mod configuration_ports;
pub mod resource;

pub use configuration_ports::ConfigurationStore;
pub use resource::{ConfigurationResourceService, ResourceState};
