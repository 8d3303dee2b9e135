//! Configuration resource lifecycle

pub mod service;

pub use service::{ConfigurationResourceService, ResourceState};
