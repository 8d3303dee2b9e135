//! Shared test helpers for `nacos-config-core` integration tests.

pub mod store;
