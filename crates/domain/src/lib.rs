//! # Nacos Config Domain
//!
//! Domain types for managing Nacos configuration entries.
//!
//! This crate contains:
//! - Configuration identity and record types
//! - Resource id encoding
//! - Client configuration structures
//! - Error types and Result definitions
//! - Upstream API constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
