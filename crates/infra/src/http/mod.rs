//! HTTP plumbing: request construction and a single-shot transport.

pub mod client;
pub mod request;

pub use client::{HttpClient, HttpClientBuilder, DEFAULT_USER_AGENT};
pub use request::{RequestBuilder, RequestSpec, FORM_CONTENT_TYPE};
