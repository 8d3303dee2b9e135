//! Error types used throughout the client

use std::fmt;

use thiserror::Error;

use crate::constants::{TOKEN_EXPIRED_SIGNATURE, TOKEN_EXPIRED_STATUS};
use crate::types::ConfigurationIdentity;

/// Which option set a key/value list was destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSet {
    Query,
    Form,
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query string"),
            Self::Form => f.write_str("form data"),
        }
    }
}

/// Main error type for the Nacos configuration client
#[derive(Error, Debug)]
pub enum NacosError {
    /// A key/value option list had a dangling key.
    #[error("{set}: odd argument count ({count})")]
    MalformedOptions { set: OptionSet, count: usize },

    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// Network-level failure: connect, timeout, or body read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Any response with status >= 300. The body is kept verbatim.
    #[error("request error status_code = {status}, body = {body}")]
    RequestFailed { status: u16, body: String },

    #[error("failed to decode response body = {body}: {reason}")]
    ResponseDecodeFailed { body: String, reason: String },

    /// An authenticated call was attempted before any login succeeded.
    #[error("client is not authenticated")]
    Unauthenticated,

    #[error("authenticate error: {0}")]
    AuthenticationFailed(#[source] Box<NacosError>),

    /// The token expired and the follow-up login failed as well.
    #[error("{original}; re-authentication failed: {relogin}")]
    ReauthenticationFailed { original: Box<NacosError>, relogin: Box<NacosError> },

    /// The upstream answered with the empty sentinel record.
    #[error("not found configuration={0}")]
    NotFound(ConfigurationIdentity),

    #[error("get configuration error: {0}")]
    FetchFailed(#[source] Box<NacosError>),

    #[error("publish configuration error: {0}")]
    PublishFailed(#[source] Box<NacosError>),

    #[error("delete configuration error: {0}")]
    DeleteFailed(#[source] Box<NacosError>),

    /// The delete call succeeded at the transport level but the server answered `false`.
    #[error("server reported failure deleting configuration={0}")]
    DeleteRejected(ConfigurationIdentity),

    #[error("Invalid resource id: {0}")]
    InvalidResourceId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NacosError {
    /// Whether this error carries the upstream's expired-token signature.
    ///
    /// Only a raw `RequestFailed` qualifies; wrapped errors are never
    /// reclassified.
    pub fn is_token_expired(&self) -> bool {
        match self {
            Self::RequestFailed { status, body } => {
                *status == TOKEN_EXPIRED_STATUS && body.contains(TOKEN_EXPIRED_SIGNATURE)
            }
            _ => false,
        }
    }

    /// HTTP status of the innermost `RequestFailed`, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::AuthenticationFailed(inner)
            | Self::FetchFailed(inner)
            | Self::PublishFailed(inner)
            | Self::DeleteFailed(inner) => inner.status_code(),
            Self::ReauthenticationFailed { original, .. } => original.status_code(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MalformedOptions { .. } => "malformed_options",
            Self::RequestBuild(_) => "request_build",
            Self::Transport(_) => "transport",
            Self::RequestFailed { .. } => "request_failed",
            Self::ResponseDecodeFailed { .. } => "response_decode_failed",
            Self::Unauthenticated => "unauthenticated",
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::ReauthenticationFailed { .. } => "reauthentication_failed",
            Self::NotFound(_) => "not_found",
            Self::FetchFailed(_) => "fetch_failed",
            Self::PublishFailed(_) => "publish_failed",
            Self::DeleteFailed(_) => "delete_failed",
            Self::DeleteRejected(_) => "delete_rejected",
            Self::InvalidResourceId(_) => "invalid_resource_id",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, NacosError>;
