//! Client constants
//!
//! Centralized location for the fixed parts of the upstream API contract.

// Endpoint layout
pub const DEFAULT_CONTEXT_PATH: &str = "nacos";
pub const API_VERSION_SEGMENT: &str = "v1";
pub const LOGIN_PATH: &str = "auth/login";
pub const CONFIGURATION_PATH: &str = "cs/configs";

// Query/form parameter names
pub const ACCESS_TOKEN_PARAM: &str = "accessToken";
pub const USERNAME_PARAM: &str = "username";
pub const PASSWORD_PARAM: &str = "password";
pub const TENANT_PARAM: &str = "tenant";
pub const GROUP_PARAM: &str = "group";
pub const DATA_ID_PARAM: &str = "dataId";
pub const CONTENT_PARAM: &str = "content";
pub const DESCRIPTION_PARAM: &str = "desc";
pub const SHOW_PARAM: &str = "show";
pub const SHOW_ALL: &str = "all";

/// Status code the upstream uses for authorization failures, expired tokens included.
pub const TOKEN_EXPIRED_STATUS: u16 = 403;
/// Body fragment that distinguishes an expired token from other 403s.
pub const TOKEN_EXPIRED_SIGNATURE: &str = r#""message":"token expired!""#;

/// Separator used when encoding an identity as a resource id.
pub const RESOURCE_ID_SEPARATOR: &str = "/";
