//! Client configuration loader
//!
//! Environment variables are used when `NACOS_ADDRESS` is set; otherwise
//! the loader falls back to a JSON or TOML file.
//!
//! ## Environment Variables
//! - `NACOS_ADDRESS`: server address including scheme (required)
//! - `NACOS_USERNAME`: login user, empty when unset
//! - `NACOS_PASSWORD`: login password, empty when unset
//! - `NACOS_CONTEXT_PATH`: server context path, `nacos` when unset
//! - `NACOS_REQUEST_TIMEOUT_SECS`: per-request timeout in seconds, none when unset
//!
//! ## File Locations
//! [`probe_config_paths`] looks for `nacos.{json,toml}` and then
//! `config.{json,toml}` in the working directory, its two parent
//! directories, and next to the executable.

use std::path::{Path, PathBuf};

use nacos_config_domain::constants::DEFAULT_CONTEXT_PATH;
use nacos_config_domain::{ClientConfig, NacosError, Result};

pub const ADDRESS_VAR: &str = "NACOS_ADDRESS";
pub const USERNAME_VAR: &str = "NACOS_USERNAME";
pub const PASSWORD_VAR: &str = "NACOS_PASSWORD";
pub const CONTEXT_PATH_VAR: &str = "NACOS_CONTEXT_PATH";
pub const REQUEST_TIMEOUT_VAR: &str = "NACOS_REQUEST_TIMEOUT_SECS";

const CONFIG_FILE_NAMES: [&str; 4] = ["nacos.json", "nacos.toml", "config.json", "config.toml"];
const SEARCH_DIRS: [&str; 3] = [".", "..", "../.."];

/// Load configuration from the environment, falling back to a file.
///
/// The file is only consulted when `NACOS_ADDRESS` is unset; a present but
/// invalid environment configuration is reported as is.
///
/// # Errors
/// Returns `NacosError::Config` when the chosen source does not yield a
/// valid configuration.
pub fn load() -> Result<ClientConfig> {
    if std::env::var_os(ADDRESS_VAR).is_none() {
        tracing::debug!(var = ADDRESS_VAR, "address not in environment, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!(address = %config.address, "client configuration loaded from environment");
    Ok(config)
}

/// Load configuration from `NACOS_*` environment variables.
///
/// # Errors
/// Returns `NacosError::Config` when `NACOS_ADDRESS` is missing, the
/// timeout is not an integer, or the resulting configuration is invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    let address = env_var(ADDRESS_VAR)?;
    let username = std::env::var(USERNAME_VAR).unwrap_or_default();
    let password = std::env::var(PASSWORD_VAR).unwrap_or_default();
    let context_path =
        std::env::var(CONTEXT_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONTEXT_PATH.to_string());

    let request_timeout_secs = match std::env::var(REQUEST_TIMEOUT_VAR) {
        Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
            NacosError::Config(format!("Invalid {}: {}", REQUEST_TIMEOUT_VAR, e))
        })?),
        Err(_) => None,
    };

    let config = ClientConfig { address, username, password, context_path, request_timeout_secs };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// With `path` set to `None` the standard locations are probed via
/// [`probe_config_paths`]. The format follows the file extension.
///
/// # Errors
/// Returns `NacosError::Config` when no file is found, it cannot be read or
/// parsed, or the resulting configuration is invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(NacosError::Config(format!("Config file not found: {}", p.display())));
        }
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            NacosError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading client configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NacosError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse by extension; a missing extension is read as JSON.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NacosError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NacosError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(NacosError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Return the first existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    candidate_paths(&roots).into_iter().find(|path| path.exists())
}

fn candidate_paths(roots: &[PathBuf]) -> Vec<PathBuf> {
    roots
        .iter()
        .flat_map(|root| {
            SEARCH_DIRS.iter().flat_map(move |dir| {
                CONFIG_FILE_NAMES.iter().map(move |name| root.join(dir).join(name))
            })
        })
        .collect()
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| NacosError::Config(format!("Missing required environment variable: {}", key)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 5] =
        [ADDRESS_VAR, USERNAME_VAR, PASSWORD_VAR, CONTEXT_PATH_VAR, REQUEST_TIMEOUT_VAR];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    fn temp_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file =
            tempfile::Builder::new().suffix(suffix).tempfile().expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write temp config");
        file
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ADDRESS_VAR, "http://127.0.0.1:8848");
        std::env::set_var(USERNAME_VAR, "nacos");
        std::env::set_var(PASSWORD_VAR, "secret");
        std::env::set_var(CONTEXT_PATH_VAR, "custom");
        std::env::set_var(REQUEST_TIMEOUT_VAR, "15");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.address, "http://127.0.0.1:8848");
        assert_eq!(config.username, "nacos");
        assert_eq!(config.password, "secret");
        assert_eq!(config.context_path, "custom");
        assert_eq!(config.request_timeout_secs, Some(15));

        clear_env();
    }

    #[test]
    fn test_load_from_env_defaults_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ADDRESS_VAR, "http://127.0.0.1:8848");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.username, "");
        assert_eq!(config.context_path, DEFAULT_CONTEXT_PATH);
        assert_eq!(config.request_timeout_secs, None);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_address() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, NacosError::Config(ref msg) if msg.contains(ADDRESS_VAR)));
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ADDRESS_VAR, "http://127.0.0.1:8848");
        std::env::set_var(REQUEST_TIMEOUT_VAR, "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, NacosError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_env_rejects_zero_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ADDRESS_VAR, "http://127.0.0.1:8848");
        std::env::set_var(REQUEST_TIMEOUT_VAR, "0");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, NacosError::Config(ref msg) if msg.contains("timeout")));

        clear_env();
    }

    #[test]
    fn test_load_reports_invalid_env_address_instead_of_probing_files() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ADDRESS_VAR, "127.0.0.1:8848");

        let err = load().unwrap_err();
        assert!(
            matches!(err, NacosError::Config(ref msg) if msg.contains("http://")),
            "expected the address validation error, got {:?}",
            err
        );

        clear_env();
    }

    #[test]
    fn test_load_from_env_rejects_address_without_scheme() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ADDRESS_VAR, "127.0.0.1:8848");

        assert!(matches!(load_from_env(), Err(NacosError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let file = temp_config(
            ".json",
            r#"{"address":"http://nacos:8848","username":"u","password":"p"}"#,
        );

        let config = load_from_file(Some(file.path().to_path_buf())).expect("json config");
        assert_eq!(config.address, "http://nacos:8848");
        assert_eq!(config.password, "p");
        assert_eq!(config.context_path, DEFAULT_CONTEXT_PATH);
    }

    #[test]
    fn test_load_from_file_toml() {
        let file = temp_config(
            ".toml",
            r#"
address = "https://nacos.example.com"
username = "u"
password = "p"
context_path = "cfg"
request_timeout_secs = 3
"#,
        );

        let config = load_from_file(Some(file.path().to_path_buf())).expect("toml config");
        assert_eq!(config.context_path, "cfg");
        assert_eq!(config.request_timeout_secs, Some(3));
        assert_eq!(config.base_url(), "https://nacos.example.com/cfg/v1/");
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/nacos.json"))).unwrap_err();
        assert!(matches!(err, NacosError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let file = temp_config(".json", r#"{ "address": "#);
        assert!(load_from_file(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("address: x", &PathBuf::from("nacos.yaml"));
        assert!(matches!(result, Err(NacosError::Config(ref msg)) if msg.contains("yaml")));
    }

    #[test]
    fn test_candidate_paths_prefer_nacos_files_in_each_directory() {
        let root = PathBuf::from("/srv/app");
        let candidates = candidate_paths(&[root.clone()]);

        assert_eq!(candidates.len(), SEARCH_DIRS.len() * CONFIG_FILE_NAMES.len());
        assert_eq!(candidates[0], root.join(".").join("nacos.json"));
        assert_eq!(candidates[3], root.join(".").join("config.toml"));
        assert_eq!(candidates[4], root.join("..").join("nacos.json"));
    }
}
