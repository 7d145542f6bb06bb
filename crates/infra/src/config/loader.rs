//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `CLINICDESK_DB_BACKEND` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CLINICDESK_DB_BACKEND`: `memory` or `sqlite` (required)
//! - `CLINICDESK_DB_PATH`: SQLite file path
//! - `CLINICDESK_DB_POOL_SIZE`: Connection pool size
//! - `CLINICDESK_HOST` / `CLINICDESK_PORT`: HTTP listener
//! - `CLINICDESK_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `CLINICDESK_LOG_JSON`: Emit JSON log lines (true/false)
//! - `CLINICDESK_SEED_DEMO_DATA`: Load demo records at start-up (true/false)
//!
//! ## File Locations
//! The loader probes `./clinicdesk.{json,toml}` and `./config.{json,toml}`
//! in the working directory and its parent, then the same names next to the
//! executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clinicdesk_domain::{
    ClinicError, Config, DatabaseConfig, LoggingConfig, Result, ServerConfig, StorageBackend,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["clinicdesk.json", "clinicdesk.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ClinicError::Config` if neither the environment nor any config
/// file yields a configuration, or if a value fails to parse.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `CLINICDESK_DB_BACKEND` is required; every other variable falls back
/// to the default of its section.
///
/// # Errors
/// Returns `ClinicError::Config` if the backend variable is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let backend =
        parse_var::<StorageBackend>(&env_var("CLINICDESK_DB_BACKEND")?, "storage backend")?;

    let database_defaults = DatabaseConfig::default();
    let database = DatabaseConfig {
        backend,
        path: std::env::var("CLINICDESK_DB_PATH").unwrap_or(database_defaults.path),
        pool_size: optional_var("CLINICDESK_DB_POOL_SIZE", "pool size")?
            .unwrap_or(database_defaults.pool_size),
    };

    let server_defaults = ServerConfig::default();
    let server = ServerConfig {
        host: std::env::var("CLINICDESK_HOST").unwrap_or(server_defaults.host),
        port: optional_var("CLINICDESK_PORT", "port")?.unwrap_or(server_defaults.port),
    };

    let logging_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        level: std::env::var("CLINICDESK_LOG_LEVEL").unwrap_or(logging_defaults.level),
        json: env_bool("CLINICDESK_LOG_JSON", logging_defaults.json),
    };

    Ok(Config {
        server,
        database,
        logging,
        seed_demo_data: env_bool("CLINICDESK_SEED_DEMO_DATA", false),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations (see
/// [`probe_config_paths`]). Format is chosen by extension.
///
/// # Errors
/// Returns `ClinicError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ClinicError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ClinicError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ClinicError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ClinicError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ClinicError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ClinicError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe standard locations for a configuration file
///
/// Returns the first existing candidate, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ClinicError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_var<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key).ok().map(|raw| parse_var(&raw, what)).transpose()
}

fn parse_var<T>(raw: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ClinicError::Config(format!("Invalid {what}: {e}")))
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 8] = [
        "CLINICDESK_DB_BACKEND",
        "CLINICDESK_DB_PATH",
        "CLINICDESK_DB_POOL_SIZE",
        "CLINICDESK_HOST",
        "CLINICDESK_PORT",
        "CLINICDESK_LOG_LEVEL",
        "CLINICDESK_LOG_JSON",
        "CLINICDESK_SEED_DEMO_DATA",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        let truthy =
            [("CD_TEST_BOOL_1", "1"), ("CD_TEST_BOOL_YES", "YES"), ("CD_TEST_BOOL_ON", "on")];
        for (key, value) in truthy {
            std::env::set_var(key, value);
            assert!(env_bool(key, false), "{value} should be true");
            std::env::remove_var(key);
        }

        let falsy =
            [("CD_TEST_BOOL_0", "0"), ("CD_TEST_BOOL_NO", "no"), ("CD_TEST_BOOL_OFF", "off")];
        for (key, value) in falsy {
            std::env::set_var(key, value);
            assert!(!env_bool(key, true), "{value} should be false");
            std::env::remove_var(key);
        }

        std::env::remove_var("CD_TEST_BOOL_MISSING");
        assert!(env_bool("CD_TEST_BOOL_MISSING", true));
        assert!(!env_bool("CD_TEST_BOOL_MISSING", false));
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CLINICDESK_DB_BACKEND", "sqlite");
        std::env::set_var("CLINICDESK_DB_PATH", "/tmp/clinic.db");
        std::env::set_var("CLINICDESK_DB_POOL_SIZE", "8");
        std::env::set_var("CLINICDESK_HOST", "127.0.0.1");
        std::env::set_var("CLINICDESK_PORT", "3000");
        std::env::set_var("CLINICDESK_LOG_LEVEL", "debug");
        std::env::set_var("CLINICDESK_LOG_JSON", "true");
        std::env::set_var("CLINICDESK_SEED_DEMO_DATA", "yes");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.database.path, "/tmp/clinic.db");
        assert_eq!(config.database.pool_size, 8);
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_load_from_env_uses_defaults_for_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CLINICDESK_DB_BACKEND", "memory");
        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_load_from_env_missing_backend() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ClinicError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CLINICDESK_DB_BACKEND", "postgres");
        assert!(matches!(load_from_env(), Err(ClinicError::Config(_))));

        std::env::set_var("CLINICDESK_DB_BACKEND", "sqlite");
        std::env::set_var("CLINICDESK_PORT", "not-a-port");
        let result = load_from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.message().contains("Invalid port"), "unexpected: {err}");
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "server": { "port": 9090 },
                "database": { "backend": "sqlite", "path": "test.db", "pool_size": 2 },
                "seed_demo_data": true
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.database.pool_size, 2);
        assert!(config.seed_demo_data);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[database]
backend = "memory"

[logging]
level = "warn"
json = true
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/clinicdesk.json"))).unwrap_err();
        assert!(matches!(err, ClinicError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = write_temp(r#"{ "database": "#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(matches!(result, Err(ClinicError::Config(_))));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("backend: sqlite", &PathBuf::from("clinicdesk.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
