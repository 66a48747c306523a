//! # Application Configuration
//!
//! This module defines the configuration structure for the `shopper-server` and
//! provides the logic for loading it from an optional `config.yml` file and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// The environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SHOPPER_CONFIG";

/// The configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// How long browsers may cache CORS preflight responses.
    #[serde(default = "default_cors_max_age_secs")]
    pub cors_max_age_secs: u64,
    /// Alias for `db_url`, read from `DATABASE_URL`.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_port() -> u16 {
    3001
}

fn default_db_url() -> String {
    "db/shopper.db".to_string()
}

fn default_cors_max_age_secs() -> u64 {
    60 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_url: default_db_url(),
            cors_max_age_secs: default_cors_max_age_secs(),
            database_url: None,
        }
    }
}

// Reads a file and substitutes `${VAR}` placeholders from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

fn env_is_set(key: &str) -> bool {
    env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, lowest precedence first:
/// - built-in defaults;
/// - a YAML file: `config_path_override`, else `SHOPPER_CONFIG`, else
///   `config.yml` in the working directory when it exists;
/// - plain environment variables (`PORT`, `DB_URL`);
/// - prefixed environment variables (`SHOPPER_PORT`, `SHOPPER_DB_URL`, ...).
///
/// `DATABASE_URL` stands in for `db_url` unless `DB_URL` or `SHOPPER_DB_URL`
/// is set.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let explicit_path = config_path_override
        .map(str::to_string)
        .or_else(|| env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()));

    match explicit_path {
        Some(path) => {
            let content = read_and_substitute(&path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            if let Some(content) = read_and_substitute(DEFAULT_CONFIG_FILE)? {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("SHOPPER")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if let Some(url) = config.database_url.take().filter(|u| !u.is_empty()) {
        if !env_is_set("DB_URL") && !env_is_set("SHOPPER_DB_URL") {
            config.db_url = url;
        }
    }

    Ok(config)
}
