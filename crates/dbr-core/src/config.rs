//! Configuration management for dbreader
//!
//! Connection settings are resolved with priority:
//! 1. Command-line flags and environment variables (handled by the front end)
//! 2. dbreader.toml (or a file given explicitly)
//! 3. Defaults

use crate::{ConnectionParams, DEFAULT_PORT, DEFAULT_SCHEMA};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file searched for when none is specified
pub const CONFIG_FILE_NAME: &str = "dbreader.toml";

/// dbreader configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// `[connection]` section. Values may reference environment variables
/// with `${VAR_NAME}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

impl ReaderConfig {
    /// Load configuration from a specific file, or from `dbreader.toml` in
    /// the current directory or one of its parents.
    ///
    /// A missing file is not an error when no path was given explicitly.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::find_config_file()? {
                Some(p) => p,
                None => {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading configuration from: {:?}", config_path);

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    /// Parse configuration text and resolve environment references
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: ReaderConfig = toml::from_str(contents)?;
        config.resolve_env_vars();
        Ok(config)
    }

    /// Find dbreader.toml by searching current directory and parents
    fn find_config_file() -> Result<Option<PathBuf>> {
        let mut current = env::current_dir()?;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(Some(config_path));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    fn resolve_env_vars(&mut self) {
        let conn = &mut self.connection;
        for field in [
            &mut conn.host,
            &mut conn.port,
            &mut conn.user,
            &mut conn.password,
            &mut conn.database,
            &mut conn.schema,
        ] {
            if let Some(value) = field.take() {
                *field = Self::resolve_env_var(&value);
            }
        }
    }

    /// Resolve a single ${VAR_NAME} reference. Unset variables resolve to `None`.
    fn resolve_env_var(value: &str) -> Option<String> {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            env::var(var_name).ok()
        } else {
            Some(value.to_string())
        }
    }
}

impl ConnectionConfig {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(self, other: ConnectionConfig) -> ConnectionConfig {
        ConnectionConfig {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            database: other.database.or(self.database),
            schema: other.schema.or(self.schema),
            connect_timeout_secs: other.connect_timeout_secs.or(self.connect_timeout_secs),
        }
    }

    /// Names of the settings required to start the command-line front end
    /// that are missing or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.user) {
            missing.push("user");
        }
        if is_blank(&self.host) {
            missing.push("host");
        }
        if is_blank(&self.database) {
            missing.push("database");
        }
        missing
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// Build connection parameters, filling unset fields with defaults
    pub fn to_params(&self) -> ConnectionParams {
        let defaults = ConnectionParams::default();
        ConnectionParams {
            host: non_blank(&self.host).unwrap_or(defaults.host),
            port: non_blank(&self.port).unwrap_or_else(|| DEFAULT_PORT.to_string()),
            user: non_blank(&self.user).unwrap_or(defaults.user),
            password: self.password.clone().unwrap_or_default(),
            database: self.database.clone().unwrap_or_default(),
            schema: non_blank(&self.schema).unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
