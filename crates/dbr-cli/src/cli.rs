use clap::{Parser, ValueEnum};
use dbr_core::ConnectionConfig;
use std::path::PathBuf;

/// How results are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// dbreader - browse the tables of a PostgreSQL schema
#[derive(Parser, Debug)]
#[command(name = "dbreader", version, about, long_about = None)]
pub struct Cli {
    /// Schema to inspect (default: public)
    #[arg(env = "DB_SCHEMA")]
    pub schema: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST")]
    pub host: Option<String>,

    /// Database port (default: 5432)
    #[arg(long, env = "DB_PORT")]
    pub port: Option<String>,

    /// Database user
    #[arg(long, short = 'U', env = "DB_USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, short = 'd', env = "DB_NAME")]
    pub database: Option<String>,

    /// Seconds to wait for the connection to be established
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Configuration file (default: dbreader.toml in the current directory or a parent)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Connection settings given on the command line or through the environment
    pub fn connection_overrides(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            port: self.port.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            schema: self.schema.clone(),
            connect_timeout_secs: self.connect_timeout,
        }
    }
}

/// Error worth reporting from loading a `.env` file. A missing file is not one.
pub fn dotenv_failure<T>(result: dotenvy::Result<T>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}
