use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// MySQL host
    #[serde(default = "default_db_host")]
    pub db_host: String,

    /// MySQL port
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    #[serde(default = "default_db_user")]
    pub db_user: String,

    #[serde(default)]
    pub db_password: String,

    /// Database (schema) holding the `Cars` table
    #[serde(default = "default_db_database")]
    pub db_database: String,

    /// Upper bound on pooled connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// How long a request may wait for a pooled connection
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// `sql_mode` applied to every connection when it is checked out
    #[serde(default = "default_db_sql_mode")]
    pub db_sql_mode: String,

    /// `time_zone` applied to every connection when it is checked out
    #[serde(default = "default_db_time_zone")]
    pub db_time_zone: String,

    /// Fallback tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "root".to_string()
}

fn default_db_database() -> String {
    "cars".to_string()
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_acquire_timeout_secs() -> u64 {
    30
}

fn default_db_sql_mode() -> String {
    "TRADITIONAL".to_string()
}

fn default_db_time_zone() -> String {
    "-08:00".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env::<Config>()?)
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
