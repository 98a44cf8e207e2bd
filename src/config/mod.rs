use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use thiserror::Error;

/// Which `Store` implementation backs the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when STORAGE=postgres")]
    MissingDatabaseUrl,
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: Option<String>,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Serve the GraphiQL IDE on `GET /graphql`
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
    #[serde(default = "default_query_depth_limit")]
    pub query_depth_limit: usize,
    #[serde(default = "default_query_complexity_limit")]
    pub query_complexity_limit: usize,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    5
}

fn default_graphiql() -> bool {
    true
}

fn default_query_depth_limit() -> usize {
    10
}

fn default_query_complexity_limit() -> usize {
    500
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are loaded first if it exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get the database URL, which must be present for the Postgres backend
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage == StorageBackend::Postgres {
            self.database_url()?;
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Zero("MAX_CONNECTIONS"));
        }
        if self.query_depth_limit == 0 {
            return Err(ConfigError::Zero("QUERY_DEPTH_LIMIT"));
        }
        if self.query_complexity_limit == 0 {
            return Err(ConfigError::Zero("QUERY_COMPLEXITY_LIMIT"));
        }
        Ok(())
    }
}

/// Load configuration and apply command line overrides
pub fn init(port: Option<u16>, memory: bool) -> Result<Config> {
    let mut config = Config::load()?;

    if let Some(port) = port {
        config.port = port;
    }
    if memory {
        config.storage = StorageBackend::Memory;
    }

    config.validate()?;

    Ok(config)
}
