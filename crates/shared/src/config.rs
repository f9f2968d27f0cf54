//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Where budget line items are read from.
    #[serde(default)]
    pub source: DataSourceConfig,
    /// Dashboard presentation settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Backend used to fetch budget line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Direct Postgres connection through SeaORM.
    #[default]
    Postgres,
    /// Hosted REST table endpoint (PostgREST-style).
    Rest,
}

/// Data source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    /// Which backend to use.
    #[serde(default)]
    pub kind: DataSourceKind,
    /// Database connection URL (postgres kind).
    pub database_url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Base URL of the hosted REST endpoint (rest kind).
    pub rest_url: Option<String>,
    /// API key sent to the hosted REST endpoint.
    pub api_key: Option<String>,
    /// Name of the line-items table.
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            kind: DataSourceKind::default(),
            database_url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            rest_url: None,
            api_key: None,
            table: default_table(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_table() -> String {
    "budget_line_items".to_string()
}

/// Dashboard presentation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Upper bound on the single line-item fetch, in seconds. Zero disables it.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    /// Route the "chat about this row" action navigates to.
    #[serde(default = "default_chat_route")]
    pub chat_route: String,
    /// Currency symbol used by the amount formatters.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            chat_route: default_chat_route(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_chat_route() -> String {
    "/chat".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is inconsistent.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STATEHOUSE").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the selected data source has what it needs to connect.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the missing setting.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        match self.source.kind {
            DataSourceKind::Postgres if self.source.database_url.is_none() => Err(
                config::ConfigError::Message("source.database_url is required".to_string()),
            ),
            DataSourceKind::Rest if self.source.rest_url.is_none() => Err(
                config::ConfigError::Message("source.rest_url is required".to_string()),
            ),
            _ => Ok(()),
        }
    }
}
