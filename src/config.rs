use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub addresses: AddressSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Paging and result limits for the address endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AddressSettings {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    #[serde(default = "default_max_nearby_results")]
    pub max_nearby_results: usize,
}

impl Default for AddressSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_nearby_results: default_max_nearby_results(),
        }
    }
}

fn default_page_size() -> u32 { 100 }
fn default_max_page_size() -> u32 { 1000 }
fn default_max_nearby_results() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ADDRESS_BOOK__)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ADDRESS_BOOK__SERVER__PORT -> server.port
            .add_source(environment());

        with_database_url_override(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        with_database_url_override(builder)?.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ADDRESS_BOOK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The conventional DATABASE_URL wins over any configured database.url
fn with_database_url_override(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => builder.set_override("database.url", url),
        _ => Ok(builder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address_settings() {
        let settings = AddressSettings::default();
        assert_eq!(settings.default_page_size, 100);
        assert_eq!(settings.max_page_size, 1000);
        assert_eq!(settings.max_nearby_results, 100);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_deserialize_minimal_settings() {
        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                host = "127.0.0.1"
                port = 9000

                [database]
                url = "postgres://localhost/test"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.workers, None);
        assert_eq!(settings.addresses.default_page_size, 100);
        assert_eq!(settings.logging.level, "info");
    }
}
