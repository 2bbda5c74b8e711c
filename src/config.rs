// src/config.rs

use std::{env, fmt, net::SocketAddr};

use dotenvy::dotenv;

/// Marks awarded for a correct answer when neither the question nor the test sets one.
pub const DEFAULT_MARKS_PER_QUESTION: f64 = 4.0;

/// Marks deducted for a wrong answer when neither the question nor the test sets one.
pub const DEFAULT_NEGATIVE_MARKING: f64 = 0.0;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Which `Store` implementation the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Required for the Postgres backend only.
    pub database_url: Option<String>,
    /// JSON fixture loaded into the memory backend at startup.
    pub fixtures_path: Option<String>,
    pub addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let raw_addr = env::var("APP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "APP_ADDR",
            value: raw_addr.clone(),
        })?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Ok(Self {
            store_backend,
            database_url,
            fixtures_path: env::var("FIXTURES_PATH").ok(),
            addr,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            cors_origins,
        })
    }

    /// Configuration for an in-memory server, used by tests and local demos.
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            database_url: None,
            fixtures_path: None,
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_skips_blanks() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn config_errors_name_the_key() {
        assert_eq!(ConfigError::Missing("DATABASE_URL").to_string(), "DATABASE_URL must be set");
        let invalid = ConfigError::Invalid {
            key: "APP_ADDR",
            value: "nowhere".to_string(),
        };
        assert_eq!(invalid.to_string(), "invalid value for APP_ADDR: \"nowhere\"");
    }

    #[test]
    fn in_memory_config_has_no_database() {
        let config = Config::in_memory();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.cors_origins.len(), 2);
    }
}
