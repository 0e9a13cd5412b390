//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use scribe_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    /// Error responses carry a stack outside production.
    pub fn exposes_error_details(&self) -> bool {
        *self != Environment::Production
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Which post store to run on.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Postgres(DatabaseConfig),
    /// Only when asked for with `POST_STORE=memory`, or in a build without
    /// the `postgres` feature. Data is lost on restart.
    InMemory,
    /// No `DATABASE_URL` and no explicit in-memory request. Fatal at startup.
    Unconfigured,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load `.env.<APP_ENV>.local` and `.env` (if present), then read the
    /// process environment. Variables already set in the process win.
    pub fn load() -> Self {
        let environment = Self::environment_from(env::var("APP_ENV").ok());

        dotenvy::from_filename(format!(".env.{}.local", environment.as_str())).ok();
        dotenvy::dotenv().ok();

        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_or = |key: &str, default| {
            lookup(key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
                min_connections: parse_or("DB_MIN_CONNECTIONS", 2),
            });

        let wants_memory = lookup("POST_STORE")
            .map(|kind| kind.trim().eq_ignore_ascii_case("memory"))
            .unwrap_or(false);

        let store = match database {
            _ if wants_memory => StoreConfig::InMemory,
            Some(db) => StoreConfig::Postgres(db),
            None if !cfg!(feature = "postgres") => StoreConfig::InMemory,
            None => StoreConfig::Unconfigured,
        };

        Self {
            environment: Self::environment_from(lookup("APP_ENV")),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }

    /// Unknown values fall back to development.
    fn environment_from(value: Option<String>) -> Environment {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn test_database_settings() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("DB_MAX_CONNECTIONS", "50"),
            ("DB_MIN_CONNECTIONS", "not-a-number"),
        ]);
        let StoreConfig::Postgres(db) = config.store else {
            panic!("expected a postgres store, got {:?}", config.store);
        };
        assert_eq!(db.url, "postgres://localhost/blog");
        assert_eq!(db.max_connections, 50);
        assert_eq!(db.min_connections, 2);
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_missing_database_url_is_unconfigured() {
        assert!(matches!(config(&[]).store, StoreConfig::Unconfigured));
        assert!(matches!(
            config(&[("DATABASE_URL", "")]).store,
            StoreConfig::Unconfigured
        ));
    }

    #[test]
    fn test_memory_store_must_be_requested() {
        let config = config(&[
            ("POST_STORE", "Memory"),
            ("DATABASE_URL", "postgres://localhost/blog"),
        ]);
        assert!(matches!(config.store, StoreConfig::InMemory));
    }

    #[test]
    fn test_environment_and_port() {
        let config = config(&[("APP_ENV", "Production"), ("PORT", "8080")]);
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.environment.exposes_error_details());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_unknown_environment_falls_back() {
        let config = config(&[("APP_ENV", "staging")]);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.environment.exposes_error_details());
    }
}
