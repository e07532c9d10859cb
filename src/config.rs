// src/config.rs

//! Application configuration loaded from a YAML file overlaid by environment variables.
//!
//! Configuration is read once at startup and is immutable afterwards. Failures
//! (malformed file, unparseable values) are treated as deployment errors rather
//! than recoverable runtime conditions.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/application.yaml";

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable as a string.
macro_rules! optional_env {
    // ---
    ($key:literal) => {
        std::env::var($key).ok()
    };
}

/// Reads an optional environment variable and parses it.
///
/// A missing variable yields `None`; a present but unparseable value is a
/// configuration error naming the variable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty) => {
        match std::env::var($key) {
            Ok(raw) => Some(raw.trim().parse::<$ty>().map_err(|_| {
                anyhow::anyhow!(concat!("Invalid configuration value for ", $key, ": {}"), raw)
            })?),
            Err(_) => None,
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails on an invalid value for `$key`.
macro_rules! assert_invalid_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Invalid configuration value for ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment profile name (e.g. `dev`, `prod`). Informational only.
    pub environment: String,
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // ---
        Self {
            environment: "dev".to_string(),
            service: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the file named by `BOOKSTORE_CONFIG_PATH`
    /// (or [`DEFAULT_CONFIG_PATH`]) and applies environment overrides.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if any
    /// override has an invalid value. A missing file is not an error.
    pub fn load() -> Result<Self> {
        // ---
        let path = optional_env!("BOOKSTORE_CONFIG_PATH")
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let file = FileConfig::read(Path::new(&path))?;
        Self::from_layers(file)
    }

    /// Builds configuration from YAML text plus environment overrides.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // ---
        let file: FileConfig = serde_yaml::from_str(yaml).context("invalid configuration yaml")?;
        Self::from_layers(file)
    }

    fn from_layers(file: FileConfig) -> Result<Self> {
        // ---
        let defaults = AppConfig::default();

        let environment = optional_env!("BOOKSTORE_ENVIRONMENT")
            .or(file.environment)
            .unwrap_or(defaults.environment);

        Ok(Self {
            environment,
            service: ServiceConfig::from_layers(file.service_name, file.version),
            database: DatabaseConfig::from_layers(file.mongodb_host, file.mongodb_port)?,
            server: ServerConfig::from_env()?,
        })
    }
}

/// On-disk shape of `application.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FileConfig {
    // ---
    environment: Option<String>,
    service_name: Option<String>,
    version: Option<String>,
    mongodb_host: Option<String>,
    mongodb_port: Option<u16>,
}

impl FileConfig {
    // ---
    fn read(path: &Path) -> Result<Self> {
        // ---
        if !path.exists() {
            tracing::warn!(
                "Configuration file {} not found, using environment and defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&text)
            .with_context(|| format!("invalid configuration file {}", path.display()))
    }
}

// ============================================================
// Environment expansion
// ============================================================

static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("env reference pattern is valid")
});

/// Replaces `$VAR` and `${VAR}` with values from the process environment.
/// Unset variables expand to the empty string.
pub fn expand_env(value: &str) -> String {
    // ---
    ENV_REFERENCE
        .replace_all(value, |caps: &Captures| {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            std::env::var(name).unwrap_or_default()
        })
        .into_owned()
}

// ============================================================
// Service configuration
// ============================================================

mod service {
    // ---
    use super::*;

    /// Identity of this service as reported by `/version` and metric labels.
    #[derive(Debug, Clone)]
    pub struct ServiceConfig {
        /// Service name, used as the `service` metric label.
        pub name: String,

        /// Service version, with `$VAR` references already expanded.
        pub version: String,
    }

    impl Default for ServiceConfig {
        fn default() -> Self {
            // ---
            Self {
                name: "book-store".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }
        }
    }

    impl ServiceConfig {
        // ---
        pub(super) fn from_layers(name: Option<String>, version: Option<String>) -> Self {
            // ---
            let defaults = Self::default();

            let name = optional_env!("BOOKSTORE_SERVICE_NAME")
                .or(name)
                .unwrap_or(defaults.name);
            let version = optional_env!("BOOKSTORE_VERSION")
                .or(version)
                .map(|v| expand_env(&v))
                .unwrap_or(defaults.version);

            Self { name, version }
        }
    }
}
pub use service::ServiceConfig;

// ============================================================
// Database configuration
// ============================================================

mod database {
    // ---
    use super::*;

    /// Which document store backend serves the book collection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum StoreBackend {
        #[default]
        Mongo,
        Memory,
    }

    impl FromStr for StoreBackend {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            // ---
            match s.to_ascii_lowercase().as_str() {
                "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
                "memory" => Ok(StoreBackend::Memory),
                other => Err(anyhow!("unknown store type {other:?}")),
            }
        }
    }

    /// Document store settings.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// MongoDB host name. Defaults to `localhost`.
        pub host: String,

        /// MongoDB port. Defaults to 27017.
        pub port: u16,

        /// Database holding the book collection. Always `bookstore`.
        pub database: String,

        /// Collection name. Always `books`.
        pub collection: String,

        /// Store backend. Defaults to MongoDB.
        pub backend: StoreBackend,

        /// Insert the sample records at startup. Defaults to true.
        pub seed: bool,
    }

    impl Default for DatabaseConfig {
        fn default() -> Self {
            // ---
            Self {
                host: "localhost".to_string(),
                port: 27017,
                database: "bookstore".to_string(),
                collection: "books".to_string(),
                backend: StoreBackend::Mongo,
                seed: true,
            }
        }
    }

    impl DatabaseConfig {
        // ---
        pub(super) fn from_layers(host: Option<String>, port: Option<u16>) -> Result<Self> {
            // ---
            let defaults = Self::default();

            let host = optional_env!("BOOKSTORE_MONGODB_HOST")
                .or(host)
                .unwrap_or(defaults.host);
            let port = optional_env_parse!("BOOKSTORE_MONGODB_PORT", u16)
                .or(port)
                .unwrap_or(defaults.port);
            let backend = optional_env_parse!("BOOKSTORE_STORE_TYPE", StoreBackend)
                .unwrap_or(defaults.backend);
            let seed = optional_env_parse!("BOOKSTORE_SEED", bool).unwrap_or(defaults.seed);

            Ok(Self {
                host,
                port,
                backend,
                seed,
                ..defaults
            })
        }

        /// Connection string for the MongoDB driver.
        pub fn uri(&self) -> String {
            // ---
            format!("mongodb://{}:{}", self.host, self.port)
        }
    }
}
pub use database::{DatabaseConfig, StoreBackend};

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Which metrics backend records instrumented requests.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum MetricsBackend {
        #[default]
        Prometheus,
        Noop,
    }

    impl FromStr for MetricsBackend {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            // ---
            match s.to_ascii_lowercase().as_str() {
                "prom" | "prometheus" => Ok(MetricsBackend::Prometheus),
                "noop" => Ok(MetricsBackend::Noop),
                other => Err(anyhow!("unknown metrics type {other:?}")),
            }
        }
    }

    /// HTTP listener and observability settings.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Listen address. Defaults to `0.0.0.0:8080`.
        pub bind_addr: String,

        /// Metrics backend. Defaults to Prometheus.
        pub metrics: MetricsBackend,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            // ---
            Self {
                bind_addr: "0.0.0.0:8080".to_string(),
                metrics: MetricsBackend::Prometheus,
            }
        }
    }

    impl ServerConfig {
        // ---
        pub(super) fn from_env() -> Result<Self> {
            // ---
            let defaults = Self::default();

            let bind_addr = optional_env!("BOOKSTORE_BIND_ADDR").unwrap_or(defaults.bind_addr);
            let metrics = optional_env_parse!("BOOKSTORE_METRICS_TYPE", MetricsBackend)
                .unwrap_or(defaults.metrics);

            Ok(Self { bind_addr, metrics })
        }
    }
}
pub use server::{MetricsBackend, ServerConfig};

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use anyhow::Result;
    use serial_test::serial;

    const OVERRIDES: &[&str] = &[
        "BOOKSTORE_CONFIG_PATH",
        "BOOKSTORE_ENVIRONMENT",
        "BOOKSTORE_SERVICE_NAME",
        "BOOKSTORE_VERSION",
        "BOOKSTORE_MONGODB_HOST",
        "BOOKSTORE_MONGODB_PORT",
        "BOOKSTORE_STORE_TYPE",
        "BOOKSTORE_METRICS_TYPE",
        "BOOKSTORE_BIND_ADDR",
        "BOOKSTORE_SEED",
    ];

    fn clear_overrides() {
        // ---
        for key in OVERRIDES {
            std::env::remove_var(key);
        }
    }

    const SAMPLE: &str = r#"
environment: test
serviceName: go-demo
version: "v${BOOKSTORE_TEST_BUILD}-rc"
mongodbHost: mongo.internal
mongodbPort: 27018
"#;

    #[test]
    #[serial]
    fn yaml_values_are_used() -> Result<()> {
        // ---
        clear_overrides();
        std::env::set_var("BOOKSTORE_TEST_BUILD", "42");

        let cfg = AppConfig::from_yaml_str(SAMPLE)?;
        assert_eq!(cfg.environment, "test");
        assert_eq!(cfg.service.name, "go-demo");
        assert_eq!(cfg.service.version, "v42-rc");
        assert_eq!(cfg.database.uri(), "mongodb://mongo.internal:27018");
        assert_eq!(cfg.database.database, "bookstore");
        assert_eq!(cfg.database.collection, "books");

        std::env::remove_var("BOOKSTORE_TEST_BUILD");
        Ok(())
    }

    #[test]
    #[serial]
    fn environment_overrides_yaml() -> Result<()> {
        // ---
        clear_overrides();
        std::env::set_var("BOOKSTORE_ENVIRONMENT", "prod");
        std::env::set_var("BOOKSTORE_MONGODB_HOST", "db");
        std::env::set_var("BOOKSTORE_MONGODB_PORT", "1234");
        std::env::set_var("BOOKSTORE_VERSION", "2.0.0");
        std::env::set_var("BOOKSTORE_STORE_TYPE", "memory");
        std::env::set_var("BOOKSTORE_METRICS_TYPE", "noop");
        std::env::set_var("BOOKSTORE_SEED", "false");

        let cfg = AppConfig::from_yaml_str(SAMPLE)?;
        assert_eq!(cfg.environment, "prod");
        assert_eq!(cfg.service.name, "go-demo");
        assert_eq!(cfg.service.version, "2.0.0");
        assert_eq!(cfg.database.uri(), "mongodb://db:1234");
        assert_eq!(cfg.database.backend, StoreBackend::Memory);
        assert_eq!(cfg.server.metrics, MetricsBackend::Noop);
        assert!(!cfg.database.seed);

        clear_overrides();
        Ok(())
    }

    #[test]
    #[serial]
    fn defaults_applied_without_file() -> Result<()> {
        // ---
        clear_overrides();
        std::env::set_var("BOOKSTORE_CONFIG_PATH", "/nonexistent/application.yaml");

        let cfg = AppConfig::load()?;
        assert_eq!(cfg.environment, "dev");
        assert_eq!(cfg.service.name, "book-store");
        assert_eq!(cfg.service.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(cfg.database.uri(), "mongodb://localhost:27017");
        assert_eq!(cfg.database.backend, StoreBackend::Mongo);
        assert!(cfg.database.seed);
        assert_eq!(cfg.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.server.metrics, MetricsBackend::Prometheus);

        clear_overrides();
        Ok(())
    }

    #[test]
    #[serial]
    fn invalid_port_fails() {
        // ---
        clear_overrides();
        std::env::set_var("BOOKSTORE_MONGODB_PORT", "not-a-port");

        assert_invalid_config!(AppConfig::from_yaml_str("{}"), "BOOKSTORE_MONGODB_PORT");

        clear_overrides();
    }

    #[test]
    #[serial]
    fn unknown_store_type_fails() {
        // ---
        clear_overrides();
        std::env::set_var("BOOKSTORE_STORE_TYPE", "postgres");

        assert_invalid_config!(AppConfig::from_yaml_str("{}"), "BOOKSTORE_STORE_TYPE");

        clear_overrides();
    }

    #[test]
    #[serial]
    fn malformed_yaml_fails() {
        // ---
        clear_overrides();
        assert!(AppConfig::from_yaml_str("mongodbPort: [not, a, port]").is_err());
    }

    #[test]
    #[serial]
    fn expand_env_handles_both_forms() {
        // ---
        std::env::set_var("BOOKSTORE_TEST_A", "x");
        std::env::remove_var("BOOKSTORE_TEST_MISSING");

        assert_eq!(expand_env("$BOOKSTORE_TEST_A-${BOOKSTORE_TEST_A}"), "x-x");
        assert_eq!(expand_env("v${BOOKSTORE_TEST_MISSING}1"), "v1");
        assert_eq!(expand_env("plain"), "plain");

        std::env::remove_var("BOOKSTORE_TEST_A");
    }
}
