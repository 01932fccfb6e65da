//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: `RESOURCE_QUERY_`, nesting separator `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/resource-query/{service_name}/config.toml
//! 4. System directory: /etc/resource-query/{service_name}/config.toml
//! 5. Default values
//!
//! ```toml
//! [service]
//! name = "library-api"
//! port = 8080
//!
//! [query]
//! default_page_size = 10
//! max_page_size = 20
//! default_order_by = "Name"
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::paging::{DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const CONFIG_PREFIX: &str = "resource-query";
const ENV_PREFIX: &str = "RESOURCE_QUERY_";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Collection query limits and defaults
    #[serde(default)]
    pub query: QueryConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl ServiceConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Paging and ordering defaults for collection endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size when the client gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page size a client may request
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Order-by expression when the client gives none
    #[serde(default = "default_order_by")]
    pub default_order_by: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_order_by: default_order_by(),
        }
    }
}

impl QueryConfig {
    /// Repair inconsistent limits
    ///
    /// A zero maximum becomes 1, and a default page size outside
    /// `1..=max_page_size` is clamped into it. Each repair is logged.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.max_page_size == 0 {
            tracing::warn!("query.max_page_size is 0; using 1");
            self.max_page_size = 1;
        }
        let clamped = self.default_page_size.clamp(1, self.max_page_size);
        if clamped != self.default_page_size {
            tracing::warn!(
                configured = self.default_page_size,
                used = clamped,
                max = self.max_page_size,
                "query.default_page_size out of range; clamping"
            );
            self.default_page_size = clamped;
        }
        self
    }
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// The service name is taken from the running binary's file name.
    pub fn load() -> Result<Self> {
        let service_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| CONFIG_PREFIX.to_string());

        Self::load_for_service(&service_name)
    }

    /// Load configuration for a specific service name
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut defaults = Config::default();
        defaults.service.name = service_name.to_string();
        let mut figment = Figment::new().merge(Serialized::defaults(defaults));

        // Lowest priority first so later files override earlier ones
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        Ok(config.normalized())
    }

    /// Load configuration from a specific file
    ///
    /// This bypasses the XDG and system directories. Environment variables
    /// still override the file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config.normalized())
    }

    /// Find all possible config file paths for a service
    ///
    /// Returns paths in priority order (highest first).
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(CONFIG_PREFIX);
        if let Some(path) = xdg_dirs.find_config_file(Path::new(service_name).join("config.toml")) {
            paths.push(path);
        }

        paths.push(
            PathBuf::from("/etc")
                .join(CONFIG_PREFIX)
                .join(service_name)
                .join("config.toml"),
        );

        paths
    }

    fn normalized(mut self) -> Self {
        self.query = self.query.normalized();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: CONFIG_PREFIX.to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            query: QueryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.service.timeout(), Duration::from_secs(30));
        assert_eq!(config.query.default_page_size, 10);
        assert_eq!(config.query.max_page_size, 20);
        assert_eq!(config.query.default_order_by, "Name");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[service]
name = "library-api"
port = 9090

[query]
max_page_size = 50
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.service.name, "library-api");
        assert_eq!(config.service.port, 9090);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.query.max_page_size, 50);
        assert_eq!(config.query.default_page_size, 10);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.query, QueryConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nport = \"not a port\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_query_limits_are_normalized() {
        let query = QueryConfig {
            default_page_size: 40,
            max_page_size: 20,
            default_order_by: "Name".to_string(),
        }
        .normalized();
        assert_eq!(query.default_page_size, 20);

        let query = QueryConfig {
            default_page_size: 0,
            max_page_size: 0,
            default_order_by: String::new(),
        }
        .normalized();
        assert_eq!(query.max_page_size, 1);
        assert_eq!(query.default_page_size, 1);
    }
}
