use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::dashboard::performance::{Criterion, PerformanceCriteria};
use crate::dashboard::promotion::{CatalogError, PromotionCatalog};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let dashboard = DashboardConfig {
            promotion_catalog: optional_path("APP_PROMOTION_CATALOG"),
            performance_criteria: optional_path("APP_PERFORMANCE_CRITERIA"),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dashboard,
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locations of the injected pricing and criteria tables. Unset paths fall
/// back to the built-in tables.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    pub promotion_catalog: Option<PathBuf>,
    pub performance_criteria: Option<PathBuf>,
}

impl DashboardConfig {
    pub fn promotion_catalog(&self) -> Result<PromotionCatalog, ConfigError> {
        let Some(path) = &self.promotion_catalog else {
            return Ok(PromotionCatalog::standard());
        };

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.clone(),
            source,
        })?;
        PromotionCatalog::from_json(&raw).map_err(|source| ConfigError::InvalidCatalog {
            path: path.clone(),
            source,
        })
    }

    pub fn performance_criteria(&self) -> Result<PerformanceCriteria, ConfigError> {
        let Some(path) = &self.performance_criteria else {
            return Ok(PerformanceCriteria::standard());
        };

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let criteria: Vec<Criterion> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::InvalidCriteria {
                path: path.clone(),
                source,
            })?;
        Ok(PerformanceCriteria::new(criteria))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidCatalog {
        path: PathBuf,
        source: CatalogError,
    },
    InvalidCriteria {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Unreadable { path, .. } => {
                write!(f, "unable to read {}", path.display())
            }
            ConfigError::InvalidCatalog { path, source } => {
                write!(f, "invalid promotion catalog {}: {}", path.display(), source)
            }
            ConfigError::InvalidCriteria { path, .. } => {
                write!(f, "invalid performance criteria {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Unreadable { source, .. } => Some(source),
            ConfigError::InvalidCatalog { source, .. } => Some(source),
            ConfigError::InvalidCriteria { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::promotion::{PromotionDuration, PromotionPlan};
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_PROMOTION_CATALOG");
        env::remove_var("APP_PERFORMANCE_CRITERIA");
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("estate-desk-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.dashboard.promotion_catalog.is_none());
        assert!(config.dashboard.performance_criteria.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        env::remove_var("APP_HOST");
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        let result = AppConfig::load();
        env::remove_var("APP_PORT");
        assert!(matches!(result, Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn blank_table_paths_are_ignored() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PROMOTION_CATALOG", "  ");
        let config = AppConfig::load().expect("config loads");
        env::remove_var("APP_PROMOTION_CATALOG");
        assert!(config.dashboard.promotion_catalog.is_none());
    }

    #[test]
    fn builtin_tables_used_without_paths() {
        let dashboard = DashboardConfig::default();

        let catalog = dashboard.promotion_catalog().expect("catalog");
        let criteria = dashboard.performance_criteria().expect("criteria");

        assert_eq!(catalog, PromotionCatalog::standard());
        assert_eq!(criteria, PerformanceCriteria::standard());
    }

    #[test]
    fn loads_tables_from_files() {
        let catalog_path = scratch_file(
            "catalog.json",
            r#"{"standard":{"1_month":25},"featured":{"15_days":80,"1_month":120},"premium":{"15_days":200,"1_month":300}}"#,
        );
        let criteria_path = scratch_file(
            "criteria.json",
            r#"[{"metricName":"response_rate","target":{"rule":"greater_than_or_equal","value":"75"}}]"#,
        );
        let dashboard = DashboardConfig {
            promotion_catalog: Some(catalog_path.clone()),
            performance_criteria: Some(criteria_path.clone()),
        };

        let catalog = dashboard.promotion_catalog().expect("catalog loads");
        let criteria = dashboard.performance_criteria().expect("criteria load");
        let _ = fs::remove_file(catalog_path);
        let _ = fs::remove_file(criteria_path);

        assert_eq!(
            catalog.cost(PromotionPlan::Standard, PromotionDuration::FifteenDays),
            25
        );
        assert_eq!(criteria.len(), 1);
        assert!(criteria.find("response_rate").is_some());
    }

    #[test]
    fn reports_invalid_catalog_file() {
        let path = scratch_file("broken-catalog.json", r#"{"standard":{"15_days":10}}"#);
        let dashboard = DashboardConfig {
            promotion_catalog: Some(path.clone()),
            performance_criteria: None,
        };

        let result = dashboard.promotion_catalog();
        let _ = fs::remove_file(path);

        match result {
            Err(ConfigError::InvalidCatalog { source, .. }) => {
                assert!(matches!(source, CatalogError::MissingBaseCost(PromotionPlan::Standard)));
            }
            other => panic!("expected invalid catalog, got {other:?}"),
        }
    }

    #[test]
    fn reports_missing_criteria_file() {
        let dashboard = DashboardConfig {
            promotion_catalog: None,
            performance_criteria: Some(PathBuf::from("/nonexistent/estate-desk/criteria.json")),
        };

        assert!(matches!(
            dashboard.performance_criteria(),
            Err(ConfigError::Unreadable { .. })
        ));
    }
}
