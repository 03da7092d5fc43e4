use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Which backend holds the herb collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Spanner,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spanner" => Ok(StoreBackend::Spanner),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND must be 'spanner' or 'memory', got '{}'", other),
        }
    }
}

/// Location of the Spanner database holding the `herbs` table
#[derive(Debug, Clone)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub enum StoreConfig {
    Spanner(SpannerConfig),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub service_port: u16,
    pub service_host: String,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse::<StoreBackend>()?,
            None => StoreBackend::Spanner,
        };

        let store = match backend {
            StoreBackend::Memory => StoreConfig::Memory,
            StoreBackend::Spanner => {
                let required = |key: &str| {
                    lookup(key).with_context(|| {
                        format!("{} environment variable is required for the spanner backend", key)
                    })
                };

                StoreConfig::Spanner(SpannerConfig {
                    emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                    project: required("SPANNER_PROJECT")?,
                    instance: required("SPANNER_INSTANCE")?,
                    database: required("SPANNER_DATABASE")?,
                })
            }
        };

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let public_dir = PathBuf::from(lookup("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()));

        Ok(Config {
            store,
            service_port,
            service_host,
            public_dir,
        })
    }

    /// Configuration for an in-process server, used by the router tests
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Config {
            store: StoreConfig::Memory,
            service_port: 3000,
            service_host: "127.0.0.1".to_string(),
            public_dir: PathBuf::from("public"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.store {
            StoreConfig::Memory => tracing::info!("  Store backend: memory (records are not persisted)"),
            StoreConfig::Spanner(spanner) => {
                tracing::info!("  Store backend: spanner");
                tracing::info!("  Spanner emulator: {}",
                    spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
                tracing::info!("  Spanner database: {}", spanner.database_path());
            }
        }
        tracing::info!("  Static assets: {}", self.public_dir.display());
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const SPANNER_VARS: [(&str, &str); 3] = [
        ("SPANNER_PROJECT", "test-project"),
        ("SPANNER_INSTANCE", "test-instance"),
        ("SPANNER_DATABASE", "test-database"),
    ];

    #[test]
    fn test_config_with_all_vars() {
        let mut vars = SPANNER_VARS.to_vec();
        vars.extend([
            ("SPANNER_EMULATOR_HOST", "localhost:9010"),
            ("SERVICE_PORT", "8080"),
            ("SERVICE_HOST", "127.0.0.1"),
            ("PUBLIC_DIR", "/srv/herbs"),
        ]);

        let config = load(&vars).unwrap();

        match &config.store {
            StoreConfig::Spanner(spanner) => {
                assert_eq!(spanner.emulator_host, Some("localhost:9010".to_string()));
                assert_eq!(
                    spanner.database_path(),
                    "projects/test-project/instances/test-instance/databases/test-database"
                );
            }
            StoreConfig::Memory => panic!("expected the spanner backend"),
        }
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.public_dir, PathBuf::from("/srv/herbs"));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_with_defaults() {
        let config = load(&SPANNER_VARS).unwrap();

        assert!(matches!(config.store, StoreConfig::Spanner(ref s) if s.emulator_host.is_none()));
        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "0.0.0.0");
        assert_eq!(config.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_memory_backend_needs_no_spanner_vars() {
        let config = load(&[("STORE_BACKEND", "Memory")]).unwrap();
        assert!(matches!(config.store, StoreConfig::Memory));
    }

    #[test]
    fn test_unknown_backend() {
        let error = load(&[("STORE_BACKEND", "mongo")]).unwrap_err();
        assert!(error.to_string().contains("STORE_BACKEND"));
    }

    #[test]
    fn test_missing_required_var() {
        let error = load(&SPANNER_VARS[..2]).unwrap_err();
        assert!(error.to_string().contains("SPANNER_DATABASE"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = SPANNER_VARS.to_vec();
        vars.push(("SERVICE_PORT", "not-a-number"));

        let error = load(&vars).unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        let mut vars = SPANNER_VARS.to_vec();
        vars.push(("SERVICE_PORT", "99999"));

        assert!(load(&vars).is_err());
    }
}
