//! Server configuration: defaults, optional TOML file, environment

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use bloodbank_domain::{BloodBankError, Result, StoreConfig, StoreType};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bloodbank.toml";

/// Which document store backend to use
#[derive(Debug, Clone, Copy, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Mongo,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory holding the single-page app; `index.html` is the fallback
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub mongodb_uri: String,
    pub database: String,
}

/// Complete application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub store: StoreSettings,
}

impl AppConfig {
    /// Load configuration from the process environment. `path` names a
    /// config file that must exist; without it `bloodbank.toml` is read if
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load configuration with an explicit set of environment variables.
    ///
    /// Precedence, lowest first: defaults, config file, `BLOODBANK__*`
    /// variables, then the conventional `PORT` and `MONGODB_URI`. Setting
    /// `MONGODB_URI` also selects the MongoDB backend.
    pub fn load_with_env(path: Option<&Path>, vars: HashMap<String, String>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mongodb_uri = vars.get("MONGODB_URI").cloned();
        let backend = mongodb_uri.as_ref().map(|_| "mongo");

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")
            .and_then(|b| b.set_default("server.port", 5000))
            .and_then(|b| b.set_default("server.static_dir", "public"))
            .and_then(|b| b.set_default("store.backend", "memory"))
            .and_then(|b| b.set_default("store.mongodb_uri", "mongodb://localhost:27017"))
            .and_then(|b| b.set_default("store.database", "bloodbank"))
            .map_err(|e| BloodBankError::configuration_error_with_source("defaults", e))?
            .add_source(file)
            .add_source(
                Environment::with_prefix("BLOODBANK")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            .set_override_option("server.port", vars.get("PORT").cloned())
            .and_then(|b| b.set_override_option("store.mongodb_uri", mongodb_uri))
            .and_then(|b| b.set_override_option("store.backend", backend))
            .map_err(|e| BloodBankError::configuration_error_with_source("overrides", e))?
            .build()
            .map_err(|e| BloodBankError::configuration_error_with_source("sources", e))?;

        config
            .try_deserialize()
            .map_err(|e| BloodBankError::configuration_error_with_source("settings", e))
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, port: Option<u16>, backend: Option<StoreBackend>) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(backend) = backend {
            self.store.backend = backend;
        }
        self
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port).parse().map_err(|e| {
            BloodBankError::configuration_error_with_source("server.host", e)
        })
    }

    /// Store configuration for the selected backend
    pub fn store_config(&self) -> StoreConfig {
        let store_type = match self.store.backend {
            StoreBackend::Memory => StoreType::InMemory,
            StoreBackend::Mongo => StoreType::MongoDb {
                uri: self.store.mongodb_uri.clone(),
                database: self.store.database.clone(),
            },
        };
        StoreConfig { store_type }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn fixture_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_use_memory_store() {
        let fixture = fixture_file("");

        let actual = AppConfig::load_with_env(Some(fixture.path()), HashMap::new()).unwrap();

        assert_eq!(actual.server.port, 5000);
        assert_eq!(actual.server.static_dir, PathBuf::from("public"));
        assert_eq!(actual.store_config(), StoreConfig { store_type: StoreType::InMemory });
    }

    #[test]
    fn test_file_then_env_precedence() {
        let fixture = fixture_file(
            "[server]\nport = 7000\nhost = \"127.0.0.1\"\n\n[store]\ndatabase = \"hospital\"\n",
        );

        let actual = AppConfig::load_with_env(
            Some(fixture.path()),
            vars(&[("BLOODBANK__SERVER__PORT", "7100")]),
        )
        .unwrap();

        assert_eq!(actual.server.port, 7100);
        assert_eq!(actual.server.host, "127.0.0.1");
        assert_eq!(actual.store.database, "hospital");
    }

    #[test]
    fn test_conventional_variables_win() {
        let fixture = fixture_file("[server]\nport = 7000\n");

        let actual = AppConfig::load_with_env(
            Some(fixture.path()),
            vars(&[
                ("BLOODBANK__SERVER__PORT", "7100"),
                ("PORT", "8080"),
                ("MONGODB_URI", "mongodb://db.internal:27017"),
            ]),
        )
        .unwrap();

        let expected_store = StoreConfig {
            store_type: StoreType::MongoDb {
                uri: "mongodb://db.internal:27017".to_string(),
                database: "bloodbank".to_string(),
            },
        };
        assert_eq!(actual.server.port, 8080);
        assert_eq!(actual.store_config(), expected_store);
    }

    #[test]
    fn test_cli_overrides_apply_last() {
        let fixture = fixture_file("");

        let actual = AppConfig::load_with_env(Some(fixture.path()), vars(&[("PORT", "8080")]))
            .unwrap()
            .with_overrides(Some(9000), Some(StoreBackend::Mongo));

        assert_eq!(actual.server.port, 9000);
        assert_eq!(actual.store.backend, StoreBackend::Mongo);
        assert_eq!(actual.bind_address().unwrap().port(), 9000);
    }

    #[test]
    fn test_missing_required_file_is_configuration_error() {
        let actual =
            AppConfig::load_with_env(Some(Path::new("/nonexistent/bloodbank.toml")), HashMap::new());

        assert!(matches!(actual, Err(BloodBankError::ConfigurationError { .. })));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let fixture = fixture_file("[store]\nbackend = \"postgres\"\n");

        let actual = AppConfig::load_with_env(Some(fixture.path()), HashMap::new());

        assert!(matches!(actual, Err(BloodBankError::ConfigurationError { .. })));
    }
}
