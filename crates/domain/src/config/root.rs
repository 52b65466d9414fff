use serde::{Deserialize, Serialize};
use std::path::Path;

use super::admin::AdminConfig;
use super::billing::{BillingConfig, BillingMode};
use super::classifier::ClassifierConfig;
use super::database::DatabaseConfig;
use super::ecs::EcsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "zns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/zns/config.toml";

/// Main configuration structure for the gateway
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub ecs: EcsConfig,

    #[serde(default)]
    pub billing: BillingConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. zns.toml in current directory
    /// 3. /etc/zns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.or_else(|| Self::get_config_path()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(cert) = overrides.tls_cert {
            self.server.tls_cert = Some(cert);
        }
        if let Some(key) = overrides.tls_key {
            self.server.tls_key = Some(key);
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.url = upstream;
        }
        if let Some(local) = overrides.local_upstream {
            self.upstream.local_url = Some(local);
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.free {
            self.billing.mode = BillingMode::Free;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.server.tls_cert.is_some() != self.server.tls_key.is_some() {
            return Err(ConfigError::Validation(
                "tls_cert and tls_key must be set together".to_string(),
            ));
        }

        validate_upstream_url("upstream.url", &self.upstream.url)?;
        if let Some(local) = &self.upstream.local_url {
            validate_upstream_url("upstream.local_url", local)?;
            if !self.classifier.has_sources() {
                return Err(ConfigError::Validation(
                    "Split-horizon mode needs classifier.exact_list or classifier.suffix_list"
                        .to_string(),
                ));
            }
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.timeout_ms must be greater than 0".to_string(),
            ));
        }

        if !(1..=32).contains(&self.ecs.ipv4_prefix) {
            return Err(ConfigError::Validation(format!(
                "ecs.ipv4_prefix must be within 1..=32, got {}",
                self.ecs.ipv4_prefix
            )));
        }

        if !(48..=64).contains(&self.ecs.ipv6_prefix) {
            return Err(ConfigError::Validation(format!(
                "ecs.ipv6_prefix must be within 48..=64, got {}",
                self.ecs.ipv6_prefix
            )));
        }

        if self.billing.mode == BillingMode::Metered {
            if self.database.path.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Metered billing needs database.path".to_string(),
                ));
            }
            if self.billing.ledger_timeout_ms == 0 {
                return Err(ConfigError::Validation(
                    "billing.ledger_timeout_ms must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<&'static str> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
    }
}

fn validate_upstream_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be an http(s) URL, got '{url}'"
        )))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub tls_cert: Option<String>,
    pub tls_key: Option<String>,
    pub upstream: Option<String>,
    pub local_upstream: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub free: bool,
}
