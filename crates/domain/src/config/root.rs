use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::http::HttpConfig;
use super::logging::LoggingConfig;

const LOCAL_CONFIG_PATH: &str = "dns-pin.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dns-pin/config.toml";

/// Main configuration structure for dns-pin
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolver configuration (nameservers, timeouts, negative cache)
    #[serde(default)]
    pub dns: DnsConfig,

    /// Outbound HTTP transport configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-pin.toml in current directory
    /// 3. /etc/dns-pin/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(servers) = overrides.upstream_servers {
            self.dns.upstream_servers = servers;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.dns.query_timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        self.dns.upstream_addrs().map_err(ConfigError::Validation)?;

        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "DNS query timeout cannot be 0".to_string(),
            ));
        }

        if self.dns.negative_cache_max_entries == 0 {
            return Err(ConfigError::Validation(
                "Negative cache capacity cannot be 0".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Validation(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                self.logging.format
            )));
        }

        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "HTTP request timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub upstream_servers: Option<Vec<String>>,
    pub query_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
