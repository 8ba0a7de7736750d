//! CLI configuration

use infra_bind::BindConfig;
use serde::Deserialize;

/// Settings for the demo binary itself
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Pretty-print the JSON report
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `DEMO_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("DEMO"))
            .build()?
            .try_deserialize()
    }
}

/// Everything the binary needs to start
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub cli: CliConfig,
    pub bind: BindConfig,
}

impl Settings {
    /// Loads both the CLI and binding configuration from the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Ok(Self {
            cli: CliConfig::from_env()?,
            bind: BindConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.cli.log_level, "info");
        assert!(settings.cli.pretty);
        assert_eq!(settings.bind.protocol_name, infra_bind::PREPARE_PROTOCOL_NAME);
    }
}
