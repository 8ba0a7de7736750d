//! Registry configuration

use serde::Deserialize;

use crate::error::{AdaptError, AdaptResult};

/// Name under which an owning context publishes its registry
pub const ADAPTERS_NAME: &str = "adapters";

/// Registry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name the registry is published under
    pub name: String,
    /// Number of entries reserved up front
    pub initial_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: ADAPTERS_NAME.to_string(),
            initial_capacity: 16,
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from `ADAPT_*` environment variables
    ///
    /// * `ADAPT_NAME` - published registry name (default: adapters)
    /// * `ADAPT_INITIAL_CAPACITY` - entries reserved up front (default: 16)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("ADAPT"))
            .build()?
            .try_deserialize()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Rejects configurations the registry cannot be published under
    pub fn validate(&self) -> AdaptResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdaptError::configuration("registry name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.name, "adapters");
        assert_eq!(config.initial_capacity, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_invalid() {
        assert!(RegistryConfig::default().name("   ").validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: RegistryConfig = config::Config::builder()
            .set_override("initial_capacity", 64i64)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.name, "adapters");
        assert_eq!(config.initial_capacity, 64);
    }
}
