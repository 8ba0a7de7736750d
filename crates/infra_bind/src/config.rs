//! Binding configuration

use adapt_kernel::{AdaptError, RegistryConfig};
use serde::Deserialize;

use crate::error::BindError;

/// Name of the protocol marker denoting "bindable value"
pub const PREPARE_PROTOCOL_NAME: &str = "PrepareProtocol";

/// Configuration for a binding context
///
/// # Example
///
/// ```rust
/// use infra_bind::BindConfig;
///
/// let config = BindConfig::default().registry_capacity(64);
/// assert_eq!(config.protocol_name, "PrepareProtocol");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Name of the context's prepare protocol marker
    pub protocol_name: String,
    /// Settings for the adapter registry the context owns
    pub registry: RegistryConfig,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            protocol_name: PREPARE_PROTOCOL_NAME.to_string(),
            registry: RegistryConfig::default(),
        }
    }
}

impl BindConfig {
    /// Loads configuration from `BIND_*` environment variables
    ///
    /// * `BIND_PROTOCOL_NAME` - prepare protocol name (default: PrepareProtocol)
    /// * `BIND_REGISTRY__NAME` - published registry name (default: adapters)
    /// * `BIND_REGISTRY__INITIAL_CAPACITY` - entries reserved up front (default: 16)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("BIND")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Sets the number of registry entries reserved up front
    pub fn registry_capacity(mut self, capacity: usize) -> Self {
        self.registry.initial_capacity = capacity;
        self
    }

    /// Sets the prepare protocol name
    pub fn protocol_name(mut self, name: impl Into<String>) -> Self {
        self.protocol_name = name.into();
        self
    }

    pub fn validate(&self) -> Result<(), BindError> {
        if self.protocol_name.trim().is_empty() {
            return Err(AdaptError::configuration("prepare protocol name must not be empty").into());
        }
        self.registry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BindConfig::default();
        assert_eq!(config.registry.name, "adapters");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_protocol_name_rejected() {
        let err = BindConfig::default().protocol_name("").validate().unwrap_err();
        assert!(matches!(err, BindError::Registry(AdaptError::Configuration(_))));
    }
}
