//! Owning context for an adapter registry
//!
//! An [`AdaptContext`] is created once when the embedding environment sets
//! itself up. It owns the registry, publishes it under its configured name,
//! and exposes the three operations the rest of the system uses: initialize,
//! register, and adapt. Cloning the context shares the same registry.

use std::sync::Arc;

use tracing::info;

use crate::config::RegistryConfig;
use crate::error::AdaptResult;
use crate::protocol::Protocol;
use crate::registry::{Adapter, AdapterRegistry};
use crate::resolver;
use crate::value::{Adaptable, Adapted, TypeKey};

/// Explicit handle to a shared adapter registry
#[derive(Debug, Clone)]
pub struct AdaptContext {
    adapters: Arc<AdapterRegistry>,
}

impl AdaptContext {
    /// Creates a context with an empty registry published as `adapters`
    pub fn initialize() -> AdaptResult<Self> {
        Self::with_config(&RegistryConfig::default())
    }

    /// Creates a context with an empty registry built from `config`
    pub fn with_config(config: &RegistryConfig) -> AdaptResult<Self> {
        let adapters = Arc::new(AdapterRegistry::with_config(config)?);
        info!(
            registry = %adapters.name(),
            initial_capacity = config.initial_capacity,
            "Adapter registry initialized"
        );
        Ok(Self { adapters })
    }

    /// Returns the published registry
    pub fn adapters(&self) -> &Arc<AdapterRegistry> {
        &self.adapters
    }

    /// Declares an explicit adapter for the exact `(type, protocol)` pair
    pub fn register(&self, type_key: TypeKey, protocol: &Protocol, adapter: Adapter) -> AdaptResult<()> {
        self.adapters.register(type_key, protocol, adapter)
    }

    /// Declares a typed adapter for values of exactly type `T`
    pub fn register_fn<T, F>(&self, protocol: &Protocol, adapter: F) -> AdaptResult<()>
    where
        T: Adaptable,
        F: Fn(&T) -> AdaptResult<Adapted> + Send + Sync + 'static,
    {
        self.adapters.register_fn(protocol, adapter)
    }

    /// Adapts `value` to `protocol`, see [`resolver::adapt`]
    pub fn adapt(
        &self,
        value: &dyn Adaptable,
        protocol: &Protocol,
        fallback: Option<Adapted>,
    ) -> AdaptResult<Adapted> {
        resolver::adapt(&self.adapters, value, protocol, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ADAPTERS_NAME;

    #[test]
    fn test_initialize_publishes_registry() {
        let context = AdaptContext::initialize().unwrap();
        assert_eq!(context.adapters().name(), ADAPTERS_NAME);
    }

    #[test]
    fn test_clones_share_registry() {
        let context = AdaptContext::initialize().unwrap();
        let clone = context.clone();
        let protocol = Protocol::new("Bindable");

        clone
            .register_fn(&protocol, |value: &i64| Ok(Adapted::new(value.to_string())))
            .unwrap();

        let adapted = context.adapt(&42i64, &protocol, None).unwrap();
        assert_eq!(adapted.downcast_ref::<String>().map(String::as_str), Some("42"));
        assert!(Arc::ptr_eq(context.adapters(), clone.adapters()));
    }
}
