//! Adapter Registry
//!
//! This module holds the mapping from `(concrete type, protocol)` to the
//! adapter that converts values of that type into the protocol's form.
//!
//! # Concurrency
//!
//! The registry is shared by every thread working against the owning
//! context. Each operation takes the lock for its own duration only:
//!
//! - `register` holds the write lock while the key is built and inserted
//! - `lookup` holds the read lock long enough to clone the adapter handle
//!
//! Adapters are never invoked under the lock, so an adapter may register
//! further adapters on the same registry.
//!
//! # Usage
//!
//! ```rust
//! use adapt_kernel::{Adapted, AdapterRegistry, Protocol, TypeKey};
//!
//! let registry = AdapterRegistry::new("adapters");
//! let bindable = Protocol::new("Bindable");
//!
//! registry
//!     .register_fn(&bindable, |value: &i64| Ok(Adapted::new(value.to_string())))
//!     .unwrap();
//!
//! let adapter = registry.lookup(TypeKey::of::<i64>(), &bindable).unwrap();
//! assert!(adapter.is_some());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{AdaptError, AdaptResult};
use crate::protocol::{Protocol, ProtocolId};
use crate::value::{Adaptable, Adapted, TypeKey};

/// A registered conversion from one concrete type into a protocol's form
pub type Adapter = Arc<dyn Fn(&dyn Adaptable) -> AdaptResult<Adapted> + Send + Sync>;

/// Registry key: exact value type paired with protocol identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterKey {
    type_key: TypeKey,
    protocol: ProtocolId,
}

impl AdapterKey {
    pub fn new(type_key: TypeKey, protocol: &Protocol) -> Self {
        Self {
            type_key,
            protocol: protocol.id(),
        }
    }

    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub fn protocol(&self) -> ProtocolId {
        self.protocol
    }
}

/// Process-wide table of explicitly registered adapters
pub struct AdapterRegistry {
    name: String,
    entries: RwLock<HashMap<AdapterKey, Adapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty registry sized and named from configuration
    ///
    /// # Errors
    ///
    /// - `AdaptError::Configuration` if the configured name is empty
    /// - `AdaptError::Allocation` if the initial capacity cannot be reserved
    pub fn with_config(config: &RegistryConfig) -> AdaptResult<Self> {
        config.validate()?;

        let mut entries = HashMap::new();
        entries.try_reserve(config.initial_capacity)?;

        Ok(Self {
            name: config.name.clone(),
            entries: RwLock::new(entries),
        })
    }

    /// Returns the name the registry is published under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts or replaces the adapter for the exact `(type, protocol)` pair
    ///
    /// Re-registering a pair silently overwrites the previous adapter.
    ///
    /// # Errors
    ///
    /// - `AdaptError::Allocation` if the table cannot grow
    /// - `AdaptError::Lookup` if the registry lock is poisoned
    pub fn register(&self, type_key: TypeKey, protocol: &Protocol, adapter: Adapter) -> AdaptResult<()> {
        let key = AdapterKey::new(type_key, protocol);

        let replaced = {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| AdaptError::lookup(format!("registry '{}' is poisoned", self.name)))?;
            entries.try_reserve(1)?;
            entries.insert(key, adapter).is_some()
        };

        debug!(
            registry = %self.name,
            type_name = type_key.name(),
            protocol = %protocol,
            replaced,
            "Adapter registered"
        );
        Ok(())
    }

    /// Registers a typed adapter for values of exactly type `T`
    ///
    /// The closure receives the value already downcast to `&T`.
    pub fn register_fn<T, F>(&self, protocol: &Protocol, adapter: F) -> AdaptResult<()>
    where
        T: Adaptable,
        F: Fn(&T) -> AdaptResult<Adapted> + Send + Sync + 'static,
    {
        let type_key = TypeKey::of::<T>();
        let erased: Adapter = Arc::new(move |value: &dyn Adaptable| {
            match value.as_any().downcast_ref::<T>() {
                Some(typed) => adapter(typed),
                None => Err(AdaptError::type_mismatch(type_key.name(), value.type_name())),
            }
        });
        self.register(type_key, protocol, erased)
    }

    /// Looks up the adapter for the exact `(type, protocol)` pair
    ///
    /// Returns `Ok(None)` when no adapter is registered. An `Err` means the
    /// registry could not be consulted at all.
    pub fn lookup(&self, type_key: TypeKey, protocol: &Protocol) -> AdaptResult<Option<Adapter>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AdaptError::lookup(format!("registry '{}' is poisoned", self.name)))?;
        Ok(entries.get(&AdapterKey::new(type_key, protocol)).cloned())
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Drop for AdapterRegistry {
    fn drop(&mut self) {
        debug!(registry = %self.name, "Adapter registry dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_text() -> Adapter {
        Arc::new(|value: &dyn Adaptable| -> AdaptResult<Adapted> {
            Ok(Adapted::new(format!("{:?}", value)))
        })
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let registry = AdapterRegistry::new("adapters");
        let protocol = Protocol::new("Bindable");

        let found = registry.lookup(TypeKey::of::<i64>(), &protocol).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_register_then_lookup() {
        let registry = AdapterRegistry::new("adapters");
        let protocol = Protocol::new("Bindable");
        registry.register(TypeKey::of::<i64>(), &protocol, to_text()).unwrap();

        assert!(registry.lookup(TypeKey::of::<i64>(), &protocol).unwrap().is_some());
        assert!(registry.lookup(TypeKey::of::<i32>(), &protocol).unwrap().is_none());
        assert!(registry
            .lookup(TypeKey::of::<i64>(), &Protocol::new("Bindable"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_reregistration_overwrites() {
        let registry = AdapterRegistry::new("adapters");
        let protocol = Protocol::new("Bindable");
        registry
            .register_fn(&protocol, |_: &i64| Ok(Adapted::new("first")))
            .unwrap();
        registry
            .register_fn(&protocol, |_: &i64| Ok(Adapted::new("second")))
            .unwrap();

        let adapter = registry.lookup(TypeKey::of::<i64>(), &protocol).unwrap().unwrap();
        let adapted = adapter(&7i64).unwrap();
        assert_eq!(adapted.downcast_ref::<&str>(), Some(&"second"));
    }

    #[test]
    fn test_typed_adapter_rejects_other_types() {
        let registry = AdapterRegistry::new("adapters");
        let protocol = Protocol::new("Bindable");
        registry
            .register_fn(&protocol, |value: &i64| Ok(Adapted::new(*value * 2)))
            .unwrap();

        let adapter = registry.lookup(TypeKey::of::<i64>(), &protocol).unwrap().unwrap();
        assert_eq!(adapter(&21i64).unwrap().downcast_ref::<i64>(), Some(&42));
        assert!(adapter(&21i32).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_with_config_rejects_empty_name() {
        let config = RegistryConfig::default().name("");
        let err = AdapterRegistry::with_config(&config).unwrap_err();
        assert!(matches!(err, AdaptError::Configuration(_)));
    }

    #[test]
    fn test_with_config_uses_name() {
        let config = RegistryConfig::default().name("custom_adapters").initial_capacity(4);
        let registry = AdapterRegistry::with_config(&config).unwrap();
        assert_eq!(registry.name(), "custom_adapters");
    }

    #[test]
    fn test_with_config_allocation_failure() {
        let config = RegistryConfig::default().initial_capacity(usize::MAX);
        let err = AdapterRegistry::with_config(&config).unwrap_err();
        assert!(matches!(err, AdaptError::Allocation(_)));
        assert!(err.is_infrastructure());
    }

    #[test]
    fn test_poisoned_lock_is_lookup_failure() {
        let registry = Arc::new(AdapterRegistry::new("adapters"));
        let protocol = Protocol::new("Bindable");

        let poisoner = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the registry lock");
        })
        .join();

        let Err(err) = registry.lookup(TypeKey::of::<i64>(), &protocol) else {
            panic!("expected a poisoned lookup to fail");
        };
        assert!(matches!(err, AdaptError::Lookup(_)));
        assert!(!err.is_not_supported());

        let err = registry
            .register(TypeKey::of::<i64>(), &protocol, to_text())
            .unwrap_err();
        assert!(err.is_infrastructure());
    }
}
