//! Statement parameter binding
//!
//! A [`BindContext`] is the state a driver module sets up once: it owns the
//! adapter registry, the "prepare protocol" marker that identifies bindable
//! values, and a flag recording whether any native type was given an adapter.
//!
//! Each parameter is bound in two steps:
//!
//! 1. Native values (`i64`, `f64`, `String`, ...) convert directly, unless an
//!    adapter was registered for a native type, in which case every value is
//!    routed through the resolver first and natives it cannot adapt still
//!    bind as themselves
//! 2. Other values are adapted to the prepare protocol with no fallback, and
//!    the adapted object must itself convert to a [`SqlValue`]
//!
//! # Example
//!
//! ```rust
//! use adapt_kernel::Adapted;
//! use infra_bind::{BindConfig, BindContext, SqlValue};
//!
//! #[derive(Debug)]
//! struct Celsius(f64);
//! adapt_kernel::impl_adaptable!(Celsius);
//!
//! let context = BindContext::initialize(&BindConfig::default()).unwrap();
//! context
//!     .register_adapter(|c: &Celsius| Ok(Adapted::new(SqlValue::Real(c.0))))
//!     .unwrap();
//!
//! let values = context.bind_parameters(2, &[&Celsius(21.5), &"kitchen"]).unwrap();
//! assert_eq!(values, vec![SqlValue::Real(21.5), SqlValue::Text("kitchen".into())]);
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use adapt_kernel::{AdaptContext, AdaptResult, Adaptable, Adapted, AdapterRegistry, Protocol};
use tracing::{debug, info};

use crate::config::BindConfig;
use crate::error::BindError;
use crate::value::SqlValue;

/// Binding state shared by every statement of a driver module
pub struct BindContext {
    adapt: AdaptContext,
    prepare_protocol: Protocol,
    base_type_adapted: AtomicBool,
}

impl BindContext {
    /// Creates the binding state with an empty adapter registry
    ///
    /// # Errors
    ///
    /// Returns `BindError::Registry` if the configuration is rejected or
    /// the registry cannot be allocated
    pub fn initialize(config: &BindConfig) -> Result<Self, BindError> {
        config.validate()?;

        let adapt = AdaptContext::with_config(&config.registry)?;
        let prepare_protocol = Protocol::new(config.protocol_name.clone());

        info!(
            protocol = %prepare_protocol,
            registry = %adapt.adapters().name(),
            "Bind context initialized"
        );

        Ok(Self {
            adapt,
            prepare_protocol,
            base_type_adapted: AtomicBool::new(false),
        })
    }

    /// Returns the underlying adaptation context
    pub fn adapt_context(&self) -> &AdaptContext {
        &self.adapt
    }

    /// Returns the published adapter registry
    pub fn adapters(&self) -> &Arc<AdapterRegistry> {
        self.adapt.adapters()
    }

    /// Returns the marker denoting "bindable value"
    pub fn prepare_protocol(&self) -> &Protocol {
        &self.prepare_protocol
    }

    /// Returns true once an adapter has been registered for a native type
    pub fn base_type_adapted(&self) -> bool {
        self.base_type_adapted.load(Ordering::Acquire)
    }

    /// Registers an adapter from `T` to the prepare protocol
    ///
    /// Registering for a native type (such as `i64` or `String`) disables the
    /// native fast path, so that the adapter is honoured.
    pub fn register_adapter<T, F>(&self, adapter: F) -> Result<(), BindError>
    where
        T: Adaptable,
        F: Fn(&T) -> AdaptResult<Adapted> + Send + Sync + 'static,
    {
        self.adapt.register_fn(&self.prepare_protocol, adapter)?;

        if SqlValue::is_native_type(TypeId::of::<T>()) {
            self.base_type_adapted.store(true, Ordering::Release);
            debug!(type_name = std::any::type_name::<T>(), "Native type adapted");
        }
        Ok(())
    }

    /// Adapts `value`, defaulting to the prepare protocol
    pub fn adapt(
        &self,
        value: &dyn Adaptable,
        protocol: Option<&Protocol>,
        fallback: Option<Adapted>,
    ) -> AdaptResult<Adapted> {
        let protocol = protocol.unwrap_or(&self.prepare_protocol);
        self.adapt.adapt(value, protocol, fallback)
    }

    /// Binds positional parameters
    ///
    /// # Arguments
    ///
    /// * `expected` - Number of placeholders in the statement
    /// * `params` - Parameter values in placeholder order
    ///
    /// # Errors
    ///
    /// - `BindError::ParameterCount` if `params` has the wrong length
    /// - `BindError::UnsupportedType` if a parameter cannot be adapted
    /// - `BindError::Adaptation` if an adapter for a parameter failed
    pub fn bind_parameters(
        &self,
        expected: usize,
        params: &[&dyn Adaptable],
    ) -> Result<Vec<SqlValue>, BindError> {
        if params.len() != expected {
            return Err(BindError::ParameterCount {
                expected,
                supplied: params.len(),
            });
        }

        params
            .iter()
            .enumerate()
            .map(|(index, value)| self.bind_one(Param::Index(index + 1), *value))
            .collect()
    }

    /// Binds named parameters
    ///
    /// Placeholders are given as written in the statement (`:id`, `@id`,
    /// `$id`); the leading sigil is dropped before looking the name up.
    ///
    /// # Errors
    ///
    /// - `BindError::MissingNamedParameter` if a placeholder has no value
    /// - otherwise as for [`bind_parameters`](Self::bind_parameters)
    pub fn bind_named(
        &self,
        placeholders: &[&str],
        params: &HashMap<&str, &dyn Adaptable>,
    ) -> Result<Vec<SqlValue>, BindError> {
        placeholders
            .iter()
            .map(|placeholder| {
                let name = strip_sigil(placeholder);
                let value = params
                    .get(name)
                    .ok_or_else(|| BindError::MissingNamedParameter((*placeholder).to_string()))?;
                self.bind_one(Param::Name(placeholder), *value)
            })
            .collect()
    }

    fn bind_one(&self, param: Param<'_>, value: &dyn Adaptable) -> Result<SqlValue, BindError> {
        if !self.needs_adapt(value) {
            if let Some(native) = SqlValue::from_native(value.as_any()) {
                return Ok(native);
            }
        }

        let adapted = match self.adapt.adapt(value, &self.prepare_protocol, None) {
            Ok(adapted) => adapted,
            Err(err) if err.is_not_supported() => match SqlValue::from_native(value.as_any()) {
                // Natives nobody adapted still bind as themselves
                Some(native) => return Ok(native),
                None => return Err(BindError::from_adapt(param.to_string(), value.type_name(), err)),
            },
            Err(err) => return Err(BindError::from_adapt(param.to_string(), value.type_name(), err)),
        };

        SqlValue::from_adapted(&adapted).ok_or_else(|| BindError::UnsupportedType {
            param: param.to_string(),
            type_name: adapted.type_name().to_string(),
        })
    }

    fn needs_adapt(&self, value: &dyn Adaptable) -> bool {
        self.base_type_adapted() || !SqlValue::is_native_type(value.type_key().id())
    }
}

impl fmt::Debug for BindContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindContext")
            .field("prepare_protocol", &self.prepare_protocol)
            .field("registry", self.adapt.adapters())
            .field("base_type_adapted", &self.base_type_adapted())
            .finish()
    }
}

/// Label of a statement parameter, for error messages
#[derive(Debug, Clone, Copy)]
enum Param<'a> {
    Index(usize),
    Name(&'a str),
}

impl fmt::Display for Param<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Index(index) => write!(f, "{}", index),
            Param::Name(name) => f.write_str(name),
        }
    }
}

fn strip_sigil(placeholder: &str) -> &str {
    placeholder
        .strip_prefix(&[':', '@', '$'][..])
        .unwrap_or(placeholder)
}
