//! Adaptation resolution
//!
//! [`adapt`] turns a value into the form a protocol expects. Strategies are
//! tried in strict order and the first one that resolves wins:
//!
//! 1. an adapter registered for the value's exact type and the protocol
//! 2. the protocol's self-adapt capability
//! 3. the value's conform capability
//! 4. the caller's fallback, or `AdaptError::NotSupported`
//!
//! A registered adapter is final, whatever it returns. The two capabilities
//! may decline, either with `Ok(None)` or with `AdaptError::TypeMismatch`;
//! any other error they raise ends resolution and reaches the caller as is.

use tracing::trace;

use crate::error::{AdaptError, AdaptResult};
use crate::protocol::Protocol;
use crate::registry::AdapterRegistry;
use crate::value::{Adaptable, Adapted};

/// Outcome of a single capability strategy
#[derive(Debug)]
pub enum Resolution {
    /// The strategy produced the adapted object
    Resolved(Adapted),
    /// The strategy does not apply; try the next one
    Declined,
    /// The strategy applied and failed
    Failed(AdaptError),
}

impl Resolution {
    /// Classifies the raw result of a self-adapt or conform call
    pub fn from_capability(outcome: AdaptResult<Option<Adapted>>) -> Self {
        match outcome {
            Ok(Some(adapted)) => Resolution::Resolved(adapted),
            Ok(None) => Resolution::Declined,
            Err(err) if err.is_type_mismatch() => Resolution::Declined,
            Err(err) => Resolution::Failed(err),
        }
    }

    /// Returns the final result, or `None` if resolution should continue
    pub fn settle(self) -> Option<AdaptResult<Adapted>> {
        match self {
            Resolution::Resolved(adapted) => Some(Ok(adapted)),
            Resolution::Failed(err) => Some(Err(err)),
            Resolution::Declined => None,
        }
    }
}

/// Adapts `value` to `protocol`
///
/// `fallback` is returned untouched when nothing else resolves; without one
/// the call fails with `AdaptError::NotSupported`.
///
/// The registry is consulted once, and its lock is released before any
/// adapter or capability runs.
///
/// # Errors
///
/// - `AdaptError::NotSupported` if no strategy resolved and no fallback was given
/// - `AdaptError::Lookup` if the registry could not be consulted
/// - any error raised by the adapter or capability that resolved the value
pub fn adapt(
    registry: &AdapterRegistry,
    value: &dyn Adaptable,
    protocol: &Protocol,
    fallback: Option<Adapted>,
) -> AdaptResult<Adapted> {
    let type_key = value.type_key();

    if let Some(adapter) = registry.lookup(type_key, protocol)? {
        trace!(type_name = type_key.name(), %protocol, "Resolved through registry");
        return adapter(value);
    }

    if let Some(self_adapter) = protocol.self_adapter() {
        let resolution = Resolution::from_capability(self_adapter.self_adapt(value));
        if let Some(result) = resolution.settle() {
            trace!(type_name = type_key.name(), %protocol, "Resolved through protocol self-adapt");
            return result;
        }
        trace!(type_name = type_key.name(), %protocol, "Protocol declined");
    }

    if let Some(conformer) = value.conformer() {
        let resolution = Resolution::from_capability(conformer.conform(protocol));
        if let Some(result) = resolution.settle() {
            trace!(type_name = type_key.name(), %protocol, "Resolved through value conform");
            return result;
        }
        trace!(type_name = type_key.name(), %protocol, "Value declined");
    }

    match fallback {
        Some(alt) => {
            trace!(type_name = type_key.name(), %protocol, "Returning fallback");
            Ok(alt)
        }
        None => Err(AdaptError::not_supported(type_key.name(), protocol.name())),
    }
}
