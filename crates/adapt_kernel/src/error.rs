//! Error types for registration and adaptation

use std::collections::TryReserveError;
use thiserror::Error;

/// Result alias used by every adaptation operation
pub type AdaptResult<T> = Result<T, AdaptError>;

/// Errors raised while registering adapters or adapting values
///
/// Callers can tell "nothing could adapt this value" (`NotSupported`) apart
/// from "an adapter was chosen and failed" (every other non-infrastructure
/// variant), since the two need different recovery.
#[derive(Debug, Error)]
pub enum AdaptError {
    /// The registry could not grow to hold a new entry
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// The registry itself could not be consulted
    #[error("Registry lookup failed: {0}")]
    Lookup(String),

    /// A self-adapt or conform capability does not apply to this value's type
    ///
    /// Swallowed by the resolver when raised from a capability; propagated
    /// like any other failure when raised from a registered adapter.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
    },

    /// No adapter, capability, or fallback resolved the value
    #[error("can't adapt type '{type_name}' to protocol '{protocol}'")]
    NotSupported {
        type_name: String,
        protocol: String,
    },

    /// The value was recognised but its contents cannot be adapted
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A chosen adapter failed for any other reason
    #[error("Adapter failed: {message}")]
    Adapter {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Registry or context configuration was rejected
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AdaptError {
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        AdaptError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn not_supported(type_name: impl Into<String>, protocol: impl Into<String>) -> Self {
        AdaptError::NotSupported {
            type_name: type_name.into(),
            protocol: protocol.into(),
        }
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        AdaptError::InvalidValue(message.into())
    }

    pub fn adapter(message: impl Into<String>) -> Self {
        AdaptError::Adapter {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an arbitrary error raised inside an adapter
    pub fn adapter_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AdaptError::Adapter {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        AdaptError::Lookup(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        AdaptError::Configuration(message.into())
    }

    /// Returns true if this error is the "not applicable to this type" signal
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, AdaptError::TypeMismatch { .. })
    }

    /// Returns true if no adaptation path existed for the value
    pub fn is_not_supported(&self) -> bool {
        matches!(self, AdaptError::NotSupported { .. })
    }

    /// Returns true if the failure came from the registry rather than from an adapter
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AdaptError::Allocation(_) | AdaptError::Lookup(_))
    }
}
