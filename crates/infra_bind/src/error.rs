//! Binding error types
//!
//! This module defines the errors raised while turning statement parameters
//! into SQL values. A parameter nobody could adapt and a parameter whose
//! adapter failed are kept apart: the first is a caller mistake, the second
//! points at a faulty adapter.

use adapt_kernel::AdaptError;
use thiserror::Error;

/// Errors that can occur while binding statement parameters
#[derive(Debug, Error)]
pub enum BindError {
    /// The statement and the supplied parameters disagree on arity
    #[error("Incorrect number of bindings supplied. The current statement uses {expected}, and there are {supplied} supplied.")]
    ParameterCount { expected: usize, supplied: usize },

    /// A named placeholder has no matching parameter
    #[error("You did not supply a value for binding parameter {0}.")]
    MissingNamedParameter(String),

    /// Nothing adapted the parameter into a bindable value
    #[error("Error binding parameter {param}: type '{type_name}' is not supported")]
    UnsupportedType { param: String, type_name: String },

    /// An adapter was found for the parameter and failed
    #[error("Error adapting parameter {param}: {source}")]
    Adaptation {
        param: String,
        #[source]
        source: AdaptError,
    },

    /// The registry could not be created or consulted
    #[error("Adapter registry error: {0}")]
    Registry(#[from] AdaptError),
}

impl BindError {
    /// Classifies an adaptation failure for the given parameter
    ///
    /// # Arguments
    ///
    /// * `param` - The parameter label (1-based index or placeholder name)
    /// * `type_name` - The parameter's concrete type name
    /// * `error` - The error returned by the resolver
    pub fn from_adapt(param: impl Into<String>, type_name: impl Into<String>, error: AdaptError) -> Self {
        if error.is_not_supported() {
            BindError::UnsupportedType {
                param: param.into(),
                type_name: type_name.into(),
            }
        } else if error.is_infrastructure() {
            BindError::Registry(error)
        } else {
            BindError::Adaptation {
                param: param.into(),
                source: error,
            }
        }
    }

    /// Checks if no adaptation path existed for a parameter
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, BindError::UnsupportedType { .. })
    }

    /// Checks if a registered adapter or capability failed
    pub fn is_adapter_failure(&self) -> bool {
        matches!(self, BindError::Adaptation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_supported_maps_to_unsupported_type() {
        let error = BindError::from_adapt("1", "Point", AdaptError::not_supported("Point", "PrepareProtocol"));
        assert!(error.is_unsupported_type());
        assert_eq!(
            error.to_string(),
            "Error binding parameter 1: type 'Point' is not supported"
        );
    }

    #[test]
    fn test_adapter_failure_keeps_source() {
        let error = BindError::from_adapt(":amount", "Money", AdaptError::invalid_value("negative"));
        assert!(error.is_adapter_failure());
        match error {
            BindError::Adaptation { param, source } => {
                assert_eq!(param, ":amount");
                assert!(matches!(source, AdaptError::InvalidValue(_)));
            }
            other => panic!("Expected Adaptation, got {:?}", other),
        }
    }

    #[test]
    fn test_infrastructure_maps_to_registry() {
        let error = BindError::from_adapt("2", "i64", AdaptError::lookup("poisoned"));
        assert!(matches!(error, BindError::Registry(_)));
    }

    #[test]
    fn test_parameter_count_message() {
        let error = BindError::ParameterCount { expected: 2, supplied: 3 };
        assert!(error.to_string().contains("uses 2, and there are 3 supplied"));
    }
}
