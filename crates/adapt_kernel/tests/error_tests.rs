//! Tests for adapt_kernel error types

use adapt_kernel::error::AdaptError;
use std::error::Error as _;

#[test]
fn test_type_mismatch() {
    let error = AdaptError::type_mismatch("i64", "f64");

    match &error {
        AdaptError::TypeMismatch { expected, found } => {
            assert_eq!(expected, "i64");
            assert_eq!(found, "f64");
        }
        _ => panic!("Expected TypeMismatch error"),
    }
    assert!(error.is_type_mismatch());
    assert!(!error.is_not_supported());
}

#[test]
fn test_not_supported_display() {
    let error = AdaptError::not_supported("Point", "PrepareProtocol");
    let display = format!("{}", error);

    assert!(display.contains("can't adapt"));
    assert!(display.contains("Point"));
    assert!(display.contains("PrepareProtocol"));
    assert!(error.is_not_supported());
}

#[test]
fn test_adapter_error_keeps_source() {
    let parse = "x".parse::<i64>().unwrap_err();
    let error = AdaptError::adapter_with_source("could not parse amount", parse);

    assert!(error.to_string().contains("could not parse amount"));
    assert!(error.source().is_some());
    assert!(!error.is_infrastructure());
}

#[test]
fn test_adapter_error_without_source() {
    let error = AdaptError::adapter("boom");
    assert!(error.source().is_none());
}

#[test]
fn test_allocation_from_try_reserve() {
    let mut buffer: Vec<u8> = Vec::new();
    let reserve_error = buffer.try_reserve(usize::MAX).unwrap_err();
    let error: AdaptError = reserve_error.into();

    assert!(matches!(error, AdaptError::Allocation(_)));
    assert!(error.is_infrastructure());
}

#[test]
fn test_lookup_is_infrastructure() {
    let error = AdaptError::lookup("registry 'adapters' is poisoned");

    assert!(error.is_infrastructure());
    assert!(!error.is_not_supported());
}

#[test]
fn test_invalid_value_display() {
    let error = AdaptError::invalid_value("negative temperature in kelvin");
    assert_eq!(error.to_string(), "Invalid value: negative temperature in kelvin");
}
