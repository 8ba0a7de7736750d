//! Custom Test Assertions
//!
//! Provides assertion helpers for adapted objects that give more
//! meaningful messages than downcasting by hand.

use std::any::Any;
use std::fmt::Debug;

use adapt_kernel::{AdaptError, AdaptResult, Adapted};

/// Asserts that an adapted object is a `T` equal to `expected`
///
/// # Panics
///
/// Panics if the adapted object has another type or a different value
pub fn assert_adapted_eq<T>(adapted: &Adapted, expected: &T)
where
    T: Any + PartialEq + Debug,
{
    match adapted.downcast_ref::<T>() {
        Some(actual) => assert_eq!(actual, expected, "Adapted value mismatch"),
        None => panic!(
            "Expected adapted {}, got {}",
            std::any::type_name::<T>(),
            adapted.type_name()
        ),
    }
}

/// Asserts that an adaptation failed because nothing could adapt the value
pub fn assert_not_supported(result: &AdaptResult<Adapted>) {
    match result {
        Err(AdaptError::NotSupported { .. }) => {}
        Err(other) => panic!("Expected NotSupported, got error {:?}", other),
        Ok(adapted) => panic!("Expected NotSupported, got {:?}", adapted),
    }
}

/// Asserts that two adapted handles are the same object, not merely equal
pub fn assert_same_object(actual: &Adapted, expected: &Adapted) {
    assert!(
        actual.ptr_eq(expected),
        "Expected the very same object: actual={:?}, expected={:?}",
        actual,
        expected
    );
}
