//! Property-Based Test Generators
//!
//! Provides proptest strategies for SQL values and protocol names.

use infra_bind::SqlValue;
use proptest::prelude::*;

/// Generates bindable values in every storage class
///
/// Reals are finite so generated values compare equal to themselves.
pub fn arb_sql_value() -> impl Strategy<Value = SqlValue> {
    prop_oneof![
        Just(SqlValue::Null),
        any::<i64>().prop_map(SqlValue::Integer),
        (-1.0e12..1.0e12f64).prop_map(SqlValue::Real),
        "[a-zA-Z0-9 ']{0,24}".prop_map(SqlValue::Text),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(SqlValue::Blob),
    ]
}

/// Generates protocol names
pub fn arb_protocol_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{0,15}"
}

/// Generates placeholder names without a sigil
pub fn arb_placeholder_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}
