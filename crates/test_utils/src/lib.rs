//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! adaptation and binding test suites.
//!
//! # Modules
//!
//! - `fixtures`: Sample adaptable values and protocol markers
//! - `assertions`: Custom assertion helpers for adapted objects
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use assertions::*;
pub use generators::*;
