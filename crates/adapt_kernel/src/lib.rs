//! Adapt Kernel - Runtime type adaptation for values crossing a query boundary
//!
//! This crate converts arbitrary application values into a protocol-conformant
//! representation before they are bound into a statement:
//! - Protocol markers compared by identity, with an optional self-adapt capability
//! - Adaptable values with an optional conform capability
//! - A thread-safe registry of explicit `(type, protocol)` adapters
//! - The resolver that chains registry, self-adapt, conform, and fallback

pub mod config;
pub mod context;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod resolver;
pub mod value;

pub use config::{RegistryConfig, ADAPTERS_NAME};
pub use context::AdaptContext;
pub use error::{AdaptError, AdaptResult};
pub use protocol::{Protocol, ProtocolId, SelfAdapt};
pub use registry::{Adapter, AdapterKey, AdapterRegistry};
pub use resolver::{adapt, Resolution};
pub use value::{Adaptable, Adapted, Conform, TypeKey};
