//! Infrastructure Binding Layer
//!
//! This crate turns statement parameters into SQL values using the adapter
//! registry from `adapt_kernel`.
//!
//! # Architecture
//!
//! A [`BindContext`] plays the role of a driver module's state. It owns the
//! registry and the prepare protocol marker, and it is what the statement
//! layer calls whenever parameters are bound. Values that are not natively
//! bindable are adapted to the prepare protocol:
//!
//! - through an adapter registered with [`BindContext::register_adapter`]
//! - through the value's own conform capability
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_bind::{BindConfig, BindContext, register_default_adapters};
//!
//! let context = BindContext::initialize(&BindConfig::from_env()?)?;
//! register_default_adapters(&context)?;
//! let values = context.bind_parameters(1, &[&chrono::Utc::now().date_naive()])?;
//! ```

pub mod binder;
pub mod config;
pub mod defaults;
pub mod error;
pub mod value;

pub use binder::BindContext;
pub use config::{BindConfig, PREPARE_PROTOCOL_NAME};
pub use defaults::register_default_adapters;
pub use error::BindError;
pub use value::SqlValue;
