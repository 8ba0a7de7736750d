//! Command-line interface layer
//!
//! Hosts the `bind-demo` binary: it loads configuration from the
//! environment, sets up a [`BindContext`](infra_bind::BindContext), and
//! reports what binding a handful of sample statements produces.
//!
//! # Example
//!
//! ```rust
//! use infra_bind::{BindConfig, BindContext};
//! use interface_cli::run_demo;
//!
//! let context = BindContext::initialize(&BindConfig::default()).unwrap();
//! let report = run_demo(&context).unwrap();
//! assert_eq!(report.statements.len(), 4);
//! ```

pub mod config;
pub mod demo;

pub use config::{CliConfig, Settings};
pub use demo::{run_demo, BindOutcome, DemoReport, StatementReport};
