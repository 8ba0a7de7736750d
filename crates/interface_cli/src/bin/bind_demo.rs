//! Parameter Binding Demo Binary
//!
//! Binds a few sample statements and prints the resulting SQL values as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin bind-demo
//!
//! # Run with environment variables
//! BIND_PROTOCOL_NAME=Bindable DEMO_LOG_LEVEL=trace cargo run --bin bind-demo
//! ```
//!
//! # Environment Variables
//!
//! * `BIND_PROTOCOL_NAME` - Prepare protocol name (default: PrepareProtocol)
//! * `BIND_REGISTRY__NAME` - Published registry name (default: adapters)
//! * `BIND_REGISTRY__INITIAL_CAPACITY` - Registry entries reserved up front (default: 16)
//! * `DEMO_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `DEMO_PRETTY` - Pretty-print the JSON report (default: true)

use anyhow::Context;
use infra_bind::BindContext;
use interface_cli::{run_demo, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().context("invalid configuration")?;

    init_tracing(&settings.cli.log_level);

    tracing::info!(
        protocol = %settings.bind.protocol_name,
        registry = %settings.bind.registry.name,
        "Starting bind demo"
    );

    let context = BindContext::initialize(&settings.bind).context("failed to set up binding")?;
    let report = run_demo(&context)?;

    let json = if settings.cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

/// Initializes the tracing subscriber, preferring `RUST_LOG` when set
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
