//! # Vesper Preview
//!
//! Command-line slide previewer.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vesper_preview::{run, CliArgs, PreviewConfig};

/// Initialize structured tracing on stderr with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,vesper_engine=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vesper_engine=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PreviewConfig::from(CliArgs::parse());
    tracing::debug!("Preview config: {config:?}");

    let report = run(&config)?;
    println!("{}", report.output);

    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}
