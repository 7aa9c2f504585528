//! Expose CLI - arranges a window scene and prints where every window goes.
//!
//! The scene is read from a JSON file, laid out with the configured (or
//! overridden) strategy and fitted to the screen.

mod commands;
mod error;
mod output;

use clap::Parser;
use commands::Cli;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = cli.execute() {
        eprintln!("expose: {err}");
        std::process::exit(1);
    }
}
