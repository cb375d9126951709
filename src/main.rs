//! autoentry - page entry-point discovery for frontend bundlers
//!
//! Scans a pages directory for page modules and emits a bundler entry map
//! in which every page entry also loads its ancestor pages.
//!
//! # Features
//! - Dot-named chunks derived from the page directory layout
//! - Ancestor page injection, tolerant of missing intermediate pages
//! - Baseline modules and manual entries from autoentry.toml
//! - Watch mode that rewrites the map as pages come and go

use anyhow::Result;
use autoentry_lib::Cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("autoentry=debug,autoentry_lib=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("autoentry=info,autoentry_lib=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
