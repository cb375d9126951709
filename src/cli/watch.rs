//! Watch command implementation

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::output::EntryOutput;
use crate::watch::EntryWatcher;

/// Regenerate the entry map whenever pages change
#[derive(Args, Debug)]
pub struct WatchCommand {
    /// Output file (overrides output.file; stdout when neither is set)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write compact JSON
    #[arg(long)]
    pub compact: bool,
}

impl WatchCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        let output = EntryOutput::from_path(self.out.clone().or_else(|| config.output_path()));
        let pretty = config.output.pretty && !self.compact;

        eprintln!("{} Starting entry watcher...", "→".blue());

        EntryWatcher::new(Arc::new(config), output, pretty).run().await
    }
}
