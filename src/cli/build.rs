//! Build command implementation

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::output::EntryOutput;
use crate::utils::format_duration;

/// Generate the entry map
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Output file (overrides output.file; stdout when neither is set)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write compact JSON
    #[arg(long)]
    pub compact: bool,
}

impl BuildCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let start = Instant::now();

        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        let build = config.entry_builder()?.build()?;

        let output = EntryOutput::from_path(self.out.clone().or_else(|| config.output_path()));
        let pretty = config.output.pretty && !self.compact;
        output.write(&build.entries, pretty)?;

        eprintln!(
            "{} Generated {} entr{} ({} from pages) in {}",
            "✓".green().bold(),
            build.entries.len(),
            if build.entries.len() == 1 { "y" } else { "ies" },
            build.auto_entry_count,
            format_duration(start.elapsed())
        );

        for name in &build.overridden {
            eprintln!(
                "  {} {} overridden by manual entry",
                "•".dimmed(),
                name.yellow()
            );
        }

        if let EntryOutput::File(path) = &output {
            eprintln!("  {} {}", "→".dimmed(), path.display().to_string().cyan());
        }

        eprintln!();

        Ok(())
    }
}
