//! Command-line interface for autoentry
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `build`: Generate the entry map
//! - `check`: Validate pages and print the entry chains
//! - `watch`: Regenerate the entry map as pages change
//! - `init`: Write a starter configuration

mod build;
mod check;
mod init;
mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use build::BuildCommand;
pub use check::CheckCommand;
pub use init::InitCommand;
pub use watch::WatchCommand;

/// autoentry - page entry-point discovery for frontend bundlers
#[derive(Parser, Debug)]
#[command(name = "autoentry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to autoentry.toml config file
    #[arg(short, long, global = true, default_value = "autoentry.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the entry map
    Build(BuildCommand),

    /// Validate pages and show each entry's module chain
    Check(CheckCommand),

    /// Regenerate the entry map whenever pages change
    Watch(WatchCommand),

    /// Write a starter autoentry.toml
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Build(cmd) => cmd.execute(&self.config).await,
            Commands::Check(cmd) => cmd.execute(&self.config).await,
            Commands::Watch(cmd) => cmd.execute(&self.config).await,
            Commands::Init(cmd) => cmd.execute().await,
        }
    }
}

/// Print the autoentry banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "⚡".cyan(),
        "autoentry".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
