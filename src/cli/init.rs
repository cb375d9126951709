//! Project initialization command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::Config;

/// Write a starter autoentry.toml
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Project directory
    #[arg(default_value = ".")]
    pub dir: String,

    /// Page root, relative to the project directory
    #[arg(long, default_value = "src/assets/javascripts/pages")]
    pub pages: String,

    /// Overwrite an existing autoentry.toml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub async fn execute(&self) -> Result<()> {
        let project_dir = Path::new(&self.dir);
        let config_path = project_dir.join("autoentry.toml");

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        fs::create_dir_all(project_dir).context("Failed to create project directory")?;

        fs::write(&config_path, self.generate_config()?)
            .context("Failed to write autoentry.toml")?;
        eprintln!("  {} Created {}", "✓".green(), "autoentry.toml".cyan());

        eprintln!("\n  Next steps:");
        eprintln!("    {} autoentry check --tree", "→".dimmed());
        eprintln!("    {} autoentry build --out entries.json", "→".dimmed());
        eprintln!();

        Ok(())
    }

    fn generate_config(&self) -> Result<String> {
        let mut config = Config::default_config();
        config.pages.root = self.pages.clone();

        let body = toml::to_string_pretty(&config).context("Failed to serialize autoentry.toml")?;

        Ok(format!("# autoentry configuration\n\n{}", body))
    }
}
