//! Check command implementation
//!
//! Prints the page hierarchy and every entry's module chain.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::entries::{ChunkName, ChunkTree};
use crate::utils::relative_path;

/// Validate pages and show each entry's module chain
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Also print the page hierarchy
    #[arg(long)]
    pub tree: bool,
}

impl CheckCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        let build = config.entry_builder()?.build()?;

        eprintln!(
            "{} {} page(s) under {}\n",
            "→".blue(),
            build.auto_entry_count,
            relative_path(&config.root, &config.pages_dir()).cyan()
        );

        if self.tree {
            for root in build.tree.roots() {
                print_subtree(&build.tree, root, &config.pages.root_name, 1);
            }
            eprintln!();
        }

        for (name, list) in build.entries.iter() {
            let note = if build.overridden.iter().any(|o| o == name) {
                " (manual override)".yellow().to_string()
            } else {
                String::new()
            };
            eprintln!("  {}{}", name.bold(), note);
            for module in list.modules() {
                eprintln!("    {} {}", "•".dimmed(), module);
            }
        }

        eprintln!(
            "\n{} Entry map is valid ({} entries)\n",
            "✓".green().bold(),
            build.entries.len()
        );

        Ok(())
    }
}

fn print_subtree(tree: &ChunkTree, name: &ChunkName, root_name: &str, depth: usize) {
    eprintln!("{}{}", "  ".repeat(depth), name.render(root_name).cyan());
    for child in tree.children(name) {
        print_subtree(tree, child, root_name, depth + 1);
    }
}
