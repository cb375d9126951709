//! Entry map output
//!
//! Writes the serialized entry map where the bundler configuration reads it.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::entries::EntryMap;

/// Destination of the serialized entry map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutput {
    Stdout,
    File(PathBuf),
}

impl EntryOutput {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(Self::File).unwrap_or(Self::Stdout)
    }

    /// Serialize and write the entry map
    pub fn write(&self, entries: &EntryMap, pretty: bool) -> Result<()> {
        let mut json = entries
            .to_json(pretty)
            .context("Failed to serialize entry map")?;
        json.push('\n');

        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.flush()?;
            }
            Self::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .context("Failed to create output directory")?;
                }
                fs::write(path, &json)
                    .with_context(|| format!("Failed to write entry map: {}", path.display()))?;
                debug!("Wrote {} bytes to {}", json.len(), path.display());
            }
        }

        Ok(())
    }
}
