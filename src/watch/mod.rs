//! Watch mode
//!
//! Rebuilds the entry map whenever the page tree changes:
//! - debounced filesystem watching of the page root
//! - rebuild on every batch of events
//! - output rewritten only when the map content changed

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::entries::{EntryMap, EntryMapBuilder};
use crate::output::EntryOutput;
use crate::utils::format_duration;

/// Remembers the last written entry map
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last: Option<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of `entries` when it differs from the last committed map
    pub fn changed(&self, entries: &EntryMap) -> Result<Option<String>> {
        let fingerprint = entries
            .fingerprint()
            .context("Failed to fingerprint entry map")?;

        if self.last.as_deref() == Some(fingerprint.as_str()) {
            return Ok(None);
        }

        Ok(Some(fingerprint))
    }

    /// Remember a map as written
    pub fn commit(&mut self, fingerprint: String) {
        self.last = Some(fingerprint);
    }
}

/// Entry map watcher
pub struct EntryWatcher {
    /// Project configuration
    config: Arc<Config>,

    /// Where rebuilt maps are written
    output: EntryOutput,

    /// Pretty-print the JSON output
    pretty: bool,
}

impl EntryWatcher {
    pub fn new(config: Arc<Config>, output: EntryOutput, pretty: bool) -> Self {
        Self {
            config,
            output,
            pretty,
        }
    }

    /// Build once, then rebuild on page tree changes until Ctrl+C
    pub async fn run(&self) -> Result<()> {
        let builder = self.config.entry_builder()?;
        let mut tracker = ChangeTracker::new();

        let initial = builder.build()?;
        self.emit(&initial.entries, &mut tracker)?;

        let watch_paths: Vec<PathBuf> = initial
            .watch_paths
            .iter()
            .filter(|path| path.is_dir())
            .cloned()
            .collect();
        if watch_paths.is_empty() {
            anyhow::bail!(
                "Page root {} does not exist, nothing to watch",
                builder.root().display()
            );
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

        // Use a debouncer to batch editor saves and directory moves
        let mut debouncer = new_debouncer(
            Duration::from_millis(self.config.watch.debounce_ms),
            move |result: DebounceEventResult| {
                let _ = tx.send(result);
            },
        )?;

        for path in &watch_paths {
            debouncer
                .watcher()
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch {}", path.display()))?;

            info!("Watching {}", path.display());
            eprintln!(
                "  {} Watching {}",
                "•".dimmed(),
                path.display().to_string().cyan()
            );
        }
        eprintln!("  {} Press {} to stop\n", "•".dimmed(), "Ctrl+C".yellow());

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(Ok(events)) => {
                        let paths: Vec<PathBuf> = events.into_iter().map(|e| e.path).collect();
                        debug!("{} change(s): {:?}", paths.len(), paths);
                        self.rebuild(&builder, &mut tracker);
                    }
                    Some(Err(e)) => {
                        error!("Watch error: {:?}", e);
                    }
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopping watcher");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Rebuild after a change; failures are reported and watching continues
    fn rebuild(&self, builder: &EntryMapBuilder, tracker: &mut ChangeTracker) {
        let start = Instant::now();

        let result = builder
            .build()
            .map_err(anyhow::Error::from)
            .and_then(|build| self.emit(&build.entries, tracker));

        match result {
            Ok(()) => debug!("Rebuild finished in {}", format_duration(start.elapsed())),
            Err(e) => {
                error!("Rebuild failed: {:#}", e);
                eprintln!("  {} {:#}", "✗".red(), e);
            }
        }
    }

    fn emit(&self, entries: &EntryMap, tracker: &mut ChangeTracker) -> Result<()> {
        let Some(fingerprint) = tracker.changed(entries)? else {
            debug!("Entry map unchanged, skipping write");
            return Ok(());
        };

        // commit only once written, so a failed write is retried on the next rebuild
        self.output.write(entries, self.pretty)?;
        tracker.commit(fingerprint);
        eprintln!(
            "  {} Entry map updated ({} entries)",
            "↻".yellow(),
            entries.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::{build, ManualEntries};
    use std::fs;

    #[test]
    fn test_tracker_reports_changes_only() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("pages");
        fs::create_dir_all(pages.join("a")).unwrap();
        fs::write(pages.join("a/index.js"), "").unwrap();

        let mut tracker = ChangeTracker::new();
        let first = build(&pages, &[], &ManualEntries::new()).unwrap();
        let fingerprint = tracker.changed(&first).unwrap().unwrap();
        // nothing committed yet, so still reported as changed
        assert!(tracker.changed(&first).unwrap().is_some());
        tracker.commit(fingerprint);
        assert!(tracker.changed(&first).unwrap().is_none());

        fs::create_dir_all(pages.join("a/b")).unwrap();
        fs::write(pages.join("a/b/index.js"), "").unwrap();
        let second = build(&pages, &[], &ManualEntries::new()).unwrap();
        assert!(tracker.changed(&second).unwrap().is_some());
    }

    #[test]
    fn test_rebuild_writes_output_once() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("pages");
        fs::create_dir_all(pages.join("home")).unwrap();
        fs::write(pages.join("home/index.js"), "").unwrap();

        let config = Config::parse("[pages]\nroot = \"pages\"\n", dir.path()).unwrap();
        let target = dir.path().join("entries.json");
        let watcher = EntryWatcher::new(
            Arc::new(config),
            EntryOutput::File(target.clone()),
            false,
        );
        let builder = watcher.config.entry_builder().unwrap();
        let mut tracker = ChangeTracker::new();

        watcher.rebuild(&builder, &mut tracker);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "{\"home\":[\"./home/index.js\"]}\n"
        );

        fs::remove_file(&target).unwrap();
        watcher.rebuild(&builder, &mut tracker);
        assert!(!target.exists());
    }

    #[test]
    fn test_failed_write_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("pages");
        fs::create_dir_all(pages.join("home")).unwrap();
        fs::write(pages.join("home/index.js"), "").unwrap();

        // a plain file where the output directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let target = blocker.join("entries.json");

        let config = Config::parse("[pages]\nroot = \"pages\"\n", dir.path()).unwrap();
        let watcher = EntryWatcher::new(
            Arc::new(config),
            EntryOutput::File(target.clone()),
            false,
        );
        let builder = watcher.config.entry_builder().unwrap();
        let mut tracker = ChangeTracker::new();

        watcher.rebuild(&builder, &mut tracker);
        assert!(!target.exists());

        fs::remove_file(&blocker).unwrap();
        watcher.rebuild(&builder, &mut tracker);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "{\"home\":[\"./home/index.js\"]}\n"
        );
    }
}
