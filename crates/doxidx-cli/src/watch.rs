//! Watch mode for doxidx - re-run the query when tables are regenerated
//!
//! The documentation generator rewrites the whole search directory on every
//! build, so watch mode reloads the index wholesale and re-runs the query.
//! Uses the `notify` crate for cross-platform file watching with debouncing.

use anyhow::Result;
use colored::*;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::Duration;

/// Configuration for watch mode
pub struct WatchConfig {
    /// Paths to watch (table files or the directories holding them)
    pub paths: Vec<PathBuf>,
    /// Debounce duration (default 250ms; doc builds rewrite many files)
    pub debounce: Duration,
    /// Quiet output (non-text formats)
    pub quiet: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: vec![],
            debounce: Duration::from_millis(250),
            quiet: false,
        }
    }
}

/// Run watch mode - monitors the search tables and re-runs the query on
/// changes. `rerun` performs one full load-and-query pass.
pub fn run_watch(config: WatchConfig, mut rerun: impl FnMut() -> Result<()>) -> Result<()> {
    let (tx, rx) = channel();

    // Create a debounced file watcher
    let mut debouncer = new_debouncer(config.debounce, tx)?;

    // Watch all specified paths
    for path in &config.paths {
        if path.is_dir() {
            debouncer.watcher().watch(path, RecursiveMode::Recursive)?;
            if !config.quiet {
                println!("{} Watching: {}", "→".cyan(), path.display());
            }
        } else if path.is_file() {
            if let Some(parent) = path.parent() {
                debouncer.watcher().watch(parent, RecursiveMode::NonRecursive)?;
            }
            if !config.quiet {
                println!("{} Watching: {}", "→".cyan(), path.display());
            }
        }
    }

    if !config.quiet {
        println!();
        println!("{}", "Watching for changes (Ctrl+C to stop)...".dimmed());
        println!();
    }

    // Initial run
    rerun()?;

    // Watch loop
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed = events.iter().any(|event| {
                    event.kind == DebouncedEventKind::Any
                        && event.path.extension().is_some_and(|ext| ext == "js")
                });

                if changed {
                    // Clear screen for fresh output
                    if !config.quiet {
                        print!("\x1B[2J\x1B[1;1H"); // Clear screen and move cursor to top
                        println!("{}", "Tables changed, reloading...".cyan());
                        println!();
                    }

                    rerun()?;

                    if !config.quiet {
                        println!();
                        println!("{}", "Watching for changes (Ctrl+C to stop)...".dimmed());
                    }
                }
            }
            Ok(Err(error)) => {
                eprintln!("{}: watch error: {:?}", "Warning".yellow(), error);
            }
            Err(_) => break, // Channel closed
        }
    }

    Ok(())
}
