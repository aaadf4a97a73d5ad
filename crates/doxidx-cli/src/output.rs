//! Output formatting for doxidx
//!
//! Supports text (colored terminal), JSON and raw (line-per-occurrence)
//! output formats.

use colored::*;
use doxidx_core::{IndexEntry, IndexStats};
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Raw,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "raw" => Some(OutputFormat::Raw),
            _ => None,
        }
    }
}

/// Join an anchor with the configured base URL.
///
/// Anchors are written relative to the generated `search/` directory, so
/// the leading `../` is dropped when a base URL replaces that context.
pub fn join_url(base_url: Option<&str>, anchor: &str) -> String {
    match base_url {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            anchor.trim_start_matches("../")
        ),
        None => anchor.to_string(),
    }
}

/// One occurrence in JSON output
#[derive(Debug, Clone, Serialize)]
struct OccurrenceRecord {
    url: String,
    scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

/// One match in JSON output
#[derive(Debug, Clone, Serialize)]
struct MatchRecord {
    key: String,
    display_name: String,
    kind: String,
    occurrences: Vec<OccurrenceRecord>,
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub tables_loaded: usize,
    pub entries_indexed: usize,
    pub matches: usize,
    pub truncated: bool,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
struct JsonOutput {
    version: String,
    query: String,
    summary: Summary,
    matches: Vec<MatchRecord>,
}

/// Reporter for accumulating and printing matches
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    base_url: Option<String>,
    matches: Vec<MatchRecord>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool, base_url: Option<String>) -> Self {
        Self {
            format,
            verbose,
            base_url,
            matches: Vec::new(),
            summary: Summary::default(),
        }
    }

    pub fn set_loaded(&mut self, tables_loaded: usize, entries_indexed: usize) {
        self.summary.tables_loaded = tables_loaded;
        self.summary.entries_indexed = entries_indexed;
    }

    pub fn set_truncated(&mut self) {
        self.summary.truncated = true;
    }

    /// Report one table as loaded (verbose text mode only)
    pub fn report_table(&mut self, path: &std::path::Path, entries: usize, from_cache: bool) {
        if self.verbose && self.format == OutputFormat::Text {
            let suffix = if from_cache { " (cached)" } else { "" };
            println!(
                "{} {} - {} entr{}{}",
                "Loaded".green(),
                path.display(),
                entries,
                if entries == 1 { "y" } else { "ies" },
                suffix.dimmed()
            );
        }
    }

    /// Report one matching entry
    pub fn report_match(&mut self, entry: &IndexEntry) {
        self.summary.matches += 1;

        let record = MatchRecord {
            key: entry.key.clone(),
            display_name: entry.display_name.clone(),
            kind: entry.kind.to_string(),
            occurrences: entry
                .occurrences
                .iter()
                .map(|occ| OccurrenceRecord {
                    url: join_url(self.base_url.as_deref(), &occ.anchor),
                    scope: occ.scope.clone(),
                    source: occ.source.clone(),
                })
                .collect(),
        };

        match self.format {
            OutputFormat::Text => {
                println!(
                    "{} {}",
                    record.display_name.bold(),
                    format!("[{}]", record.kind).dimmed()
                );
                for occ in &record.occurrences {
                    match &occ.source {
                        Some(source) => println!("    {} {}", occ.scope, format!("({})", source).dimmed()),
                        None => println!("    {}", occ.scope),
                    }
                    println!("      {}", occ.url.cyan());
                }
            }
            OutputFormat::Raw => {
                for occ in &record.occurrences {
                    println!("{}:{}:{}", record.display_name, record.kind, occ.url);
                }
            }
            OutputFormat::Json => {
                // JSON output is handled in finish()
            }
        }

        self.matches.push(record);
    }

    /// Print final summary/output
    pub fn finish(self, query: &str) {
        match self.format {
            OutputFormat::Text => {
                println!();
                if self.summary.matches == 0 {
                    println!("{}", "No matches".yellow());
                } else {
                    let truncated = if self.summary.truncated { " (truncated)" } else { "" };
                    println!(
                        "{}",
                        format!(
                            "{} match{} out of {} symbols in {} table{}{}",
                            self.summary.matches,
                            if self.summary.matches == 1 { "" } else { "es" },
                            self.summary.entries_indexed,
                            self.summary.tables_loaded,
                            if self.summary.tables_loaded == 1 { "" } else { "s" },
                            truncated
                        )
                        .dimmed()
                    );
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    query: query.to_string(),
                    summary: self.summary,
                    matches: self.matches,
                };
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{}", json),
                    Err(_) => println!("{{}}"),
                }
            }
            OutputFormat::Raw => {
                // Raw output is line-per-occurrence as matches arrive
            }
        }
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Print index statistics in the selected format
pub fn print_stats(stats: &IndexStats, tables_loaded: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct KindCount {
                kind: String,
                entries: usize,
            }
            #[derive(Serialize)]
            struct StatsOutput {
                version: String,
                tables: usize,
                entries: usize,
                occurrences: usize,
                by_kind: Vec<KindCount>,
            }

            let output = StatsOutput {
                version: env!("CARGO_PKG_VERSION").to_string(),
                tables: tables_loaded,
                entries: stats.entries,
                occurrences: stats.occurrences,
                by_kind: stats
                    .by_kind
                    .iter()
                    .map(|(kind, count)| KindCount {
                        kind: kind.to_string(),
                        entries: *count,
                    })
                    .collect(),
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(_) => println!("{{}}"),
            }
        }
        _ => {
            println!("{}", "Index statistics".bold().underline());
            println!("  Tables loaded: {}", tables_loaded);
            println!("  Symbols: {}", stats.entries);
            println!("  Occurrences: {}", stats.occurrences);
            if !stats.by_kind.is_empty() {
                println!();
                for (kind, count) in &stats.by_kind {
                    println!("  {:12} {}", kind.to_string(), count);
                }
            }
        }
    }
}
