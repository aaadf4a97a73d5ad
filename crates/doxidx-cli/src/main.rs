//! doxidx CLI - Doxygen search-index query tool
//!
//! Loads the JavaScript search tables a documentation build emits under
//! `search/` and answers queries over the indexed symbols:
//! - query: case-insensitive, punctuation-tolerant substring match
//! - --list: dump every indexed symbol in table order
//! - --stats: per-kind totals for the loaded tables
//! - --watch: reload and re-run the query when the docs are rebuilt

mod cache;
mod config;
mod logging;
mod output;
mod process;
mod watch;

use anyhow::{bail, Result};
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use cache::Cache;
use config::Config;
use doxidx_core::{search_key, IndexEntry, SymbolIndex, SymbolKind};
use output::{print_stats, OutputFormat, Reporter};
use process::{find_tables, load_tables};
use watch::WatchConfig;

#[derive(Parser)]
#[command(name = "doxidx")]
#[command(version = "0.1.0")]
#[command(about = "A Rust-based Doxygen search-index query tool")]
#[command(author = "doxidx contributors")]
struct Cli {
    /// Substring to search for (case-insensitive). With --list or --stats
    /// every positional argument is treated as a path.
    #[arg(required_unless_present_any = ["list", "stats", "clear_cache"])]
    query: Option<String>,

    /// Search-index files or directories to load (default: current directory)
    paths: Vec<PathBuf>,

    /// List every indexed symbol instead of querying
    #[arg(long)]
    list: bool,

    /// Print per-kind index statistics instead of querying
    #[arg(long)]
    stats: bool,

    /// Symbol kinds to search (can be specified multiple times). Overrides config file.
    #[arg(long, short = 'k', value_name = "KIND")]
    kind: Vec<String>,

    /// Output format: text, json, raw
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Maximum number of matches to print
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Base URL prepended to anchors on output
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to config file (default: auto-detect .doxidx.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Do not read or write the parse cache
    #[arg(long)]
    no_cache: bool,

    /// Delete the parse cache and exit (unless a query is given)
    #[arg(long)]
    clear_cache: bool,

    /// Re-run the query whenever the tables change
    #[arg(long)]
    watch: bool,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Write a debug log (--log=PATH, or bare --log for a generated /tmp path)
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    log: Option<Option<PathBuf>>,
}

/// Everything one load-and-query pass needs; watch mode reruns it
struct RunArgs {
    query: String,
    paths: Vec<PathBuf>,
    config: Config,
    kinds: Option<Vec<SymbolKind>>,
    format: OutputFormat,
    limit: Option<usize>,
    base_url: Option<String>,
    verbose: bool,
    use_cache: bool,
    stats: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_arg) = &cli.log {
        let path = logging::init_logger(log_arg.as_deref())?;
        if cli.verbose {
            eprintln!("{}: {}", "Debug log".bold(), path.display());
        }
    }

    // Load config file
    let config = if cli.no_config {
        Config::default()
    } else if let Some(config_path) = &cli.config {
        let cfg = Config::load_path(config_path)?;
        if cli.verbose {
            eprintln!("{}: {}", "Using config".bold(), config_path.display());
        }
        cfg
    } else {
        match Config::load()? {
            Some((cfg, path)) => {
                if cli.verbose {
                    eprintln!("{}: {}", "Using config".bold(), path.display());
                }
                cfg
            }
            None => Config::default(),
        }
    };

    // Determine output format: --json, then --format, then config
    let format_name = if cli.json {
        Some("json".to_string())
    } else {
        cli.format.clone().or_else(|| config.output.format.clone())
    };
    let output_format = match format_name {
        Some(name) => OutputFormat::from_str(&name).ok_or_else(|| {
            anyhow::anyhow!("Invalid output format '{}'. Valid options: text, json, raw", name)
        })?,
        None => OutputFormat::default(),
    };

    // Resolve the kind filter (CLI overrides config)
    let kinds = config.effective_kinds(&cli.kind)?;

    // CLI flags override config values
    let limit = cli.limit.or(config.output.limit);
    let base_url = cli.base_url.clone().or_else(|| config.output.base_url.clone());

    if cli.clear_cache {
        cache::clear_cache(Path::new("."))?;
        if cli.verbose && output_format == OutputFormat::Text {
            println!("{}", "Cache cleared".green());
        }
        if cli.query.is_none() && !cli.list && !cli.stats {
            return Ok(ExitCode::SUCCESS);
        }
    }

    // With --list/--stats there is no query; any first positional is a path
    let mut paths = cli.paths.clone();
    let query = if cli.list || cli.stats {
        if let Some(q) = &cli.query {
            paths.insert(0, PathBuf::from(q));
        }
        String::new()
    } else {
        cli.query.clone().unwrap_or_default()
    };
    if paths.is_empty() {
        paths.push(PathBuf::from("."));
    }

    let args = RunArgs {
        query,
        paths,
        config,
        kinds,
        format: output_format,
        limit,
        base_url,
        verbose: cli.verbose,
        use_cache: !cli.no_cache,
        stats: cli.stats,
    };

    if cli.watch {
        let watch_config = WatchConfig {
            paths: args.paths.clone(),
            debounce: Duration::from_millis(250),
            quiet: args.format != OutputFormat::Text,
        };
        watch::run_watch(watch_config, || run_pass(&args).map(|_| ()))?;
        return Ok(ExitCode::SUCCESS);
    }

    let matches = run_pass(&args)?;

    // Exit code: 1 is reserved for errors, 2 means a clean run with an
    // empty result set
    let exit_code = if !cli.list && !cli.stats && matches == 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    };
    Ok(exit_code)
}

/// One full load-and-query pass. Returns the number of matches reported.
fn run_pass(args: &RunArgs) -> Result<usize> {
    let (tables, missing) = find_tables(&args.paths, &args.config);
    logging::log_discovery(tables.len(), missing.len());

    for path in &missing {
        if args.format == OutputFormat::Text {
            eprintln!(
                "{}: Path does not exist: {}",
                "Warning".yellow(),
                path.display()
            );
        }
    }

    if tables.is_empty() {
        bail!("No search tables found under the given paths");
    }

    let mut disk_cache = if args.use_cache {
        Cache::load(Path::new("."))?
    } else {
        Cache::default()
    };

    let show_progress = args.format == OutputFormat::Text && atty::is(atty::Stream::Stderr);
    let results = load_tables(
        &tables,
        args.use_cache.then_some(&disk_cache),
        show_progress,
    );

    let mut reporter = Reporter::new(args.format, args.verbose, args.base_url.clone());
    let mut index = SymbolIndex::new();
    let mut cache_dirty = false;
    let tables_loaded = results.len();

    for result in results {
        let loaded = result?;
        logging::log_table(&loaded.path, loaded.entries.len(), loaded.from_cache);
        reporter.report_table(&loaded.path, loaded.entries.len(), loaded.from_cache);

        if args.use_cache && !loaded.from_cache {
            disk_cache.update(
                loaded.path.clone(),
                loaded.content_hash,
                loaded.kind,
                loaded.entries.clone(),
            );
            cache_dirty = true;
        }

        index.push_entries(loaded.entries);
    }

    if args.use_cache && cache_dirty {
        disk_cache.prune();
        disk_cache.save(Path::new("."))?;
    }

    if args.stats {
        print_stats(&index.stats(), tables_loaded, args.format);
        return Ok(index.len());
    }

    reporter.set_loaded(tables_loaded, index.len());

    let matches: Box<dyn Iterator<Item = &IndexEntry>> = match &args.kinds {
        Some(kinds) => Box::new(index.query_kinds(&args.query, kinds)),
        None => Box::new(index.query(&args.query)),
    };

    let mut count = 0;
    for entry in matches {
        if let Some(limit) = args.limit {
            if count >= limit {
                reporter.set_truncated();
                break;
            }
        }
        reporter.report_match(entry);
        count += 1;
    }

    logging::log_query(&args.query, &search_key(&args.query), count);
    reporter.finish(&args.query);

    Ok(count)
}
