//! Debug logging for doxidx
//!
//! Provides detailed logging of table discovery, parsing and query
//! execution for debugging and verification purposes. Enabled with the
//! `--log` flag; off by default.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global logger instance
static LOGGER: Mutex<Option<DebugLogger>> = Mutex::new(None);

/// Logger for index operations
pub struct DebugLogger {
    file: File,
}

impl DebugLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self { file })
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("/tmp/doxidx-{}.log", timestamp))
    });

    let logger = DebugLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

/// Log a message to the global logger
pub fn log(message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(message);
        }
    }
}

/// Log a section header
pub fn section(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.section(title);
        }
    }
}

/// Log table discovery results
pub fn log_discovery(tables: usize, missing: usize) {
    section("TABLE DISCOVERY");
    log(&format!("Tables found: {}", tables));
    if missing > 0 {
        log(&format!("Missing paths: {}", missing));
    }
}

/// Log one loaded table
pub fn log_table(path: &Path, entries: usize, from_cache: bool) {
    log(&format!(
        "{}: {} entries{}",
        path.display(),
        entries,
        if from_cache { " (cache hit)" } else { "" }
    ));
}

/// Log query execution
pub fn log_query(pattern: &str, normalized: &str, matches: usize) {
    section("QUERY");
    log(&format!("Pattern: {}", pattern));
    log(&format!("Normalized: {}", normalized));
    log(&format!("Matches: {}", matches));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_logger_writes_timestamped_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("debug.log");

        let mut logger = DebugLogger::new(&path).unwrap();
        logger.log("hello");
        logger.section("PHASE");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello"));
        assert!(contents.contains("PHASE"));
        assert!(contents.contains("====="));
    }
}
