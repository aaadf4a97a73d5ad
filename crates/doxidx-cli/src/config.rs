//! Configuration file support for doxidx
//!
//! Loads `.doxidx.toml` from current directory or parent directories.

use anyhow::{bail, Context, Result};
use doxidx_core::SymbolKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns to exclude from table discovery
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text", "json" or "raw"
    pub format: Option<String>,
    /// Maximum number of matches to print
    pub limit: Option<usize>,
    /// Base URL prepended to anchors on output
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// If set, only these symbol kinds are searched
    pub kinds: Option<Vec<String>>,
}

impl Config {
    /// Load config from `.doxidx.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(".doxidx.toml");
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: Config = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Compute the effective kind filter. CLI kinds override config kinds;
    /// `None` means "search everything".
    pub fn effective_kinds(&self, cli_kinds: &[String]) -> Result<Option<Vec<SymbolKind>>> {
        let names: &[String] = if !cli_kinds.is_empty() {
            cli_kinds
        } else {
            match &self.query.kinds {
                Some(kinds) => kinds,
                None => return Ok(None),
            }
        };

        let mut kinds = Vec::with_capacity(names.len());
        for name in names {
            match SymbolKind::from_name(name) {
                Some(kind) => kinds.push(kind),
                None => bail!(
                    "Unknown symbol kind '{}'. Valid kinds: {}",
                    name,
                    SymbolKind::ALL
                        .iter()
                        .map(|k| k.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }
        Ok(Some(kinds))
    }

    /// Check if a path should be excluded based on config patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.paths.exclude {
            // Try glob matching
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
                // Also try matching against just the file/dir name
                if let Some(file_name) = path.file_name() {
                    if glob_pattern.matches(&file_name.to_string_lossy()) {
                        return true;
                    }
                }
            }

            // Also do simple prefix/contains matching for directory patterns
            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(dir: &Path, content: &str) {
        fs::write(dir.join(".doxidx.toml"), content).unwrap();
    }

    #[test]
    fn test_load_basic_config() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
[paths]
exclude = ["latex/", "*_dup.js"]

[output]
format = "json"
limit = 25
base_url = "https://docs.example.com/html/"

[query]
kinds = ["functions", "classes"]
"#,
        );

        let (config, path) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(path, temp.path().join(".doxidx.toml"));
        assert_eq!(
            config.paths.exclude,
            vec!["latex/".to_string(), "*_dup.js".to_string()]
        );
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.limit, Some(25));
        assert_eq!(
            config.output.base_url,
            Some("https://docs.example.com/html/".to_string())
        );
        assert_eq!(
            config.query.kinds,
            Some(vec!["functions".to_string(), "classes".to_string()])
        );
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "");

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert!(config.paths.exclude.is_empty());
        assert!(config.output.format.is_none());
        assert!(config.query.kinds.is_none());
    }

    #[test]
    fn test_no_config_found() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(temp.path().to_path_buf()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_effective_kinds_cli_override() {
        let config = Config {
            query: QueryConfig {
                kinds: Some(vec!["classes".to_string()]),
            },
            ..Default::default()
        };

        let kinds = config
            .effective_kinds(&["functions".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(kinds, vec![SymbolKind::Functions]);
    }

    #[test]
    fn test_effective_kinds_from_config() {
        let config = Config {
            query: QueryConfig {
                kinds: Some(vec!["variables".to_string(), "typedefs".to_string()]),
            },
            ..Default::default()
        };

        let kinds = config.effective_kinds(&[]).unwrap().unwrap();
        assert_eq!(kinds, vec![SymbolKind::Variables, SymbolKind::Typedefs]);
    }

    #[test]
    fn test_effective_kinds_none() {
        let config = Config::default();
        assert!(config.effective_kinds(&[]).unwrap().is_none());
    }

    #[test]
    fn test_effective_kinds_unknown() {
        let config = Config::default();
        let err = config
            .effective_kinds(&["bogus".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_should_exclude_glob() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["*_dup.js".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("functions_a_dup.js")));
        assert!(!config.should_exclude(Path::new("functions_a.js")));
    }

    #[test]
    fn test_should_exclude_directory() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["latex/".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("docs/latex/search/all_0.js")));
        assert!(config.should_exclude(Path::new("latex/search/all_0.js")));
        assert!(!config.should_exclude(Path::new("docs/html/search/all_0.js")));
    }
}
