//! Editor configuration
//!
//! A small JSON file, `~/.config/tv/config.json` by default or an explicit
//! `--config` path. A missing default file means defaults; a missing
//! explicit file is an error. Unknown fields are rejected so typos surface
//! instead of silently doing nothing.

use crate::buffer::{LoadOptions, DEFAULT_CHUNK_SIZE};
use crate::unicode::DEFAULT_TAB_STOP;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tab stop width in display columns.
    #[serde(default = "default_tab_stop")]
    pub tab_stop: usize,

    /// Highlight the blank region right of each line (F5 toggles at
    /// runtime).
    #[serde(default = "default_true")]
    pub show_blanks: bool,

    /// Read-chunk size for the streaming file loader.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_tab_stop() -> usize {
    DEFAULT_TAB_STOP
}

fn default_true() -> bool {
    true
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: default_tab_stop(),
            show_blanks: true,
            chunk_size: default_chunk_size(),
        }
    }
}

impl Config {
    /// Load from `explicit` when given, else from the default path when it
    /// exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Clamp values that would break the coordinate math (a zero tab stop
    /// divides by zero, a zero chunk never reads).
    fn sanitized(mut self) -> Self {
        self.tab_stop = self.tab_stop.max(1);
        self.chunk_size = self.chunk_size.max(1);
        self
    }

    /// Loader options derived from this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            chunk_size: self.chunk_size,
            ..LoadOptions::default()
        }
    }
}

/// `~/.config/tv/config.json` (platform equivalent via `dirs`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tv").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tab_stop, 4);
        assert!(config.show_blanks);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tab_stop": 8, "show_blanks": false }"#).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.tab_stop, 8);
        assert!(!config.show_blanks);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tab_width": 8 }"#).unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_zero_values_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tab_stop": 0, "chunk_size": 0 }"#).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.tab_stop, 1);
        assert_eq!(config.chunk_size, 1);
    }
}
