//! Configuration management for testscout
//!
//! Stores settings in ~/.config/testscout/config.json

use crate::catalog::DEFAULT_EXCLUDED_PATTERNS;
use crate::suggest::{ParseOptions, DEFAULT_REPRESENTATIVE_FILE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const ENV_MIN_LINE_CHARS: &str = "TESTSCOUT_MIN_LINE_CHARS";
const ENV_MIN_SUMMARY_CHARS: &str = "TESTSCOUT_MIN_SUMMARY_CHARS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shortest numbered line considered by the parser
    pub min_line_chars: usize,
    /// Shortest accepted suggestion summary
    pub min_summary_chars: usize,
    /// File name used in fallback templates when a request names none
    pub fallback_file_placeholder: String,
    /// Per-file token budget when embedding sources in prompts
    pub max_prompt_tokens: usize,
    /// Path fragments that disqualify a file from test generation
    pub excluded_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let parse = ParseOptions::default();
        Self {
            min_line_chars: parse.min_line_chars,
            min_summary_chars: parse.min_summary_chars,
            fallback_file_placeholder: DEFAULT_REPRESENTATIVE_FILE.to_string(),
            max_prompt_tokens: 20_000,
            excluded_patterns: DEFAULT_EXCLUDED_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("testscout"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from the default location with env overrides applied
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Load config from `path`, or return defaults.
    ///
    /// A corrupt file is moved aside to `config.json.corrupt`.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                preserve_corrupt_config(path, &content);
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "config file was corrupted; a backup was saved and defaults were loaded"
                );
                Self::default()
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_usize(ENV_MIN_LINE_CHARS) {
            self.min_line_chars = v;
        }
        if let Some(v) = env_usize(ENV_MIN_SUMMARY_CHARS) {
            self.min_summary_chars = v;
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("Could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        }

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        #[cfg(unix)]
        {
            write_config_atomic(path, &content).context("Failed to write config")?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, content).context("Failed to write config")?;
        }

        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            min_line_chars: self.min_line_chars,
            min_summary_chars: self.min_summary_chars,
        }
    }

    /// Get the config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/testscout/config.json".to_string())
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring non-numeric override");
            None
        }
    }
}

fn preserve_corrupt_config(path: &Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

#[cfg(unix)]
fn write_config_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::PermissionsExt;

    let tmp_path = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)?;

    if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
        tracing::warn!(error = %e, "failed to set temp config file permissions");
    }

    file.write_all(content.as_bytes())?;

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.parse_options(), ParseOptions::default());
        assert_eq!(config.fallback_file_placeholder, "code");
        assert!(config.excluded_patterns.iter().any(|p| p == "node_modules"));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            min_summary_chars: 20,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"min_line_chars": 8}"#).unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.min_line_chars, 8);
        assert_eq!(config.min_summary_chars, 15);
    }

    #[test]
    fn test_corrupt_file_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.json.corrupt").exists());
        assert!(!path.exists());
    }
}
