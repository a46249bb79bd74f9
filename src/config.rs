// src/config.rs
use crate::diagnostics::Severity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional project config file, looked up in the scan root.
pub const CONFIG_FILE: &str = "linemark.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Functions above this cyclomatic complexity get a diagnostic.
    #[serde(default = "default_max_complexity")]
    pub max_complexity: u32,
    /// Severity of the over-complexity diagnostic.
    #[serde(default = "default_complexity_severity")]
    pub complexity_severity: Severity,
    /// Substring patterns; matching paths are skipped during discovery.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_complexity: default_max_complexity(),
            complexity_severity: default_complexity_severity(),
            ignore: Vec::new(),
        }
    }
}

fn default_max_complexity() -> u32 {
    10
}

fn default_complexity_severity() -> Severity {
    Severity::Warning
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON instead of the console report (same as `--json`).
    #[serde(default)]
    pub json: bool,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `linemark.toml` from `root`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| crate::error::LinemarkError::io(e, &path))?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Substring match against a normalized (forward-slash) path.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.rules.ignore.iter().any(|p| normalized.contains(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(dir.path()).expect("load");
        assert_eq!(config.rules.max_complexity, 10);
        assert_eq!(config.rules.complexity_severity, Severity::Warning);
        assert!(config.rules.ignore.is_empty());
        assert!(!config.output.json);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[rules]\nmax_complexity = 4\nignore = [\"vendor/\"]\n",
        )
        .expect("write config");

        let config = Config::load(dir.path()).expect("load");
        assert_eq!(config.rules.max_complexity, 4);
        assert_eq!(config.rules.ignore, vec!["vendor/".to_string()]);
        assert_eq!(config.rules.complexity_severity, Severity::Warning);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "rules = not toml").expect("write config");
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn ignore_patterns_match_substrings() {
        let config = Config {
            rules: RuleConfig {
                ignore: vec!["generated/".to_string()],
                ..RuleConfig::default()
            },
            output: OutputConfig::default(),
        };
        assert!(config.is_ignored(Path::new("src/generated/api.ts")));
        assert!(!config.is_ignored(Path::new("src/api.ts")));
    }
}
