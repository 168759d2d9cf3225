//! Configuration for fix runs, loaded from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::DEFAULT_MOCK_CONSTANTS;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sourcefix.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Glob matched against file names (not paths).
    pub glob: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Report what would change without writing.
    pub dry_run: bool,
    /// When non-empty, only these rules run. Takes precedence over
    /// `disabled_rules`.
    pub enabled_rules: Vec<String>,
    /// Rules to skip, by name.
    pub disabled_rules: Vec<String>,
    /// Parameters for the built-in rules.
    pub rules: RulesConfig,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            glob: "*.tsx".to_string(),
            recursive: false,
            dry_run: false,
            enabled_rules: Vec::new(),
            disabled_rules: Vec::new(),
            rules: RulesConfig::default(),
        }
    }
}

/// Parameters consumed by the built-in rule templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// State setter that receives `[]` when a load fails.
    pub fallback_setter: String,
    /// State setter that receives the error message when a load fails.
    pub error_setter: String,
    /// Identifiers never wrapped by the JSX map guard.
    pub map_guard_skip: Vec<String>,
    /// Constants emptied by the mock data rule. Empty disables the rule.
    pub mock_constants: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            fallback_setter: "setRoles".to_string(),
            error_setter: "setError".to_string(),
            map_guard_skip: vec!["prev".to_string()],
            mock_constants: DEFAULT_MOCK_CONSTANTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl FixConfig {
    /// Parse configuration from TOML text. `origin` is only used in errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load `explicit` if given, otherwise `sourcefix.toml` in `dir` if it
    /// exists, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!("Using config {}", candidate.display());
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}
