// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles prettier-review.toml parsing with version validation and unknown
//! key warnings, and merges file values with command-line overrides into the
//! immutable [`Settings`] a check run uses.

mod duration;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

pub use duration::parse_duration;

use crate::error::{Error, Result};

/// Settings file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "prettier-review.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Pattern used when no `file_regex` is configured.
pub const DEFAULT_FILE_PATTERN: &str = r"\.js$";

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "prettier"];

/// Known keys inside the `[prettier]` table.
const KNOWN_PRETTIER_KEYS: &[&str] = &[
    "config_file",
    "executable_path",
    "file_regex",
    "filtering",
    "timeout",
];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    prettier: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration file.
#[derive(Debug, Default)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Formatter settings.
    pub prettier: PrettierConfig,
}

/// The `[prettier]` table as written in the settings file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PrettierConfig {
    /// Formatter config passed through as `--config <path>`.
    pub config_file: Option<String>,

    /// Override for executable discovery.
    pub executable_path: Option<String>,

    /// Regular expression selecting changed files to check.
    pub file_regex: Option<String>,

    /// Check only files in the change set.
    pub filtering: Option<bool>,

    /// Per-invocation time limit (e.g. "30s").
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_file: Option<String>,
    pub executable_path: Option<String>,
    pub file_regex: Option<String>,
    /// Only ever turns filtering on; absence defers to the file.
    pub filtering: bool,
    pub timeout: Option<Duration>,
}

/// Effective settings for one check run.
///
/// Built once before the run and never mutated during it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the formatter's own config file, passed through verbatim.
    pub config_file: Option<String>,
    /// Explicit executable location.
    pub executable_path: Option<String>,
    /// Pattern changed files must match; `None` uses [`DEFAULT_FILE_PATTERN`].
    pub file_regex: Option<Regex>,
    /// Restrict the check to the review's change set.
    pub filtering: bool,
    /// Kill an invocation that runs longer than this.
    pub timeout: Option<Duration>,
    default_regex: Regex,
}

impl Settings {
    /// Settings with every option unset.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_file: None,
            executable_path: None,
            file_regex: None,
            filtering: false,
            timeout: None,
            default_regex: compile_pattern(DEFAULT_FILE_PATTERN)?,
        })
    }

    /// Merge file values with overrides: CLI > config file > defaults.
    pub fn resolve(file: &PrettierConfig, overrides: &Overrides) -> Result<Self> {
        let file_regex = overrides
            .file_regex
            .as_deref()
            .or(file.file_regex.as_deref())
            .map(compile_pattern)
            .transpose()?;

        Ok(Self {
            config_file: overrides
                .config_file
                .clone()
                .or_else(|| file.config_file.clone()),
            executable_path: overrides
                .executable_path
                .clone()
                .or_else(|| file.executable_path.clone()),
            file_regex,
            filtering: overrides.filtering || file.filtering.unwrap_or(false),
            timeout: overrides.timeout.or(file.timeout),
            ..Self::new()?
        })
    }

    /// Set the file pattern from a regular expression string.
    pub fn with_file_regex(mut self, pattern: &str) -> Result<Self> {
        self.file_regex = Some(compile_pattern(pattern)?);
        Ok(self)
    }

    /// The configured pattern, or the default `.js` pattern.
    pub fn matching_file_regex(&self) -> &Regex {
        self.file_regex.as_ref().unwrap_or(&self.default_regex)
    }
}

/// Compile a file pattern, mapping failures to a config-level error.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| config_error(e, path))?;
    let version = flexible.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;
    check_version(version, path)?;

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let prettier = match flexible.prettier {
        Some(toml::Value::Table(table)) => {
            for key in table.keys() {
                if !KNOWN_PRETTIER_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("prettier.{key}"));
                }
            }
            PrettierConfig::deserialize(toml::Value::Table(table))
                .map_err(|e| config_error(e, path))?
        }
        Some(_) => {
            return Err(Error::Config {
                message: "`prettier` must be a table".to_string(),
                path: Some(path.to_path_buf()),
            });
        }
        None => PrettierConfig::default(),
    };

    Ok(Config {
        version,
        prettier,
    })
}

fn check_version(version: i64, path: &Path) -> Result<()> {
    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(())
}

fn config_error(err: impl std::fmt::Display, path: &Path) -> Error {
    Error::Config {
        message: err.to_string(),
        path: Some(path.to_path_buf()),
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "prettier-review: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
