// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings file discovery.
//!
//! Walks from the project root up to the git root looking for
//! prettier-review.toml.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Find the settings file starting from `start_dir`, stopping at the git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find_map(|dir| {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                Some(Some(candidate))
            } else if dir.join(".git").exists() {
                Some(None)
            } else {
                None
            }
        })
        .flatten()
}

/// Resolve the settings path from an explicit argument or discovery.
///
/// An explicit path must exist; discovery returning nothing means defaults.
pub fn resolve_config(explicit: Option<&Path>, root: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(root)),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
