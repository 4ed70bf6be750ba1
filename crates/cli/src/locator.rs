// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Formatter executable discovery.
//!
//! Resolution order:
//! 1. The configured `executable_path`, or `node_modules/.bin/prettier` when
//!    none is configured, relative to the project root.
//! 2. A `PATH` search for `prettier`.
//!
//! A configured path that does not exist falls through to the `PATH` search;
//! it is not an error on its own.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Executable name searched on `PATH`.
pub const TOOL_NAME: &str = "prettier";

/// Conventional per-project install location.
pub const LOCAL_BIN: &str = "node_modules/.bin/prettier";

/// Where lookup goes after the project-local candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPath {
    /// The process `PATH`.
    #[default]
    Process,
    /// A `PATH`-style list; `None` disables the search.
    Explicit(Option<OsString>),
}

/// Resolve the formatter using the process `PATH`.
pub fn resolve_executable(root: &Path, configured: Option<&str>) -> Option<PathBuf> {
    let search_path = std::env::var_os("PATH");
    resolve_executable_in(root, configured, search_path.as_deref())
}

/// Resolve the formatter against an explicit search path.
pub fn resolve_executable_in(
    root: &Path,
    configured: Option<&str>,
    search_path: Option<&OsStr>,
) -> Option<PathBuf> {
    let local = root.join(configured.unwrap_or(LOCAL_BIN));
    if local.is_file() {
        tracing::debug!("using {} at {}", TOOL_NAME, local.display());
        return Some(local);
    }
    tracing::debug!("{} not found, searching PATH", local.display());

    let search_path = search_path?;
    match which::which_in(TOOL_NAME, Some(search_path), root) {
        Ok(found) => {
            tracing::debug!("found {} on PATH at {}", TOOL_NAME, found.display());
            Some(found)
        }
        Err(e) => {
            tracing::debug!("{} not on PATH: {}", TOOL_NAME, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
