// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Review host abstraction.
//!
//! The host supplies the review's change set and receives one `fail` call per
//! unformatted file. [`GitHost`] derives the change set from a local
//! repository; [`MemoryHost`] holds a fixed one for embedding and tests.

use std::path::{Path, PathBuf};

use crate::check::Violation;
use crate::error::{Error, Result};
use crate::git::{self, ChangeScope};

/// File lists for the current review.
///
/// Paths are relative to the project root, or absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub modified: Vec<String>,
    pub added: Vec<String>,
    pub deleted: Vec<String>,
}

impl ChangeSet {
    /// `(modified ∪ added) − deleted`, in source order without duplicates.
    pub fn touched(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.modified
            .iter()
            .chain(&self.added)
            .map(String::as_str)
            .filter(|path| !self.deleted.iter().any(|d| d == path))
            .filter(|path| seen.insert(*path))
            .collect()
    }
}

/// The collaborator a check reads changes from and reports failures to.
pub trait ReviewHost {
    /// Modified, added, and deleted files for the review.
    fn change_set(&self) -> Result<ChangeSet>;

    /// Report a failure against `file` at `line` (0 for the whole file).
    fn fail(&mut self, message: &str, file: &str, line: u32);
}

/// Host backed by a local git repository.
pub struct GitHost {
    root: PathBuf,
    scope: ChangeScope,
    violations: Vec<Violation>,
}

impl GitHost {
    pub fn new(root: impl Into<PathBuf>, scope: ChangeScope) -> Self {
        Self {
            root: root.into(),
            scope,
            violations: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Failures reported so far.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl ReviewHost for GitHost {
    fn change_set(&self) -> Result<ChangeSet> {
        if !git::is_git_repo(&self.root) {
            return Err(Error::Git(format!(
                "{} is not inside a git repository",
                self.root.display()
            )));
        }
        git::get_change_set(&self.root, &self.scope).map_err(|e| Error::Git(format!("{e:#}")))
    }

    fn fail(&mut self, message: &str, file: &str, line: u32) {
        self.violations.push(Violation::file(file, line, message));
    }
}

/// Host with a fixed change set that records failures in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub changes: ChangeSet,
    pub failures: Vec<Violation>,
}

impl MemoryHost {
    pub fn new(changes: ChangeSet) -> Self {
        Self {
            changes,
            failures: Vec::new(),
        }
    }
}

impl ReviewHost for MemoryHost {
    fn change_set(&self) -> Result<ChangeSet> {
        Ok(self.changes.clone())
    }

    fn fail(&mut self, message: &str, file: &str, line: u32) {
        self.failures.push(Violation::file(file, line, message));
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
