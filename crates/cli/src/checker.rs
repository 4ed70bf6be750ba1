// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The formatting check.
//!
//! One pass: resolve the formatter, pick targets, run the formatter once per
//! target, and report every listed file to the review host.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::check::{CheckSummary, NOT_FORMATTED_MESSAGE};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::host::{ChangeSet, ReviewHost};
use crate::locator::{self, SearchPath, TOOL_NAME};
use crate::tool::{Invocation, ProcessRunner, ToolOutput, ToolRunner, WHOLE_PROJECT};

/// Runs the formatter check for one project root.
pub struct Checker<R = ProcessRunner> {
    root: PathBuf,
    settings: Settings,
    runner: R,
    search_path: SearchPath,
}

impl Checker<ProcessRunner> {
    /// Checker that spawns the formatter as a child process.
    pub fn with_process_runner(root: impl Into<PathBuf>, settings: Settings) -> Self {
        let runner = ProcessRunner::new().with_timeout(settings.timeout);
        Self::new(root, settings, runner)
    }
}

impl<R: ToolRunner> Checker<R> {
    pub fn new(root: impl Into<PathBuf>, settings: Settings, runner: R) -> Self {
        Self {
            root: root.into(),
            settings,
            runner,
            search_path: SearchPath::Process,
        }
    }

    /// Replace the `PATH` used for executable lookup.
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = SearchPath::Explicit(search_path);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Locate the formatter executable.
    pub fn executable(&self) -> Option<PathBuf> {
        let configured = self.settings.executable_path.as_deref();
        match &self.search_path {
            SearchPath::Process => locator::resolve_executable(&self.root, configured),
            SearchPath::Explicit(path) => {
                locator::resolve_executable_in(&self.root, configured, path.as_deref())
            }
        }
    }

    /// Run the formatter against a single target (a file or `.`).
    pub fn run_check(&self, tool: &Path, target: &str) -> ToolOutput {
        let invocation =
            Invocation::list_different(tool, self.settings.config_file.as_deref(), target);
        self.runner.run(&invocation, &self.root)
    }

    /// Run the formatter for every target.
    ///
    /// Fails with [`Error::ToolNotFound`] before any invocation when the
    /// executable cannot be resolved.
    pub fn check_results(&self, host: &dyn ReviewHost) -> Result<Vec<ToolOutput>> {
        let tool = self.executable().ok_or_else(|| Error::ToolNotFound {
            tool: TOOL_NAME.to_string(),
        })?;

        if !self.settings.filtering {
            return Ok(vec![self.run_check(&tool, WHOLE_PROJECT)]);
        }

        let changes = host.change_set()?;
        let files = select_files(self.settings.matching_file_regex(), &changes, &self.root);
        tracing::debug!("{} changed file(s) selected", files.len());

        Ok(files
            .iter()
            .map(|file| self.run_check(&tool, file))
            .collect())
    }

    /// Run the check and report unformatted files to `host`.
    pub fn check(&self, host: &mut dyn ReviewHost) -> Result<CheckSummary> {
        let results = self.check_results(host)?;
        let mut summary = CheckSummary {
            invocations: results.len(),
            ..CheckSummary::default()
        };

        for result in &results {
            if let Some(failure) = result.failure() {
                tracing::warn!(
                    "{} failed for {}: {}",
                    TOOL_NAME,
                    failure.target,
                    failure.reason
                );
                summary.tool_failures.push(failure);
            }
            if result.has_listing() {
                summary.reported += self.send_comment(host, &result.stdout);
            }
        }

        Ok(summary)
    }

    /// Report each file listed in `stdout`; returns how many were reported.
    pub fn send_comment(&self, host: &mut dyn ReviewHost, stdout: &str) -> usize {
        let files = parse_listing(stdout, &self.root);
        for file in &files {
            host.fail(NOT_FORMATTED_MESSAGE, file, 0);
        }
        files.len()
    }
}

/// Changed files worth checking: `(modified ∪ added) − deleted`, made
/// relative to `root`, matching `pattern`.
///
/// The pattern sees root-relative paths, so `^src/` anchors work. Absolute
/// paths outside `root` are skipped.
pub fn select_files(pattern: &Regex, changes: &ChangeSet, root: &Path) -> Vec<String> {
    changes
        .touched()
        .into_iter()
        .filter_map(|path| within_root(path, root))
        .filter(|path| pattern.is_match(path))
        .collect()
}

/// `path` relative to `root`, or `None` for an absolute path outside it.
fn within_root(path: &str, root: &Path) -> Option<String> {
    let candidate = Path::new(path);
    if !candidate.has_root() {
        return Some(path.to_string());
    }
    match candidate.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => Some(rel.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// One path per non-empty line of formatter output, made relative to `root`.
pub fn parse_listing(stdout: &str, root: &Path) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| relative_to(line, root))
        .collect()
}

/// Strip `root` from the front of `path`.
///
/// Paths outside `root`, and `root` itself, are returned unchanged.
pub fn relative_to(path: &str, root: &Path) -> String {
    match Path::new(path).strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;
