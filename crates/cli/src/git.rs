// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git utilities for change detection.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//!
//! ## Delta Classification
//!
//! - Added, copied, untracked: `new_file()` path goes to `added`
//! - Modified, type change, conflicted: `new_file()` path goes to `modified`
//! - Renamed: new path goes to `modified`, old path to `deleted`
//! - Deleted: `old_file()` path goes to `deleted` (`new_file()` is empty)
//!
//! Paths are relative to the project root. When the root is a subdirectory of
//! the repository, changes outside it are skipped.

use std::path::{Path, PathBuf};

use anyhow::Context;
use git2::{Delta, Diff, DiffOptions, Repository};

use crate::host::ChangeSet;

/// Which changes make up the review.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChangeScope {
    /// Staged and unstaged changes (including untracked files) against HEAD.
    #[default]
    Worktree,
    /// Staged changes only (pre-commit hook).
    Staged,
    /// Everything on the branch, staged, and unstaged, against a base ref.
    Base(String),
}

/// Check if a path is in a git repository.
pub fn is_git_repo(root: &Path) -> bool {
    Repository::discover(root).is_ok()
}

/// Compute the change set for `scope`, scoped to `root`.
pub fn get_change_set(root: &Path, scope: &ChangeScope) -> anyhow::Result<ChangeSet> {
    let repo = Repository::discover(root).context("Failed to open repository")?;
    let workdir = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("repository has no working directory"))?;
    let prefix = root_prefix(&workdir, root);

    let mut opts = DiffOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true);

    let mut diff = match scope {
        ChangeScope::Worktree => {
            let head = head_tree(&repo)?;
            repo.diff_tree_to_workdir_with_index(head.as_ref(), Some(&mut opts))
                .context("Failed to compute diff")?
        }
        ChangeScope::Staged => {
            let head = head_tree(&repo)?;
            let index = repo.index().context("Failed to get repository index")?;
            repo.diff_tree_to_index(head.as_ref(), Some(&index), None)
                .context("Failed to compute diff")?
        }
        ChangeScope::Base(base) => {
            let base_tree = repo
                .revparse_single(base)
                .with_context(|| format!("Failed to resolve base ref: {}", base))?
                .peel_to_tree()
                .context("Failed to get tree for base ref")?;
            repo.diff_tree_to_workdir_with_index(Some(&base_tree), Some(&mut opts))
                .context("Failed to compute diff")?
        }
    };
    diff.find_similar(None)
        .context("Failed to detect renames")?;

    Ok(classify(&diff, &prefix))
}

/// Get HEAD's tree, or None for a repository with no commits yet.
fn head_tree(repo: &Repository) -> anyhow::Result<Option<git2::Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree().context("Failed to get HEAD tree")?)),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(e).context("Failed to get HEAD"),
    }
}

/// Location of `root` inside the working directory; empty at the top level.
fn root_prefix(workdir: &Path, root: &Path) -> PathBuf {
    let workdir = std::fs::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
    let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    root.strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

fn classify(diff: &Diff<'_>, prefix: &Path) -> ChangeSet {
    let mut changes = ChangeSet::default();
    let scoped = |path: Option<&Path>| -> Option<String> {
        let rel = path?.strip_prefix(prefix).ok()?;
        Some(rel.to_string_lossy().into_owned())
    };

    for delta in diff.deltas() {
        let new_path = scoped(delta.new_file().path());
        let old_path = scoped(delta.old_file().path());

        match delta.status() {
            Delta::Added | Delta::Copied | Delta::Untracked => {
                changes.added.extend(new_path);
            }
            Delta::Modified | Delta::Typechange | Delta::Conflicted => {
                changes.modified.extend(new_path);
            }
            Delta::Renamed => {
                changes.modified.extend(new_path);
                changes.deleted.extend(old_path);
            }
            Delta::Deleted => {
                changes.deleted.extend(old_path);
            }
            Delta::Unmodified | Delta::Ignored | Delta::Unreadable => {}
        }
    }

    changes
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
