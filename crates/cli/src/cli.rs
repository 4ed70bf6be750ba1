// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{self, Overrides};
use crate::git::ChangeScope;

/// Report files that are not formatted with Prettier
#[derive(Parser)]
#[command(name = "prettier-review")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(
        short = 'C',
        long = "config",
        global = true,
        env = "PRETTIER_REVIEW_CONFIG"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check formatting and report unformatted files
    Check(CheckArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Project root (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Prettier config file, passed through as --config
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<String>,

    /// Path to the prettier executable
    #[arg(long, value_name = "PATH")]
    pub executable: Option<String>,

    /// Regex changed files must match (default: \.js$)
    #[arg(long, value_name = "REGEX")]
    pub file_regex: Option<String>,

    /// Only check files in the change set
    #[arg(long)]
    pub filtering: bool,

    /// Compare against a git base ref (e.g., main, HEAD~1)
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,

    /// Check only staged changes (pre-commit hook)
    #[arg(long)]
    pub staged: bool,

    /// Kill a prettier invocation after this long (e.g., 30s, 500ms)
    #[arg(long, value_name = "DURATION", value_parser = config::parse_duration)]
    pub timeout: Option<Duration>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Maximum violations to display (default: 15)
    #[arg(long, default_value_t = 15, value_name = "N")]
    pub limit: usize,

    /// Show all violations (no limit)
    #[arg(long)]
    pub no_limit: bool,
}

impl CheckArgs {
    /// Settings given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config_file.clone(),
            executable_path: self.executable.clone(),
            file_regex: self.file_regex.clone(),
            filtering: self.filtering,
            timeout: self.timeout,
        }
    }

    /// Which changes make up the review.
    pub fn scope(&self) -> ChangeScope {
        match (&self.base, self.staged) {
            (Some(base), _) => ChangeScope::Base(base.clone()),
            (None, true) => ChangeScope::Staged,
            (None, false) => ChangeScope::Worktree,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
