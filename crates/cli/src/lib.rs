//! Report files that are not formatted with Prettier.
//!
//! A [`Checker`] resolves the `prettier` executable, runs
//! `prettier --list-different` over the whole project or over the review's
//! changed files, and reports every listed file to a [`ReviewHost`].

pub mod check;
pub mod checker;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod host;
pub mod locator;
pub mod output;
pub mod tool;

pub use check::{CheckOutput, CheckSummary, Violation};
pub use checker::Checker;
pub use cli::{CheckArgs, Cli, Command, OutputFormat};
pub use config::Settings;
pub use error::{Error, ExitCode, Result};
pub use host::{ChangeSet, GitHost, MemoryHost, ReviewHost};
pub use locator::{SearchPath, resolve_executable};
pub use tool::{Invocation, ProcessRunner, ToolFailure, ToolOutput, ToolRunner};
