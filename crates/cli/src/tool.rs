// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Formatter invocation.
//!
//! Commands are built as argument vectors and spawned directly, never through
//! a shell. Standard output, standard error, and the exit status are captured
//! separately; only standard output carries findings.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Flag asking the formatter to print files that differ from its output.
pub const LIST_DIFFERENT_FLAG: &str = "--list-different";

/// Flag carrying the formatter's config file.
pub const CONFIG_FLAG: &str = "--config";

/// Target meaning "the whole project".
pub const WHOLE_PROJECT: &str = ".";

/// A fully built formatter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to spawn.
    pub program: PathBuf,
    /// Arguments, target last.
    pub args: Vec<String>,
    /// The file (or ".") being checked.
    pub target: String,
}

impl Invocation {
    /// Build `<program> --list-different [--config <path>] <target>`.
    pub fn list_different(program: &Path, config_file: Option<&str>, target: &str) -> Self {
        let mut args = vec![LIST_DIFFERENT_FLAG.to_string()];
        if let Some(config) = config_file {
            args.push(CONFIG_FLAG.to_string());
            args.push(config.to_string());
        }
        args.push(target.to_string());

        Self {
            program: program.to_path_buf(),
            args,
            target: target.to_string(),
        }
    }

    /// Human-readable command line, for logs only.
    pub fn display(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Everything captured from one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Target the invocation checked.
    pub target: String,
    /// Raw standard output.
    pub stdout: String,
    /// Raw standard error.
    pub stderr: String,
    /// Exit code (None if killed by a signal or never started).
    pub status: Option<i32>,
    /// Spawn or timeout error, if the process did not complete.
    pub error: Option<String>,
}

impl ToolOutput {
    /// Output of a process that exited normally.
    pub fn completed(target: &str, stdout: impl Into<String>, status: i32) -> Self {
        Self {
            target: target.to_string(),
            stdout: stdout.into(),
            status: Some(status),
            ..Self::default()
        }
    }

    /// An invocation that never produced output.
    pub fn errored(target: &str, error: impl Into<String>) -> Self {
        Self {
            target: target.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Attach captured standard error.
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// True when standard output lists at least one file.
    pub fn has_listing(&self) -> bool {
        !self.stdout.trim().is_empty()
    }

    /// Describe why this invocation could not be trusted, if it could not.
    ///
    /// Spawn errors, timeouts, and a non-zero exit with an empty listing all
    /// count as failures.
    pub fn failure(&self) -> Option<ToolFailure> {
        let reason = match (&self.error, self.status) {
            (Some(error), _) => error.clone(),
            (None, Some(0)) => return None,
            (None, _) if self.has_listing() => return None,
            (None, Some(code)) => format!("exited with status {code}"),
            (None, None) => "terminated by signal".to_string(),
        };

        let detail = self
            .stderr
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);

        Some(ToolFailure {
            target: self.target.clone(),
            reason,
            detail,
        })
    }
}

/// An invocation whose result could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    /// Target the invocation checked.
    pub target: String,
    /// Short description of what went wrong.
    pub reason: String,
    /// First line of standard error, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Executes formatter invocations.
pub trait ToolRunner {
    /// Run `invocation` with `root` as the working directory.
    fn run(&self, invocation: &Invocation, root: &Path) -> ToolOutput;
}

/// Runs the formatter as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner that waits indefinitely (no timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill invocations that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation, root: &Path) -> ToolOutput {
        tracing::debug!("running {}", invocation.display());

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let child = match child {
            Ok(c) => c,
            Err(e) => {
                return ToolOutput::errored(
                    &invocation.target,
                    format!("failed to spawn {}: {e}", invocation.program.display()),
                );
            }
        };

        match wait_with_timeout(child, self.timeout) {
            Ok(captured) => ToolOutput {
                target: invocation.target.clone(),
                stdout: String::from_utf8_lossy(&captured.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&captured.stderr).into_owned(),
                status: captured.status.code(),
                error: None,
            },
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                ToolOutput::errored(&invocation.target, e.to_string())
            }
            Err(e) => ToolOutput::errored(
                &invocation.target,
                format!("failed to run {}: {e}", invocation.program.display()),
            ),
        }
    }
}

/// Output collected from a finished child.
struct Captured {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Wait for a child, killing it once `timeout` elapses.
///
/// Both pipes are drained on background threads while polling for exit.
fn wait_with_timeout(mut child: Child, timeout: Option<Duration>) -> io::Result<Captured> {
    let Some(limit) = timeout else {
        let output = child.wait_with_output()?;
        return Ok(Captured {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    };

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let start = Instant::now();
    let poll_interval = Duration::from_millis(20);

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if start.elapsed() > limit {
            child.kill().ok();
            child.wait().ok();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("timed out after {limit:?}"),
            ));
        }
        thread::sleep(poll_interval);
    };

    Ok(Captured {
        status,
        stdout: join_drain(stdout),
        stderr: join_drain(stderr),
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).ok();
            buf
        })
    })
}

fn join_drain(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
