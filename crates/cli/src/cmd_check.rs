// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::path::PathBuf;

use prettier_review::check::CheckOutput;
use prettier_review::checker::Checker;
use prettier_review::cli::{CheckArgs, Cli, OutputFormat};
use prettier_review::color::resolve_color_with_flags;
use prettier_review::config::{self, Config, Settings};
use prettier_review::discovery;
use prettier_review::error::{Error, ExitCode};
use prettier_review::host::GitHost;
use prettier_review::output::FormatOptions;
use prettier_review::output::json::{self, JsonFormatter};
use prettier_review::output::text::TextFormatter;

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    if args.staged && args.base.is_some() {
        return Err(Error::Argument("--staged and --base cannot be used together".into()).into());
    }

    let root = project_root(args)?;
    tracing::debug!("project root: {}", root.display());

    let config = match discovery::resolve_config(cli.config.as_deref(), &root)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let settings = Settings::resolve(&config.prettier, &args.overrides())?;
    tracing::trace!("check command starting");

    let checker = Checker::with_process_runner(&root, settings);
    let mut host = GitHost::new(&root, args.scope());
    let summary = checker.check(&mut host)?;
    let output = json::create_output(host.into_violations(), summary);

    match args.output {
        OutputFormat::Text => write_text(args, &output)?,
        OutputFormat::Json => JsonFormatter::new(std::io::stdout().lock()).write(&output)?,
    }

    Ok(if output.passed {
        ExitCode::Success
    } else {
        ExitCode::CheckFailed
    })
}

/// The directory the formatter runs in, made absolute and canonical.
fn project_root(args: &CheckArgs) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let root = match &args.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cwd.join(path),
        None => cwd,
    };

    if !root.is_dir() {
        return Err(Error::Argument(format!("not a directory: {}", root.display())).into());
    }
    let canonical = root
        .canonicalize()
        .map_err(|source| Error::Io { path: root, source })?;
    Ok(canonical)
}

fn write_text(args: &CheckArgs, output: &CheckOutput) -> std::io::Result<()> {
    let options = if args.no_limit {
        FormatOptions::no_limit()
    } else {
        FormatOptions::with_limit(args.limit)
    };
    let color = resolve_color_with_flags(args.color, args.no_color);
    let mut formatter = TextFormatter::new(color, options);

    formatter.write_check(output)?;
    formatter.write_truncation_message(output.total_violations())?;
    formatter.write_tool_failures(output)?;
    formatter.write_summary(output)
}
