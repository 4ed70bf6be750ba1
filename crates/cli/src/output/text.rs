//! Text output formatter.
//!
//! ```text
//! prettier: FAIL
//!   <file>: File not formatted with Prettier
//! prettier: WARN
//!   <target>: <reason>
//!     <first stderr line>
//! ```

use std::io::Write;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::check::{CheckOutput, Violation};
use crate::color::scheme;
use crate::tool::ToolFailure;

/// Text output formatter with color support.
pub struct TextFormatter<W = StandardStream> {
    stdout: W,
    options: FormatOptions,
    violations_shown: usize,
    truncated: bool,
}

impl TextFormatter<StandardStream> {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    /// Create a formatter writing to `writer`.
    pub fn with_writer(writer: W, options: FormatOptions) -> Self {
        Self {
            stdout: writer,
            options,
            violations_shown: 0,
            truncated: false,
        }
    }

    /// Write violations. Returns true if output was truncated.
    pub fn write_check(&mut self, output: &CheckOutput) -> std::io::Result<bool> {
        if output.passed {
            return Ok(false);
        }

        self.write_header(output.name, "FAIL", &scheme::fail())?;

        for violation in &output.violations {
            if let Some(limit) = self.options.limit
                && self.violations_shown >= limit
            {
                self.truncated = true;
                return Ok(true);
            }
            self.write_violation(violation)?;
            self.violations_shown += 1;
        }

        Ok(false)
    }

    /// Write invocations that produced no usable result.
    pub fn write_tool_failures(&mut self, output: &CheckOutput) -> std::io::Result<()> {
        if output.tool_failures.is_empty() {
            return Ok(());
        }

        self.write_header(output.name, "WARN", &scheme::warn())?;
        for failure in &output.tool_failures {
            self.write_tool_failure(failure)?;
        }
        Ok(())
    }

    fn write_header(
        &mut self,
        name: &str,
        status: &str,
        spec: &termcolor::ColorSpec,
    ) -> std::io::Result<()> {
        self.stdout.set_color(&scheme::check_name())?;
        write!(self.stdout, "{}", name)?;
        self.stdout.reset()?;

        write!(self.stdout, ": ")?;
        self.stdout.set_color(spec)?;
        write!(self.stdout, "{}", status)?;
        self.stdout.reset()?;
        writeln!(self.stdout)
    }

    fn write_violation(&mut self, v: &Violation) -> std::io::Result<()> {
        write!(self.stdout, "  ")?;

        self.stdout.set_color(&scheme::path())?;
        write!(self.stdout, "{}", v.file)?;
        self.stdout.reset()?;
        writeln!(self.stdout, ": {}", v.message)
    }

    fn write_tool_failure(&mut self, failure: &ToolFailure) -> std::io::Result<()> {
        write!(self.stdout, "  ")?;
        self.stdout.set_color(&scheme::path())?;
        write!(self.stdout, "{}", failure.target)?;
        self.stdout.reset()?;
        writeln!(self.stdout, ": {}", failure.reason)?;

        if let Some(ref detail) = failure.detail {
            self.stdout.set_color(&scheme::detail())?;
            write!(self.stdout, "    {}", detail)?;
            self.stdout.reset()?;
            writeln!(self.stdout)?;
        }
        Ok(())
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, output: &CheckOutput) -> std::io::Result<()> {
        let invocations = format!(
            "{} invocation{}",
            output.invocations,
            if output.invocations == 1 { "" } else { "s" }
        );

        if output.passed {
            self.stdout.set_color(&scheme::pass())?;
            write!(self.stdout, "PASS")?;
            self.stdout.reset()?;
            writeln!(self.stdout, ": {}, all files formatted", invocations)
        } else {
            let total = output.total_violations();
            self.stdout.set_color(&scheme::fail())?;
            write!(self.stdout, "FAIL")?;
            self.stdout.reset()?;
            writeln!(
                self.stdout,
                ": {}, {} file{} not formatted",
                invocations,
                total,
                if total == 1 { "" } else { "s" }
            )
        }
    }

    /// Write truncation message if applicable.
    pub fn write_truncation_message(&mut self, total: usize) -> std::io::Result<()> {
        if let Some(limit) = self.options.limit
            && self.truncated
            && total > limit
        {
            writeln!(
                self.stdout,
                "Stopped after {} violations. Use --no-limit to see all.",
                limit
            )?;
        }
        Ok(())
    }

    /// Check if output was truncated.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// Get the number of violations shown.
    pub fn violations_shown(&self) -> usize {
        self.violations_shown
    }

    /// Consume the formatter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.stdout
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
