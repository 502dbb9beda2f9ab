//! Diagnostic output for the CLI
//!
//! Rows skipped during span extraction are not fatal. They are collected and
//! reported on stderr once the run has loaded its input, rustc-style:
//!
//! ```text
//! warning: row 7: task 'Training' has no active month
//!   --> tasks.xlsx:7
//! ```
//!
//! ## Exit Code Semantics
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success: artifact written (skipped rows allowed) |
//! | 1 | Failure: no artifact written |

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use taskgantt_core::SpanError;

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the output artifact was written
    Success = 0,
    /// Failure: missing or malformed input, or unwritable output
    Failure = 1,
}

impl ExitCode {
    /// Get the numeric value
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

// ============================================================================
// Skipped Rows
// ============================================================================

/// Writes skipped-row warnings and a closing summary
pub struct SkipReporter<W: Write> {
    writer: W,
    input: Option<PathBuf>,
    quiet: bool,
    skipped: usize,
}

impl<W: Write> SkipReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            input: None,
            quiet: false,
            skipped: 0,
        }
    }

    /// Point each warning at a location in this input file
    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Count skipped rows without listing them
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Number of rows reported so far
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    pub fn report(&mut self, error: &SpanError) -> std::io::Result<()> {
        self.skipped += 1;
        if self.quiet {
            return Ok(());
        }

        writeln!(self.writer, "warning: {error}")?;
        if let Some(input) = &self.input {
            writeln!(self.writer, "  --> {}:{}", input.display(), error.row())?;
        }
        Ok(())
    }

    pub fn report_all<'a>(
        &mut self,
        errors: impl IntoIterator<Item = &'a SpanError>,
    ) -> std::io::Result<()> {
        for error in errors {
            self.report(error)?;
        }
        self.finish()
    }

    /// Write the summary line, if anything was skipped
    pub fn finish(&mut self) -> std::io::Result<()> {
        match self.skipped {
            0 => Ok(()),
            1 => writeln!(self.writer, "warning: skipped 1 row without an active month"),
            n => writeln!(self.writer, "warning: skipped {n} rows without an active month"),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}
