//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::{Diagnostic, Severity, Verbosity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics to a terminal-like sink.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    verbosity: Verbosity,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, mode: ColorMode, is_tty: bool, verbosity: Verbosity) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            verbosity,
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&diagnostic.message, color)?;

        match self.verbosity {
            Verbosity::Terse => {
                if let Some(loc) = &diagnostic.location {
                    write!(self.writer, " ({loc})")?;
                }
                writeln!(self.writer)?;
            }
            Verbosity::Verbose => {
                writeln!(self.writer)?;
                if let Some(loc) = &diagnostic.location {
                    writeln!(self.writer, "{}", loc.render_excerpt())?;
                }
                for label in &diagnostic.labels {
                    write!(self.writer, "  --> {}: ", label.location)?;
                    self.write_colored(&label.message, colors::SECONDARY)?;
                    writeln!(self.writer)?;
                }
                for note in &diagnostic.notes {
                    write!(self.writer, "  = ")?;
                    self.write_colored("caused by", colors::BOLD)?;
                    writeln!(self.writer, ": {note}")?;
                }
            }
        }
        Ok(())
    }

    pub fn emit_all(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.emit(diagnostic)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool, verbosity: Verbosity) -> Self {
        TerminalEmitter::new(io::stderr(), mode, is_tty, verbosity)
    }
}
