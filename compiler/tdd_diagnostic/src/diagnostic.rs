use std::fmt;

use crate::SourceLocation;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// How much of a diagnostic to render.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Verbosity {
    /// Message plus a one-line location.
    Terse,
    /// Message, source excerpt, secondary labels and the cause chain.
    #[default]
    Verbose,
}

/// A secondary location with an explanation, e.g. where a list was opened.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Label {
    pub location: SourceLocation,
    pub message: String,
}

/// A renderable error report.
///
/// Built from the structured error types of the other TDD crates through
/// [`ToDiagnostic`]; hosts decide how much of it to show.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Headline, e.g. `TDD syntax error: Unexpected character.`
    pub message: String,
    /// Primary location, if the error points into source text.
    pub location: Option<SourceLocation>,
    pub labels: Vec<Label>,
    /// Cause chain and other context, outermost first.
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            location: None,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_label(mut self, location: SourceLocation, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            location,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render as plain text.
    pub fn render(&self, verbosity: Verbosity) -> String {
        let mut out = self.message.clone();
        match verbosity {
            Verbosity::Terse => {
                if let Some(loc) = &self.location {
                    out.push_str(" (");
                    out.push_str(&loc.to_string());
                    out.push(')');
                }
            }
            Verbosity::Verbose => {
                if let Some(loc) = &self.location {
                    out.push('\n');
                    out.push_str(&loc.render_excerpt());
                }
                for label in &self.labels {
                    out.push('\n');
                    out.push_str(&label.message);
                    out.push_str(": ");
                    out.push_str(&label.location.to_string());
                }
                for note in &self.notes {
                    out.push_str("\nCaused by: ");
                    out.push_str(note);
                }
            }
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Verbosity::Verbose))
    }
}

/// Conversion of a structured error into a [`Diagnostic`].
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
