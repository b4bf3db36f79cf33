//! Evaluation errors.

use std::error::Error as _;
use std::fmt;

use tdd_diagnostic::{Diagnostic, SourceLocation, ToDiagnostic};
use tdd_parse::ParseError;
use thiserror::Error;

use crate::HookError;

/// An error that aborted an evaluation.
#[derive(Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

#[derive(Debug, Error)]
pub enum EvalErrorKind {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// Well-formed TDD that cannot be evaluated, e.g. a non-string key.
    #[error("TDD error: {message}")]
    Semantic { message: String },

    /// An environment hook failed while handling an event.
    #[error("Error while evaluating TDD: {source}")]
    Environment { source: HookError },

    #[error("TDD error: Failed to evaluate function \"{name}\".")]
    CallFailed { name: String, source: HookError },
}

impl EvalError {
    pub fn semantic(message: impl Into<String>, location: SourceLocation) -> Self {
        EvalError {
            kind: EvalErrorKind::Semantic {
                message: message.into(),
            },
            location: Some(location),
        }
    }

    /// Wrap a hook failure, passing evaluation errors through.
    pub fn from_hook(err: HookError, location: SourceLocation) -> Self {
        match err.downcast::<EvalError>() {
            Ok(eval) => *eval,
            Err(source) => EvalError {
                kind: EvalErrorKind::Environment { source },
                location: Some(location),
            },
        }
    }

    pub fn call_failed(name: &str, source: HookError, location: SourceLocation) -> Self {
        EvalError {
            kind: EvalErrorKind::CallFailed {
                name: name.to_owned(),
                source,
            },
            location: Some(location),
        }
    }

    /// Byte offset of the error, if it points into source text.
    pub fn offset(&self) -> Option<u32> {
        self.location.as_ref().map(SourceLocation::offset)
    }

    /// Messages of the causes, outermost first.
    pub fn causes(&self) -> Vec<String> {
        let mut next = self.source();
        // The environment message already quotes its direct source.
        if matches!(self.kind, EvalErrorKind::Environment { .. }) {
            next = next.and_then(|e| e.source());
        }
        let mut causes = Vec::new();
        while let Some(err) = next {
            causes.push(err.to_string());
            next = err.source();
        }
        causes
    }
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        let location = Some(err.location.clone());
        EvalError {
            kind: EvalErrorKind::Syntax(err),
            location,
        }
    }
}

impl ToDiagnostic for EvalError {
    fn to_diagnostic(&self) -> Diagnostic {
        if let EvalErrorKind::Syntax(parse) = &self.kind {
            return parse.to_diagnostic();
        }
        let mut diagnostic = Diagnostic::error(self.to_string());
        if let Some(location) = &self.location {
            diagnostic = diagnostic.with_location(location.clone());
        }
        for cause in self.causes() {
            diagnostic = diagnostic.with_note(cause);
        }
        diagnostic
    }
}
