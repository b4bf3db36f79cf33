//! Diagnostics for the TDD data language.
//!
//! TDD errors always point into source text. This crate turns a byte offset
//! into the things a person needs to find the problem:
//! - a 1-based line/column and character position ([`span_utils`])
//! - a bounded-width excerpt of the offending line with a caret ([`excerpt`])
//! - a structured [`Diagnostic`] that hosts render tersely or verbosely
//! - a [`TerminalEmitter`](emitter::TerminalEmitter) with optional ANSI color
//!
//! Error types in the parser, evaluator and loader crates carry a
//! [`SourceLocation`] and implement [`ToDiagnostic`].

mod diagnostic;
pub mod emitter;
pub mod excerpt;
mod location;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity, ToDiagnostic, Verbosity};
pub use location::SourceLocation;
