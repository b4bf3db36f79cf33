//! Recursive descent parser for TDD.
//!
//! Produces a flat, span-carrying expression tree in an [`ExprArena`].
//! Parsing is pure: calls are recorded, never resolved. Deciding what a
//! call means, and whether a hash value is evaluated at all, is the
//! evaluator's job.
//!
//! Three entry points match the three shapes TDD text comes in:
//! - [`parse_expression`]: one expression, e.g. a setting value
//! - [`parse_hash_body`]: `key: value` pairs without braces, e.g. a `.tdd` file
//! - [`parse_sequence_body`]: items without brackets

mod ast;
mod error;
mod parser;

use std::sync::Arc;

use tdd_diagnostic::SourceLocation;
use tdd_ir::{Fragment, FragmentError, Span};

pub use ast::{CallExpr, Expr, ExprArena, ExprId, ExprKind, HashEntry};
pub use error::{ParseError, ParseErrorKind, COLON_AFTER_VALUE, COLON_IN_LIST};
pub use parser::MAX_NESTING;

use parser::Parser;

/// Parser settings.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ParseOptions {
    /// Keep unquoted `true`, `false` and numbers as strings.
    pub force_strings: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn force_strings(mut self, force: bool) -> Self {
        self.force_strings = force;
        self
    }
}

/// Which entry point produced a [`Parsed`] tree.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParsedKind {
    Expression,
    /// The root is a `Hash` without braces.
    HashBody,
    /// The root is a `Sequence` without brackets.
    SequenceBody,
}

/// The result of a successful parse.
///
/// Keeps the source text so that the evaluator can cut raw fragments and
/// report errors against it.
#[derive(Clone, Debug)]
pub struct Parsed {
    text: Arc<str>,
    file_name: Option<Arc<str>>,
    arena: ExprArena,
    root: ExprId,
    kind: ParsedKind,
}

impl Parsed {
    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    #[inline]
    pub fn file_name(&self) -> Option<&Arc<str>> {
        self.file_name.as_ref()
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> ExprId {
        self.root
    }

    #[inline]
    pub fn kind(&self) -> ParsedKind {
        self.kind
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        self.arena.get(id)
    }

    /// The raw source of `span` as a fragment of the parsed text.
    pub fn fragment(&self, span: Span) -> Result<Fragment, FragmentError> {
        Fragment::from_span(&self.text, span, self.file_name.as_ref())
    }

    pub fn location(&self, offset: u32) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.text), offset, self.file_name.clone())
    }
}

/// Parse `source` as a single expression, optionally surrounded by
/// whitespace and comments.
#[tracing::instrument(level = "debug", skip_all, fields(file = source.file_name()))]
pub fn parse_expression(source: &Fragment, options: ParseOptions) -> Result<Parsed, ParseError> {
    parse_with(source, options, ParsedKind::Expression, Parser::whole_expression)
}

/// Parse `source` as the inside of a hash: `key: value` pairs without the
/// enclosing braces. Empty text gives an empty hash.
#[tracing::instrument(level = "debug", skip_all, fields(file = source.file_name()))]
pub fn parse_hash_body(source: &Fragment, options: ParseOptions) -> Result<Parsed, ParseError> {
    parse_with(source, options, ParsedKind::HashBody, Parser::hash_body)
}

/// Parse `source` as the inside of a sequence, without the brackets.
#[tracing::instrument(level = "debug", skip_all, fields(file = source.file_name()))]
pub fn parse_sequence_body(source: &Fragment, options: ParseOptions) -> Result<Parsed, ParseError> {
    parse_with(source, options, ParsedKind::SequenceBody, Parser::sequence_body)
}

fn parse_with<'a>(
    source: &'a Fragment,
    options: ParseOptions,
    kind: ParsedKind,
    rule: impl FnOnce(&mut Parser<'a>) -> Result<ExprId, ParseError>,
) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(
        source.text(),
        source.span(),
        source.file_name_arc(),
        options.force_strings,
    );
    let root = rule(&mut parser)?;
    tracing::trace!(exprs = parser.arena.len(), "parsed");
    Ok(Parsed {
        text: Arc::clone(source.text()),
        file_name: source.file_name_arc().cloned(),
        arena: parser.arena,
        root,
        kind,
    })
}

#[cfg(test)]
mod tests;
