//! Recursive descent over the scanner.

use std::sync::Arc;

use tdd_diagnostic::SourceLocation;
use tdd_ir::{Number, Span};
use tdd_lexer::chars::quote_or_name;
use tdd_lexer::{LexError, Scanner, Token, TokenKind, WordMode};
use tdd_stack::ensure_sufficient_stack;

use crate::ast::{CallExpr, Expr, ExprArena, ExprId, ExprKind, HashEntry};
use crate::error::{COLON_AFTER_VALUE, COLON_IN_LIST};
use crate::{ParseError, ParseErrorKind};

/// Deepest allowed nesting of lists, hashes and function calls.
///
/// Values are dropped, cloned and compared recursively, so the depth of
/// what the parser accepts is bounded.
pub const MAX_NESTING: u32 = 1_000;

/// What a separator turned out to be.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Separator {
    /// `:` (consumed).
    Colon,
    /// `,`, an implicit line-break comma, the closer, or the end of the text.
    Other,
}

/// The closing delimiter of the listing being parsed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Closer {
    Char(char),
    /// A listing without delimiters, ended by the end of the text.
    EndOfText,
}

impl Closer {
    fn matches(self, c: char) -> bool {
        self == Closer::Char(c)
    }
}

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    text: &'a Arc<str>,
    file_name: Option<&'a Arc<str>>,
    force_strings: bool,
    /// Number of `expression` calls in progress.
    depth: u32,
    pub(crate) arena: ExprArena,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        text: &'a Arc<str>,
        span: Span,
        file_name: Option<&'a Arc<str>>,
        force_strings: bool,
    ) -> Self {
        Parser {
            scanner: Scanner::new(text, span.start, span.end),
            text,
            file_name,
            force_strings,
            depth: 0,
            arena: ExprArena::new(),
        }
    }

    fn location(&self, offset: u32) -> SourceLocation {
        SourceLocation::new(Arc::clone(self.text), offset, self.file_name.cloned())
    }

    fn error(&self, kind: ParseErrorKind, offset: u32) -> ParseError {
        ParseError::new(kind, self.location(offset))
    }

    fn lex_error(&self, err: LexError) -> ParseError {
        let offset = err.offset();
        self.error(ParseErrorKind::Lex(err), offset)
    }

    fn next_token(&mut self, mode: WordMode) -> Result<Token, ParseError> {
        self.scanner.next_token(mode).map_err(|e| self.lex_error(e))
    }

    /// Skip trivia and return the character at the cursor.
    fn skip_trivia(&mut self) -> Result<Option<char>, ParseError> {
        self.scanner.skip_trivia().map_err(|e| self.lex_error(e))?;
        Ok(self.scanner.current())
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc(Expr::new(kind, span))
    }

    /// A single expression with nothing after it but trivia.
    pub(crate) fn whole_expression(&mut self) -> Result<ExprId, ParseError> {
        if self.skip_trivia()?.is_none() {
            return Err(self.error(ParseErrorKind::EmptyText, self.scanner.pos()));
        }
        let root = self.expression(WordMode::Value, self.force_strings)?;
        if self.skip_trivia()?.is_some() {
            return Err(self.error(ParseErrorKind::ExtraCharacters, self.scanner.pos()));
        }
        Ok(root)
    }

    /// Key-value pairs up to the end of the text.
    pub(crate) fn hash_body(&mut self) -> Result<ExprId, ParseError> {
        let start = self.scanner.pos();
        let entries = self.hash_inner(Closer::EndOfText, start, self.force_strings)?;
        Ok(self.alloc(ExprKind::Hash(entries), Span::new(start, self.scanner.end())))
    }

    /// Items up to the end of the text.
    pub(crate) fn sequence_body(&mut self) -> Result<ExprId, ParseError> {
        let start = self.scanner.pos();
        let items = self.list_inner(Closer::EndOfText, start, self.force_strings)?;
        Ok(self.alloc(ExprKind::Sequence(items), Span::new(start, self.scanner.end())))
    }

    fn expression(&mut self, mode: WordMode, force_strings: bool) -> Result<ExprId, ParseError> {
        if self.depth == MAX_NESTING {
            return Err(self.error(
                ParseErrorKind::TooDeep { limit: MAX_NESTING },
                self.scanner.pos(),
            ));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.expression_inner(mode, force_strings));
        self.depth -= 1;
        result
    }

    fn expression_inner(
        &mut self,
        mode: WordMode,
        force_strings: bool,
    ) -> Result<ExprId, ParseError> {
        let token = self.next_token(mode)?;
        let start = token.span.start;
        match token.kind {
            TokenKind::LBrace => {
                let entries = self.hash_inner(Closer::Char('}'), start, force_strings)?;
                let end = self.scanner.pos();
                Ok(self.alloc(ExprKind::Hash(entries), Span::new(start, end)))
            }
            TokenKind::LBracket => {
                let items = self.list_inner(Closer::Char(']'), start, force_strings)?;
                let end = self.scanner.pos();
                Ok(self.alloc(ExprKind::Sequence(items), Span::new(start, end)))
            }
            TokenKind::Str(s) => Ok(self.alloc(ExprKind::Str(s), token.span)),
            TokenKind::Word => self.word(token.span, mode, force_strings),
            _ => Err(self.error(ParseErrorKind::UnexpectedCharacter, start)),
        }
    }

    /// An unquoted word: a call name, a boolean, a number or a string.
    fn word(
        &mut self,
        span: Span,
        mode: WordMode,
        force_strings: bool,
    ) -> Result<ExprId, ParseError> {
        let word = self.scanner.slice(span);
        let lookahead = self.scanner.peek_char().map_err(|e| self.lex_error(e))?;
        if lookahead == Some('(') {
            self.next_token(WordMode::Value)?;
            let args = self.list_inner(Closer::Char(')'), span.start, force_strings)?;
            let call = CallExpr {
                name: word.to_owned(),
                name_span: span,
                args,
            };
            let end = self.scanner.pos();
            return Ok(self.alloc(ExprKind::Call(call), Span::new(span.start, end)));
        }

        let kind = if mode == WordMode::Key || force_strings {
            ExprKind::Str(word.to_owned())
        } else {
            scalar(word)
        };
        Ok(self.alloc(kind, span))
    }

    /// Comma separated items; consumes the closer.
    fn list_inner(
        &mut self,
        closer: Closer,
        open: u32,
        force_strings: bool,
    ) -> Result<Vec<ExprId>, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.skip_trivia()? {
                None => {
                    return match closer {
                        Closer::EndOfText => Ok(items),
                        Closer::Char(c) => Err(self.unclosed(
                            ParseErrorKind::UnclosedList {
                                closer: quote_or_name(c),
                            },
                            open,
                        )),
                    };
                }
                Some(c) if closer.matches(c) => {
                    self.next_token(WordMode::Value)?;
                    return Ok(items);
                }
                Some(',') => {
                    return Err(self.error(ParseErrorKind::MissingListItem, self.scanner.pos()));
                }
                Some(_) => {}
            }
            items.push(self.expression(WordMode::Value, force_strings)?);
            self.separator(closer, Some(COLON_IN_LIST))?;
        }
    }

    /// Key-value pairs; consumes the closer.
    fn hash_inner(
        &mut self,
        closer: Closer,
        open: u32,
        force_strings: bool,
    ) -> Result<Vec<HashEntry>, ParseError> {
        let mut entries = Vec::new();
        loop {
            match self.skip_trivia()? {
                None => {
                    return match closer {
                        Closer::EndOfText => Ok(entries),
                        Closer::Char(c) => Err(self.unclosed(
                            ParseErrorKind::UnclosedMap {
                                closer: quote_or_name(c),
                            },
                            open,
                        )),
                    };
                }
                Some(c) if closer.matches(c) => {
                    self.next_token(WordMode::Value)?;
                    return Ok(entries);
                }
                Some(',') => {
                    return Err(self.error(ParseErrorKind::MissingPair, self.scanner.pos()));
                }
                Some(_) => {}
            }

            let key = self.expression(WordMode::Key, false)?;
            if self.separator(closer, None)? == Separator::Colon {
                if self.skip_trivia()?.is_none() {
                    let key_start = self.arena.get(key).span.start;
                    return Err(self.error(ParseErrorKind::MissingValue, key_start));
                }
                let value = self.expression(WordMode::Value, force_strings)?;
                entries.push(HashEntry {
                    key,
                    value: Some(value),
                });
                self.separator(closer, Some(COLON_AFTER_VALUE))?;
            } else {
                entries.push(HashEntry { key, value: None });
            }
        }
    }

    /// Unclosed containers are reported at the end of the text, with the
    /// opener as secondary location.
    fn unclosed(&self, kind: ParseErrorKind, open: u32) -> ParseError {
        self.error(kind, self.scanner.end())
            .with_opener(self.location(open))
    }

    /// Check what follows an item. `colon_misplaced` is the reason why a
    /// colon is not allowed here, if it is not.
    fn separator(
        &mut self,
        closer: Closer,
        colon_misplaced: Option<&'static str>,
    ) -> Result<Separator, ParseError> {
        let token = self
            .scanner
            .next_separator()
            .map_err(|e| self.lex_error(e))?;
        let at = token.span.start;
        let found = match &token.kind {
            TokenKind::Comma | TokenKind::Eof => return Ok(Separator::Other),
            TokenKind::Colon => {
                return match colon_misplaced {
                    Some(reason) => Err(self.error(ParseErrorKind::MisplacedColon { reason }, at)),
                    None => Ok(Separator::Colon),
                };
            }
            TokenKind::Plus => return Err(self.error(ParseErrorKind::HashUnion, at)),
            TokenKind::Semicolon => return Err(self.error(ParseErrorKind::UnexpectedSemicolon, at)),
            TokenKind::Equals => return Err(self.error(ParseErrorKind::UnexpectedEquals, at)),
            TokenKind::Other(c) => *c,
            kind => match kind.closer_char() {
                Some(c) if closer.matches(c) => return Ok(Separator::Other),
                Some(c) => c,
                None => return Ok(Separator::Other),
            },
        };

        // Another item follows.
        if token.after_line_break() {
            Ok(Separator::Other)
        } else if token.after_space() {
            Err(self.error(ParseErrorKind::MissingSeparator, at))
        } else {
            Err(self.error(
                ParseErrorKind::UnexpectedCharacterHere {
                    name: quote_or_name(found),
                },
                at,
            ))
        }
    }
}

/// Typed scalar for an unquoted word in value position.
fn scalar(word: &str) -> ExprKind {
    match word {
        "true" => return ExprKind::Bool(true),
        "false" => return ExprKind::Bool(false),
        _ => {}
    }
    if word.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
        if let Some(n) = Number::parse(word) {
            return ExprKind::Number(n);
        }
    }
    ExprKind::Str(word.to_owned())
}
