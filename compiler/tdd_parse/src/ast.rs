//! Span-carrying expression tree.
//!
//! Expressions live in an [`ExprArena`] and refer to each other by
//! [`ExprId`]. Scalars are already typed: the parser applies the
//! boolean/number conversion rules, so the evaluator only deals with
//! containers and calls.

use tdd_ir::{Number, Span};

/// Index of an expression in its [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    /// Source range, including brackets and quotes.
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    Str(String),
    Number(Number),
    Bool(bool),
    Sequence(Vec<ExprId>),
    Hash(Vec<HashEntry>),
    Call(CallExpr),
}

/// One item of a hash listing.
///
/// `value` is `None` for a key without a colon: a flag (`name`) or a hash
/// addition (`{...}`, `tdd(file)`).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct HashEntry {
    pub key: ExprId,
    pub value: Option<ExprId>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CallExpr {
    pub name: String,
    pub name_span: Span,
    pub args: Vec<ExprId>,
}

/// Flat storage for the expressions of one parse.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        // Every expression consumes at least one byte of a text that fits
        // in u32, so the index fits too.
        let id = ExprId(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    /// Look up an expression.
    ///
    /// # Panics
    /// If `id` was allocated by another arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
