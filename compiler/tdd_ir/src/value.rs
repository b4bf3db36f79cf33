//! The TDD value model.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{Fragment, Mapping};

/// A TDD number: an exact integer when it fits, otherwise an exact decimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Number {
    Int(i64),
    Decimal(Decimal),
}

impl Number {
    /// Parse an unquoted word as a number.
    ///
    /// A single leading `+` is accepted. Integers are preferred, then
    /// decimals (with optional exponent). Returns `None` when the word is
    /// not a number, in which case it stays a string.
    pub fn parse(word: &str) -> Option<Number> {
        let digits = word.strip_prefix('+').unwrap_or(word);
        if !looks_numeric(digits) {
            return None;
        }
        if let Ok(n) = digits.parse::<i64>() {
            return Some(Number::Int(n));
        }
        if digits.contains(['e', 'E']) {
            return Decimal::from_scientific(digits).ok().map(Number::Decimal);
        }
        Decimal::from_str(digits).ok().map(Number::Decimal)
    }

    /// Value as `i64`, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(*n),
            Number::Decimal(_) => None,
        }
    }
}

/// Cheap pre-check so that words like `1_000` or `0x1F` are not accepted by
/// the more lenient numeric parsers.
fn looks_numeric(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Number::Decimal(d)
    }
}

/// A function call the evaluation environment chose not to resolve.
///
/// Parameters are already evaluated values; nested unresolved calls appear
/// as [`Value::Call`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub params: Vec<Value>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, params: Vec<Value>) -> Self {
        FunctionCall {
            name: name.into(),
            params,
        }
    }
}

/// The result of parsing or evaluating TDD text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Number(Number),
    Bool(bool),
    /// Ordered list; order is significant.
    Sequence(Vec<Value>),
    /// Ordered map with unique keys.
    Mapping(Mapping),
    /// Unresolved function call.
    Call(FunctionCall),
    /// Raw, unevaluated source of a hash value or hash literal.
    Fragment(Fragment),
}

impl Value {
    /// User-facing type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "hash",
            Value::Call(_) => "function call",
            Value::Fragment(_) => "fragment",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&FunctionCall> {
        match self {
            Value::Call(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            Value::Fragment(f) => Some(f),
            _ => None,
        }
    }

    /// `true` if no [`Value::Call`] is reachable from this value.
    pub fn is_fully_resolved(&self) -> bool {
        match self {
            Value::Call(_) => false,
            Value::Sequence(items) => items.iter().all(Value::is_fully_resolved),
            Value::Mapping(m) => m.values().all(Value::is_fully_resolved),
            Value::Str(_) | Value::Number(_) | Value::Bool(_) | Value::Fragment(_) => true,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::Int(i64::from(n)))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<FunctionCall> for Value {
    fn from(c: FunctionCall) -> Self {
        Value::Call(c)
    }
}

impl From<Fragment> for Value {
    fn from(f: Fragment) -> Self {
        Value::Fragment(f)
    }
}
