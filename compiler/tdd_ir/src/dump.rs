//! TDD-like rendering of values.
//!
//! [`Value::dump`] produces an indented multi-line listing meant for humans
//! (it is not guaranteed to be valid TDD). `Display` produces the same
//! content on a single line.

use std::fmt::{self, Write};

use crate::{FunctionCall, Mapping, Value};

const INDENT: &str = "    ";

impl Value {
    /// Render as an indented, multi-line TDD-like listing.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = dump_value(&mut out, self, "");
        out
    }
}

fn dump_value(out: &mut String, value: &Value, indent: &str) -> fmt::Result {
    match value {
        Value::Mapping(m) => {
            out.push_str("{\n");
            let inner = format!("{indent}{INDENT}");
            for (key, v) in m {
                out.push_str(&inner);
                write_quoted(out, key)?;
                out.push_str(": ");
                dump_value(out, v, &inner)?;
                out.push('\n');
            }
            out.push_str(indent);
            out.push('}');
        }
        Value::Sequence(items) => {
            out.push_str("[\n");
            let inner = format!("{indent}{INDENT}");
            for item in items {
                out.push_str(&inner);
                dump_value(out, item, &inner)?;
                out.push('\n');
            }
            out.push_str(indent);
            out.push(']');
        }
        other => write_single_line(out, other)?,
    }
    Ok(())
}

fn write_single_line<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Str(s) => write_quoted(out, s),
        Value::Number(n) => write!(out, "{n}"),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Sequence(items) => {
            out.write_char('[')?;
            write_list(out, items)?;
            out.write_char(']')
        }
        Value::Mapping(m) => {
            out.write_char('{')?;
            write_mapping(out, m)?;
            out.write_char('}')
        }
        Value::Call(call) => write_call(out, call),
        Value::Fragment(f) => {
            out.write_str("<fragment ")?;
            write_quoted(out, f.as_str())?;
            out.write_char('>')
        }
    }
}

fn write_list<W: Write>(out: &mut W, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_single_line(out, item)?;
    }
    Ok(())
}

fn write_mapping<W: Write>(out: &mut W, m: &Mapping) -> fmt::Result {
    for (i, (key, v)) in m.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_quoted(out, key)?;
        out.write_char(':')?;
        write_single_line(out, v)?;
    }
    Ok(())
}

fn write_call<W: Write>(out: &mut W, call: &FunctionCall) -> fmt::Result {
    out.write_str(&call.name)?;
    out.write_char('(')?;
    write_list(out, &call.params)?;
    out.write_char(')')
}

/// Write `s` as a double-quoted string literal with TDD escapes.
fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{0C}' => out.write_str("\\f")?,
            '\u{08}' => out.write_str("\\b")?,
            c if u32::from(c) < 0x20 => write!(out, "\\u{:04X}", u32::from(c))?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_single_line(f, self)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_call(f, self)
    }
}

#[cfg(test)]
mod tests;
