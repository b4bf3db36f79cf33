//! Parser tests.

mod parser;

use tdd_ir::Fragment;

use crate::{ExprId, ExprKind, ParseError, ParseOptions, Parsed};

fn fragment(text: &str) -> Fragment {
    Fragment::whole(text, Some("test.tdd".into())).unwrap()
}

pub(crate) fn expr(text: &str) -> Result<Parsed, ParseError> {
    crate::parse_expression(&fragment(text), ParseOptions::default())
}

pub(crate) fn hash(text: &str) -> Result<Parsed, ParseError> {
    crate::parse_hash_body(&fragment(text), ParseOptions::default())
}

pub(crate) fn seq(text: &str) -> Result<Parsed, ParseError> {
    crate::parse_sequence_body(&fragment(text), ParseOptions::default())
}

/// Compact rendering of a parsed tree: strings are quoted, keys without
/// value are bare.
pub(crate) fn show(parsed: &Parsed) -> String {
    let mut out = String::new();
    show_expr(parsed, parsed.root(), &mut out);
    out
}

fn show_expr(parsed: &Parsed, id: ExprId, out: &mut String) {
    match &parsed.expr(id).kind {
        ExprKind::Str(s) => out.push_str(&format!("{s:?}")),
        ExprKind::Number(n) => out.push_str(&n.to_string()),
        ExprKind::Bool(b) => out.push_str(&b.to_string()),
        ExprKind::Sequence(items) => {
            out.push('[');
            show_list(parsed, items, out);
            out.push(']');
        }
        ExprKind::Hash(entries) => {
            out.push('{');
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                show_expr(parsed, entry.key, out);
                if let Some(value) = entry.value {
                    out.push_str(": ");
                    show_expr(parsed, value, out);
                }
            }
            out.push('}');
        }
        ExprKind::Call(call) => {
            out.push_str(&call.name);
            out.push('(');
            show_list(parsed, &call.args, out);
            out.push(')');
        }
    }
}

fn show_list(parsed: &Parsed, items: &[ExprId], out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        show_expr(parsed, *item, out);
    }
}
