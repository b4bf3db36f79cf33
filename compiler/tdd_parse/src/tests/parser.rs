use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tdd_ir::{Fragment, Number, Span};

use super::{expr, hash, seq, show};
use crate::{ExprKind, ParseOptions, ParsedKind};

#[test]
fn test_scalars() {
    assert_eq!(show(&expr("true").unwrap()), "true");
    assert_eq!(show(&expr("false").unwrap()), "false");
    assert_eq!(show(&expr("123").unwrap()), "123");
    assert_eq!(show(&expr("+5").unwrap()), "5");
    assert_eq!(show(&expr("-1.50").unwrap()), "-1.50");
    assert_eq!(show(&expr("green").unwrap()), "\"green\"");
    assert_eq!(show(&expr("\"123\"").unwrap()), "\"123\"");
    assert_eq!(show(&expr("1st").unwrap()), "\"1st\"");
    assert_eq!(show(&expr("-").unwrap()), "\"-\"");
}

#[test]
fn test_big_integers_stay_exact() {
    let parsed = expr("9007199254740993").unwrap();
    assert_eq!(
        parsed.expr(parsed.root()).kind,
        ExprKind::Number(Number::Int(9_007_199_254_740_993))
    );
}

#[test]
fn test_force_strings() {
    let source = Fragment::whole("[true, 1, {a: 2}, f(3)]", None).unwrap();
    let parsed = crate::parse_expression(&source, ParseOptions::default().force_strings(true)).unwrap();
    assert_eq!(show(&parsed), r#"["true", "1", {"a": "2"}, f("3")]"#);
}

#[test]
fn test_sequence_and_hash_literals() {
    assert_eq!(
        show(&expr("[1, two, 'three', [4]]").unwrap()),
        r#"[1, "two", "three", [4]]"#
    );
    assert_eq!(
        show(&expr("{bgColor: green, doc: xml(data/foo.xml)}").unwrap()),
        r#"{"bgColor": "green", "doc": xml("data/foo.xml")}"#
    );
    assert_eq!(show(&expr("[]").unwrap()), "[]");
    assert_eq!(show(&expr("{ }").unwrap()), "{}");
}

#[test]
fn test_keys_are_never_typed() {
    assert_eq!(
        show(&expr("{1: one, true: yes}").unwrap()),
        r#"{"1": "one", "true": "yes"}"#
    );
}

#[test]
fn test_key_without_value() {
    assert_eq!(
        show(&expr("{a, b: 1, c}").unwrap()),
        r#"{"a", "b": 1, "c"}"#
    );
}

#[test]
fn test_hash_addition_forms() {
    assert_eq!(
        show(&hash("a: 1, {b: 2}, tdd(x.tdd)").unwrap()),
        r#"{"a": 1, {"b": 2}, tdd("x.tdd")}"#
    );
}

#[test]
fn test_sequence_body() {
    let parsed = seq(r#""Big Joe", 1, [11, 22, 33], properties(foo.properties)"#).unwrap();
    assert_eq!(parsed.kind(), ParsedKind::SequenceBody);
    assert_eq!(
        show(&parsed),
        r#"["Big Joe", 1, [11, 22, 33], properties("foo.properties")]"#
    );
}

#[test]
fn test_empty_bodies() {
    assert_eq!(show(&hash("").unwrap()), "{}");
    assert_eq!(show(&hash("  # only a comment\n").unwrap()), "{}");
    assert_eq!(show(&seq("").unwrap()), "[]");
}

#[test]
fn test_line_breaks_are_commas() {
    assert_eq!(
        show(&hash("a: 1\nb: 2\r\nc\n").unwrap()),
        r#"{"a": 1, "b": 2, "c"}"#
    );
    assert_eq!(show(&expr("[\n  1\n  2\n]").unwrap()), "[1, 2]");
}

#[test]
fn test_trailing_comma() {
    assert_eq!(show(&expr("[1, 2,]").unwrap()), "[1, 2]");
    assert_eq!(show(&expr("{a: 1,\n}").unwrap()), r#"{"a": 1}"#);
}

#[test]
fn test_colons_inside_values() {
    assert_eq!(
        show(&expr("{url: http://example.com:8080/x}").unwrap()),
        r#"{"url": "http://example.com:8080/x"}"#
    );
}

#[test]
fn test_calls() {
    assert_eq!(show(&expr("get(\"a\", \"b\")").unwrap()), r#"get("a", "b")"#);
    assert_eq!(show(&expr("now()").unwrap()), "now()");
    assert_eq!(show(&expr("f (1) ").unwrap()), "f(1)");
    assert_eq!(
        show(&expr("f <#-- c --> (g(1), [2])").unwrap()),
        "f(g(1), [2])"
    );
}

#[test]
fn test_call_span_and_name_span() {
    let parsed = expr("  csv(a.csv, {separator: ';'})").unwrap();
    let root = parsed.expr(parsed.root());
    assert_eq!(root.span, Span::new(2, 30));
    let ExprKind::Call(call) = &root.kind else {
        panic!("expected a call");
    };
    assert_eq!(call.name, "csv");
    assert_eq!(call.name_span, Span::new(2, 5));
    assert_eq!(call.args.len(), 2);
}

#[test]
fn test_container_spans_include_delimiters() {
    let parsed = hash("a: {b: 1}, c: [1]").unwrap();
    let ExprKind::Hash(entries) = &parsed.expr(parsed.root()).kind else {
        panic!("expected a hash");
    };
    let a = parsed.expr(entries[0].value.unwrap());
    assert_eq!(parsed.fragment(a.span).unwrap().as_str(), "{b: 1}");
    let c = parsed.expr(entries[1].value.unwrap());
    assert_eq!(parsed.fragment(c.span).unwrap().as_str(), "[1]");
}

#[test]
fn test_comments() {
    let text = "# header\n<#-- block -->a: 1\n  # comment\nb: 2 <#-- trailing -->\n";
    assert_eq!(show(&hash(text).unwrap()), r#"{"a": 1, "b": 2}"#);
}

#[test]
fn test_escapes_in_values() {
    assert_eq!(
        show(&expr(r#"'a\tb\u0041\g'"#).unwrap()),
        r#""a\tbA>""#
    );
    assert_eq!(show(&expr(r#"r"C:\dir""#).unwrap()), r#""C:\\dir""#);
}

#[test]
fn test_fragment_region_is_respected() {
    let text = "ignored [1, 2] ignored";
    let source = Fragment::new(text, 8, 14, None).unwrap();
    let parsed = crate::parse_expression(&source, ParseOptions::default()).unwrap();
    assert_eq!(show(&parsed), "[1, 2]");
    assert_eq!(parsed.expr(parsed.root()).span, Span::new(8, 14));
}

#[test]
fn test_deep_nesting() {
    let depth = crate::MAX_NESTING as usize;
    let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(expr(&text).is_ok());
}

proptest! {
    #[test]
    fn prop_sequence_order_preserved(items in prop::collection::vec(0i64..10_000, 0..40)) {
        let text = items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        let parsed = seq(&text).unwrap();
        let ExprKind::Sequence(ids) = &parsed.expr(parsed.root()).kind else {
            panic!("expected a sequence");
        };
        let parsed_items: Vec<i64> = ids
            .iter()
            .map(|id| match &parsed.expr(*id).kind {
                ExprKind::Number(n) => n.as_i64().unwrap(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        prop_assert_eq!(parsed_items, items);
    }
}
