//! End-to-end behavior through the facade.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use pretty_assertions::assert_eq;
use tdd::{
    Capability, DataLoaderEnvironment, EvalErrorKind, Fragment, Mapping, ParseOptions,
    ResolveError, SimpleEnvironment, StandaloneEngine, ToDiagnostic, Value, Verbosity,
};

fn source(text: &str) -> Fragment {
    Fragment::whole(text, Some("config.fmpp".into())).unwrap()
}

fn load(text: &str) -> Mapping {
    tdd::load_hash(&source(text), &StandaloneEngine::new()).unwrap()
}

#[test]
fn properties_like_setting() {
    let map = load(r#"propertiesLike: {ending: ".bsh", removeExtension: true}"#);
    let expected = Mapping::from_iter([(
        "propertiesLike",
        Mapping::from_iter([
            ("ending", Value::from(".bsh")),
            ("removeExtension", Value::from(true)),
        ]),
    )]);
    assert_eq!(map, expected);
    assert!(Value::Mapping(map).is_fully_resolved());
}

#[test]
fn documented_examples_parse() {
    let items = tdd::eval_as_sequence(
        &source(r#""Big Joe", 1, [11, 22, 33], properties(foo.properties)"#),
        ParseOptions::default(),
        &mut SimpleEnvironment,
    )
    .unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], Value::from("Big Joe"));
    assert_eq!(items[1], Value::from(1));
    let Value::Call(call) = &items[3] else {
        panic!("not a call: {:?}", items[3]);
    };
    assert_eq!(call.to_string(), "properties(\"foo.properties\")");

    let doc = tdd::eval(
        &source("{bgColor: green, doc: xml(data/foo.xml)}"),
        ParseOptions::default(),
        &mut SimpleEnvironment,
    )
    .unwrap();
    assert!(!doc.is_fully_resolved());

    let get = tdd::eval(
        &source(r#"get("a","b")"#),
        ParseOptions::default(),
        &mut SimpleEnvironment,
    )
    .unwrap();
    assert_eq!(get.to_string(), "get(\"a\", \"b\")");
}

#[test]
fn get_sees_the_enclosing_hash() {
    let map = load(r#"a: {b: 1}, c: get("a", "b")"#);
    assert_eq!(map.get("c"), Some(&Value::from(1)));

    let engine = StandaloneEngine::new();
    let value = tdd::eval(
        &source(r#"{a: {b: 1}, c: get("a","b")}"#),
        ParseOptions::default(),
        &mut DataLoaderEnvironment::new(&engine),
    )
    .unwrap();
    assert_eq!(value.to_string(), "{\"a\":{\"b\":1}, \"c\":1}");
}

#[test]
fn duplicate_keys_keep_the_last_value_at_the_first_position() {
    let map = load("a: 1, b: 2, a: 3");
    assert_eq!(
        map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect::<Vec<_>>(),
        [("a", Value::from(3)), ("b", Value::from(2))]
    );
}

#[test]
fn force_strings() {
    let value = tdd::eval(
        &source("[1, true, x]"),
        ParseOptions::default().force_strings(true),
        &mut SimpleEnvironment,
    )
    .unwrap();
    assert_eq!(value.to_string(), "[\"1\", \"true\", \"x\"]");
}

#[test]
fn nesting_beyond_the_limit_is_a_syntax_error() {
    let depth = tdd::MAX_NESTING as usize;
    let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let value = tdd::eval(&source(&text), ParseOptions::default(), &mut SimpleEnvironment);
    assert!(value.is_ok());
    drop(value);

    let text = format!("{}{}", "[".repeat(depth * 100), "]".repeat(depth * 100));
    let err = tdd::eval(&source(&text), ParseOptions::default(), &mut SimpleEnvironment)
        .unwrap_err();
    let EvalErrorKind::Syntax(parse) = &err.kind else {
        panic!("unexpected error: {err:?}");
    };
    assert!(matches!(parse.kind, tdd::ParseErrorKind::TooDeep { .. }));
}

#[test]
fn unclosed_list_is_reported_at_the_end() {
    let err = tdd::eval(&source("[1,2,"), ParseOptions::default(), &mut SimpleEnvironment)
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Syntax(_)));
    assert_eq!(err.offset(), Some(5));

    let terse = err.to_diagnostic().render(Verbosity::Terse);
    assert_eq!(
        terse,
        "TDD syntax error: Reached the end of the text, but the list was not closed with ']'. \
         (end of config.fmpp)"
    );
    let verbose = err.to_diagnostic().render(Verbosity::Verbose);
    assert!(verbose.contains("The very end of config.fmpp."), "{verbose}");
}

#[test]
fn xml_needs_the_capability() {
    let err = tdd::load_hash(&source("doc: xml(foo.xml)"), &StandaloneEngine::new()).unwrap_err();
    let EvalErrorKind::CallFailed { name, source: cause } = &err.kind else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(name, "xml");
    assert!(matches!(
        cause.downcast_ref::<ResolveError>(),
        Some(ResolveError::CapabilityUnavailable { .. })
    ));

    let engine = StandaloneEngine::builder().capability(Capability::Xml).build();
    let err = tdd::load_hash(&source("doc: xml(foo.xml)"), &engine).unwrap_err();
    let EvalErrorKind::CallFailed { source: cause, .. } = &err.kind else {
        panic!("unexpected error: {err:?}");
    };
    assert!(matches!(
        cause.downcast_ref::<ResolveError>(),
        Some(ResolveError::TypeNotFound { .. })
    ));
}

#[test]
fn call_failure_diagnostic_lists_causes() {
    let err = tdd::load_hash(&source("x: 1\ny: nosuch()"), &StandaloneEngine::new()).unwrap_err();
    let rendered = err.to_diagnostic().render(Verbosity::Verbose);
    assert!(
        rendered.starts_with("TDD error: Failed to evaluate function \"nosuch\".\n"),
        "{rendered}"
    );
    assert!(rendered.contains("line 2, column 4"), "{rendered}");
    assert!(rendered.ends_with("Caused by: Unknown data loader: nosuch"), "{rendered}");
}

#[test]
fn data_files_relative_to_the_data_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("site.tdd"), "name: Example\nowner: get(owner)").unwrap();
    fs::write(dir.path().join("menu.txt"), "Home\nAbout\n").unwrap();
    let engine = StandaloneEngine::builder()
        .data_root(dir.path())
        .data("owner", "Joe")
        .build();

    let map = tdd::load_hash(&source("site: tdd(site.tdd), menu: slicedText(menu.txt)"), &engine)
        .unwrap();
    assert_eq!(
        Value::Mapping(map).dump(),
        "{\n    \"site\": {\n        \"name\": \"Example\"\n        \"owner\": \"Joe\"\n    }\n    \
         \"menu\": [\n        \"Home\"\n        \"About\"\n    ]\n}"
    );
}
