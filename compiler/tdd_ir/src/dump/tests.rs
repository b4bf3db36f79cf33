use super::*;
use pretty_assertions::assert_eq;

fn sample() -> Value {
    let mut inner = Mapping::new();
    inner.insert("ending", ".bsh");
    inner.insert("removeExtension", true);
    let mut root = Mapping::new();
    root.insert("name", "Big \"Joe\"");
    root.insert("items", Value::Sequence(vec![Value::from(11), Value::from(22)]));
    root.insert("like", inner);
    root.insert(
        "doc",
        FunctionCall::new("xml", vec![Value::from("data/foo.xml")]),
    );
    Value::Mapping(root)
}

#[test]
fn test_dump_multi_line() {
    let expected = "{\n    \"name\": \"Big \\\"Joe\\\"\"\n    \"items\": [\n        11\n        22\n    ]\n    \"like\": {\n        \"ending\": \".bsh\"\n        \"removeExtension\": true\n    }\n    \"doc\": xml(\"data/foo.xml\")\n}";
    assert_eq!(sample().dump(), expected);
}

#[test]
fn test_display_single_line() {
    assert_eq!(
        sample().to_string(),
        "{\"name\":\"Big \\\"Joe\\\"\", \"items\":[11, 22], \
         \"like\":{\"ending\":\".bsh\", \"removeExtension\":true}, \
         \"doc\":xml(\"data/foo.xml\")}"
    );
}

#[test]
fn test_dump_scalar() {
    assert_eq!(Value::from(false).dump(), "false");
    assert_eq!(Value::from("tab\there").dump(), "\"tab\\there\"");
}

#[test]
fn test_dump_control_character() {
    assert_eq!(Value::from("\u{1}").to_string(), "\"\\u0001\"");
}

#[test]
fn test_dump_empty_containers() {
    assert_eq!(Value::Sequence(vec![]).dump(), "[\n]");
    assert_eq!(Value::Mapping(Mapping::new()).dump(), "{\n}");
}
