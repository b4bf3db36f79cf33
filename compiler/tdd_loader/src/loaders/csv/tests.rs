use pretty_assertions::assert_eq;
use tdd_ir::{Mapping, Value};

use super::{normalize_header, CsvError, CsvTable};

fn rows(table: &CsvTable, text: &str) -> Vec<Value> {
    match table.parse(text) {
        Ok(rows) => rows,
        Err(CsvError::Csv(err)) => panic!("csv error: {err}"),
        Err(CsvError::Loader(err)) => panic!("loader error: {err}"),
    }
}

fn error(table: &CsvTable, text: &str) -> String {
    match table.parse(text) {
        Ok(rows) => panic!("expected an error, got {rows:?}"),
        Err(CsvError::Csv(err)) => err.to_string(),
        Err(CsvError::Loader(err)) => err.to_string(),
    }
}

fn row<const N: usize>(cells: [(&str, Value); N]) -> Value {
    Value::Mapping(Mapping::from_iter(cells))
}

#[test]
fn test_header_row_and_cells() {
    let table = CsvTable::default();
    assert_eq!(
        rows(&table, "name;age\nJoe;21\n\"Doe; Jane\";33\n"),
        [
            row([("name", "Joe".into()), ("age", "21".into())]),
            row([("name", "Doe; Jane".into()), ("age", "33".into())]),
        ]
    );
    assert_eq!(rows(&table, ""), Vec::<Value>::new());
}

#[test]
fn test_typed_columns() {
    let table = CsvTable {
        separator: b',',
        ..CsvTable::default()
    };
    assert_eq!(
        rows(&table, "item, price:n, sold:b\nlamp,12.50,true\nrug,,FALSE\n"),
        [
            row([
                ("item", "lamp".into()),
                ("price", Value::Number(tdd_ir::Number::parse("12.50").unwrap())),
                ("sold", true.into()),
            ]),
            row([("item", "rug".into()), ("sold", false.into())]),
        ]
    );
}

#[test]
fn test_number_and_boolean_fixes() {
    let table = CsvTable {
        grouping_separator: Some('.'),
        decimal_separator: Some(','),
        alt_true: Some("yes".to_owned()),
        alt_false: Some("no".to_owned()),
        ..CsvTable::default()
    };
    assert_eq!(
        rows(&table, "n:n;b:b\n1.234,5;Yes\n"),
        [row([
            ("n", Value::Number(tdd_ir::Number::parse("1234.5").unwrap())),
            ("b", true.into()),
        ])]
    );
    assert_eq!(
        error(&table, "n:n\nabc\n"),
        "Row 2, column \"n\": \"abc\" is not a valid number."
    );
}

#[test]
fn test_external_headers() {
    let table = CsvTable {
        headers: Some(vec!["a".to_owned(), "b".to_owned()]),
        file_has_header_row: false,
        ..CsvTable::default()
    };
    assert_eq!(
        rows(&table, "1;2\n"),
        [row([("a", "1".into()), ("b", "2".into())])]
    );
    let table = CsvTable {
        file_has_header_row: true,
        ..table
    };
    assert_eq!(
        rows(&table, "x;y\n1;2\n"),
        [row([("a", "1".into()), ("b", "2".into())])]
    );
}

#[test]
fn test_trim_and_empty_values() {
    let table = CsvTable {
        trim_cells: true,
        empty_values: vec!["-".to_owned(), "n/a".to_owned()],
        ..CsvTable::default()
    };
    assert_eq!(
        rows(&table, "a;b;c\n x ; - ;n/a\n"),
        [row([("a", "x".into()), ("b", "".into()), ("c", "".into())])]
    );
}

#[test]
fn test_too_many_cells() {
    assert_eq!(
        error(&CsvTable::default(), "a;b\n1;2\n1;2;3\n"),
        "Row 3 contains more columns than the number of header cells."
    );
}

#[test]
fn test_header_types_and_normalization() {
    assert_eq!(
        error(&CsvTable::default(), "when:d\n"),
        "Date and time column types are not supported: \"d\""
    );
    assert_eq!(
        error(&CsvTable::default(), "x:q\n"),
        "Unknown data type in a header: \"q\""
    );
    let table = CsvTable {
        normalize_headers: true,
        ..CsvTable::default()
    };
    assert_eq!(
        rows(&table, "Unit Price (EUR):n\n3\n"),
        [row([("unit_price", 3.into())])]
    );
    assert_eq!(normalize_header("First - Name"), "first_name");
}
