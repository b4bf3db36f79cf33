use pretty_assertions::assert_eq;

use super::Slicer;

fn slice(text: &str) -> Vec<String> {
    Slicer::default().slice(text)
}

#[test]
fn test_lines() {
    assert_eq!(slice("a\nb\r\nc\rd"), ["a", "b", "c", "d"]);
    assert_eq!(slice("a\nb\n"), ["a", "b"]);
    assert_eq!(slice(""), Vec::<String>::new());
}

#[test]
fn test_keep_empty_last_item() {
    let slicer = Slicer {
        drop_empty_last_item: false,
        ..Slicer::default()
    };
    assert_eq!(slicer.slice("a\nb\n"), ["a", "b", ""]);
    assert_eq!(slicer.slice("a\n\nb"), ["a", "", "b"]);
}

#[test]
fn test_custom_separator_and_trim() {
    let slicer = Slicer {
        separator: ";;".to_owned(),
        trim: true,
        ..Slicer::default()
    };
    assert_eq!(slicer.slice(" a ;; b;;c ;;"), ["a", "b", "c"]);
}

#[test]
fn test_line_break_inside_separator() {
    let slicer = Slicer {
        separator: "--\n".to_owned(),
        ..Slicer::default()
    };
    // Trailing spaces before the line break belong to the separator.
    assert_eq!(slicer.slice("one--  \r\ntwo--\nthree"), ["one", "two", "three"]);
}
