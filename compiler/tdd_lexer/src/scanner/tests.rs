use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

/// Scan `text` as a run of value tokens, returning kinds and slices.
fn tokens(text: &str, mode: WordMode) -> Vec<(TokenKind, String)> {
    let mut scanner = Scanner::whole(text);
    let mut out = Vec::new();
    loop {
        let token = scanner.next_token(mode).unwrap();
        if token.is_eof() {
            return out;
        }
        out.push((token.kind.clone(), scanner.slice(token.span).to_owned()));
    }
}

#[test]
fn test_punctuation_and_words() {
    assert_eq!(
        tokens("{a, [b]} (c)", WordMode::Key),
        vec![
            (TokenKind::LBrace, "{".to_owned()),
            (TokenKind::Word, "a".to_owned()),
            (TokenKind::Comma, ",".to_owned()),
            (TokenKind::LBracket, "[".to_owned()),
            (TokenKind::Word, "b".to_owned()),
            (TokenKind::RBracket, "]".to_owned()),
            (TokenKind::RBrace, "}".to_owned()),
            (TokenKind::LParen, "(".to_owned()),
            (TokenKind::Word, "c".to_owned()),
            (TokenKind::RParen, ")".to_owned()),
        ]
    );
}

#[test]
fn test_colon_in_value_words() {
    assert_eq!(
        tokens("http://example.com/x", WordMode::Value),
        vec![(TokenKind::Word, "http://example.com/x".to_owned())]
    );
    let mut scanner = Scanner::whole("key:value");
    let key = scanner.next_token(WordMode::Key).unwrap();
    assert_eq!(scanner.slice(key.span), "key");
    assert_eq!(scanner.next_separator().unwrap().kind, TokenKind::Colon);
    let value = scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(scanner.slice(value.span), "value");
}

#[test]
fn test_plus_starts_a_word_only() {
    assert_eq!(
        tokens("+12", WordMode::Value),
        vec![(TokenKind::Word, "+12".to_owned())]
    );
    let mut scanner = Scanner::whole("a+b");
    scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(scanner.next_separator().unwrap().kind, TokenKind::Plus);
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens(r#""a b" 'c' r"\d""#, WordMode::Value)
            .into_iter()
            .map(|(kind, _)| kind)
            .collect::<Vec<_>>(),
        vec![
            TokenKind::Str("a b".to_owned()),
            TokenKind::Str("c".to_owned()),
            TokenKind::Str("\\d".to_owned()),
        ]
    );
}

#[test]
fn test_r_without_quote_is_a_word() {
    assert_eq!(
        tokens("red r", WordMode::Value),
        vec![
            (TokenKind::Word, "red".to_owned()),
            (TokenKind::Word, "r".to_owned()),
        ]
    );
}

#[test]
fn test_other_characters() {
    assert_eq!(
        tokens("< ; =", WordMode::Value)
            .into_iter()
            .map(|(kind, _)| kind)
            .collect::<Vec<_>>(),
        vec![
            TokenKind::Other('<'),
            TokenKind::Other(';'),
            TokenKind::Other('='),
        ]
    );
    assert_eq!(
        tokens(":", WordMode::Key),
        vec![(TokenKind::Other(':'), ":".to_owned())]
    );
}

#[test]
fn test_line_comment_only_at_line_start() {
    assert_eq!(
        tokens("# comment\n  a # not a comment\n  # comment\nb", WordMode::Value)
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>(),
        vec!["a", "#", "not", "a", "comment", "b"]
    );
}

#[test]
fn test_hash_inside_word() {
    assert_eq!(
        tokens("#ff0000", WordMode::Value),
        Vec::<(TokenKind, String)>::new()
    );
    assert_eq!(
        tokens("x #ff0000", WordMode::Value),
        vec![
            (TokenKind::Word, "x".to_owned()),
            (TokenKind::Word, "#ff0000".to_owned()),
        ]
    );
}

#[test]
fn test_block_comments() {
    assert_eq!(
        tokens("a <#-- skipped, [ --> b <#----> c <#--> d", WordMode::Value)
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>(),
        vec!["a", "b", "c", "d"]
    );
}

#[test]
fn test_unclosed_block_comment() {
    let mut scanner = Scanner::whole("a <#-- never closed");
    scanner.next_token(WordMode::Value).unwrap();
    let err = scanner.next_token(WordMode::Value).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnclosedComment);
    assert_eq!(err.offset(), 2);
    assert_eq!(err.to_string(), "Comment was not closed with \"-->\".");
}

#[test]
fn test_flags() {
    let mut scanner = Scanner::whole("a b\n  c<#-- x -->d");
    let a = scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(a.flags, TokenFlags::empty());
    let b = scanner.next_token(WordMode::Value).unwrap();
    assert!(b.after_space());
    assert!(!b.after_line_break());
    let c = scanner.next_token(WordMode::Value).unwrap();
    assert!(c.after_line_break());
    let d = scanner.next_token(WordMode::Value).unwrap();
    assert!(d.after_space());
    assert!(!d.after_line_break());
}

#[test]
fn test_separator_leaves_item_in_place() {
    let mut scanner = Scanner::whole("a\n  b");
    scanner.next_token(WordMode::Value).unwrap();
    let sep = scanner.next_separator().unwrap();
    assert_eq!(sep.kind, TokenKind::Other('b'));
    assert!(sep.after_line_break());
    let b = scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(scanner.slice(b.span), "b");
}

#[test]
fn test_separator_does_not_consume_closer() {
    let mut scanner = Scanner::whole("1 ]");
    scanner.next_token(WordMode::Value).unwrap();
    let sep = scanner.next_separator().unwrap();
    assert_eq!(sep.kind, TokenKind::RBracket);
    assert_eq!(sep.span, Span::new(2, 3));
    assert_eq!(scanner.pos(), 2);
    assert_eq!(
        scanner.next_token(WordMode::Value).unwrap().kind,
        TokenKind::RBracket
    );
}

#[test]
fn test_peek_char_does_not_move() {
    let mut scanner = Scanner::whole("f  <#-- c --> (x)");
    scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(scanner.peek_char().unwrap(), Some('('));
    assert_eq!(scanner.pos(), 1);
}

#[test]
fn test_region_offsets_are_absolute() {
    let text = "key: [1, 2]";
    let mut scanner = Scanner::new(text, 5, 11);
    let open = scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(open.span, Span::new(5, 6));
    let mut scanner = Scanner::new(text, 5, 7);
    scanner.next_token(WordMode::Value).unwrap();
    scanner.next_token(WordMode::Value).unwrap();
    assert!(scanner.next_token(WordMode::Value).unwrap().is_eof());
}

#[test]
fn test_comment_in_fragment_sees_preceding_text() {
    // The `#` is not at the start of its line in the full text.
    let text = "a: #x";
    let mut scanner = Scanner::new(text, 3, 5);
    let token = scanner.next_token(WordMode::Value).unwrap();
    assert_eq!(scanner.slice(token.span), "#x");
}

proptest! {
    #[test]
    fn prop_words_round_trip(words in prop::collection::vec("[a-z][a-z0-9_.]{0,8}", 1..10)) {
        let text = words.join(" \n ");
        let scanned: Vec<String> = tokens(&text, WordMode::Value)
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        prop_assert_eq!(scanned, words);
    }
}
