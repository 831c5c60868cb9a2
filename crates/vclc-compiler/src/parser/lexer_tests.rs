use super::{TokenKind, lex, string_value, token_text};

fn snapshot(source: &str) -> String {
    lex(source)
        .iter()
        .map(|t| format!("{:?} {:?}", t.kind, token_text(source, t)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn statement_tokens() {
    insta::assert_snapshot!(snapshot(r#"regex "^/api/";"#), @r#"
    Id "regex"
    CStr "\"^/api/\""
    Semicolon ";"
    "#);
}

#[test]
fn number_and_unit_split() {
    insta::assert_snapshot!(snapshot("duration 10s; bytes 1.5MB;"), @r#"
    Id "duration"
    CNum "10"
    Id "s"
    Semicolon ";"
    Id "bytes"
    FNum "1.5"
    Id "MB"
    Semicolon ";"
    "#);
}

#[test]
fn trivia_is_dropped() {
    let source = "# hash\n// slash\n/* block\n */ count 3 ;";
    let kinds: Vec<_> = lex(source).iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Id, TokenKind::CNum, TokenKind::Semicolon]
    );
}

#[test]
fn long_string_spans_lines() {
    let source = "regex {\"a\nb\"};";
    let tokens = lex(source);
    assert_eq!(tokens[1].kind, TokenKind::CStr);
    assert_eq!(string_value(source, &tokens[1]), "a\nb");
}

#[test]
fn long_string_may_contain_quotes() {
    let source = r#"{"say "hi" now"}"#;
    let tokens = lex(source);
    assert_eq!(tokens.len(), 1);
    assert_eq!(string_value(source, &tokens[0]), r#"say "hi" now"#);
}

#[test]
fn long_string_value_may_end_in_quote() {
    let source = r#"regex {"a""};"#;
    insta::assert_snapshot!(snapshot(source), @r#"
    Id "regex"
    CStr "{\"a\"\"}"
    Semicolon ";"
    "#);
    let tokens = lex(source);
    assert_eq!(string_value(source, &tokens[1]), r#"a""#);
}

#[test]
fn long_string_ends_at_first_close() {
    let source = r#"{"a"} {"b"}"#;
    let tokens = lex(source);
    assert_eq!(tokens.len(), 2);
    assert_eq!(string_value(source, &tokens[0]), "a");
    assert_eq!(string_value(source, &tokens[1]), "b");
}

#[test]
fn unterminated_long_string_is_garbage() {
    let tokens = lex(r#"{"never closed"#);
    assert_eq!(tokens[0].kind, TokenKind::Garbage);
}

#[test]
fn short_string_value() {
    let source = r#""/var/run/app.sock""#;
    let tokens = lex(source);
    assert_eq!(string_value(source, &tokens[0]), "/var/run/app.sock");
}

#[test]
fn empty_string() {
    let source = r#""""#;
    let tokens = lex(source);
    assert_eq!(tokens[0].kind, TokenKind::CStr);
    assert_eq!(string_value(source, &tokens[0]), "");
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("count @@@ 3;"), @r#"
    Id "count"
    Garbage "@@@"
    CNum "3"
    Semicolon ";"
    "#);
}

#[test]
fn garbage_at_end_of_input() {
    let tokens = lex("count $$");
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Garbage);
}

#[test]
fn describe_names() {
    assert_eq!(TokenKind::CStr.describe(), "string literal");
    assert_eq!(TokenKind::Eof.describe(), "end of input");
}
