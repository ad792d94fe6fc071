//! Integration tests for the front end.
//!
//! These tests drive the public API the way a caller would: source text in,
//! tokens or a program plus diagnostics out.

use monkeylang::{
    ast::ast::{Node, Stmt},
    display_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parse,
    parser::parser::Parser,
};

#[test]
fn test_parse_multi_line_program() {
    let source = r#"
        let five = 5;
        let ten = 010;
        let answer = -five * ten + 2 / 1;
        answer == 38 != false;
        return answer;
    "#;
    let (program, errors) = parse(source);

    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(program.len(), 5);
    assert_eq!(
        program.to_string(),
        "let five = 5;let ten = 010;let answer = (((-five) * ten) + (2 / 1));((answer == 38) != false)return answer;"
    );
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_parse_keeps_going_after_errors() {
    let source = "let x 5;\nlet y = 2 +;\nlet z = 3;";
    let (program, errors) = parse(source);

    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "expected next token to be =, got INT instead",
            "no prefix parse function for ; found",
        ]
    );

    let lets: Vec<String> = program
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Let(stmt) => Some(stmt.name.value.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(lets, vec!["z"]);
}

#[test]
fn test_display_error_on_second_line() {
    let source = "let a = 1;\n  let = 2;";
    let (_, errors) = parse(source);

    let rendered = display_error(&errors[0], source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Error: UnexpectedToken (expected `IDENT`, got `=`)");
    assert_eq!(lines[3], "2 | let = 2;");
    assert_eq!(lines[4], "  | ----^");
}

#[test]
fn test_tokenize_then_parse_agree() {
    let source = "let add = a + b * c;";
    let tokens = tokenize(source);
    let lexer_tokens: Vec<_> = Lexer::new(source).collect();

    assert_eq!(tokens.len(), lexer_tokens.len() + 1);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));

    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "let add = (a + (b * c));");
}

#[test]
fn test_independent_parsers_do_not_share_diagnostics() {
    let mut broken = Parser::new(Lexer::new("let 1;"));
    let mut clean = Parser::new(Lexer::new("let x = 1;"));

    broken.parse_program();
    clean.parse_program();

    assert_eq!(broken.errors().len(), 1);
    assert!(clean.errors().is_empty());
}

#[test]
fn test_parse_program_is_stable_at_end_of_input() {
    let mut parser = Parser::new(Lexer::new("x"));
    let first = parser.parse_program();
    let second = parser.parse_program();

    assert_eq!(first.to_string(), "x");
    assert!(second.is_empty());
}
