//! Unit tests for the AST module.
//!
//! These build trees by hand and check the text reconstruction and the
//! token-literal accessors, independent of the parser.

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    ast::{Expr, Node, Stmt},
    expressions::{IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    statements::{ExpressionStmt, LetStmt, Program, ReturnStmt},
};

fn span() -> Span {
    Span {
        start: Position::null(),
        end: Position::null(),
    }
}

fn token(kind: TokenKind, value: &str) -> Token {
    Token {
        kind,
        value: value.to_string(),
        span: span(),
    }
}

fn ident(name: &str) -> IdentifierExpr {
    IdentifierExpr {
        token: token(TokenKind::Identifier, name),
        value: name.to_string(),
        span: span(),
    }
}

fn int(text: &str, value: i64) -> Expr {
    Expr::Integer(IntegerExpr {
        token: token(TokenKind::Int, text),
        value,
        span: span(),
    })
}

#[test]
fn test_let_statement_string() {
    let program = Program {
        statements: vec![Stmt::Let(LetStmt {
            token: token(TokenKind::Let, "let"),
            name: ident("myVar"),
            value: Expr::Identifier(ident("anotherVar")),
            span: span(),
        })],
        span: span(),
    };

    assert_eq!(program.to_string(), "let myVar = anotherVar;");
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_return_statement_string() {
    let with_value = ReturnStmt {
        token: token(TokenKind::Return, "return"),
        value: Some(int("5", 5)),
        span: span(),
    };
    let without_value = ReturnStmt {
        token: token(TokenKind::Return, "return"),
        value: None,
        span: span(),
    };

    assert_eq!(with_value.to_string(), "return 5;");
    assert_eq!(without_value.to_string(), "return;");
    assert_eq!(without_value.token_literal(), "return");
}

#[test]
fn test_prefix_and_infix_are_parenthesized() {
    let negated = Expr::Prefix(PrefixExpr {
        token: token(TokenKind::Dash, "-"),
        operator: "-".to_string(),
        right: Box::new(Expr::Identifier(ident("a"))),
        span: span(),
    });
    let product = Expr::Infix(InfixExpr {
        token: token(TokenKind::Star, "*"),
        left: Box::new(negated),
        operator: "*".to_string(),
        right: Box::new(Expr::Identifier(ident("b"))),
        span: span(),
    });

    assert_eq!(product.to_string(), "((-a) * b)");
    assert_eq!(product.token_literal(), "*");
}

#[test]
fn test_integer_renders_source_text() {
    assert_eq!(int("010", 8).to_string(), "010");
}

#[test]
fn test_program_concatenates_statements() {
    let program = Program {
        statements: vec![
            Stmt::Expression(ExpressionStmt {
                token: token(TokenKind::Identifier, "x"),
                expression: Expr::Identifier(ident("x")),
                span: span(),
            }),
            Stmt::Return(ReturnStmt {
                token: token(TokenKind::Return, "return"),
                value: Some(int("1", 1)),
                span: span(),
            }),
        ],
        span: span(),
    };

    assert_eq!(program.to_string(), "xreturn 1;");
    assert_eq!(program.token_literal(), "x");
    assert_eq!(program.len(), 2);
}

#[test]
fn test_empty_program() {
    let program = Program {
        statements: vec![],
        span: span(),
    };

    assert_eq!(program.to_string(), "");
    assert_eq!(program.token_literal(), "");
    assert!(program.is_empty());
}
