use crate::{
    ast::{
        ast::{Node, Stmt},
        expressions::IdentifierExpr,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

/// Parses one statement starting at the current token.
///
/// On success the current token is the last token of the statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    // Trailing semicolon is optional
    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: token.span.start.clone(),
            end: expression.get_span().end.clone(),
        },
        token,
        expression,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name_token = parser.current_token().clone();
    let name = IdentifierExpr {
        value: name_token.value.clone(),
        span: name_token.span.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Let(LetStmt {
        span: Span {
            start: token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let value = if parser.current_token().is_one_of_many(&[TokenKind::Semicolon, TokenKind::EOF]) {
        None
    } else {
        let value = parse_expr(parser, BindingPower::Lowest)?;
        if parser.peek_token_is(TokenKind::Semicolon) {
            parser.advance();
        }
        Some(value)
    };

    Ok(Stmt::Return(ReturnStmt {
        span: Span {
            start: token.span.start.clone(),
            end: parser.current_token().span.end.clone(),
        },
        token,
        value,
    }))
}
