//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser pulls tokens from
//! a [`Lexer`] one at a time and keeps a two-token window (current and
//! peek); there is no backtracking.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem, rc::Rc};

use log::debug;

use crate::{
    ast::statements::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How many expressions may be open at once before the parser gives up on
/// the statement.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// A parser owns its lexer and its diagnostics, so independent parses never
/// share state. It is not meant to be shared between callers.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// The token under examination
    current: Token,
    /// One token of lookahead beyond `current`
    peek: Token,
    /// Diagnostics recorded so far, in order
    errors: Vec<Error>,
    /// Number of `parse_expr` calls currently open
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser over `lexer`.
    ///
    /// Reads the first two tokens to fill the current/peek window and installs
    /// the default handler tables.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the window one token forward.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = mem::replace(&mut self.peek, next);
    }

    /// Advances if the peek token is `expected_kind`.
    ///
    /// # Returns
    ///
    /// Returns an `UnexpectedToken` error pointing at the peek token if it
    /// does not match; the window is left untouched in that case.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token_is(expected_kind) {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    received: self.peek.kind,
                    token: self.peek.value.clone(),
                },
                self.peek.span.start.clone(),
            ))
        }
    }

    pub fn current_precedence(&self) -> BindingPower {
        self.precedence_of(self.current.kind)
    }

    pub fn peek_precedence(&self) -> BindingPower {
        self.precedence_of(self.peek.kind)
    }

    /// Opens one level of expression nesting.
    ///
    /// # Returns
    ///
    /// Returns a `NestingTooDeep` error at the current token once
    /// [`MAX_NESTING_DEPTH`] levels are open; the depth is unchanged then.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.current.span.start.clone(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn precedence_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `nud_fn` - The handler function for expressions starting with `kind`
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    fn push_error(&mut self, error: Error) {
        debug!("diagnostic at {}: {}", error.get_position().0, error);
        self.errors.push(error);
    }

    /// The messages of every diagnostic recorded so far, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Every diagnostic recorded so far, with positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        mem::take(&mut self.errors)
    }

    /// Advances until the peek token is `;` or the end of input.
    fn skip_to_statement_end(&mut self) {
        while !self.peek_token_is(TokenKind::Semicolon) && !self.peek_token_is(TokenKind::EOF) {
            self.advance();
        }
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse is left out of the program; its
    /// diagnostic is kept and parsing resumes one token further on, past the
    /// statement's `;` if that is next. Input nested too deeply is skipped up
    /// to the end of its statement. The program is always returned.
    pub fn parse_program(&mut self) -> Program {
        let file = self.lexer.file();
        let mut statements = vec![];

        while !self.current_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => {
                    debug!("parsed statement: {}", stmt);
                    statements.push(stmt);
                }
                Err(error) => {
                    let skip_statement = matches!(error.kind(), ErrorImpl::NestingTooDeep { .. });
                    self.push_error(error);

                    if skip_statement {
                        self.skip_to_statement_end();
                    }
                    if self.peek_token_is(TokenKind::Semicolon) {
                        self.advance();
                    }
                }
            }
            self.advance();
        }

        Program {
            statements,
            span: Span {
                start: Position(0, Rc::clone(&file)),
                end: self.current.span.end.clone(),
            },
        }
    }
}
