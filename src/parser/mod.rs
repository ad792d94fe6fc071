//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (`let`, `return`, and bare expressions)
//! - Expression parsing (prefix and infix operators, literals, grouping)
//! - Diagnostics that are collected rather than raised
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.
//! Supporting a new operator or literal means registering one more handler.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
