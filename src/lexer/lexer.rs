use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Handles a pattern match at the cursor. `None` means the match produced no
/// token (whitespace) and scanning should resume.
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Anchored, tried in order. Two-character operators precede their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_]+").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^[ \t\n\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
    ];
}

/// On-demand tokenizer over a complete source string.
///
/// Each call to [`Lexer::next_token`] scans exactly one token. Once the input
/// is exhausted every further call returns an `EOF` token with empty text.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer::with_file(source, "shell")
    }

    pub fn with_file(source: impl Into<String>, file: &str) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            file: Rc::new(String::from(file)),
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn position_at(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    /// Builds a token for `value` at the cursor and moves past it.
    pub fn make_token(&mut self, kind: TokenKind, value: String) -> Token {
        let span = Span {
            start: self.position_at(self.pos),
            end: self.position_at(self.pos + value.len()),
        };
        self.advance_n(value.len());
        MK_TOKEN!(kind, value, span)
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        trace!("{}: {}", self.pos, token);
        token
    }

    fn scan(&mut self) -> Token {
        'scan: while !self.at_eof() {
            for pattern in PATTERNS.iter() {
                let matched = pattern
                    .regex
                    .find(&self.source[self.pos..])
                    .map(|m| m.as_str().to_string());

                if let Some(matched) = matched {
                    match (pattern.handler)(self, &matched) {
                        Some(token) => return token,
                        None => continue 'scan,
                    }
                }
            }

            return illegal_handler(self);
        }

        let span = Span {
            start: self.position_at(self.pos),
            end: self.position_at(self.pos),
        };
        MK_TOKEN!(TokenKind::EOF, String::new(), span)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token before `EOF`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            None
        } else {
            Some(token)
        }
    }
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    Some(lexer.make_token(TokenKind::Int, matched.to_string()))
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    Some(lexer.make_token(lookup_identifier(matched), matched.to_string()))
}

fn illegal_handler(lexer: &mut Lexer) -> Token {
    let ch = lexer.source[lexer.pos..].chars().next().unwrap_or('\0');
    lexer.make_token(TokenKind::Illegal, ch.to_string())
}

/// Collects every token of `source`, including the single trailing `EOF`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
