#![deny(warnings)]

use crate::scanner::Scanner;
use std::{error, fmt};

#[derive(Clone, PartialEq, Debug)]
pub enum LexError {
    EmptyInput,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexError::EmptyInput => write!(f, "unexpected EOF: empty input"),
        }
    }
}

impl error::Error for LexError {}

/// Splits s-expression source into raw token strings.
///
/// `(` and `)` are tokens of their own, whitespace only separates, and a
/// double-quoted fragment is kept whole (quotes included) even when it is
/// glued to surrounding text. Anything else runs until the next separator.
pub struct LispTokenizer(Scanner<char>);

impl LispTokenizer {
    pub fn scanner(source: &str) -> Scanner<String> {
        Scanner::new(LispTokenizer(Scanner::from_str(source)))
    }

    // a bare token stops before a separator or a well formed string
    fn scan_bare(&mut self) -> String {
        while let Some(next) = self.0.peek() {
            if next.is_whitespace() || next == '(' || next == ')' {
                break;
            }
            if next == '"' {
                let backtrack = self.0.pos();
                if self.0.accept_quoted() {
                    self.0.set_pos(backtrack);
                    break;
                }
            }
            self.0.next();
        }
        self.0.extract_string()
    }
}

impl Iterator for LispTokenizer {
    type Item = String;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.ignore_ws();
        if self.0.is_done() {
            return None;
        }
        if let Some(paren) = self.0.accept_any_char("()") {
            self.0.ignore();
            return Some(paren.to_string());
        }
        if let Some(s) = self.0.scan_quoted_string() {
            return Some(s);
        }
        Some(self.scan_bare())
    }
}

/// Tokenize a whole source text, only a zero-length text is rejected.
pub fn tokenize(source: &str) -> Result<Vec<String>, LexError> {
    if source.is_empty() {
        return Err(LexError::EmptyInput);
    }
    Ok(LispTokenizer::scanner(source).collect())
}

///////////////////////////////////////////////////////////////////////////////
