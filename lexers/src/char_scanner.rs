#![deny(warnings)]

use crate::scanner::Scanner;

// characters a regex '.' refuses to match
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl Scanner<char> {
    pub fn from_str(source: &str) -> Scanner<char> {
        Scanner::new(source.chars().collect::<Vec<_>>().into_iter())
    }

    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    pub fn accept_char(&mut self, c: char) -> bool {
        self.accept(&c).is_some()
    }

    pub fn accept_any_char(&mut self, any: &str) -> Option<char> {
        match self.peek() {
            Some(next) if any.contains(next) => self.next(),
            _ => None,
        }
    }

    pub fn until_any_char(&mut self, any: &str) -> bool {
        let mut advanced = false;
        while let Some(next) = self.peek() {
            if any.contains(next) { break; }
            self.next();
            advanced = true;
        }
        advanced
    }

    pub fn skip_ws(&mut self) -> bool {
        let mut advanced = false;
        while let Some(next) = self.peek() {
            if !next.is_whitespace() { break; }
            self.next();
            advanced = true;
        }
        advanced
    }

    pub fn ignore_ws(&mut self) {
        self.skip_ws();
        self.ignore();
    }

    /// Advance over a double-quoted fragment: an opening quote, at least one
    /// character, then the nearest following quote, all on one line. There
    /// is no escaping. On failure the scanner is left untouched.
    pub fn accept_quoted(&mut self) -> bool {
        let backtrack = self.pos();
        if !self.accept_char('"') {
            return false;
        }
        // the first body char may itself be a quote
        match self.next() {
            Some(c) if !is_line_terminator(c) => (),
            _ => {
                self.set_pos(backtrack);
                return false;
            }
        }
        while let Some(c) = self.next() {
            if is_line_terminator(c) { break; }
            if c == '"' { return true; }
        }
        self.set_pos(backtrack);
        false
    }

    pub fn scan_quoted_string(&mut self) -> Option<String> {
        if self.accept_quoted() {
            Some(self.extract_string())
        } else {
            None
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
