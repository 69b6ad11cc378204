use lexers::{tokenize, LexError, Scanner};
use std::{error, fmt};

#[derive(Clone, PartialEq, Debug)]
pub enum ParseError {
    Lex(LexError),
    UnexpectedCParen,
    UnexpectedEOF,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::UnexpectedCParen => write!(f, "unexpected ')'"),
            ParseError::UnexpectedEOF => write!(f, "unexpected EOF: missing ')'"),
        }
    }
}

impl error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self { ParseError::Lex(err) }
}

/// A classified leaf of the syntax tree.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    Number(i64),
    String(String),
    Boolean(bool),
    Symbol(String),
}

impl Node {
    /// First match wins: quoted string, leading integer, `#t`/`#f`, symbol.
    pub fn classify(token: &str) -> Node {
        if token.starts_with('"') {
            Node::String(strip_quotes(token))
        } else if let Some(n) = leading_integer(token) {
            Node::Number(n)
        } else if token == "#t" || token == "#f" {
            Node::Boolean(token == "#t")
        } else {
            Node::Symbol(token.to_string())
        }
    }
}

// drop first and last chars, whatever they are
fn strip_quotes(token: &str) -> String {
    let mut chars = token.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

// parse a sign and a run of digits, ignore whatever follows ("3.5" -> 3)
fn leading_integer(token: &str) -> Option<i64> {
    let token = token.trim_start();
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude = rest[..end].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "\"{}\"", s),
            Node::Boolean(true) => write!(f, "#t"),
            Node::Boolean(false) => write!(f, "#f"),
            Node::Symbol(s) => write!(f, "{}", s),
        }
    }
}

/// A leaf or a parenthesized form.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Atom(Node),
    List(Vec<Expr>),
}

impl Expr {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Expr::Atom(Node::Symbol(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Atom(node) => write!(f, "{}", node),
            Expr::List(list) => {
                write!(f, "(")?;
                for (i, expr) in list.iter().enumerate() {
                    if i > 0 { write!(f, " ")?; }
                    write!(f, "{}", expr)?;
                }
                write!(f, ")")
            }
        }
    }
}


pub struct Parser;

impl Parser {
    pub fn parse_str(source: &str) -> Result<Vec<Expr>, ParseError> {
        Self::parse(tokenize(source)?)
    }

    /// Parse a token sequence into the top level body.
    ///
    /// The top level is flattened by one level: a single form yields its
    /// own elements (`(+ 1 2)` -> `[+, 1, 2]`) while several forms wrapped
    /// in one more pair of parens yield those forms (`((a) (b))` ->
    /// `[(a), (b)]`). Unbalanced parens are rejected.
    pub fn parse(tokens: Vec<String>) -> Result<Vec<Expr>, ParseError> {
        debug!("parse: {:?}", tokens);
        let mut lex = Scanner::new(tokens.into_iter());
        let mut body = Vec::new();
        while let Some(token) = lex.next() {
            match &token[..] {
                "(" => body.push(Expr::List(Self::parse_form(&mut lex)?)),
                ")" => return Err(ParseError::UnexpectedCParen),
                _ => body.push(Expr::Atom(Node::classify(&token))),
            }
        }
        Ok(body.into_iter()
            .flat_map(|expr| match expr {
                Expr::List(list) => list,
                atom => vec![atom],
            })
            .collect())
    }

    // consume up to and including the ')' closing an already open form
    fn parse_form(lex: &mut Scanner<String>) -> Result<Vec<Expr>, ParseError> {
        let mut form = Vec::new();
        loop {
            match lex.next() {
                None => return Err(ParseError::UnexpectedEOF),
                Some(token) => match &token[..] {
                    "(" => form.push(Expr::List(Self::parse_form(lex)?)),
                    ")" => return Ok(form),
                    _ => form.push(Expr::Atom(Node::classify(&token))),
                }
            }
        }
    }
}
