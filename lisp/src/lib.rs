//! A one page lisp.
//!
//! Source text goes through the [`lexers`] tokenizer, the [`Parser`] builds
//! a tree of [`Expr`], and [`Interpreter`] evaluates it against a chain of
//! [`Env`] frames rooted at a read-only table of builtins.
//!
//! ```
//! let fact = "(define ((fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1)))))))
//!               (fact 10))";
//! assert_eq!(pagelisp::interpret(fact).unwrap(), pagelisp::Value::Number(3628800));
//! ```

extern crate lexers;

macro_rules! debug {
    ($($args:tt)*) => (if cfg!(feature="debug") { eprintln!($($args)*); })
}

mod parser;
mod value;
mod env;
mod procedure;
mod builtin;
mod eval;

pub use parser::{Parser, Node, Expr, ParseError};
pub use value::Value;
pub use env::Env;
pub use procedure::Procedure;
pub use builtin::{Arity, Builtin, Fp};
pub use builtin::names as builtin_names;
pub use eval::{eval, interpret, EvalErr, Interpreter, LispError};
