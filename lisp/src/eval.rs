use crate::builtin::Arity;
use crate::env::Env;
use crate::parser::{Expr, Node, ParseError, Parser};
use crate::procedure::Procedure;
use crate::value::Value;
use std::rc::Rc;
use std::{error, fmt};

#[derive(PartialEq, Debug)]
pub enum EvalErr {
    InvalidExpr(String),
    UnboundSymbol(String),
    TypeError(String),
    ArityError { name: String, expected: Arity, got: usize },
    Arithmetic(String),
    ReadOnlyScope(String),
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalErr::InvalidExpr(msg) => write!(f, "invalid expression: {}", msg),
            EvalErr::UnboundSymbol(sym) => write!(f, "unbound symbol: {}", sym),
            EvalErr::TypeError(msg) => write!(f, "type error: {}", msg),
            EvalErr::ArityError{name, expected, got} =>
                write!(f, "arity error: {} expects {} arguments, got {}", name, expected, got),
            EvalErr::Arithmetic(msg) => write!(f, "arithmetic error: {}", msg),
            EvalErr::ReadOnlyScope(sym) =>
                write!(f, "cannot bind {} in the standard library", sym),
        }
    }
}

impl error::Error for EvalErr {}

/// Any failure of the text to value pipeline.
#[derive(PartialEq, Debug)]
pub enum LispError {
    Parse(ParseError),
    Eval(EvalErr),
}

impl fmt::Display for LispError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LispError::Parse(err) => write!(f, "parse error: {}", err),
            LispError::Eval(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for LispError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            LispError::Parse(err) => Some(err),
            LispError::Eval(err) => Some(err),
        }
    }
}

impl From<ParseError> for LispError {
    fn from(err: ParseError) -> Self { LispError::Parse(err) }
}

impl From<EvalErr> for LispError {
    fn from(err: EvalErr) -> Self { LispError::Eval(err) }
}

/// Evaluates forms in a session of its own.
///
/// The session frame sits right below the builtin library. `define`
/// publishes its bindings there so recursive lambdas can find themselves,
/// and since every interpreter has its own session nothing leaks from one
/// to the next.
pub struct Interpreter {
    session: Rc<Env>,
    retained: bool,
}

impl Default for Interpreter {
    fn default() -> Self { Self::new() }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter{session: Rc::new(Env::nested(Rc::new(Env::library()))), retained: false}
    }

    pub fn session(&self) -> &Rc<Env> { &self.session }

    /// Keep the session bindings after the interpreter goes away, for
    /// lambdas that outlive it and still resolve names through the session.
    pub fn retain(&mut self) {
        self.retained = true;
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalErr> {
        eval(expr, &self.session)
    }

    pub fn eval_str(&self, source: &str) -> Result<Value, LispError> {
        let body = Parser::parse_str(source)?;
        Ok(self.eval(&Expr::List(body))?)
    }
}

impl Drop for Interpreter {
    // lambdas published in the session hold the session itself
    fn drop(&mut self) {
        if !self.retained {
            self.session.clear();
        }
    }
}

/// Tokenize, parse and evaluate `source` in a fresh interpreter.
pub fn interpret(source: &str) -> Result<Value, LispError> {
    let mut interpreter = Interpreter::new();
    let value = interpreter.eval_str(source)?;
    if value.holds_lambda() {
        debug!("retaining session for {}", value);
        interpreter.retain();
    }
    Ok(value)
}

pub fn eval(expr: &Expr, env: &Rc<Env>) -> Result<Value, EvalErr> {
    match expr {
        Expr::Atom(Node::Number(n)) => Ok(Value::Number(*n)),
        Expr::Atom(Node::String(s)) => Ok(Value::String(s.clone())),
        Expr::Atom(Node::Boolean(b)) => Ok(Value::Boolean(*b)),
        Expr::Atom(Node::Symbol(sym)) => env.get(sym)
            .ok_or_else(|| EvalErr::UnboundSymbol(sym.clone())),
        Expr::List(list) => match list.first().and_then(Expr::symbol) {
            Some("define") => eval_define(list, env),
            Some("lambda") => eval_lambda(list, env),
            Some("if") => eval_if(list, env),
            Some("quote") => eval_opt(list.get(1), env),
            _ => eval_list(list, env),
        }
    }
}

// a missing sub-form has no value
fn eval_opt(expr: Option<&Expr>, env: &Rc<Env>) -> Result<Value, EvalErr> {
    match expr {
        Some(expr) => eval(expr, env),
        None => Ok(Value::Undefined),
    }
}

// apply when the head is callable, otherwise the list is its own value
fn eval_list(list: &[Expr], env: &Rc<Env>) -> Result<Value, EvalErr> {
    let mut values = list.iter()
        .map(|expr| eval(expr, env))
        .collect::<Result<Vec<_>, _>>()?;
    match values.first() {
        Some(Value::Builtin(builtin)) => builtin.call(&values[1..]),
        Some(Value::Lambda(procedure)) => {
            let procedure = Rc::clone(procedure);
            procedure.call(values.split_off(1))
        },
        _ => Ok(Value::List(values)),
    }
}

// (define ((name expr) ...) body)
fn eval_define(form: &[Expr], env: &Rc<Env>) -> Result<Value, EvalErr> {
    let bindings = match form.get(1) {
        Some(Expr::List(bindings)) => bindings,
        Some(other) => return Err(EvalErr::InvalidExpr(
            format!("define expects a list of bindings, got {}", other))),
        None => return Err(EvalErr::InvalidExpr(format!("define without bindings"))),
    };
    let session = env.session();
    let local = Rc::new(Env::nested(Rc::clone(env)));
    for binding in bindings {
        let (sym, expr) = match binding {
            Expr::List(pair) => match pair.as_slice() {
                [Expr::Atom(Node::Symbol(sym))] => (sym, None),
                [Expr::Atom(Node::Symbol(sym)), expr] => (sym, Some(expr)),
                _ => return Err(EvalErr::InvalidExpr(format!("bad define binding {}", binding))),
            },
            _ => return Err(EvalErr::InvalidExpr(format!("bad define binding {}", binding))),
        };
        // evaluated in the caller's frame, not in the one being built
        let value = eval_opt(expr, env)?;
        debug!("define {} = {}", sym, value);
        session.define(sym.clone(), value.clone())?;
        local.define(sym.clone(), value)?;
    }
    eval_opt(form.get(2), &local)
}

// (lambda (param ...) body)
fn eval_lambda(form: &[Expr], env: &Rc<Env>) -> Result<Value, EvalErr> {
    let params = match form.get(1) {
        Some(Expr::List(params)) => params.iter()
            .map(|param| match param.symbol() {
                Some(sym) => Ok(sym.to_string()),
                None => Err(EvalErr::InvalidExpr(
                    format!("lambda parameter must be a symbol, got {}", param))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(EvalErr::InvalidExpr(format!("lambda expects a parameter list"))),
    };
    let body = form.get(2).cloned();
    Ok(Value::Lambda(Rc::new(Procedure::new(params, body, Rc::clone(env)))))
}

// (if test conseq alt), both branches run in the current frame
fn eval_if(form: &[Expr], env: &Rc<Env>) -> Result<Value, EvalErr> {
    let test = eval_opt(form.get(1), env)?;
    debug!("if {} -> {}", test, test.is_truthy());
    if test.is_truthy() {
        eval_opt(form.get(2), env)
    } else {
        eval_opt(form.get(3), env)
    }
}
