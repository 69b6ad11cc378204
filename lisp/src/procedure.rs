use crate::env::Env;
use crate::eval::{self, EvalErr};
use crate::parser::Expr;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// A closure built by `lambda`: parameters, body and the defining frame.
pub struct Procedure {
    params: Vec<String>,
    body: Option<Expr>,
    env: Rc<Env>,
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.body {
            Some(ref body) => write!(f, "(lambda ({}) {})", self.params.join(" "), body),
            None => write!(f, "(lambda ({}))", self.params.join(" ")),
        }
    }
}

impl Procedure {
    pub fn new(params: Vec<String>, body: Option<Expr>, env: Rc<Env>) -> Procedure {
        Procedure{params, body, env}
    }

    pub fn params(&self) -> &[String] { &self.params }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, EvalErr> {
        debug!("apply {:?} to {:?}", self, args);
        let env = Env::with_bindings(&self.params, args, Rc::clone(&self.env));
        match self.body {
            Some(ref body) => eval::eval(body, &Rc::new(env)),
            None => Ok(Value::Undefined),
        }
    }
}
