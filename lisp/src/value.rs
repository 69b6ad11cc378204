use crate::builtin::Builtin;
use crate::procedure::Procedure;
use std::fmt;
use std::rc::Rc;

/// The result of evaluating an expression.
#[derive(Clone, Debug)]
pub enum Value {
    /// No value: empty input, a `define` without body, a missing argument.
    Undefined,
    Number(i64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Builtin(Builtin),
    Lambda(Rc<Procedure>),
}

impl Value {
    /// `#f`, `0`, `""` and undefined are false, anything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Whether a lambda is reachable from this value.
    pub fn holds_lambda(&self) -> bool {
        match self {
            Value::Lambda(_) => true,
            Value::List(list) => list.iter().any(Value::holds_lambda),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Builtin(_) | Value::Lambda(_) => "procedure",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(true) => write!(f, "#t"),
            Value::Boolean(false) => write!(f, "#f"),
            Value::List(list) => {
                write!(f, "(")?;
                for (i, value) in list.iter().enumerate() {
                    if i > 0 { write!(f, " ")?; }
                    write!(f, "{}", value)?;
                }
                write!(f, ")")
            },
            Value::Builtin(b) => write!(f, "#<builtin {}>", b.name()),
            Value::Lambda(p) => write!(f, "#<lambda ({})>", p.params().join(" ")),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::env::Env;
    use crate::procedure::Procedure;
    use std::rc::Rc;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Number(0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::Number(-1).is_truthy());
        assert!(Value::String(format!("f")).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
    }

    #[test]
    fn test_display() {
        let v = Value::List(vec![
            Value::Number(1),
            Value::String(format!("tux")),
            Value::List(vec![Value::Boolean(true), Value::Boolean(false)]),
            Value::Undefined,
        ]);
        assert_eq!(v.to_string(), "(1 tux (#t #f) undefined)");
        assert_eq!(Value::List(vec![]).to_string(), "()");
    }

    #[test]
    fn test_holds_lambda() {
        let lambda = Value::Lambda(Rc::new(Procedure::new(
            vec![], None, Rc::new(Env::library()))));
        assert!(lambda.holds_lambda());
        assert!(Value::List(vec![Value::Number(1), Value::List(vec![lambda])]).holds_lambda());
        assert!(!Value::List(vec![Value::Number(1), Value::Undefined]).holds_lambda());
        assert!(!Value::Builtin(crate::builtin::lookup("car").unwrap()).holds_lambda());
    }
}
