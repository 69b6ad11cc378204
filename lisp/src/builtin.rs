use crate::eval::EvalErr;
use crate::value::Value;
use lazy_static::lazy_static;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

pub type Fp = fn(&[Value]) -> Result<Value, EvalErr>;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "{}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
            Arity::Any => write!(f, "any number of"),
        }
    }
}

/// A primitive procedure of the standard library.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    arity: Arity,
    func: Fp,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#<builtin {}>", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Builtin) -> bool { self.name == other.name }
}

impl Builtin {
    pub fn name(&self) -> &'static str { self.name }

    pub fn arity(&self) -> Arity { self.arity }

    pub fn call(&self, args: &[Value]) -> Result<Value, EvalErr> {
        if !self.arity.accepts(args.len()) {
            return Err(EvalErr::ArityError{
                name: self.name.to_string(), expected: self.arity, got: args.len()});
        }
        (self.func)(args)
    }
}

macro_rules! stdlib {
    ($($name:expr => $func:ident, $arity:expr;)*) => {{
        let mut table: HashMap<&'static str, Builtin> = HashMap::new();
        $(table.insert($name, Builtin{name: $name, arity: $arity, func: $func});)*
        table
    }}
}

lazy_static! {
    static ref STDLIB: HashMap<&'static str, Builtin> = {
        use Arity::*;
        stdlib! {
            "+" => add, AtLeast(1);
            "-" => sub, AtLeast(1);
            "*" => mul, AtLeast(1);
            "div" => div, Exactly(2);
            ">" => gt, Exactly(2);
            ">=" => ge, Exactly(2);
            "<" => lt, Exactly(2);
            "<=" => le, Exactly(2);
            "car" => car, Exactly(1);
            "cdr" => cdr, Exactly(1);
            "len" => len, Exactly(1);
            "cons" => cons, Any;
            "eq?" => eq, Exactly(2);
            "empty?" => empty, Exactly(1);
            "not" => not, Exactly(1);
            "or" => or, Exactly(2);
            "and" => and, Exactly(2);
            "append" => append, Exactly(2);
            "pop" => pop, Exactly(1);
        }
    };
}

pub fn lookup(name: &str) -> Option<Builtin> {
    STDLIB.get(name).copied()
}

/// Names of every builtin, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = STDLIB.keys().copied().collect();
    names.sort_unstable();
    names
}

fn type_error(name: &str, expected: &str, got: &Value) -> EvalErr {
    EvalErr::TypeError(format!("{} expects {}, got {} {}", name, expected, got.type_name(), got))
}

fn number(name: &str, arg: &Value) -> Result<i64, EvalErr> {
    match arg {
        Value::Number(n) => Ok(*n),
        other => Err(type_error(name, "a number", other)),
    }
}

fn list<'a>(name: &str, arg: &'a Value) -> Result<&'a [Value], EvalErr> {
    match arg {
        Value::List(l) => Ok(l.as_slice()),
        other => Err(type_error(name, "a list", other)),
    }
}

// left fold starting from the first argument
fn foldop(name: &str, args: &[Value], op: fn(i64, i64) -> Option<i64>) -> Result<Value, EvalErr> {
    let (first, rest) = match args.split_first() {
        Some(split) => split,
        None => return Err(type_error(name, "a number", &Value::Undefined)),
    };
    let mut acc = number(name, first)?;
    for arg in rest {
        acc = op(acc, number(name, arg)?)
            .ok_or_else(|| EvalErr::Arithmetic(format!("integer overflow in {}", name)))?;
    }
    Ok(Value::Number(acc))
}

fn add(args: &[Value]) -> Result<Value, EvalErr> { foldop("+", args, i64::checked_add) }
fn sub(args: &[Value]) -> Result<Value, EvalErr> { foldop("-", args, i64::checked_sub) }
fn mul(args: &[Value]) -> Result<Value, EvalErr> { foldop("*", args, i64::checked_mul) }

fn div(args: &[Value]) -> Result<Value, EvalErr> {
    let (x, y) = (number("div", &args[0])?, number("div", &args[1])?);
    if y == 0 {
        return Err(EvalErr::Arithmetic(format!("division by zero")));
    }
    x.checked_div(y)
        .map(Value::Number)
        .ok_or_else(|| EvalErr::Arithmetic(format!("integer overflow in div")))
}

// numbers compare with numbers, strings with strings
fn compare(name: &str, args: &[Value], test: fn(Ordering) -> bool) -> Result<Value, EvalErr> {
    let ordering = match (&args[0], &args[1]) {
        (Value::Number(a), Value::Number(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(_), other) | (Value::String(_), other) =>
            return Err(type_error(name, args[0].type_name(), other)),
        (other, _) => return Err(type_error(name, "a number or a string", other)),
    };
    Ok(Value::Boolean(test(ordering)))
}

fn gt(args: &[Value]) -> Result<Value, EvalErr> { compare(">", args, Ordering::is_gt) }
fn ge(args: &[Value]) -> Result<Value, EvalErr> { compare(">=", args, Ordering::is_ge) }
fn lt(args: &[Value]) -> Result<Value, EvalErr> { compare("<", args, Ordering::is_lt) }
fn le(args: &[Value]) -> Result<Value, EvalErr> { compare("<=", args, Ordering::is_le) }

fn car(args: &[Value]) -> Result<Value, EvalErr> {
    list("car", &args[0])?
        .first()
        .cloned()
        .ok_or_else(|| EvalErr::TypeError(format!("car of an empty list")))
}

fn cdr(args: &[Value]) -> Result<Value, EvalErr> {
    Ok(Value::List(list("cdr", &args[0])?.iter().skip(1).cloned().collect()))
}

fn len(args: &[Value]) -> Result<Value, EvalErr> {
    match &args[0] {
        Value::List(l) => Ok(Value::Number(l.len() as i64)),
        Value::String(s) => Ok(Value::Number(s.chars().count() as i64)),
        other => Err(type_error("len", "a list or a string", other)),
    }
}

fn cons(args: &[Value]) -> Result<Value, EvalErr> {
    Ok(Value::List(args.to_vec()))
}

fn eq(args: &[Value]) -> Result<Value, EvalErr> {
    Ok(Value::Boolean(args[0] == args[1]))
}

fn empty(args: &[Value]) -> Result<Value, EvalErr> {
    match &args[0] {
        Value::List(l) => Ok(Value::Boolean(l.is_empty())),
        Value::String(s) => Ok(Value::Boolean(s.is_empty())),
        other => Err(type_error("empty?", "a list or a string", other)),
    }
}

fn not(args: &[Value]) -> Result<Value, EvalErr> {
    Ok(Value::Boolean(!args[0].is_truthy()))
}

// both operands are already evaluated, the result is one of them
fn or(args: &[Value]) -> Result<Value, EvalErr> {
    Ok(if args[0].is_truthy() { args[0].clone() } else { args[1].clone() })
}

fn and(args: &[Value]) -> Result<Value, EvalErr> {
    Ok(if args[0].is_truthy() { args[1].clone() } else { args[0].clone() })
}

// (append x (a b)) -> (a b x)
fn append(args: &[Value]) -> Result<Value, EvalErr> {
    let mut items = list("append", &args[1])?.to_vec();
    items.push(args[0].clone());
    Ok(Value::List(items))
}

fn pop(args: &[Value]) -> Result<Value, EvalErr> {
    let items = list("pop", &args[0])?;
    Ok(Value::List(items.split_last()
        .map(|(_, init)| init.to_vec())
        .unwrap_or_default()))
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{lookup, names, Arity};
    use crate::eval::EvalErr;
    use crate::value::Value;

    fn call(name: &str, args: Vec<Value>) -> Result<Value, EvalErr> {
        lookup(name).unwrap().call(&args)
    }

    fn nums(ns: &[i64]) -> Vec<Value> {
        ns.iter().map(|n| Value::Number(*n)).collect()
    }

    #[test]
    fn test_folds_are_left_associative() {
        assert_eq!(call("+", nums(&[1, 2, 3])), Ok(Value::Number(6)));
        assert_eq!(call("-", nums(&[10, 8, 2])), Ok(Value::Number(0)));
        assert_eq!(call("*", nums(&[1, 2, 3, 4])), Ok(Value::Number(24)));
        assert_eq!(call("-", nums(&[5])), Ok(Value::Number(5)));
    }

    #[test]
    fn test_arithmetic_errors() {
        assert!(matches!(call("+", vec![]), Err(EvalErr::ArityError{expected: Arity::AtLeast(1), got: 0, ..})));
        assert!(matches!(call("+", vec![Value::Number(1), Value::Boolean(true)]), Err(EvalErr::TypeError(_))));
        assert!(matches!(call("*", nums(&[i64::MAX, 2])), Err(EvalErr::Arithmetic(_))));
        assert!(matches!(call("div", nums(&[1, 0])), Err(EvalErr::Arithmetic(_))));
        assert_eq!(call("div", nums(&[100, 10])), Ok(Value::Number(10)));
        assert_eq!(call("div", nums(&[7, -2])), Ok(Value::Number(-3)));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(call(">", nums(&[3, 2])), Ok(Value::Boolean(true)));
        assert_eq!(call(">=", nums(&[2, 2])), Ok(Value::Boolean(true)));
        assert_eq!(call("<", nums(&[2, 2])), Ok(Value::Boolean(false)));
        assert_eq!(call("<=", nums(&[1, 2])), Ok(Value::Boolean(true)));
        let words = vec![Value::String(format!("abc")), Value::String(format!("abd"))];
        assert_eq!(call("<", words), Ok(Value::Boolean(true)));
        assert!(matches!(call("<", vec![Value::Number(1), Value::String(format!("1"))]),
                         Err(EvalErr::TypeError(_))));
        assert!(matches!(call(">", nums(&[1, 2, 3])), Err(EvalErr::ArityError{got: 3, ..})));
    }

    #[test]
    fn test_list_ops() {
        let l = Value::List(nums(&[1, 2, 3]));
        assert_eq!(call("car", vec![l.clone()]), Ok(Value::Number(1)));
        assert_eq!(call("cdr", vec![l.clone()]), Ok(Value::List(nums(&[2, 3]))));
        assert_eq!(call("len", vec![l.clone()]), Ok(Value::Number(3)));
        assert_eq!(call("pop", vec![l.clone()]), Ok(Value::List(nums(&[1, 2]))));
        assert_eq!(call("append", vec![Value::Number(4), l.clone()]), Ok(Value::List(nums(&[1, 2, 3, 4]))));
        assert_eq!(call("append", vec![Value::Number(4), Value::List(vec![])]), Ok(Value::List(nums(&[4]))));
        assert_eq!(call("cons", nums(&[1, 2, 3])), Ok(l));
        assert_eq!(call("cons", vec![]), Ok(Value::List(vec![])));
    }

    #[test]
    fn test_empty_lists() {
        let empty = Value::List(vec![]);
        assert!(matches!(call("car", vec![empty.clone()]), Err(EvalErr::TypeError(_))));
        assert_eq!(call("cdr", vec![empty.clone()]), Ok(empty.clone()));
        assert_eq!(call("pop", vec![empty.clone()]), Ok(empty.clone()));
        assert_eq!(call("empty?", vec![empty.clone()]), Ok(Value::Boolean(true)));
        assert_eq!(call("empty?", vec![Value::List(nums(&[0]))]), Ok(Value::Boolean(false)));
        assert_eq!(call("empty?", vec![Value::String(String::new())]), Ok(Value::Boolean(true)));
        assert!(matches!(call("empty?", vec![Value::Number(0)]), Err(EvalErr::TypeError(_))));
        assert!(matches!(call("car", vec![Value::Number(1)]), Err(EvalErr::TypeError(_))));
    }

    #[test]
    fn test_car_cdr_rebuild_the_list() {
        for l in [nums(&[7]), nums(&[1, 2]), nums(&[5, 4, 3, 2, 1])] {
            let list = Value::List(l);
            let head = call("car", vec![list.clone()]).unwrap();
            let tail = match call("cdr", vec![list.clone()]).unwrap() {
                Value::List(tail) => tail,
                other => panic!("cdr returned {}", other),
            };
            let mut rebuilt = vec![head];
            rebuilt.extend(tail);
            assert_eq!(call("cons", rebuilt), Ok(list));
        }
    }

    #[test]
    fn test_logic_returns_operands() {
        let (t, f) = (Value::Boolean(true), Value::Boolean(false));
        assert_eq!(call("or", vec![f.clone(), t.clone()]), Ok(t.clone()));
        assert_eq!(call("and", vec![t.clone(), t.clone()]), Ok(t.clone()));
        assert_eq!(call("and", vec![t.clone(), f.clone()]), Ok(f.clone()));
        assert_eq!(call("or", nums(&[0, 5])), Ok(Value::Number(5)));
        assert_eq!(call("and", nums(&[0, 5])), Ok(Value::Number(0)));
        assert_eq!(call("not", vec![f.clone()]), Ok(t.clone()));
        assert_eq!(call("not", vec![Value::List(vec![])]), Ok(f.clone()));
    }

    #[test]
    fn test_eq() {
        assert_eq!(call("eq?", nums(&[4, 4])), Ok(Value::Boolean(true)));
        assert_eq!(call("eq?", vec![Value::Boolean(true), Value::Boolean(false)]), Ok(Value::Boolean(false)));
        assert_eq!(call("eq?", vec![Value::Number(1), Value::String(format!("1"))]), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_table_contents() {
        assert_eq!(names().len(), 19);
        assert!(names().contains(&"empty?"));
        assert!(lookup("define").is_none());
        assert_eq!(lookup("cons").unwrap().arity(), Arity::Any);
    }
}
