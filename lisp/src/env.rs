use crate::builtin;
use crate::eval::EvalErr;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

enum Scope {
    // the shared read-only table of builtins
    Library,
    Bindings(RefCell<HashMap<String, Value>>),
}

/// One frame of the lookup chain.
///
/// A frame owns its bindings and holds its parent alive through `outer`.
/// Lookups that miss go to the parent, writes only ever touch the frame
/// itself.
pub struct Env {
    scope: Scope,
    outer: Option<Rc<Env>>,
}

impl Env {
    /// The root frame, backed by the builtin table.
    pub fn library() -> Env {
        Env{scope: Scope::Library, outer: None}
    }

    pub fn nested(outer: Rc<Env>) -> Env {
        Env{scope: Scope::Bindings(RefCell::new(HashMap::new())), outer: Some(outer)}
    }

    /// Bind params to args by position. Extra args are dropped and
    /// params without an argument are undefined.
    pub fn with_bindings(params: &[String], args: Vec<Value>, outer: Rc<Env>) -> Env {
        let mut args = args.into_iter();
        let bindings = params.iter()
            .map(|param| (param.clone(), args.next().unwrap_or(Value::Undefined)))
            .collect();
        Env{scope: Scope::Bindings(RefCell::new(bindings)), outer: Some(outer)}
    }

    pub fn is_library(&self) -> bool {
        matches!(self.scope, Scope::Library)
    }

    /// Resolve `sym` through the chain, `None` when nothing binds it.
    pub fn get(&self, sym: &str) -> Option<Value> {
        let found = match self.scope {
            Scope::Library => builtin::lookup(sym).map(Value::Builtin),
            Scope::Bindings(ref syms) => syms.borrow().get(sym).cloned(),
        };
        match (found, &self.outer) {
            (Some(value), _) => Some(value),
            (None, Some(outer)) => outer.get(sym),
            (None, None) => None,
        }
    }

    pub fn define(&self, sym: String, value: Value) -> Result<(), EvalErr> {
        match self.scope {
            Scope::Library => Err(EvalErr::ReadOnlyScope(sym)),
            Scope::Bindings(ref syms) => {
                syms.borrow_mut().insert(sym, value);
                Ok(())
            }
        }
    }

    /// The outermost frame below the library: the per-session globals.
    pub fn session(self: &Rc<Self>) -> Rc<Env> {
        let mut frame = Rc::clone(self);
        while let Some(outer) = frame.outer.clone() {
            if outer.is_library() { break; }
            frame = outer;
        }
        frame
    }

    /// Forget every binding of this frame.
    pub(crate) fn clear(&self) {
        if let Scope::Bindings(ref syms) = self.scope {
            syms.borrow_mut().clear();
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
