// zlisp-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use zlisp_parser::{Symbol, Value};

use crate::error::{Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. A child holds its
/// parent strongly and a parent never refers to its children, so scopes do
/// not form cycles on their own.
///
/// # Examples
///
/// ```
/// use zlisp_core::Env;
/// use zlisp_parser::{Symbol, Value};
///
/// let env = Env::new();
/// env.set(Symbol::new("x"), Value::int(42));
///
/// let child = env.child();
/// assert_eq!(child.get(&Symbol::new("x")).unwrap(), Value::int(42));
///
/// // Binding in the child shadows, the parent is untouched
/// child.set(Symbol::new("x"), Value::int(100));
/// assert_eq!(child.get(&Symbol::new("x")).unwrap(), Value::int(100));
/// assert_eq!(env.get(&Symbol::new("x")).unwrap(), Value::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, Value>,
    parent: Option<Env>,
}

/// A non-owning handle to an environment.
#[derive(Debug, Clone)]
pub struct WeakEnv {
    inner: Weak<RefCell<EnvInner>>,
}

impl WeakEnv {
    pub fn upgrade(&self) -> Option<Env> {
        self.inner.upgrade().map(|inner| Env { inner })
    }
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Create a child scope binding `params` to `args` positionally.
    ///
    /// A `&` in `params` binds every remaining argument, as a list, to the
    /// name after it and ends binding. Parameters without an argument are
    /// bound to `nil`; surplus arguments are ignored.
    #[must_use]
    pub fn from_params(parent: &Env, params: &[Symbol], args: &[Value]) -> Self {
        let env = parent.child();
        {
            let mut inner = env.inner.borrow_mut();
            for (i, param) in params.iter().enumerate() {
                if param.is_rest_marker() {
                    if let Some(rest) = params.get(i + 1) {
                        let remaining = args.get(i..).unwrap_or_default();
                        inner
                            .bindings
                            .insert(rest.clone(), Value::list(remaining.to_vec()));
                    }
                    break;
                }
                let arg = args.get(i).cloned().unwrap_or(Value::NIL);
                inner.bindings.insert(param.clone(), arg);
            }
        }
        env
    }

    /// Bind in this environment only, never in a parent.
    pub fn set(&self, sym: Symbol, val: Value) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// The innermost scope in the chain that binds `sym`.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn find(&self, sym: &Symbol) -> Option<Env> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if inner.bindings.contains_key(sym) {
                drop(inner);
                return Some(current);
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Look up a symbol in this environment or its parent chain.
    pub fn get(&self, sym: &Symbol) -> Result<Value> {
        self.lookup(sym)
            .ok_or_else(|| Error::UnboundSymbol(sym.clone()))
    }

    /// Like [`Env::get`], but absent bindings are `None`.
    pub fn lookup(&self, sym: &Symbol) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Some(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Check if a symbol is bound in this environment or its parent chain.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.find(sym).is_some()
    }

    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// True if both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    fn syms(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|n| sym(n)).collect()
    }

    #[test]
    fn test_set_and_get() {
        let env = Env::new();
        env.set(sym("x"), Value::int(42));
        assert_eq!(env.get(&sym("x")).unwrap(), Value::int(42));
    }

    #[test]
    fn test_unbound_symbol() {
        let env = Env::new();
        let err = env.get(&sym("x")).unwrap_err();
        assert!(matches!(err, Error::UnboundSymbol(_)));
        assert_eq!(err.to_string(), "'x' not found");
    }

    #[test]
    fn test_child_inherits_parent() {
        let parent = Env::new();
        parent.set(sym("x"), Value::int(42));

        let child = parent.child();
        assert_eq!(child.get(&sym("x")).unwrap(), Value::int(42));
    }

    #[test]
    fn test_set_never_touches_parent() {
        let parent = Env::new();
        parent.set(sym("x"), Value::int(42));

        let child = parent.child();
        child.set(sym("x"), Value::int(100));

        assert_eq!(child.get(&sym("x")).unwrap(), Value::int(100));
        assert_eq!(parent.get(&sym("x")).unwrap(), Value::int(42));
    }

    #[test]
    fn test_find_returns_binding_scope() {
        let root = Env::new();
        root.set(sym("x"), Value::int(1));
        let mid = root.child();
        mid.set(sym("y"), Value::int(2));
        let leaf = mid.child();

        assert!(leaf.find(&sym("x")).unwrap().ptr_eq(&root));
        assert!(leaf.find(&sym("y")).unwrap().ptr_eq(&mid));
        assert!(leaf.find(&sym("z")).is_none());
        assert!(!root.is_defined(&sym("y")));
    }

    #[test]
    fn test_from_params_positional() {
        let root = Env::new();
        let env = Env::from_params(&root, &syms(&["a", "b"]), &[Value::int(1), Value::int(2)]);
        assert_eq!(env.get(&sym("a")).unwrap(), Value::int(1));
        assert_eq!(env.get(&sym("b")).unwrap(), Value::int(2));
        assert!(!root.is_defined(&sym("a")));
    }

    #[test]
    fn test_from_params_missing_and_extra() {
        let root = Env::new();
        let env = Env::from_params(&root, &syms(&["a", "b"]), &[Value::int(1)]);
        assert_eq!(env.get(&sym("b")).unwrap(), Value::NIL);

        let env = Env::from_params(
            &root,
            &syms(&["a"]),
            &[Value::int(1), Value::int(2)],
        );
        assert_eq!(env.get(&sym("a")).unwrap(), Value::int(1));
    }

    #[test]
    fn test_from_params_rest() {
        let root = Env::new();
        let params = syms(&["a", "&", "more"]);
        let args = [Value::int(1), Value::int(2), Value::int(3)];
        let env = Env::from_params(&root, &params, &args);
        assert_eq!(env.get(&sym("a")).unwrap(), Value::int(1));
        assert_eq!(
            env.get(&sym("more")).unwrap(),
            Value::list(vec![Value::int(2), Value::int(3)])
        );

        // No remaining arguments gives an empty list
        let env = Env::from_params(&root, &params, &[Value::int(1)]);
        assert_eq!(env.get(&sym("more")).unwrap(), Value::list(vec![]));

        // Nor any at all
        let env = Env::from_params(&root, &params, &[]);
        assert_eq!(env.get(&sym("a")).unwrap(), Value::NIL);
        assert_eq!(env.get(&sym("more")).unwrap(), Value::list(vec![]));
    }

    #[test]
    fn test_weak_handle() {
        let env = Env::new();
        let weak = env.downgrade();
        assert!(weak.upgrade().unwrap().ptr_eq(&env));
        drop(env);
        assert!(weak.upgrade().is_none());
    }
}
