// zlisp-parser - Symbol type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols name bindings in an environment.
//!
//! A symbol is a cheap-to-clone shared name. Two symbols are equal when their
//! names are equal, regardless of where either was created.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

/// An identifier used for variable and macro lookup.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol(Rc::from(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// True for the rest-parameter marker `&`.
    pub fn is_rest_marker(&self) -> bool {
        &*self.0 == "&"
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_simple_symbol() {
        let sym = Symbol::new("foo");
        assert_eq!(sym.name(), "foo");
        assert_eq!(format!("{}", sym), "foo");
        assert_eq!(format!("{:?}", sym), "Symbol(foo)");
    }

    #[test]
    fn test_equality_by_name() {
        let sym1 = Symbol::new("foo");
        let sym2 = Symbol::from("foo");
        let sym3 = Symbol::new("bar");

        assert_eq!(sym1, sym2);
        assert_ne!(sym1, sym3);
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Symbol::new("x"), 1);
        assert_eq!(map.get("x"), Some(&1));
    }

    #[test]
    fn test_rest_marker() {
        assert!(Symbol::new("&").is_rest_marker());
        assert!(!Symbol::new("rest").is_rest_marker());
    }

    #[test]
    fn test_ordering() {
        assert!(Symbol::new("a") < Symbol::new("b"));
    }
}
