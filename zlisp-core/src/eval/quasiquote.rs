// zlisp-core - Quasiquote expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Rewrites a quasiquoted form into ordinary code built from `cons`,
//! `concat`, `vec` and `quote`. Evaluating the rewrite rebuilds the form
//! with its unquoted parts substituted.

use zlisp_parser::{Value, Vector};

/// Expand the body of a `quasiquote` form.
///
/// # Examples
///
/// ```
/// use zlisp_core::quasiquote;
/// use zlisp_parser::parse;
///
/// let (doc, _) = parse("(a (unquote b))");
/// let expanded = quasiquote(&doc.unwrap().children[0]);
/// assert_eq!(expanded.to_string(), "(cons (quote a) (cons b ()))");
/// ```
pub fn quasiquote(ast: &Value) -> Value {
    match ast {
        Value::List(items, _) => {
            if let Some(inner) = unwrap_call(items, "unquote") {
                inner.clone()
            } else {
                expand_seq(items)
            }
        }
        Value::Vector(items, _) => call("vec", vec![expand_seq(items)]),
        Value::HashMap(..) | Value::Symbol(..) => call("quote", vec![ast.clone()]),
        _ => ast.clone(),
    }
}

/// Fold the elements from the right so the accumulator always stands for
/// the rest of the sequence.
fn expand_seq(items: &Vector<Value>) -> Value {
    items.iter().rev().fold(Value::list(vec![]), |acc, elt| {
        match elt.as_list().and_then(|inner| unwrap_call(inner, "splice-unquote")) {
            Some(spliced) => call("concat", vec![spliced.clone(), acc]),
            None => call("cons", vec![quasiquote(elt), acc]),
        }
    })
}

/// The operand of `(name x)`, when `items` is exactly that shape.
fn unwrap_call<'a>(items: &'a Vector<Value>, name: &str) -> Option<&'a Value> {
    match (items.len(), items.head()) {
        (2, Some(head)) if head.is_symbol_named(name) => items.get(1),
        _ => None,
    }
}

fn call(name: &str, args: Vec<Value>) -> Value {
    let mut items = Vec::with_capacity(args.len() + 1);
    items.push(Value::symbol(name));
    items.extend(args);
    Value::list(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(src: &str) -> Value {
        let (doc, _) = zlisp_parser::parse(src);
        doc.unwrap().children[0].clone()
    }

    fn expand(src: &str) -> String {
        quasiquote(&read(src)).to_string()
    }

    #[test]
    fn test_self_evaluating_unchanged() {
        assert_eq!(expand("1"), "1");
        assert_eq!(expand("\"s\""), "\"s\"");
        assert_eq!(expand(":k"), ":k");
        assert_eq!(expand("nil"), "nil");
    }

    #[test]
    fn test_symbols_and_maps_are_quoted() {
        assert_eq!(expand("x"), "(quote x)");
        assert_eq!(expand("{\"a\" 1}"), "(quote {\"a\" 1})");
    }

    #[test]
    fn test_unquote_removes_one_level() {
        assert_eq!(expand("~x"), "x");
        assert_eq!(expand("~(+ 1 2)"), "(+ 1 2)");
    }

    #[test]
    fn test_list_builds_cons_chain() {
        assert_eq!(expand("()"), "()");
        assert_eq!(
            expand("(1 ~x)"),
            "(cons 1 (cons x ()))"
        );
    }

    #[test]
    fn test_splice_uses_concat() {
        assert_eq!(
            expand("(1 ~@xs 4)"),
            "(cons 1 (concat xs (cons 4 ())))"
        );
    }

    #[test]
    fn test_vector_rebuilt_with_vec() {
        assert_eq!(expand("[a ~b]"), "(vec (cons (quote a) (cons b ())))");
    }

    #[test]
    fn test_nested_lists_recurse() {
        assert_eq!(
            expand("((a) ~b)"),
            "(cons (cons (quote a) ()) (cons b ()))"
        );
    }

    #[test]
    fn test_malformed_unquote_is_an_ordinary_list() {
        // (unquote a b) is not the two-element shape
        assert_eq!(
            expand("(unquote a b)"),
            "(cons (quote unquote) (cons (quote a) (cons (quote b) ())))"
        );
    }
}
