// zlisp-core - Error message integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The text users see when evaluation fails, and the typed error behind it.

mod common;

use common::*;

// =============================================================================
// Messages
// =============================================================================

#[test]
fn test_unbound_symbol_message() {
    let err = eval_str("undefined-thing").unwrap_err();
    assert_eq!(err, "'undefined-thing' not found");
}

#[test]
fn test_arity_message_names_the_function() {
    let err = eval_str("(cons 1)").unwrap_err();
    assert_eq!(err, "Wrong number of arguments to 'cons': expected 2, got 1");
}

#[test]
fn test_type_message_names_the_context() {
    let err = eval_str("(+ 1 \"two\")").unwrap_err();
    assert_eq!(err, "+: expected integer, got string");
    assert_eval_err_contains!("(first 5)", "first: expected list or vector");
}

#[test]
fn test_division_by_zero_message() {
    assert_eq!(eval_str("(/ 7 0)").unwrap_err(), "Division by zero");
}

#[test]
fn test_overflow_message() {
    assert_eq!(
        eval_str("(+ 9223372036854775807 1)").unwrap_err(),
        "Integer overflow in '+'"
    );
    assert_eval_err_contains!("(* 4611686018427387904 2)", "overflow in '*'");
    assert_eval_err_contains!("(- -9223372036854775807 2)", "overflow in '-'");
}

#[test]
fn test_nth_out_of_range_message() {
    assert_eq!(
        eval_str("(nth [1 2] 5)").unwrap_err(),
        "Index 5 out of bounds for collection of length 2"
    );
    assert_eval_err_contains!("(nth '(1) -1)", "out of bounds");
}

#[test]
fn test_thrown_value_message_is_plain_text() {
    assert_eq!(eval_str("(throw \"boom\")").unwrap_err(), "boom");
    assert_eq!(eval_str("(throw {:code 1})").unwrap_err(), "{:code 1}");
}

#[test]
fn test_syntax_message() {
    assert_eval_err_contains!("(def)", "Invalid 'def' syntax");
}

// =============================================================================
// Typed errors
// =============================================================================

#[test]
fn test_thrown_keeps_the_value() {
    match eval_err("(throw [1 2])") {
        Error::Thrown(v) => assert_eq!(v.to_string(), "[1 2]"),
        other => panic!("expected a thrown value, got {:?}", other),
    }
}

#[test]
fn test_error_variants() {
    assert!(matches!(eval_err("nope"), Error::UnboundSymbol(_)));
    assert!(matches!(eval_err("(/ 1 0)"), Error::DivisionByZero));
    assert!(matches!(eval_err("(1)"), Error::NotCallable(_)));
    assert!(matches!(eval_err("(count 1)"), Error::TypeError { .. }));
    assert!(matches!(eval_err("(nth [] 0)"), Error::IndexOutOfBounds { .. }));
    assert!(matches!(eval_err("(slurp \"/no/such/path\")"), Error::Io(_)));
    assert!(matches!(eval_err("(1"), Error::Read(_)));
}

#[test]
fn test_error_stops_the_rest_of_the_buffer() {
    let env = new_env();
    assert!(eval_str_with_env("(def a 1) (car a) (def b 2)", &env).is_err());
    assert_eval_with_env!("a", Value::int(1), &env);
    assert!(eval_str_with_env("b", &env).is_err());
}

#[test]
fn test_errors_inside_functions_propagate() {
    let env = new_env();
    eval_str_with_env("(def f (fn (x) (+ x (g x))))", &env).unwrap();
    assert_eq!(eval_str_with_env("(f 1)", &env).unwrap_err(), "'g' not found");
    // The environment is still usable afterwards
    eval_str_with_env("(def g (fn (x) x))", &env).unwrap();
    assert_eval_with_env!("(f 1)", Value::int(2), &env);
}
