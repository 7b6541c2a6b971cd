// zlisp-core - Reader integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! read-string, eval and how malformed source surfaces at run time.

mod common;

use common::*;
use zlisp_parser::parse;

#[test]
fn test_read_string_returns_first_form() {
    assert_eq!(eval_print("(read-string \"(+ 1 2)\")"), "(+ 1 2)");
    assert_eq!(eval_print("(read-string \"[a :b] ignored\")"), "[a :b]");
    assert_eq!(eval_print("(read-string \"'x\")"), "(quote x)");
    assert_eq!(eval_print("(read-string \"@a\")"), "(deref a)");
}

#[test]
fn test_read_string_of_blank_input_is_nil() {
    assert_eval!("(read-string \"\")", Value::NIL);
    assert_eval!("(read-string \"  ; just a comment\")", Value::NIL);
}

#[test]
fn test_read_string_reports_malformed_source() {
    assert_eval_err_contains!("(read-string \"(1 2\")", "Unexpected end of file");
    assert!(matches!(eval_err("(read-string \"1.5\")"), Error::Read(_)));
}

#[test]
fn test_printed_forms_read_back_equal() {
    let env = new_env();
    for src in [
        "'(a [b 1] {:k \"v\"})",
        "'(nil true false)",
        "(list -5 \"s\" :kw)",
        "[]",
    ] {
        let code = format!("(let (x {}) (= x (read-string (pr-str x))))", src);
        assert_eval_with_env!(code.as_str(), Value::TRUE, &env);
    }
}

#[test]
fn test_eval_of_read_form() {
    assert_eval!("(eval (pr-str (read-string \"(* 6 7)\")))", Value::int(42));
}

#[test]
fn test_malformed_source_is_not_evaluated() {
    let env = new_env();
    let err = eval_str_with_env("(def a 1) (def b", &env).unwrap_err();
    assert!(err.contains("Expected ')'"), "{}", err);
    // Nothing from a buffer with diagnostics runs
    assert!(eval_str_with_env("a", &env).is_err());
}

#[test]
fn test_recovery_keeps_good_forms_between_bad_ones() {
    let (doc, sink) = parse("(def x ]) (+ 1 2) (def y 1.5)");
    assert_eq!(sink.len(), 2);
    let printed: Vec<String> = doc.unwrap().children.iter().map(Value::to_string).collect();
    assert_eq!(printed, vec!["(def x)", "(+ 1 2)", "(def y)"]);
}

#[test]
fn test_each_diagnostic_carries_its_line() {
    let (_, sink) = parse("(a ])\n(b 1)\n(c .)");
    let lines: Vec<usize> = sink.iter().map(|d| d.span.start.line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn test_float_literal_message() {
    assert_eval_err_contains!("1.5", "floating point literals are not supported");
}
