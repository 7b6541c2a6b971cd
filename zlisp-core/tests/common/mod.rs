// zlisp-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for zLisp integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! Every helper evaluates in an environment with the primitive table and
//! the bootstrap prelude installed, and reports errors as their message.

#![allow(dead_code)]

pub use zlisp_core::{Env, Error, Value, eval_source, global_env};

/// Evaluate source text in a fresh global environment.
#[must_use]
pub fn eval_str(s: &str) -> Result<Value, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate source text in the given environment.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<Value, String> {
    eval_source(s, env).map_err(|e| e.to_string())
}

/// Evaluate several pieces of source in one environment, returning the
/// value of the last.
#[must_use]
pub fn eval_all(srcs: &[&str], env: &Env) -> Result<Value, String> {
    let mut result = Value::NIL;
    for s in srcs {
        result = eval_str_with_env(s, env)?;
    }
    Ok(result)
}

/// Evaluate and keep the typed error.
pub fn eval_err(s: &str) -> Error {
    match eval_source(s, &new_env()) {
        Ok(v) => panic!("Expected error for '{}' but got {}", s, v),
        Err(e) => e,
    }
}

/// Create a new global environment.
///
/// # Panics
///
/// Panics if the prelude fails to load.
#[must_use]
pub fn new_env() -> Env {
    global_env().expect("prelude should load")
}

/// Printed (readable) form of the value `s` evaluates to.
#[must_use]
pub fn eval_print(s: &str) -> String {
    match eval_str(s) {
        Ok(v) => v.to_string(),
        Err(e) => panic!("Failed to evaluate '{}': {}", s, e),
    }
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", Value::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` produces an error containing `pattern`,
/// compared case-insensitively.
///
/// # Example
///
/// ```ignore
/// assert_eval_err_contains!("(/ 1 0)", "division by zero");
/// ```
#[macro_export]
macro_rules! assert_eval_err_contains {
    ($input:expr, $pattern:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.to_lowercase().contains(&$pattern.to_lowercase()),
            "Error message '{}' does not contain '{}'",
            err_msg,
            $pattern
        );
    };
}

/// Assert evaluation against a shared environment.
#[macro_export]
macro_rules! assert_eval_with_env {
    ($input:expr, $expected:expr, $env:expr) => {
        let result = $crate::common::eval_str_with_env($input, $env);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}
