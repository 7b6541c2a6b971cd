// zlisp-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The primitive table installed into the global environment.

mod arithmetic;
mod atoms;
mod collections;
mod comparison;
mod exceptions;
mod higher_order;
mod io;
mod metadata;
mod predicates;
mod sequences;

use std::rc::Rc;

use zlisp_parser::{Symbol, Value};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_deref, builtin_reset, builtin_swap};
use collections::{
    builtin_assoc, builtin_contains_p, builtin_dissoc, builtin_get, builtin_hash_map,
    builtin_keys, builtin_keyword, builtin_list, builtin_symbol, builtin_vals, builtin_vec,
    builtin_vector,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use exceptions::builtin_throw;
use higher_order::{builtin_apply, builtin_map};
use io::{
    builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_readline,
    builtin_slurp, builtin_str, builtin_time_ms, make_eval,
};
use metadata::{builtin_meta, builtin_with_meta};
use predicates::{
    builtin_atom_p, builtin_false_p, builtin_fn_p, builtin_keyword_p, builtin_list_p,
    builtin_macro_p, builtin_map_p, builtin_nil_p, builtin_number_p, builtin_sequential_p,
    builtin_string_p, builtin_symbol_p, builtin_true_p, builtin_vector_p,
};
use sequences::{
    builtin_concat, builtin_conj, builtin_cons, builtin_count, builtin_empty_p, builtin_first,
    builtin_nth, builtin_rest, builtin_seq,
};

/// Register all built-in functions in the given environment.
///
/// `eval` is bound to a primitive that evaluates source text in `env`
/// itself, which is meant to be the global environment.
pub fn register_builtins(env: &Env) {
    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native("<=", builtin_le);
    env.define_native(">", builtin_gt);
    env.define_native(">=", builtin_ge);

    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Predicates
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("macro?", builtin_macro_p);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("map?", builtin_map_p);
    env.define_native("sequential?", builtin_sequential_p);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("contains?", builtin_contains_p);

    // Constructors
    env.define_native("symbol", builtin_symbol);
    env.define_native("keyword", builtin_keyword);
    env.define_native("list", builtin_list);
    env.define_native("vector", builtin_vector);
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("vec", builtin_vec);
    env.define_native("atom", builtin_atom);

    // Printing and reading
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("str", builtin_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);
    env.define_native("readline", builtin_readline);
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);
    env.define_native("time-ms", builtin_time_ms);
    env.set(
        Symbol::new("eval"),
        Value::native(make_eval(env.downgrade())),
    );

    // Sequences
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("nth", builtin_nth);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("count", builtin_count);
    env.define_native("conj", builtin_conj);
    env.define_native("seq", builtin_seq);
    env.define_native("apply", builtin_apply);
    env.define_native("map", builtin_map);

    // Maps
    env.define_native("assoc", builtin_assoc);
    env.define_native("dissoc", builtin_dissoc);
    env.define_native("get", builtin_get);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);

    // Metadata
    env.define_native("meta", builtin_meta);
    env.define_native("with-meta", builtin_with_meta);

    // Atoms
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Errors
    env.define_native("throw", builtin_throw);
}

/// Helper trait to define native functions more easily.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[Value]) -> Result<Value>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[Value]) -> Result<Value>) {
        let native = make_native_fn(name, func);
        self.set(Symbol::new(name), Value::native(native));
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

pub(crate) fn check_arity(name: &'static str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::arity_named(name, expected, args.len()));
    }
    Ok(())
}

pub(crate) fn require_int(name: &'static str, val: &Value) -> Result<i64> {
    val.as_int()
        .ok_or_else(|| Error::type_error_in(name, "integer", val.type_name()))
}

/// A plain string or keyword, as raw text.
pub(crate) fn require_str<'a>(name: &'static str, val: &'a Value) -> Result<&'a str> {
    val.as_str()
        .ok_or_else(|| Error::type_error_in(name, "string", val.type_name()))
}

/// Map keys are the raw text of strings and keywords.
pub(crate) fn map_key(name: &'static str, val: &Value) -> Result<Rc<str>> {
    match val {
        Value::String(s, _) => Ok(s.clone()),
        other => Err(Error::type_error_in(
            name,
            "string or keyword",
            other.type_name(),
        )),
    }
}

/// Elements of a list or vector; `nil` is empty.
pub(crate) fn require_seq(name: &'static str, val: &Value) -> Result<zlisp_parser::Vector<Value>> {
    match val {
        Value::List(items, _) | Value::Vector(items, _) => Ok(items.clone()),
        v if v.is_nil() => Ok(zlisp_parser::Vector::new()),
        other => Err(Error::type_error_in(name, "list or vector", other.type_name())),
    }
}
