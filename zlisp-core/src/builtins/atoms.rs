// zlisp-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, deref, reset!, swap!

use zlisp_parser::{Atom, Value};

use crate::error::{Error, Result};
use crate::eval::apply;

use super::check_arity;

fn require_atom<'a>(name: &'static str, val: &'a Value) -> Result<&'a Atom> {
    match val {
        Value::Atom(atom, _) => Ok(atom),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[Value]) -> Result<Value> {
    check_arity("atom", args, 1)?;
    Ok(Value::atom(args[0].clone()))
}

/// (deref atom) - also written @atom
pub(crate) fn builtin_deref(args: &[Value]) -> Result<Value> {
    check_arity("deref", args, 1)?;
    Ok(require_atom("deref", &args[0])?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[Value]) -> Result<Value> {
    check_arity("reset!", args, 2)?;
    Ok(require_atom("reset!", &args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - set to (f current args...), returns the new value
pub(crate) fn builtin_swap(args: &[Value]) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::arity_at_least("swap!", 2, args.len()));
    }
    let atom = require_atom("swap!", &args[0])?;
    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend(args[2..].iter().cloned());
    let new_val = apply(&args[1], &call_args)?;
    Ok(atom.reset(new_val))
}
