// zlisp-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: cons, concat, nth, first, rest, count, conj, seq,
//! empty?

use zlisp_parser::{Value, Vector};

use crate::error::{Error, Result};

use super::{check_arity, require_int, require_seq};

/// (cons x seq) - always a list
pub(crate) fn builtin_cons(args: &[Value]) -> Result<Value> {
    check_arity("cons", args, 2)?;
    let mut items = require_seq("cons", &args[1])?;
    items.push_front(args[0].clone());
    Ok(Value::list_from(items))
}

/// (concat & xs) - sequences are spliced, anything else is one element
pub(crate) fn builtin_concat(args: &[Value]) -> Result<Value> {
    let mut items = Vector::new();
    for arg in args {
        match arg.as_seq() {
            Some(seq) => items.append(seq.clone()),
            None => items.push_back(arg.clone()),
        }
    }
    Ok(Value::list_from(items))
}

/// (nth coll index)
pub(crate) fn builtin_nth(args: &[Value]) -> Result<Value> {
    check_arity("nth", args, 2)?;
    let items = args[0]
        .as_seq()
        .ok_or_else(|| Error::type_error_in("nth", "list or vector", args[0].type_name()))?;
    let index = require_int("nth", &args[1])?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or(Error::IndexOutOfBounds {
            index,
            length: items.len(),
        })
}

/// (first coll) - nil for nil or an empty collection
pub(crate) fn builtin_first(args: &[Value]) -> Result<Value> {
    check_arity("first", args, 1)?;
    let items = require_seq("first", &args[0])?;
    Ok(items.front().cloned().unwrap_or(Value::NIL))
}

/// (rest coll) - always a list, empty for nil
pub(crate) fn builtin_rest(args: &[Value]) -> Result<Value> {
    check_arity("rest", args, 1)?;
    let items = require_seq("rest", &args[0])?;
    Ok(Value::list_from(items.iter().skip(1).cloned().collect()))
}

/// (count coll) - nil counts as 0
pub(crate) fn builtin_count(args: &[Value]) -> Result<Value> {
    check_arity("count", args, 1)?;
    let len = match &args[0] {
        Value::HashMap(map, _) => map.len(),
        other => require_seq("count", other)?.len(),
    };
    i64::try_from(len)
        .map(Value::int)
        .map_err(|_| Error::Overflow("count"))
}

pub(crate) fn builtin_empty_p(args: &[Value]) -> Result<Value> {
    check_arity("empty?", args, 1)?;
    let empty = match &args[0] {
        Value::HashMap(map, _) => map.is_empty(),
        other => require_seq("empty?", other)?.is_empty(),
    };
    Ok(Value::bool(empty))
}

/// (conj coll & xs) - lists grow at the front, vectors at the back
pub(crate) fn builtin_conj(args: &[Value]) -> Result<Value> {
    let Some((coll, xs)) = args.split_first() else {
        return Err(Error::arity_at_least("conj", 1, 0));
    };
    match coll {
        Value::Vector(items, _) => {
            let mut items = items.clone();
            items.extend(xs.iter().cloned());
            Ok(Value::vector_from(items))
        }
        other => {
            let mut items = require_seq("conj", other)?;
            for x in xs {
                items.push_front(x.clone());
            }
            Ok(Value::list_from(items))
        }
    }
}

/// (seq coll) - a list, or nil when empty. Strings split into characters.
pub(crate) fn builtin_seq(args: &[Value]) -> Result<Value> {
    check_arity("seq", args, 1)?;
    let items: Vector<Value> = match &args[0] {
        Value::String(s, _) if !args[0].is_keyword() => s
            .chars()
            .map(|c| Value::string(c.to_string()))
            .collect(),
        other => require_seq("seq", other)?,
    };
    if items.is_empty() {
        Ok(Value::NIL)
    } else {
        Ok(Value::list_from(items))
    }
}
