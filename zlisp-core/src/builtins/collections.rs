// zlisp-core - Collection built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Constructors and map operations: symbol, keyword, list, vector,
//! hash-map, vec, assoc, dissoc, get, contains?, keys, vals
//!
//! Maps are persistent, so `assoc` and `dissoc` return a modified copy and
//! leave their argument untouched.

use zlisp_parser::{Map, Symbol, Value};

use crate::error::{Error, Result};

use super::{check_arity, map_key, require_seq, require_str};

// ============================================================================
// Constructors
// ============================================================================

/// (symbol "name")
pub(crate) fn builtin_symbol(args: &[Value]) -> Result<Value> {
    check_arity("symbol", args, 1)?;
    let name = require_str("symbol", &args[0])?;
    Ok(Value::Symbol(Symbol::new(name), None))
}

/// (keyword "name") - keywords pass through unchanged
pub(crate) fn builtin_keyword(args: &[Value]) -> Result<Value> {
    check_arity("keyword", args, 1)?;
    if args[0].is_keyword() {
        return Ok(args[0].clone());
    }
    let name = require_str("keyword", &args[0])?;
    Ok(Value::keyword(name))
}

pub(crate) fn builtin_list(args: &[Value]) -> Result<Value> {
    Ok(Value::list(args.to_vec()))
}

pub(crate) fn builtin_vector(args: &[Value]) -> Result<Value> {
    Ok(Value::vector(args.to_vec()))
}

/// (hash-map k v ...)
pub(crate) fn builtin_hash_map(args: &[Value]) -> Result<Value> {
    let mut map = Map::new();
    insert_pairs("hash-map", &mut map, args)?;
    Ok(Value::hash_map(map))
}

/// (vec coll) - list or vector to vector
pub(crate) fn builtin_vec(args: &[Value]) -> Result<Value> {
    check_arity("vec", args, 1)?;
    Ok(Value::vector_from(require_seq("vec", &args[0])?))
}

// ============================================================================
// Maps
// ============================================================================

fn require_map(name: &'static str, val: &Value) -> Result<Map> {
    match val {
        Value::HashMap(map, _) => Ok(map.clone()),
        v if v.is_nil() => Ok(Map::new()),
        other => Err(Error::type_error_in(name, "map", other.type_name())),
    }
}

fn insert_pairs(name: &'static str, map: &mut Map, kvs: &[Value]) -> Result<()> {
    if kvs.len() % 2 != 0 {
        return Err(Error::syntax(name, "expects an even number of key/value forms"));
    }
    for pair in kvs.chunks(2) {
        map.insert(map_key(name, &pair[0])?, pair[1].clone());
    }
    Ok(())
}

/// (assoc map k v ...)
pub(crate) fn builtin_assoc(args: &[Value]) -> Result<Value> {
    let Some((map, kvs)) = args.split_first() else {
        return Err(Error::arity_at_least("assoc", 1, 0));
    };
    let mut map = require_map("assoc", map)?;
    insert_pairs("assoc", &mut map, kvs)?;
    Ok(Value::hash_map(map))
}

/// (dissoc map k ...)
pub(crate) fn builtin_dissoc(args: &[Value]) -> Result<Value> {
    let Some((map, keys)) = args.split_first() else {
        return Err(Error::arity_at_least("dissoc", 1, 0));
    };
    let mut map = require_map("dissoc", map)?;
    for key in keys {
        map.remove(&map_key("dissoc", key)?);
    }
    Ok(Value::hash_map(map))
}

/// (get map k) - nil for a missing key or a nil map
pub(crate) fn builtin_get(args: &[Value]) -> Result<Value> {
    check_arity("get", args, 2)?;
    let map = require_map("get", &args[0])?;
    let key = map_key("get", &args[1])?;
    Ok(map.get(&key).cloned().unwrap_or(Value::NIL))
}

/// (contains? map k)
pub(crate) fn builtin_contains_p(args: &[Value]) -> Result<Value> {
    check_arity("contains?", args, 2)?;
    let map = require_map("contains?", &args[0])?;
    let key = map_key("contains?", &args[1])?;
    Ok(Value::bool(map.contains_key(&key)))
}

pub(crate) fn builtin_keys(args: &[Value]) -> Result<Value> {
    check_arity("keys", args, 1)?;
    let map = require_map("keys", &args[0])?;
    Ok(Value::list(
        map.keys().map(|k| Value::string(k.clone())).collect(),
    ))
}

pub(crate) fn builtin_vals(args: &[Value]) -> Result<Value> {
    check_arity("vals", args, 1)?;
    let map = require_map("vals", &args[0])?;
    Ok(Value::list(map.values().cloned().collect()))
}
