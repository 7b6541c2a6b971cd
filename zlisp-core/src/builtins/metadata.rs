// zlisp-core - Metadata built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Metadata operations: meta, with-meta

use zlisp_parser::Value;

use crate::error::Result;

use super::check_arity;

/// (meta obj) - the metadata of obj, or nil if there is none
pub(crate) fn builtin_meta(args: &[Value]) -> Result<Value> {
    check_arity("meta", args, 1)?;
    Ok(args[0].meta())
}

/// (with-meta obj m) - a copy of obj carrying m; obj itself is unchanged
pub(crate) fn builtin_with_meta(args: &[Value]) -> Result<Value> {
    check_arity("with-meta", args, 2)?;
    Ok(args[0].with_meta(args[1].clone()))
}
