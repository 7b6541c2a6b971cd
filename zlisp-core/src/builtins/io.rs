// zlisp-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Printing, reading and host I/O: pr-str, str, prn, println, readline,
//! read-string, eval, slurp, time-ms

use std::io::{BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use zlisp_parser::{NativeFn, Value, parse};

use crate::env::WeakEnv;
use crate::error::{Error, Result};
use crate::eval::{eval_source, make_native_fn};

use super::{check_arity, require_str};

fn join(args: &[Value], readably: bool, sep: &str) -> String {
    args.iter()
        .map(|a| a.pr_str(readably))
        .collect::<Vec<_>>()
        .join(sep)
}

// ============================================================================
// Printing
// ============================================================================

/// (pr-str & args) - readable, space separated
pub(crate) fn builtin_pr_str(args: &[Value]) -> Result<Value> {
    Ok(Value::string(join(args, true, " ")))
}

/// (str & args) - plain, concatenated
pub(crate) fn builtin_str(args: &[Value]) -> Result<Value> {
    Ok(Value::string(join(args, false, "")))
}

/// (prn & args) - print readably with a newline
pub(crate) fn builtin_prn(args: &[Value]) -> Result<Value> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", join(args, true, " "))?;
    Ok(Value::NIL)
}

/// (println & args) - print plainly with a newline
pub(crate) fn builtin_println(args: &[Value]) -> Result<Value> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", join(args, false, " "))?;
    Ok(Value::NIL)
}

// ============================================================================
// Reading
// ============================================================================

/// (readline prompt) - a line without its terminator, nil at end of input
pub(crate) fn builtin_readline(args: &[Value]) -> Result<Value> {
    check_arity("readline", args, 1)?;
    let prompt = require_str("readline", &args[0])?;
    {
        let mut out = std::io::stdout().lock();
        write!(out, "{}", prompt)?;
        out.flush()?;
    }
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(Value::NIL);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Value::string(trimmed))
}

/// (read-string s) - the first form in s, or nil if there is none
pub(crate) fn builtin_read_string(args: &[Value]) -> Result<Value> {
    check_arity("read-string", args, 1)?;
    let text = require_str("read-string", &args[0])?;
    let (doc, sink) = parse(text);
    match doc {
        Some(doc) if sink.is_empty() => {
            Ok(doc.children.into_iter().next().unwrap_or(Value::NIL))
        }
        _ => Err(Error::Read(sink.into_vec())),
    }
}

/// The `eval` primitive. It evaluates source text in `global`, never in the
/// caller's scope.
pub(crate) fn make_eval(global: WeakEnv) -> NativeFn {
    make_native_fn("eval", move |args| {
        check_arity("eval", args, 1)?;
        let text = match &args[0] {
            Value::String(s, _) if !args[0].is_keyword() => s.clone(),
            other => {
                return Err(Error::type_error_in("eval", "string", other.type_name()));
            }
        };
        let env = global
            .upgrade()
            .ok_or_else(|| Error::Internal("global environment has been dropped".into()))?;
        eval_source(&text, &env)
    })
}

// ============================================================================
// Host
// ============================================================================

/// (slurp path) - file contents as a string
pub(crate) fn builtin_slurp(args: &[Value]) -> Result<Value> {
    check_arity("slurp", args, 1)?;
    let path = require_str("slurp", &args[0])?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("slurp '{}': {}", path, e)))?;
    Ok(Value::string(text))
}

/// (time-ms) - wall-clock milliseconds since the Unix epoch
pub(crate) fn builtin_time_ms(args: &[Value]) -> Result<Value> {
    check_arity("time-ms", args, 0)?;
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Io(e.to_string()))?;
    i64::try_from(elapsed.as_millis())
        .map(Value::int)
        .map_err(|_| Error::Overflow("time-ms"))
}
