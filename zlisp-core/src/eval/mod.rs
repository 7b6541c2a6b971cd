// zlisp-core - Trampolined evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tree-walking evaluator for zLisp forms.
//!
//! [`eval`] runs a loop over an `(ast, env)` pair. Special forms and closure
//! application hand back a [`Tail`]; a [`Tail::Eval`] replaces the pair and
//! goes round the loop again instead of recursing, so every tail position
//! (both `if` branches, `let` and closure bodies, the last form of `do`, the
//! expansion of `quasiquote`) runs in constant host stack. Only argument and
//! sub-expression evaluation recurses.

pub mod apply;
pub mod macros;
pub mod quasiquote;
mod special_forms;

pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use macros::{is_macro_call, macroexpand};
pub use quasiquote::quasiquote;

use std::cell::Cell;

use zlisp_parser::{Function, Map, Value, Vector, parse};

use crate::env::Env;
use crate::error::{Error, Result};

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum nesting of non-tail evaluation. Can be configured via
/// `set_max_eval_depth`.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

/// Host stack for a thread running zLisp. At the default depth limit the
/// guard trips well before this runs out, unoptimised builds included.
pub const EVAL_STACK_SIZE: usize = 1024 * 1024 * 1024;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Run `f` on a new thread with an [`EVAL_STACK_SIZE`] stack and wait for it.
///
/// The depth limit is per thread, so `f` starts at
/// [`DEFAULT_MAX_EVAL_DEPTH`]. A panic in `f` resumes on the caller.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn with_eval_stack<F, R>(f: F) -> std::io::Result<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let handle = std::thread::Builder::new()
        .name("zlisp-eval".into())
        .stack_size(EVAL_STACK_SIZE)
        .spawn(f)?;
    match handle.join() {
        Ok(result) => Ok(result),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// RAII guard to manage eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::StackOverflow(max))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// What a special form or application leaves for the loop to do.
pub(crate) enum Tail {
    /// Finished with a value.
    Return(Value),
    /// Continue with this form in this environment.
    Eval(Value, Env),
}

/// Evaluate a zLisp form in the given environment.
///
/// # Examples
///
/// ```
/// use zlisp_core::{Env, eval, register_builtins};
/// use zlisp_parser::{Value, parse};
///
/// let env = Env::new();
/// register_builtins(&env);
///
/// let (doc, _) = parse("(* 6 (+ 3 4))");
/// let form = &doc.unwrap().children[0];
/// assert_eq!(eval(form, &env).unwrap(), Value::int(42));
/// ```
///
/// # Errors
///
/// Returns an error if a symbol is unbound, a special form is malformed, a
/// primitive rejects its arguments, a non-function is applied, or non-tail
/// nesting exceeds [`get_max_eval_depth`].
pub fn eval(expr: &Value, env: &Env) -> Result<Value> {
    let _guard = EvalDepthGuard::new()?;

    let mut ast = expr.clone();
    let mut env = env.clone();

    loop {
        if !matches!(ast, Value::List(..)) {
            return eval_ast(&ast, &env);
        }

        ast = macroexpand(ast, &env)?;
        let items = match &ast {
            Value::List(items, _) => items.clone(),
            _ => return eval_ast(&ast, &env),
        };
        if items.is_empty() {
            return Ok(ast);
        }

        let args: Vec<Value> = items.iter().skip(1).cloned().collect();
        let head = items[0].as_symbol().map(|s| s.name()).unwrap_or("");
        let tail = match head {
            "def" => special_forms::eval_def(&args, &env)?,
            "let" => special_forms::eval_let(&args, &env)?,
            "fn" => special_forms::eval_fn(&args, &env)?,
            "quote" => special_forms::eval_quote(&args)?,
            "quasiquote" => special_forms::eval_quasiquote(&args, &env)?,
            "quasiquoteexpand" => special_forms::eval_quasiquoteexpand(&args)?,
            "defmacro" => special_forms::eval_defmacro(&args, &env)?,
            "macroexpand" => special_forms::eval_macroexpand(&args, &env)?,
            "do" => special_forms::eval_do(&args, &env)?,
            "if" => special_forms::eval_if(&args, &env)?,
            _ => eval_application(&items, &env)?,
        };

        match tail {
            Tail::Return(value) => return Ok(value),
            Tail::Eval(next, next_env) => {
                log::trace!("tail-continue ({}) into {}", head, next.type_name());
                ast = next;
                env = next_env;
            }
        }
    }
}

/// Evaluate a non-list form: symbols resolve, vectors and maps evaluate their
/// elements, everything else evaluates to itself.
fn eval_ast(ast: &Value, env: &Env) -> Result<Value> {
    match ast {
        Value::Symbol(sym, _) => env.get(sym),
        Value::List(items, _) => Ok(Value::list_from(eval_each(items, env)?)),
        Value::Vector(items, _) => Ok(Value::vector_from(eval_each(items, env)?)),
        Value::HashMap(map, _) => {
            let mut result = Map::new();
            for (k, v) in map.iter() {
                result.insert(k.clone(), eval(v, env)?);
            }
            Ok(Value::hash_map(result))
        }
        _ => Ok(ast.clone()),
    }
}

fn eval_each(items: &Vector<Value>, env: &Env) -> Result<Vector<Value>> {
    items.iter().map(|item| eval(item, env)).collect()
}

/// Ordinary application: evaluate head and arguments, then call.
fn eval_application(items: &Vector<Value>, env: &Env) -> Result<Tail> {
    let evaluated = eval_each(items, env)?;
    let mut evaluated = evaluated.into_iter();
    let head = evaluated.next().unwrap_or(Value::NIL);
    let args: Vec<Value> = evaluated.collect();

    match &head {
        Value::Function(Function::Native(native), _) => {
            Ok(Tail::Return(apply::apply_native(native, &args)?))
        }
        Value::Function(Function::Closure(closure), _) => {
            let fn_env = apply::closure_env(closure, &args)?;
            Ok(Tail::Eval(closure.body.clone(), fn_env))
        }
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// Evaluate every form in `forms`, returning the last value, or nil if there
/// are none.
pub fn eval_forms(forms: &[Value], env: &Env) -> Result<Value> {
    let mut result = Value::NIL;
    for form in forms {
        result = eval(form, env)?;
    }
    Ok(result)
}

/// Parse and evaluate source text.
///
/// # Errors
///
/// Any parse diagnostic becomes [`Error::Read`] and nothing is evaluated.
pub fn eval_source(text: &str, env: &Env) -> Result<Value> {
    let (doc, sink) = parse(text);
    match doc {
        Some(doc) if sink.is_empty() => eval_forms(&doc.children, env),
        _ => Err(Error::Read(sink.into_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn env() -> Env {
        let env = Env::new();
        register_builtins(&env);
        env
    }

    fn run(src: &str) -> Result<Value> {
        eval_source(src, &env())
    }

    #[test]
    fn test_self_evaluating() {
        assert_eq!(run("42").unwrap(), Value::int(42));
        assert_eq!(run("\"s\"").unwrap(), Value::string("s"));
        assert_eq!(run(":k").unwrap(), Value::keyword("k"));
        assert_eq!(run("nil").unwrap(), Value::NIL);
        assert_eq!(run("").unwrap(), Value::NIL);
    }

    #[test]
    fn test_empty_list_is_self_quoting() {
        assert_eq!(run("()").unwrap(), Value::list(vec![]));
    }

    #[test]
    fn test_vector_and_map_elements_evaluate() {
        assert_eq!(
            run("[(+ 1 1) 3]").unwrap(),
            Value::vector(vec![Value::int(2), Value::int(3)])
        );
        assert_eq!(run("{\"a\" (+ 1 1)}").unwrap().to_string(), "{\"a\" 2}");
    }

    #[test]
    fn test_unbound_symbol() {
        let err = run("nope").unwrap_err();
        assert_eq!(err.to_string(), "'nope' not found");
    }

    #[test]
    fn test_not_callable() {
        assert!(matches!(run("(1 2)"), Err(Error::NotCallable(_))));
        assert!(matches!(run("(() 1)"), Err(Error::NotCallable(_))));
    }

    #[test]
    fn test_parse_errors_become_read_errors() {
        assert!(matches!(run("(+ 1"), Err(Error::Read(_))));
        assert!(matches!(run("\"open"), Err(Error::Read(_))));
    }

    #[test]
    fn test_tail_calls_do_not_count_toward_depth() {
        let env = env();
        let previous = set_max_eval_depth(50);
        eval_source(
            "(def count-down (fn (n) (if (= n 0) :done (do n (count-down (- n 1))))))",
            &env,
        )
        .unwrap();
        let result = eval_source("(count-down 5000)", &env);
        set_max_eval_depth(previous);
        assert_eq!(result.unwrap(), Value::keyword("done"));
    }

    #[test]
    fn test_default_depth_limit_fits_the_eval_stack() {
        let (shallow, deep) = with_eval_stack(|| {
            let env = env();
            eval_source("(def sum (fn (n) (if (= n 0) 0 (+ n (sum (- n 1))))))", &env).unwrap();
            let shallow = eval_source("(sum 900)", &env);
            let deep = eval_source("(sum 50000)", &env);
            (
                shallow.map(|v| v.to_string()).map_err(|e| e.to_string()),
                deep.map(|v| v.to_string()).map_err(|e| e.to_string()),
            )
        })
        .unwrap();
        assert_eq!(shallow.unwrap(), "405450");
        assert_eq!(
            deep.unwrap_err(),
            Error::StackOverflow(DEFAULT_MAX_EVAL_DEPTH).to_string()
        );
    }

    #[test]
    fn test_depth_guard() {
        let env = env();
        let previous = set_max_eval_depth(50);
        eval_source("(def deep (fn (n) (if (= n 0) 0 (+ 1 (deep (- n 1))))))", &env).unwrap();
        assert_eq!(eval_source("(deep 10)", &env).unwrap(), Value::int(10));
        let err = eval_source("(deep 100)", &env).unwrap_err();
        assert!(matches!(err, Error::StackOverflow(50)));
        set_max_eval_depth(previous);
        // The counter unwinds with the error
        assert_eq!(eval_source("(deep 10)", &env).unwrap(), Value::int(10));
    }
}
