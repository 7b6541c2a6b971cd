// zlisp-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for zLisp.

use std::any::Any;
use std::rc::Rc;

use zlisp_parser::{Closure, Function, NativeFn, Value};

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[Value]) -> Result<Value>;

/// Apply a function to already-evaluated arguments.
///
/// Used by primitives that call back into user code (`apply`, `map`,
/// `swap!`) and by macro expansion.
pub fn apply(func: &Value, args: &[Value]) -> Result<Value> {
    match func {
        Value::Function(Function::Native(native), _) => apply_native(native, args),
        Value::Function(Function::Closure(closure), _) => apply_closure(closure, args),
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// Call a closure, evaluating its body to completion.
pub(crate) fn apply_closure(closure: &Closure, args: &[Value]) -> Result<Value> {
    let fn_env = closure_env(closure, args)?;
    eval(&closure.body, &fn_env)
}

/// The scope a closure body runs in: a child of the captured environment
/// with parameters bound to `args`.
pub(crate) fn closure_env(closure: &Closure, args: &[Value]) -> Result<Env> {
    let captured = closure
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::Internal("Function environment has invalid type".into()))?;
    Ok(Env::from_params(captured, &closure.params, args))
}

/// Apply a native function.
pub(crate) fn apply_native(func: &NativeFn, args: &[Value]) -> Result<Value> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::Internal("Native function has invalid type".into()))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[Value]) -> Result<Value> + 'static,
) -> NativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    NativeFn::new(name, func_any)
}
