// zlisp-core - Macro expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use zlisp_parser::{Closure, Function, Value};

use super::apply::apply_closure;
use crate::env::Env;
use crate::error::Result;

/// The macro closure a form would call, if its head names one.
fn macro_for(ast: &Value, env: &Env) -> Option<std::rc::Rc<Closure>> {
    let head = ast.as_list()?.head()?;
    let sym = head.as_symbol()?;
    match env.lookup(sym)? {
        Value::Function(Function::Closure(closure), _) if closure.is_macro() => Some(closure),
        _ => None,
    }
}

/// True if `ast` is a list whose head symbol is bound to a macro.
pub fn is_macro_call(ast: &Value, env: &Env) -> bool {
    macro_for(ast, env).is_some()
}

/// Expand macro calls at the head of `ast` until it is no longer one.
///
/// The macro receives its operands unevaluated and the result replaces the
/// form. The head is looked up again after each step, so a macro may expand
/// into a call of another macro.
pub fn macroexpand(mut ast: Value, env: &Env) -> Result<Value> {
    while let Some(closure) = macro_for(&ast, env) {
        let args: Vec<Value> = ast
            .as_list()
            .map(|items| items.iter().skip(1).cloned().collect())
            .unwrap_or_default();
        let expanded = apply_closure(&closure, &args)?;
        log::trace!("macroexpand {} => {}", ast, expanded);
        ast = expanded;
    }
    Ok(ast)
}
