// zlisp-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Special forms. Each receives its unevaluated operands and returns a
//! [`Tail`] so that tail positions continue in the evaluator loop.

use std::any::Any;
use std::rc::Rc;

use zlisp_parser::{Closure, Function, Symbol, Value};

use super::{Tail, eval, macroexpand, quasiquote};
use crate::env::Env;
use crate::error::{Error, Result};

/// (def name value) - bind in the current environment
pub(crate) fn eval_def(args: &[Value], env: &Env) -> Result<Tail> {
    let [name, value] = args else {
        return Err(Error::syntax("def", "requires a name and a value"));
    };
    let sym = expect_symbol("def", name)?;
    let value = eval(value, env)?;
    env.set(sym, value.clone());
    Ok(Tail::Return(value))
}

/// (let (name value ...) body...) - sequential local bindings
pub(crate) fn eval_let(args: &[Value], env: &Env) -> Result<Tail> {
    let Some((bindings, body)) = args.split_first() else {
        return Err(Error::syntax("let", "requires a binding list"));
    };
    let bindings = bindings
        .as_seq()
        .ok_or_else(|| Error::syntax("let", "bindings must be a list or vector"))?;
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let",
            "bindings must have an even number of forms",
        ));
    }

    let let_env = env.child();
    let mut pairs = bindings.iter();
    while let (Some(name), Some(value)) = (pairs.next(), pairs.next()) {
        let sym = expect_symbol("let", name)?;
        // Later bindings see earlier ones
        let value = eval(value, &let_env)?;
        let_env.set(sym, value);
    }

    Ok(match body_form(body) {
        Some(body) => Tail::Eval(body, let_env),
        None => Tail::Return(Value::NIL),
    })
}

/// (fn (params...) body...) - closure over the current environment
pub(crate) fn eval_fn(args: &[Value], env: &Env) -> Result<Tail> {
    let Some((params, body)) = args.split_first() else {
        return Err(Error::syntax("fn", "requires a parameter list"));
    };
    let params = params
        .as_seq()
        .ok_or_else(|| Error::syntax("fn", "parameters must be a list or vector"))?
        .iter()
        .map(|p| expect_symbol("fn", p))
        .collect::<Result<Vec<Symbol>>>()?;

    let body = body_form(body).unwrap_or(Value::NIL);
    let captured: Rc<dyn Any> = Rc::new(env.clone());
    Ok(Tail::Return(Value::closure(Closure::new(
        params, body, captured,
    ))))
}

/// (quote form)
pub(crate) fn eval_quote(args: &[Value]) -> Result<Tail> {
    let [form] = args else {
        return Err(Error::syntax("quote", "requires exactly one form"));
    };
    Ok(Tail::Return(form.clone()))
}

/// (quasiquote form) - expand, then evaluate the expansion in tail position
pub(crate) fn eval_quasiquote(args: &[Value], env: &Env) -> Result<Tail> {
    let [form] = args else {
        return Err(Error::syntax("quasiquote", "requires exactly one form"));
    };
    Ok(Tail::Eval(quasiquote(form), env.clone()))
}

/// (quasiquoteexpand form) - the expansion, unevaluated
pub(crate) fn eval_quasiquoteexpand(args: &[Value]) -> Result<Tail> {
    let [form] = args else {
        return Err(Error::syntax(
            "quasiquoteexpand",
            "requires exactly one form",
        ));
    };
    Ok(Tail::Return(quasiquote(form)))
}

/// (defmacro name fn-expr) - bind a closure and flag it as a macro
pub(crate) fn eval_defmacro(args: &[Value], env: &Env) -> Result<Tail> {
    let [name, value] = args else {
        return Err(Error::syntax("defmacro", "requires a name and a function"));
    };
    let sym = expect_symbol("defmacro", name)?;
    let value = eval(value, env)?;
    match &value {
        Value::Function(Function::Closure(closure), _) => closure.mark_macro(),
        other => {
            return Err(Error::type_error_in(
                "defmacro",
                "function",
                other.type_name(),
            ));
        }
    }
    env.set(sym, value.clone());
    Ok(Tail::Return(value))
}

/// (macroexpand form) - expand macro calls at the head of form
pub(crate) fn eval_macroexpand(args: &[Value], env: &Env) -> Result<Tail> {
    let [form] = args else {
        return Err(Error::syntax("macroexpand", "requires exactly one form"));
    };
    Ok(Tail::Return(macroexpand(form.clone(), env)?))
}

/// (do forms...) - evaluate in order, the last in tail position
pub(crate) fn eval_do(args: &[Value], env: &Env) -> Result<Tail> {
    let Some((last, init)) = args.split_last() else {
        return Ok(Tail::Return(Value::NIL));
    };
    for form in init {
        eval(form, env)?;
    }
    Ok(Tail::Eval(last.clone(), env.clone()))
}

/// (if test then else?)
pub(crate) fn eval_if(args: &[Value], env: &Env) -> Result<Tail> {
    if args.len() < 2 || args.len() > 3 {
        return Err(Error::syntax("if", "requires 2 or 3 arguments"));
    }

    let test = eval(&args[0], env)?;

    if test.is_truthy() {
        Ok(Tail::Eval(args[1].clone(), env.clone()))
    } else if let Some(alternative) = args.get(2) {
        Ok(Tail::Eval(alternative.clone(), env.clone()))
    } else {
        Ok(Tail::Return(Value::NIL))
    }
}

fn expect_symbol(form: &'static str, value: &Value) -> Result<Symbol> {
    value
        .as_symbol()
        .cloned()
        .ok_or_else(|| Error::syntax(form, format!("expected a symbol, got {}", value)))
}

/// Several body forms run as an implicit `do`.
fn body_form(body: &[Value]) -> Option<Value> {
    match body {
        [] => None,
        [single] => Some(single.clone()),
        many => {
            let mut forms = Vec::with_capacity(many.len() + 1);
            forms.push(Value::symbol("do"));
            forms.extend(many.iter().cloned());
            Some(Value::list(forms))
        }
    }
}
