// zlisp-core - Higher-order built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Functions that call other functions: apply, map

use zlisp_parser::Value;

use crate::error::{Error, Result};
use crate::eval::apply;

use super::{check_arity, require_seq};

/// (apply f x y [args]) - the last argument is spread
pub(crate) fn builtin_apply(args: &[Value]) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::arity_at_least("apply", 2, args.len()));
    }
    let f = &args[0];
    let last = &args[args.len() - 1];
    let mut call_args: Vec<Value> = args[1..args.len() - 1].to_vec();
    call_args.extend(require_seq("apply", last)?.iter().cloned());
    apply(f, &call_args)
}

/// (map f coll) - always a list
pub(crate) fn builtin_map(args: &[Value]) -> Result<Value> {
    check_arity("map", args, 2)?;
    let f = &args[0];
    let items = require_seq("map", &args[1])?;
    let mapped = items
        .iter()
        .map(|item| apply(f, std::slice::from_ref(item)))
        .collect::<Result<_>>()?;
    Ok(Value::list_from(mapped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::env::Env;
    use crate::eval::eval_source;

    fn run(src: &str) -> Result<Value> {
        let env = Env::new();
        register_builtins(&env);
        eval_source(src, &env)
    }

    #[test]
    fn test_apply_spreads_last_argument() {
        assert_eq!(run("(apply + (list 1 2))").unwrap(), Value::int(3));
        assert_eq!(run("(apply + 1 [2])").unwrap(), Value::int(3));
        assert_eq!(run("(apply list 1 2 ())").unwrap().to_string(), "(1 2)");
    }

    #[test]
    fn test_apply_with_closure() {
        assert_eq!(
            run("(apply (fn (a b) (- a b)) '(10 3))").unwrap(),
            Value::int(7)
        );
    }

    #[test]
    fn test_apply_non_function() {
        assert!(matches!(run("(apply 1 ())"), Err(Error::NotCallable(_))));
    }

    #[test]
    fn test_map_returns_list() {
        assert_eq!(
            run("(map (fn (x) (* x x)) [1 2 3])").unwrap().to_string(),
            "(1 4 9)"
        );
        assert_eq!(run("(map (fn (x) x) nil)").unwrap().to_string(), "()");
    }

    #[test]
    fn test_map_propagates_errors() {
        assert!(matches!(
            run("(map (fn (x) (+ x 1)) '(1 \"a\"))"),
            Err(Error::TypeError { .. })
        ));
    }
}
