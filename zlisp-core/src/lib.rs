// zlisp-core - Runtime and evaluator for the zLisp programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # zlisp-core
//!
//! Runtime and evaluator for zLisp. Provides a trampolined tree-walking
//! interpreter over [`Value`] forms read by `zlisp-parser`.
//!
//! ```
//! use zlisp_core::{Env, Value, eval_source, init_prelude, register_builtins};
//!
//! let env = Env::new();
//! register_builtins(&env);
//! init_prelude(&env).unwrap();
//!
//! let result = eval_source("(cond false 1 (not false) 2)", &env).unwrap();
//! assert_eq!(result, Value::int(2));
//! ```

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::register_builtins;
pub use env::{Env, WeakEnv};
pub use error::{AritySpec, Error, Result};
pub use eval::{
    DEFAULT_MAX_EVAL_DEPTH, EVAL_STACK_SIZE, apply, eval, eval_forms, eval_source,
    get_max_eval_depth, is_macro_call, macroexpand, make_native_fn, quasiquote,
    set_max_eval_depth, with_eval_stack,
};

// Re-export parser types for convenience
pub use zlisp_parser::{Symbol, Value};

/// Bootstrap definitions written in zLisp itself.
const PRELUDE: &str = include_str!("prelude.zl");

/// Evaluate the bootstrap prelude (`not`, `load-file`, `cond`, `unless`,
/// `defun`) into `env`. Call this after [`register_builtins`].
pub fn init_prelude(env: &Env) -> Result<()> {
    eval_source(PRELUDE, env)?;
    log::debug!("prelude loaded");
    Ok(())
}

/// A global environment with the primitive table and the prelude installed.
pub fn global_env() -> Result<Env> {
    let env = Env::new();
    register_builtins(&env);
    init_prelude(&env)?;
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_definitions() {
        let env = global_env().unwrap();
        for name in ["not", "load-file", "cond", "unless", "defun"] {
            assert!(env.is_defined(&Symbol::new(name)), "{} missing", name);
        }
    }

    #[test]
    fn test_prelude_macros() {
        let env = global_env().unwrap();
        assert_eq!(eval_source("(not nil)", &env).unwrap(), Value::TRUE);
        assert_eq!(eval_source("(unless false 1 2)", &env).unwrap(), Value::int(1));
        eval_source("(defun sq (x) (* x x))", &env).unwrap();
        assert_eq!(eval_source("(sq 7)", &env).unwrap(), Value::int(49));
    }

    #[test]
    fn test_load_file() {
        let env = global_env().unwrap();
        let path = std::env::temp_dir().join(format!("zlisp-load-{}.zl", std::process::id()));
        std::fs::write(&path, "(def loaded 1)\n(def also (+ loaded 1)) ; trailing comment").unwrap();
        let src = format!("(load-file \"{}\")", path.display());
        let result = eval_source(&src, &env);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap(), Value::NIL);
        assert_eq!(eval_source("also", &env).unwrap(), Value::int(2));
    }
}
