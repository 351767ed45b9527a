// ABOUTME: Tool registration helpers for extending Lisp functionality with Rust code

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Binds a plain procedure (its arguments already evaluated by the caller)
/// under `name` in `env`.
pub fn register_procedure(
    env: &Rc<Environment>,
    name: &str,
    func: fn(&[Value]) -> Result<Value, EvalError>,
) {
    env.define(name.to_string(), Value::Procedure(func));
}

/// Binds a special procedure, which additionally receives the caller's
/// environment, under `name` in `env`.
pub fn register_special(
    env: &Rc<Environment>,
    name: &str,
    func: fn(&[Value], Rc<Environment>) -> Result<Value, EvalError>,
) {
    env.define(name.to_string(), Value::SpecialProcedure(func));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_add(args: &[Value]) -> Result<Value, EvalError> {
        let mut sum = 0.0;
        for (i, arg) in args.iter().enumerate() {
            match arg {
                Value::Number(n) => sum += n,
                _ => return Err(EvalError::type_error("add", "number", arg, i + 1)),
            }
        }
        Ok(Value::Number(sum))
    }

    fn current_env(_args: &[Value], caller_env: Rc<Environment>) -> Result<Value, EvalError> {
        Ok(Value::Environment(caller_env))
    }

    #[test]
    fn register_procedure_binds_a_callable_procedure() {
        let env = Environment::new();
        register_procedure(&env, "add", test_add);
        match env.get("add").unwrap() {
            Value::Procedure(f) => {
                assert_eq!(f(&[Value::Number(1.0), Value::Number(2.0)]).unwrap(), Value::Number(3.0));
            }
            other => panic!("expected Procedure, got {:?}", other),
        }
    }

    #[test]
    fn register_special_binds_a_special_procedure() {
        let env = Environment::new();
        register_special(&env, "env:current", current_env);
        assert!(matches!(env.get("env:current").unwrap(), Value::SpecialProcedure(_)));
    }
}
