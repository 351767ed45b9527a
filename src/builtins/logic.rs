//! Logic operations: not, and, or
//!
//! Since `and`/`or` are ordinary [`Value::Procedure`]s, the application rule
//! already evaluated every argument before either sees them — there is no
//! evaluation to short-circuit. What they still choose is *which already-evaluated
//! value to return*, following the generalized truth rule
//! ([`Value::is_truthy`]) rather than requiring `Bool` arguments.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// `Bool(true)` iff `val` is falsy.
pub fn builtin_not(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("not", "1", args.len()));
    }
    Ok(Value::Bool(!args[0].is_truthy()))
}

/// The first falsy argument, or the last argument if all are truthy.
/// `(and) => true`.
pub fn builtin_and(args: &[Value]) -> Result<Value, EvalError> {
    let mut last = Value::Bool(true);
    for arg in args {
        if !arg.is_truthy() {
            return Ok(arg.clone());
        }
        last = arg.clone();
    }
    Ok(last)
}

/// The first truthy argument, or the last argument if all are falsy.
/// `(or) => false`.
pub fn builtin_or(args: &[Value]) -> Result<Value, EvalError> {
    let mut last = Value::Bool(false);
    for arg in args {
        if arg.is_truthy() {
            return Ok(arg.clone());
        }
        last = arg.clone();
    }
    Ok(last)
}

/// Registers `not`, `and`, `or` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("not".to_string(), Value::Procedure(builtin_not));
    env.define("and".to_string(), Value::Procedure(builtin_and));
    env.define("or".to_string(), Value::Procedure(builtin_or));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not() {
        assert_eq!(builtin_not(&[Value::Bool(false)]).unwrap(), Value::Bool(true));
        assert_eq!(builtin_not(&[Value::Nil]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_and_returns_first_falsy_or_last() {
        assert_eq!(
            builtin_and(&[Value::Number(1.0), Value::Bool(false), Value::Number(2.0)]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            builtin_and(&[Value::Number(1.0), Value::Number(2.0)]).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(builtin_and(&[]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_or_returns_first_truthy_or_last() {
        assert_eq!(
            builtin_or(&[Value::Bool(false), Value::Number(2.0)]).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(builtin_or(&[]).unwrap(), Value::Bool(false));
    }
}
