//! Error handling: error, error:custom, error:name, error:message,
//! error:stack, error:code.
//!
//! Errors are real Rust-level unwinding (see [`crate::error::EvalError::Raised`]),
//! not a plain returned value: `error` raises its argument through the
//! evaluator until a `try` catches it and hands the handler the exact
//! value that was raised.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{ErrorValue, Value};
use std::rc::Rc;

/// Raises `args[0]` as-is. `try` delivers it back unchanged to its handler.
pub fn builtin_error(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("error", "1", args.len()));
    }
    Err(EvalError::raised(args[0].clone()))
}

/// `(error:custom name message)` constructs an `Error` value; it does not
/// raise it, so it composes with `error` as `(error (error:custom ...))`.
pub fn builtin_error_custom(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 || args.len() > 3 {
        return Err(EvalError::invalid_argument(
            "error:custom",
            "expected (name message [code])",
        ));
    }
    let name = match &args[0] {
        Value::Symbol(s) | Value::String(s) => s.clone(),
        other => return Err(EvalError::type_error("error:custom", "symbol or string", other, 1)),
    };
    let message = match &args[1] {
        Value::String(s) => s.clone(),
        other => other.to_display_string(false),
    };
    let mut error = ErrorValue::new(name, message);
    if let Some(code) = args.get(2) {
        error.code = Some(code.to_display_string(false));
    }
    Ok(Value::Error(error))
}

fn error_at<'a>(args: &'a [Value], function: &str) -> Result<&'a ErrorValue, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity(function, "1", args.len()));
    }
    match &args[0] {
        Value::Error(e) => Ok(e),
        other => Err(EvalError::type_error(function, "error", other, 1)),
    }
}

/// The error's name, rendered as a `Symbol` (the canonical form per the
/// embedding contract's "`name` (symbol/string)" error object field).
pub fn builtin_error_name(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Symbol(error_at(args, "error:name")?.name.clone()))
}

pub fn builtin_error_message(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::String(error_at(args, "error:message")?.message.clone()))
}

pub fn builtin_error_stack(args: &[Value]) -> Result<Value, EvalError> {
    Ok(match &error_at(args, "error:stack")?.stack {
        Some(s) => Value::String(s.clone()),
        None => Value::Nil,
    })
}

pub fn builtin_error_code(args: &[Value]) -> Result<Value, EvalError> {
    Ok(match &error_at(args, "error:code")?.code {
        Some(c) => Value::String(c.clone()),
        None => Value::Nil,
    })
}

/// Registers `error` and `error:*` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("error".to_string(), Value::Procedure(builtin_error));
    env.define("error:custom".to_string(), Value::Procedure(builtin_error_custom));
    env.define("error:name".to_string(), Value::Procedure(builtin_error_name));
    env.define("error:message".to_string(), Value::Procedure(builtin_error_message));
    env.define("error:stack".to_string(), Value::Procedure(builtin_error_stack));
    env.define("error:code".to_string(), Value::Procedure(builtin_error_code));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_raises_value_unchanged() {
        let raised = builtin_error(&[Value::Symbol("Oops".to_string())]);
        match raised {
            Err(EvalError::Raised(boxed)) => assert_eq!(*boxed, Value::Symbol("Oops".to_string())),
            other => panic!("expected Raised, got {:?}", other),
        }
    }

    #[test]
    fn test_error_custom_accessors() {
        let e = builtin_error_custom(&[
            Value::Symbol("Oops".to_string()),
            Value::String("x".to_string()),
        ])
        .unwrap();
        assert_eq!(builtin_error_name(&[e.clone()]).unwrap(), Value::Symbol("Oops".to_string()));
        assert_eq!(builtin_error_message(&[e.clone()]).unwrap(), Value::String("x".to_string()));
        assert_eq!(builtin_error_stack(&[e]).unwrap(), Value::Nil);
    }
}
