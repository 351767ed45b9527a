//! Comparison operations: <, <=, >, >=, =, !=, ===, !==
//!
//! The ordering operators require numbers; `=`/`!=` compare by value
//! ([`Value::value_eq`], symbols equal iff their names match); `===`/`!==`
//! are strict identity-like comparisons ([`Value::strict_eq`]).

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn binary_numbers(args: &[Value], function: &str) -> Result<(f64, f64), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity(function, "2", args.len()));
    }
    let a = match &args[0] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error(function, "number", other, 1)),
    };
    let b = match &args[1] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_error(function, "number", other, 2)),
    };
    Ok((a, b))
}

pub fn builtin_lt(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, "<")?;
    Ok(Value::Bool(a < b))
}

pub fn builtin_le(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, "<=")?;
    Ok(Value::Bool(a <= b))
}

pub fn builtin_gt(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, ">")?;
    Ok(Value::Bool(a > b))
}

pub fn builtin_ge(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, ">=")?;
    Ok(Value::Bool(a >= b))
}

pub fn builtin_eq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("=", "2", args.len()));
    }
    Ok(Value::Bool(args[0].value_eq(&args[1])))
}

pub fn builtin_neq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("!=", "2", args.len()));
    }
    Ok(Value::Bool(!args[0].value_eq(&args[1])))
}

pub fn builtin_strict_eq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("===", "2", args.len()));
    }
    Ok(Value::Bool(args[0].strict_eq(&args[1])))
}

pub fn builtin_strict_neq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("!==", "2", args.len()));
    }
    Ok(Value::Bool(!args[0].strict_eq(&args[1])))
}

/// Registers `<`, `<=`, `>`, `>=`, `=`, `!=`, `===`, `!==` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("<".to_string(), Value::Procedure(builtin_lt));
    env.define("<=".to_string(), Value::Procedure(builtin_le));
    env.define(">".to_string(), Value::Procedure(builtin_gt));
    env.define(">=".to_string(), Value::Procedure(builtin_ge));
    env.define("=".to_string(), Value::Procedure(builtin_eq));
    env.define("!=".to_string(), Value::Procedure(builtin_neq));
    env.define("===".to_string(), Value::Procedure(builtin_strict_eq));
    env.define("!==".to_string(), Value::Procedure(builtin_strict_neq));
}
