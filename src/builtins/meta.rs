//! Meta operations: eval, parse, inspect.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::evaluate;
use crate::value::Value;
use std::rc::Rc;

/// `(eval expr env)`: evaluates `expr` against the given first-class
/// `Environment` value, unlike `evaluate` proper which the host calls
/// directly with a `Rc<Environment>`.
pub fn builtin_eval(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("eval", "2", args.len()));
    }
    let env = match &args[1] {
        Value::Environment(e) => e.clone(),
        other => return Err(EvalError::type_error("eval", "environment", other, 2)),
    };
    evaluate(args[0].clone(), env)
}

/// `(parse source)`: lexes and reads source text into an expression tree,
/// via the same embedding-contract `parse` the host calls.
pub fn builtin_parse(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("parse", "1", args.len()));
    }
    let source = match &args[0] {
        Value::String(s) => s.clone(),
        other => return Err(EvalError::type_error("parse", "string", other, 1)),
    };
    crate::parse(&source)
}

/// `(inspect val)`: a debug string form, tagged with the value's type.
pub fn builtin_inspect(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("inspect", "1", args.len()));
    }
    Ok(Value::String(format!(
        "{}:{}",
        args[0].type_name(),
        args[0].to_display_string(true)
    )))
}

/// Registers `eval`, `parse`, `inspect` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("eval".to_string(), Value::Procedure(builtin_eval));
    env.define("parse".to_string(), Value::Procedure(builtin_parse));
    env.define("inspect".to_string(), Value::Procedure(builtin_inspect));
}
