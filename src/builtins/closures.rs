//! Introspection on closures: lambda:new, lambda:args, lambda:body,
//! lambda:env, lambda:evaluator, and the same shape for `macro:*`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Params, Value};
use std::rc::Rc;

fn value_to_params(value: &Value, function: &str) -> Result<Params, EvalError> {
    match value {
        Value::Symbol(name) => Ok(Params::Variadic(name.clone())),
        Value::List(items) => {
            let mut names = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Symbol(name) => names.push(name.clone()),
                    other => return Err(EvalError::type_error(function, "symbol", other, i + 1)),
                }
            }
            Ok(Params::Positional(names))
        }
        other => Err(EvalError::type_error(function, "symbol or list of symbols", other, 1)),
    }
}

fn params_to_value(params: &Params) -> Value {
    match params {
        Params::Variadic(name) => Value::Symbol(name.clone()),
        Params::Positional(names) => Value::List(names.iter().cloned().map(Value::Symbol).collect()),
    }
}

fn env_arg(value: &Value, function: &str, position: usize) -> Result<Rc<Environment>, EvalError> {
    match value {
        Value::Environment(e) => Ok(e.clone()),
        other => Err(EvalError::type_error(function, "environment", other, position)),
    }
}

pub fn builtin_lambda_new(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("lambda:new", "3", args.len()));
    }
    Ok(Value::Lambda {
        params: value_to_params(&args[0], "lambda:new")?,
        body: Box::new(args[1].clone()),
        env: env_arg(&args[2], "lambda:new", 3)?,
    })
}

pub fn builtin_lambda_args(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Lambda { params, .. }] => Ok(params_to_value(params)),
        [other] => Err(EvalError::type_error("lambda:args", "lambda", other, 1)),
        _ => Err(EvalError::arity("lambda:args", "1", args.len())),
    }
}

pub fn builtin_lambda_body(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Lambda { body, .. }] => Ok((**body).clone()),
        [other] => Err(EvalError::type_error("lambda:body", "lambda", other, 1)),
        _ => Err(EvalError::arity("lambda:body", "1", args.len())),
    }
}

pub fn builtin_lambda_env(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Lambda { env, .. }] => Ok(Value::Environment(env.clone())),
        [other] => Err(EvalError::type_error("lambda:env", "lambda", other, 1)),
        _ => Err(EvalError::arity("lambda:env", "1", args.len())),
    }
}

/// `Procedure`/`SpecialProcedure` are plain function pointers with no
/// captured state, so there is no way to build a bespoke host callable
/// bound to one particular `Lambda` instance. The lambda's own value is
/// already the thing the generic application rule knows how to evaluate,
/// so it stands in as its own "evaluator".
pub fn builtin_lambda_evaluator(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Lambda { .. }] => Ok(args[0].clone()),
        [other] => Err(EvalError::type_error("lambda:evaluator", "lambda", other, 1)),
        _ => Err(EvalError::arity("lambda:evaluator", "1", args.len())),
    }
}

pub fn builtin_macro_new(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("macro:new", "3", args.len()));
    }
    Ok(Value::Macro {
        params: value_to_params(&args[0], "macro:new")?,
        body: Box::new(args[1].clone()),
        env: env_arg(&args[2], "macro:new", 3)?,
    })
}

pub fn builtin_macro_args(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Macro { params, .. }] => Ok(params_to_value(params)),
        [other] => Err(EvalError::type_error("macro:args", "macro", other, 1)),
        _ => Err(EvalError::arity("macro:args", "1", args.len())),
    }
}

pub fn builtin_macro_body(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Macro { body, .. }] => Ok((**body).clone()),
        [other] => Err(EvalError::type_error("macro:body", "macro", other, 1)),
        _ => Err(EvalError::arity("macro:body", "1", args.len())),
    }
}

pub fn builtin_macro_env(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Macro { env, .. }] => Ok(Value::Environment(env.clone())),
        [other] => Err(EvalError::type_error("macro:env", "macro", other, 1)),
        _ => Err(EvalError::arity("macro:env", "1", args.len())),
    }
}

pub fn builtin_macro_evaluator(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Macro { .. }] => Ok(args[0].clone()),
        [other] => Err(EvalError::type_error("macro:evaluator", "macro", other, 1)),
        _ => Err(EvalError::arity("macro:evaluator", "1", args.len())),
    }
}

/// Registers `lambda:*` and `macro:*` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("lambda:new".to_string(), Value::Procedure(builtin_lambda_new));
    env.define("lambda:args".to_string(), Value::Procedure(builtin_lambda_args));
    env.define("lambda:body".to_string(), Value::Procedure(builtin_lambda_body));
    env.define("lambda:env".to_string(), Value::Procedure(builtin_lambda_env));
    env.define("lambda:evaluator".to_string(), Value::Procedure(builtin_lambda_evaluator));
    env.define("macro:new".to_string(), Value::Procedure(builtin_macro_new));
    env.define("macro:args".to_string(), Value::Procedure(builtin_macro_args));
    env.define("macro:body".to_string(), Value::Procedure(builtin_macro_body));
    env.define("macro:env".to_string(), Value::Procedure(builtin_macro_env));
    env.define("macro:evaluator".to_string(), Value::Procedure(builtin_macro_evaluator));
}
