//! Environment operations: env:current, env:new, env:get, env:define,
//! env:defined?, env:set!, env:update, env:parent, env:parent?,
//! env:toplevel, env:keys, env:dump.
//!
//! `env:current` is the one `SpecialProcedure` in this category: it is the
//! only member that needs to see the caller's environment rather than an
//! `Environment` value passed explicitly as an argument.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn env_at<'a>(args: &'a [Value], function: &str, i: usize) -> Result<&'a Rc<Environment>, EvalError> {
    match &args[i] {
        Value::Environment(e) => Ok(e),
        other => Err(EvalError::type_error(function, "environment", other, i + 1)),
    }
}

fn name_at(args: &[Value], function: &str, i: usize) -> Result<String, EvalError> {
    match &args[i] {
        Value::Symbol(s) | Value::String(s) => Ok(s.clone()),
        other => Err(EvalError::type_error(function, "symbol or string", other, i + 1)),
    }
}

/// Returns the caller's environment as a first-class `Environment` value.
pub fn special_env_current(_args: &[Value], caller_env: Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::Environment(caller_env))
}

pub fn builtin_env_new(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Ok(Value::Environment(Environment::new()));
    }
    if args.len() != 1 {
        return Err(EvalError::arity("env:new", "0 or 1", args.len()));
    }
    match &args[0] {
        Value::Nil | Value::Undefined => Ok(Value::Environment(Environment::new())),
        Value::Environment(parent) => Ok(Value::Environment(Environment::with_parent(parent.clone()))),
        other => Err(EvalError::type_error("env:new", "environment or nil", other, 1)),
    }
}

pub fn builtin_env_get(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("env:get", "2", args.len()));
    }
    let env = env_at(args, "env:get", 0)?;
    let name = name_at(args, "env:get", 1)?;
    env.get(&name)
}

pub fn builtin_env_define(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("env:define", "3", args.len()));
    }
    let env = env_at(args, "env:define", 0)?;
    let name = name_at(args, "env:define", 1)?;
    env.define(name, args[2].clone());
    Ok(args[2].clone())
}

pub fn builtin_env_defined_p(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("env:defined?", "2", args.len()));
    }
    let env = env_at(args, "env:defined?", 0)?;
    let name = name_at(args, "env:defined?", 1)?;
    Ok(Value::Bool(env.present(&name)))
}

pub fn builtin_env_set(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("env:set!", "3", args.len()));
    }
    let env = env_at(args, "env:set!", 0)?;
    let name = name_at(args, "env:set!", 1)?;
    env.set(&name, args[2].clone())?;
    Ok(args[2].clone())
}

pub fn builtin_env_update(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("env:update", "3", args.len()));
    }
    let env = env_at(args, "env:update", 0)?;
    let names = match &args[1] {
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::Symbol(s) | Value::String(s) => Ok(s.clone()),
                other => Err(EvalError::type_error("env:update", "symbol or string", other, i + 1)),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(EvalError::type_error("env:update", "list", other, 2)),
    };
    let values = match &args[2] {
        Value::List(items) => items.clone(),
        other => return Err(EvalError::type_error("env:update", "list", other, 3)),
    };
    env.update(&names, &values);
    Ok(Value::Nil)
}

pub fn builtin_env_parent(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("env:parent", "1", args.len()));
    }
    let env = env_at(args, "env:parent", 0)?;
    Ok(match env.parent() {
        Some(parent) => Value::Environment(parent),
        None => Value::Nil,
    })
}

pub fn builtin_env_parent_p(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("env:parent?", "1", args.len()));
    }
    let env = env_at(args, "env:parent?", 0)?;
    Ok(Value::Bool(env.parent().is_some()))
}

pub fn builtin_env_toplevel(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("env:toplevel", "1", args.len()));
    }
    let env = env_at(args, "env:toplevel", 0)?;
    Ok(Value::Environment(env.top_level()))
}

pub fn builtin_env_keys(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("env:keys", "1", args.len()));
    }
    let env = env_at(args, "env:keys", 0)?;
    Ok(Value::List(env.keys().into_iter().map(Value::Symbol).collect()))
}

pub fn builtin_env_dump(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("env:dump", "1", args.len()));
    }
    let env = env_at(args, "env:dump", 0)?;
    Ok(Value::String(env.dump()))
}

/// Registers `env:*` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("env:current".to_string(), Value::SpecialProcedure(special_env_current));
    env.define("env:new".to_string(), Value::Procedure(builtin_env_new));
    env.define("env:get".to_string(), Value::Procedure(builtin_env_get));
    env.define("env:define".to_string(), Value::Procedure(builtin_env_define));
    env.define("env:defined?".to_string(), Value::Procedure(builtin_env_defined_p));
    env.define("env:set!".to_string(), Value::Procedure(builtin_env_set));
    env.define("env:update".to_string(), Value::Procedure(builtin_env_update));
    env.define("env:parent".to_string(), Value::Procedure(builtin_env_parent));
    env.define("env:parent?".to_string(), Value::Procedure(builtin_env_parent_p));
    env.define("env:toplevel".to_string(), Value::Procedure(builtin_env_toplevel));
    env.define("env:keys".to_string(), Value::Procedure(builtin_env_keys));
    env.define("env:dump".to_string(), Value::Procedure(builtin_env_dump));
}
