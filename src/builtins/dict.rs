//! Dict operations: dict:new, dict:get, dict:set, dict:update, dict:key?,
//! dict:keys.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

fn dict_at<'a>(
    args: &'a [Value],
    function: &str,
    i: usize,
) -> Result<&'a Rc<RefCell<HashMap<String, Value>>>, EvalError> {
    match &args[i] {
        Value::Dict(d) => Ok(d),
        other => Err(EvalError::type_error(function, "dict", other, i + 1)),
    }
}

fn key_at(args: &[Value], function: &str, i: usize) -> Result<String, EvalError> {
    match &args[i] {
        Value::Symbol(s) | Value::String(s) => Ok(s.clone()),
        other => Err(EvalError::type_error(function, "symbol or string", other, i + 1)),
    }
}

pub fn builtin_dict_new(args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("dict:new", "0", args.len()));
    }
    Ok(Value::Dict(Rc::new(RefCell::new(HashMap::new()))))
}

pub fn builtin_dict_get(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("dict:get", "2", args.len()));
    }
    let dict = dict_at(args, "dict:get", 0)?;
    let key = key_at(args, "dict:get", 1)?;
    dict.borrow()
        .get(&key)
        .cloned()
        .ok_or_else(|| EvalError::key_not_found(key))
}

pub fn builtin_dict_set(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("dict:set", "3", args.len()));
    }
    let dict = dict_at(args, "dict:set", 0)?;
    let key = key_at(args, "dict:set", 1)?;
    dict.borrow_mut().insert(key, args[2].clone());
    Ok(args[2].clone())
}

/// Same as `dict:set`: writes a new or existing key. Kept as a distinct
/// name to mirror `env:update`'s bulk-write role in the environment API.
pub fn builtin_dict_update(args: &[Value]) -> Result<Value, EvalError> {
    builtin_dict_set(args)
}

pub fn builtin_dict_key_p(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("dict:key?", "2", args.len()));
    }
    let dict = dict_at(args, "dict:key?", 0)?;
    let key = key_at(args, "dict:key?", 1)?;
    Ok(Value::Bool(dict.borrow().contains_key(&key)))
}

pub fn builtin_dict_keys(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("dict:keys", "1", args.len()));
    }
    let dict = dict_at(args, "dict:keys", 0)?;
    let mut keys: Vec<String> = dict.borrow().keys().cloned().collect();
    keys.sort();
    Ok(Value::List(keys.into_iter().map(Value::Symbol).collect()))
}

/// Registers `dict:*` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("dict:new".to_string(), Value::Procedure(builtin_dict_new));
    env.define("dict:get".to_string(), Value::Procedure(builtin_dict_get));
    env.define("dict:set".to_string(), Value::Procedure(builtin_dict_set));
    env.define("dict:update".to_string(), Value::Procedure(builtin_dict_update));
    env.define("dict:key?".to_string(), Value::Procedure(builtin_dict_key_p));
    env.define("dict:keys".to_string(), Value::Procedure(builtin_dict_keys));
}
