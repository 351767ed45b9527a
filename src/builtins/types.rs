//! Type predicates and `typeof`.
//!
//! `list?`, `null?`, `number?`, `procedure?`, `symbol?`, `lambda?`, `macro?`,
//! `env?` are the minimum set the standard library names; `string?`,
//! `bool?`, `tuple?`, `dict?` are kept alongside them as the natural
//! completions (see DESIGN.md), the same way `typeof`'s tag set was
//! completed with `bool`/`tuple`/`error`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn one_arg<'a>(args: &'a [Value], function: &str) -> Result<&'a Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity(function, "1", args.len()));
    }
    Ok(&args[0])
}

pub fn builtin_list_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "list?")?, Value::List(_))))
}

/// True for `Nil`, `Undefined`, an empty `List`, or an empty `String` —
/// the "empty or absent" value the standard library names `null?`.
pub fn builtin_null_p(args: &[Value]) -> Result<Value, EvalError> {
    let result = match one_arg(args, "null?")? {
        Value::Nil | Value::Undefined => true,
        Value::List(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    Ok(Value::Bool(result))
}

pub fn builtin_number_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "number?")?, Value::Number(_))))
}

pub fn builtin_procedure_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg(args, "procedure?")?,
        Value::Procedure(_) | Value::SpecialProcedure(_)
    )))
}

pub fn builtin_symbol_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "symbol?")?, Value::Symbol(_))))
}

pub fn builtin_lambda_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "lambda?")?, Value::Lambda { .. })))
}

pub fn builtin_macro_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "macro?")?, Value::Macro { .. })))
}

pub fn builtin_env_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "env?")?, Value::Environment(_))))
}

pub fn builtin_string_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "string?")?, Value::String(_))))
}

pub fn builtin_bool_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "bool?")?, Value::Bool(_))))
}

pub fn builtin_tuple_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "tuple?")?, Value::Tuple(_))))
}

pub fn builtin_dict_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg(args, "dict?")?, Value::Dict(_))))
}

pub fn builtin_typeof(args: &[Value]) -> Result<Value, EvalError> {
    Ok(one_arg(args, "typeof")?.typeof_symbol())
}

/// Registers the type predicates and `typeof` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("list?".to_string(), Value::Procedure(builtin_list_p));
    env.define("null?".to_string(), Value::Procedure(builtin_null_p));
    env.define("number?".to_string(), Value::Procedure(builtin_number_p));
    env.define("procedure?".to_string(), Value::Procedure(builtin_procedure_p));
    env.define("symbol?".to_string(), Value::Procedure(builtin_symbol_p));
    env.define("lambda?".to_string(), Value::Procedure(builtin_lambda_p));
    env.define("macro?".to_string(), Value::Procedure(builtin_macro_p));
    env.define("env?".to_string(), Value::Procedure(builtin_env_p));
    env.define("string?".to_string(), Value::Procedure(builtin_string_p));
    env.define("bool?".to_string(), Value::Procedure(builtin_bool_p));
    env.define("tuple?".to_string(), Value::Procedure(builtin_tuple_p));
    env.define("dict?".to_string(), Value::Procedure(builtin_dict_p));
    env.define("typeof".to_string(), Value::Procedure(builtin_typeof));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_p_covers_nil_undefined_and_empty() {
        assert_eq!(builtin_null_p(&[Value::Nil]).unwrap(), Value::Bool(true));
        assert_eq!(builtin_null_p(&[Value::Undefined]).unwrap(), Value::Bool(true));
        assert_eq!(builtin_null_p(&[Value::List(vec![])]).unwrap(), Value::Bool(true));
        assert_eq!(
            builtin_null_p(&[Value::List(vec![Value::Number(1.0)])]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_typeof_returns_symbol() {
        assert_eq!(
            builtin_typeof(&[Value::Number(1.0)]).unwrap(),
            Value::Symbol("number".to_string())
        );
    }

    #[test]
    fn test_procedure_p_covers_both_callable_kinds() {
        assert_eq!(builtin_procedure_p(&[Value::Procedure(builtin_typeof)]).unwrap(), Value::Bool(true));
    }
}
