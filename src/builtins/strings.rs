//! Conversions: to_s, to_string.
//!
//! Both take a value and an optional `withquotes` boolean (default `false`)
//! controlling whether strings round-trip with their surrounding quotes.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn to_display(args: &[Value], function: &str) -> Result<Value, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::invalid_argument(function, "expected (value [withquotes])"));
    }
    let withquotes = match args.get(1) {
        Some(flag) => flag.is_truthy(),
        None => false,
    };
    Ok(Value::String(args[0].to_display_string(withquotes)))
}

pub fn builtin_to_s(args: &[Value]) -> Result<Value, EvalError> {
    to_display(args, "to_s")
}

pub fn builtin_to_string(args: &[Value]) -> Result<Value, EvalError> {
    to_display(args, "to_string")
}

/// Registers `to_s` and `to_string` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("to_s".to_string(), Value::Procedure(builtin_to_s));
    env.define("to_string".to_string(), Value::Procedure(builtin_to_string));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_s_defaults_to_unquoted() {
        let result = builtin_to_s(&[Value::String("hi".to_string())]).unwrap();
        assert_eq!(result, Value::String("hi".to_string()));
    }

    #[test]
    fn test_to_s_withquotes() {
        let result = builtin_to_s(&[Value::String("hi".to_string()), Value::Bool(true)]).unwrap();
        assert_eq!(result, Value::String("\"hi\"".to_string()));
    }

    #[test]
    fn test_to_string_renders_list_with_brackets() {
        let list = Value::List(vec![Value::Number(1.0), Value::Number(2.0)]);
        let result = builtin_to_string(&[list]).unwrap();
        assert_eq!(result, Value::String("[1 2]".to_string()));
    }
}
