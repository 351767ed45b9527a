//! List operations: car/head, cdr/tail, cons, concat, length, list, tuple,
//! index, last, map, each, reduce, slice.
//!
//! The core treats lists as immutable: every operation here returns a new
//! `List`/`Tuple` rather than mutating its argument.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::apply_value;
use crate::value::Value;
use std::rc::Rc;

fn list_at<'a>(args: &'a [Value], function: &str, i: usize) -> Result<&'a [Value], EvalError> {
    match &args[i] {
        Value::List(items) => Ok(items),
        other => Err(EvalError::type_error(function, "list", other, i + 1)),
    }
}

/// Returns the first element. Aliased as `head`.
pub fn builtin_car(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("car", "1", args.len()));
    }
    let items = list_at(args, "car", 0)?;
    items
        .first()
        .cloned()
        .ok_or_else(|| EvalError::invalid_argument("car", "empty list"))
}

/// Returns every element but the first. Aliased as `tail`.
pub fn builtin_cdr(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("cdr", "1", args.len()));
    }
    let items = list_at(args, "cdr", 0)?;
    if items.is_empty() {
        return Err(EvalError::invalid_argument("cdr", "empty list"));
    }
    Ok(Value::List(items[1..].to_vec()))
}

/// Prepends `elem` to `list`.
pub fn builtin_cons(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("cons", "2", args.len()));
    }
    let items = list_at(args, "cons", 1)?;
    let mut result = Vec::with_capacity(items.len() + 1);
    result.push(args[0].clone());
    result.extend_from_slice(items);
    Ok(Value::List(result))
}

/// Concatenates any number of lists in order.
pub fn builtin_concat(args: &[Value]) -> Result<Value, EvalError> {
    let mut result = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        match arg {
            Value::List(items) => result.extend_from_slice(items),
            other => return Err(EvalError::type_error("concat", "list", other, i + 1)),
        }
    }
    Ok(Value::List(result))
}

/// Number of elements in a list.
pub fn builtin_length(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("length", "1", args.len()));
    }
    let items = list_at(args, "length", 0)?;
    Ok(Value::Number(items.len() as f64))
}

/// Constructs a `List` from its arguments, in order.
pub fn builtin_list(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::List(args.to_vec()))
}

/// Constructs a `Tuple` from its arguments, in order.
pub fn builtin_tuple(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Tuple(args.to_vec()))
}

/// Returns the element at a zero-based numeric index.
pub fn builtin_index(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("index", "2", args.len()));
    }
    let items = list_at(args, "index", 0)?;
    let i = match &args[1] {
        Value::Number(n) => *n as usize,
        other => return Err(EvalError::type_error("index", "number", other, 2)),
    };
    items
        .get(i)
        .cloned()
        .ok_or_else(|| EvalError::invalid_argument("index", "index out of bounds"))
}

/// Returns the last element.
pub fn builtin_last(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("last", "1", args.len()));
    }
    let items = list_at(args, "last", 0)?;
    items
        .last()
        .cloned()
        .ok_or_else(|| EvalError::invalid_argument("last", "empty list"))
}

/// Applies `f` to each element, returning a new list of the results.
pub fn builtin_map(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("map", "2", args.len()));
    }
    let f = args[0].clone();
    let items = list_at(args, "map", 1)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(apply_value(f.clone(), vec![item.clone()])?);
    }
    Ok(Value::List(out))
}

/// Applies `f` to each element for effect. Returns `Nil`.
pub fn builtin_each(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("each", "2", args.len()));
    }
    let f = args[0].clone();
    let items = list_at(args, "each", 1)?;
    for item in items {
        apply_value(f.clone(), vec![item.clone()])?;
    }
    Ok(Value::Nil)
}

/// Left-folds `f` over `list` starting from `init`.
pub fn builtin_reduce(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("reduce", "3", args.len()));
    }
    let f = args[0].clone();
    let mut acc = args[1].clone();
    let items = list_at(args, "reduce", 2)?;
    for item in items {
        acc = apply_value(f.clone(), vec![acc, item.clone()])?;
    }
    Ok(acc)
}

/// Returns the sub-list `[start, end)`.
pub fn builtin_slice(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity("slice", "3", args.len()));
    }
    let items = list_at(args, "slice", 0)?;
    let start = match &args[1] {
        Value::Number(n) => (*n as usize).min(items.len()),
        other => return Err(EvalError::type_error("slice", "number", other, 2)),
    };
    let end = match &args[2] {
        Value::Number(n) => (*n as usize).min(items.len()),
        other => return Err(EvalError::type_error("slice", "number", other, 3)),
    };
    if start > end {
        return Err(EvalError::invalid_argument("slice", "start must not exceed end"));
    }
    Ok(Value::List(items[start..end].to_vec()))
}

/// Registers the list primitives, including the `head`/`tail` aliases, in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("car".to_string(), Value::Procedure(builtin_car));
    env.define("head".to_string(), Value::Procedure(builtin_car));
    env.define("cdr".to_string(), Value::Procedure(builtin_cdr));
    env.define("tail".to_string(), Value::Procedure(builtin_cdr));
    env.define("cons".to_string(), Value::Procedure(builtin_cons));
    env.define("concat".to_string(), Value::Procedure(builtin_concat));
    env.define("length".to_string(), Value::Procedure(builtin_length));
    env.define("list".to_string(), Value::Procedure(builtin_list));
    env.define("tuple".to_string(), Value::Procedure(builtin_tuple));
    env.define("index".to_string(), Value::Procedure(builtin_index));
    env.define("last".to_string(), Value::Procedure(builtin_last));
    env.define("map".to_string(), Value::Procedure(builtin_map));
    env.define("each".to_string(), Value::Procedure(builtin_each));
    env.define("reduce".to_string(), Value::Procedure(builtin_reduce));
    env.define("slice".to_string(), Value::Procedure(builtin_slice));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: Vec<f64>) -> Value {
        Value::List(items.into_iter().map(Value::Number).collect())
    }

    #[test]
    fn test_cons_car_cdr_law() {
        let xs = list(vec![2.0, 3.0]);
        let consed = builtin_cons(&[Value::Number(1.0), xs.clone()]).unwrap();
        assert_eq!(builtin_car(&[consed.clone()]).unwrap(), Value::Number(1.0));
        assert_eq!(builtin_cdr(&[consed]).unwrap(), xs);
    }

    #[test]
    fn test_car_of_empty_list_is_invalid_argument() {
        assert!(matches!(
            builtin_car(&[Value::List(vec![])]),
            Err(EvalError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_concat() {
        let result = builtin_concat(&[list(vec![1.0]), list(vec![2.0, 3.0])]).unwrap();
        assert_eq!(result, list(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_slice() {
        let xs = list(vec![1.0, 2.0, 3.0, 4.0]);
        let result = builtin_slice(&[xs, Value::Number(1.0), Value::Number(3.0)]).unwrap();
        assert_eq!(result, list(vec![2.0, 3.0]));
    }

    #[test]
    fn test_map_applies_procedure_to_each_element() {
        fn double(args: &[Value]) -> Result<Value, EvalError> {
            match &args[0] {
                Value::Number(n) => Ok(Value::Number(n * 2.0)),
                other => Err(EvalError::type_error("double", "number", other, 1)),
            }
        }
        let xs = list(vec![1.0, 2.0, 3.0]);
        let result = builtin_map(&[Value::Procedure(double), xs]).unwrap();
        assert_eq!(result, list(vec![2.0, 4.0, 6.0]));
    }

    #[test]
    fn test_reduce_sums_with_procedure() {
        fn add(args: &[Value]) -> Result<Value, EvalError> {
            match (&args[0], &args[1]) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                _ => Err(EvalError::invalid_argument("add", "expected numbers")),
            }
        }
        let xs = list(vec![1.0, 2.0, 3.0]);
        let result = builtin_reduce(&[Value::Procedure(add), Value::Number(0.0), xs]).unwrap();
        assert_eq!(result, Value::Number(6.0));
    }

    #[test]
    fn test_index_and_last() {
        let xs = list(vec![10.0, 20.0, 30.0]);
        assert_eq!(builtin_index(&[xs.clone(), Value::Number(1.0)]).unwrap(), Value::Number(20.0));
        assert_eq!(builtin_last(&[xs]).unwrap(), Value::Number(30.0));
    }
}
