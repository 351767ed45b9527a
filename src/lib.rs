// ABOUTME: Library module exposing internal components for embedding and testing

pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod reader;
pub mod tools;
pub mod value;

use env::Environment;
use error::EvalError;
use std::rc::Rc;
use value::Value;

/// Lexes and reads `source` into a single expression. Zero forms read back
/// as `Nil`; a single form is returned as-is; multiple top-level forms are
/// folded into one `(begin ...)` so the whole source evaluates as a unit.
pub fn parse(source: &str) -> Result<Value, EvalError> {
    let mut forms = reader::read_source(source)?;
    match forms.len() {
        0 => Ok(Value::Nil),
        1 => Ok(forms.remove(0)),
        _ => {
            let mut items = Vec::with_capacity(forms.len() + 1);
            items.push(Value::Symbol("begin".to_string()));
            items.extend(forms);
            Ok(Value::List(items))
        }
    }
}

/// Builds a new root environment with the full standard procedure library
/// registered, ready to evaluate against.
pub fn make_standard_environment() -> Rc<Environment> {
    let env = Environment::new();
    builtins::register_builtins(&env);
    env
}

/// Builds a new environment, optionally chained to a parent, without any
/// built-ins. Useful for constructing a private child scope.
pub fn make_environment(parent: Option<Rc<Environment>>) -> Rc<Environment> {
    match parent {
        Some(p) => Environment::with_parent(p),
        None => Environment::new(),
    }
}

pub use eval::{debug_enabled, evaluate, set_debug};
pub use tools::{register_procedure, register_special};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wraps_multiple_top_level_forms_in_begin() {
        let expr = parse("(define a 1) (define b 2) (+ a b)").unwrap();
        match expr {
            Value::List(items) => {
                assert_eq!(items[0], Value::Symbol("begin".to_string()));
                assert_eq!(items.len(), 4);
            }
            other => panic!("expected (begin ...), got {:?}", other),
        }
    }

    #[test]
    fn parse_empty_source_is_nil() {
        assert_eq!(parse("").unwrap(), Value::Nil);
    }

    #[test]
    fn parse_single_form_is_returned_bare() {
        assert_eq!(parse("42").unwrap(), Value::Number(42.0));
    }

    #[test]
    fn standard_environment_evaluates_end_to_end() {
        let env = make_standard_environment();
        let expr = parse("(+ 1 2 3)").unwrap();
        assert_eq!(evaluate(expr, env).unwrap(), Value::Number(6.0));
    }
}
