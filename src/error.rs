// ABOUTME: Error types for evaluation failures in the Lisp interpreter

use crate::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Malformed input: missing closer, unterminated string, empty form.
    #[error("parse error: {0}")]
    ParserError(String),

    /// Symbol lookup or `set!` target missing from the environment chain.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Primitive called with the wrong arity/type; `try` handler not
    /// callable; `/` or `-` called with zero arguments.
    #[error("{function}: {message}")]
    InvalidArgument { function: String, message: String },

    /// Application of a non-callable, non-dict, non-environment value.
    #[error("cannot apply value of type {type_name} as an operator")]
    InvalidOperation { type_name: String },

    /// An internal invariant was violated and surfaced to the user (e.g.
    /// type detection failed where it was assumed exhaustive).
    #[error("unexpected input: {0}")]
    UnexpectedInput(String),

    /// User-constructed error via `error:custom`.
    #[error("{name}: {message}")]
    Custom { name: String, message: String },

    /// A Lispy-level `Error` value raised via `error`, carried verbatim so
    /// `try`'s handler receives the exact value that was raised. This is
    /// the bridge between Rust-level `Result` propagation and the
    /// catchable `Value::Error` payload.
    #[error("raised: {0}")]
    Raised(Box<Value>),
}

impl EvalError {
    pub fn parser_error(message: impl Into<String>) -> Self {
        EvalError::ParserError(message.into())
    }

    pub fn key_not_found(name: impl Into<String>) -> Self {
        EvalError::KeyNotFound(name.into())
    }

    pub fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn arity(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::InvalidArgument {
            function: function.to_string(),
            message: format!("expected {} argument(s), got {}", expected.into(), actual),
        }
    }

    pub fn type_error(function: &str, expected: &str, actual: &Value, position: usize) -> Self {
        EvalError::InvalidArgument {
            function: function.to_string(),
            message: format!(
                "expected {}, got {} at argument {}",
                expected,
                actual.type_name(),
                position
            ),
        }
    }

    pub fn invalid_operation(value: &Value) -> Self {
        EvalError::InvalidOperation {
            type_name: value.type_name(),
        }
    }

    pub fn unexpected_input(message: impl Into<String>) -> Self {
        EvalError::UnexpectedInput(message.into())
    }

    pub fn custom(name: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Custom {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn raised(value: Value) -> Self {
        EvalError::Raised(Box::new(value))
    }
}
