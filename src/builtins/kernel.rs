//! Kernel operations: kernel:debug?, kernel:debug.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{debug_enabled, set_debug};
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_kernel_debug_p(args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("kernel:debug?", "0", args.len()));
    }
    Ok(Value::Bool(debug_enabled()))
}

/// With no argument, toggles the trace flag. With one argument, sets it
/// explicitly per the generalized truth rule. Returns the new state.
pub fn builtin_kernel_debug(args: &[Value]) -> Result<Value, EvalError> {
    let new_state = match args {
        [] => !debug_enabled(),
        [flag] => flag.is_truthy(),
        _ => return Err(EvalError::arity("kernel:debug", "0 or 1", args.len())),
    };
    set_debug(new_state);
    Ok(Value::Bool(new_state))
}

/// Registers `kernel:debug?` and `kernel:debug` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("kernel:debug?".to_string(), Value::Procedure(builtin_kernel_debug_p));
    env.define("kernel:debug".to_string(), Value::Procedure(builtin_kernel_debug));
}
