//! Console output: print.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Space-joins the unquoted display form of each argument and terminates
/// with a newline. Returns `Nil`.
pub fn builtin_print(args: &[Value]) -> Result<Value, EvalError> {
    let rendered: Vec<String> = args.iter().map(|v| v.to_display_string(false)).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::Nil)
}

/// Registers `print` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.define("print".to_string(), Value::Procedure(builtin_print));
}
