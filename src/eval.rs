// ABOUTME: Evaluator module for executing parsed Lisp expressions

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{ErrorValue, Params, Value};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

thread_local! {
    static DEBUG: Cell<bool> = const { Cell::new(false) };
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Toggles the evaluator's debug trace. Purely observational: flipping it
/// does not change what any program evaluates to.
pub fn set_debug(flag: bool) {
    DEBUG.with(|c| c.set(flag));
}

pub fn debug_enabled() -> bool {
    DEBUG.with(|c| c.get())
}

/// One trampoline step: either the evaluation is finished, or it rewrites
/// to a new `(expr, env)` pair that must be evaluated in tail position.
enum Step {
    Done(Value),
    Tail(Value, Rc<Environment>),
}

/// `evaluate(expr, env) -> Value` from the embedding contract.
pub fn evaluate(expr: Value, env: Rc<Environment>) -> Result<Value, EvalError> {
    let traced = debug_enabled();
    if traced {
        DEPTH.with(|d| d.set(d.get() + 1));
    }
    let result = evaluate_loop(expr, env, traced);
    if traced {
        DEPTH.with(|d| d.set(d.get() - 1));
    }
    result
}

fn evaluate_loop(mut expr: Value, mut env: Rc<Environment>, traced: bool) -> Result<Value, EvalError> {
    loop {
        if traced {
            let depth = DEPTH.with(|d| d.get()).saturating_sub(1);
            eprintln!("{}{} ->", "  ".repeat(depth), expr);
        }
        match step(expr, env)? {
            Step::Done(v) => {
                if traced {
                    let depth = DEPTH.with(|d| d.get()).saturating_sub(1);
                    eprintln!("{}= {}", "  ".repeat(depth), v);
                }
                return Ok(v);
            }
            Step::Tail(e, ev) => {
                expr = e;
                env = ev;
            }
        }
    }
}

fn step(expr: Value, env: Rc<Environment>) -> Result<Step, EvalError> {
    match expr {
        Value::Nil => Ok(Step::Done(Value::Nil)),
        Value::Undefined => Ok(Step::Done(Value::Undefined)),
        Value::Symbol(name) => env.get(&name).map(Step::Done),
        Value::List(items) => {
            if items.is_empty() {
                return Ok(Step::Done(Value::List(items)));
            }
            if let Value::Symbol(head) = &items[0] {
                if let Some(step) = eval_special_form(head.as_str(), &items, &env)? {
                    return Ok(step);
                }
            }
            eval_application(items, env)
        }
        other => Ok(Step::Done(other)),
    }
}

const SPECIAL_FORMS: &[&str] = &[
    "quote", "if", "define", "defined?", "set!", "lambda", "macro", "begin", "try",
];

pub fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS.contains(&name)
}

fn eval_special_form(
    head: &str,
    items: &[Value],
    env: &Rc<Environment>,
) -> Result<Option<Step>, EvalError> {
    Ok(match head {
        "quote" => Some(Step::Done(items.get(1).cloned().unwrap_or(Value::Nil))),

        "if" => {
            if items.len() < 3 || items.len() > 4 {
                return Err(EvalError::invalid_argument(
                    "if",
                    "expected (if condition then [else])",
                ));
            }
            let cond = evaluate(items[1].clone(), env.clone())?;
            let branch = if cond.is_truthy() {
                items[2].clone()
            } else {
                items.get(3).cloned().unwrap_or(Value::Nil)
            };
            Some(Step::Tail(branch, env.clone()))
        }

        "define" => {
            let name = symbol_name(items.get(1), "define")?;
            let value = evaluate(items.get(2).cloned().unwrap_or(Value::Nil), env.clone())?;
            env.define(name, value.clone());
            Some(Step::Done(value))
        }

        "defined?" => {
            let name = symbol_name(items.get(1), "defined?")?;
            Some(Step::Done(Value::Bool(env.present(&name))))
        }

        "set!" => {
            let name = symbol_name(items.get(1), "set!")?;
            let value = evaluate(items.get(2).cloned().unwrap_or(Value::Nil), env.clone())?;
            env.set(&name, value.clone())?;
            Some(Step::Done(value))
        }

        "lambda" => {
            let params = parse_params(items.get(1), "lambda")?;
            let body = items.get(2).cloned().unwrap_or(Value::Nil);
            Some(Step::Done(Value::Lambda {
                params,
                body: Box::new(body),
                env: env.clone(),
            }))
        }

        "macro" => {
            let params = parse_params(items.get(1), "macro")?;
            let body = items.get(2).cloned().unwrap_or(Value::Nil);
            Some(Step::Done(Value::Macro {
                params,
                body: Box::new(body),
                env: env.clone(),
            }))
        }

        "begin" => {
            if items.len() == 1 {
                return Ok(Some(Step::Done(Value::Nil)));
            }
            let body = &items[1..];
            for expr in &body[..body.len() - 1] {
                evaluate(expr.clone(), env.clone())?;
            }
            Some(Step::Tail(body[body.len() - 1].clone(), env.clone()))
        }

        "try" => {
            if items.len() != 3 {
                return Err(EvalError::invalid_argument("try", "expected (try expr handler)"));
            }
            match evaluate(items[1].clone(), env.clone()) {
                Ok(v) => Some(Step::Done(v)),
                Err(err) => {
                    let raised = error_to_value(err);
                    let handler = evaluate(items[2].clone(), env.clone())?;
                    Some(apply_in_tail_position(handler, vec![raised], env.clone())?)
                }
            }
        }

        _ => None,
    })
}

/// Evaluates the generic application rule: macro expansion, lambda
/// application, host procedure dispatch, or member-call fallback.
fn eval_application(items: Vec<Value>, env: Rc<Environment>) -> Result<Step, EvalError> {
    let mut items = items.into_iter();
    let head_expr = items.next().expect("non-empty list");
    let raw_args: Vec<Value> = items.collect();

    let proc = evaluate(head_expr, env.clone())?;

    if let Value::Macro {
        params,
        body,
        env: captured,
    } = &proc
    {
        let child = bind_params(params, &raw_args, captured.clone())?;
        let expanded = evaluate((**body).clone(), child)?;
        return Ok(Step::Tail(expanded, env));
    }

    let args: Vec<Value> = raw_args
        .into_iter()
        .map(|a| evaluate(a, env.clone()))
        .collect::<Result<_, _>>()?;

    match proc {
        Value::Lambda { params, body, env: captured } => {
            let child = bind_params(&params, &args, captured)?;
            Ok(Step::Tail(*body, child))
        }
        Value::SpecialProcedure(handler) => Ok(Step::Done(handler(&args, env)?)),
        Value::Procedure(handler) => Ok(Step::Done(handler(&args)?)),
        Value::Dict(_) | Value::Environment(_) => Ok(Step::Done(member_call(&proc, &args)?)),
        other => Err(EvalError::invalid_operation(&other)),
    }
}

/// Applies an already-evaluated handler (from `try`) in tail position,
/// same rule as ordinary application once the procedure is known.
fn apply_in_tail_position(
    handler: Value,
    args: Vec<Value>,
    caller_env: Rc<Environment>,
) -> Result<Step, EvalError> {
    match handler {
        Value::Lambda { params, body, env: captured } => {
            let child = bind_params(&params, &args, captured)?;
            Ok(Step::Tail(*body, child))
        }
        Value::Procedure(h) => Ok(Step::Done(h(&args)?)),
        Value::SpecialProcedure(h) => Ok(Step::Done(h(&args, caller_env)?)),
        other => Err(EvalError::invalid_argument(
            "try",
            format!("handler must be callable, got {}", other.type_name()),
        )),
    }
}

/// Binds `params` to `args` in a fresh child of `captured_env`. Missing
/// positional parameters become `Undefined`; extra arguments are ignored.
fn bind_params(
    params: &Params,
    args: &[Value],
    captured_env: Rc<Environment>,
) -> Result<Rc<Environment>, EvalError> {
    let child = Environment::with_parent(captured_env);
    match params {
        Params::Variadic(name) => child.define(name.clone(), Value::List(args.to_vec())),
        Params::Positional(names) => child.update(names, args),
    }
    Ok(child)
}

fn parse_params(raw: Option<&Value>, form: &str) -> Result<Params, EvalError> {
    match raw {
        Some(Value::Symbol(name)) => Ok(Params::Variadic(name.clone())),
        Some(Value::List(items)) => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Symbol(name) => names.push(name.clone()),
                    other => {
                        return Err(EvalError::invalid_argument(
                            form,
                            format!("parameter list must contain symbols, got {}", other.type_name()),
                        ))
                    }
                }
            }
            Ok(Params::Positional(names))
        }
        Some(other) => Err(EvalError::invalid_argument(
            form,
            format!("params must be a symbol or a list of symbols, got {}", other.type_name()),
        )),
        None => Err(EvalError::invalid_argument(form, "missing params")),
    }
}

fn symbol_name(value: Option<&Value>, form: &str) -> Result<String, EvalError> {
    match value {
        Some(Value::Symbol(name)) => Ok(name.clone()),
        Some(other) => Err(EvalError::invalid_argument(
            form,
            format!("expected a symbol name, got {}", other.type_name()),
        )),
        None => Err(EvalError::invalid_argument(form, "missing name")),
    }
}

/// Converts a propagating `EvalError` into the `Value` a `try` handler
/// receives. A value raised via `error` passes through unchanged; every
/// other variant becomes a freshly constructed `Error` value.
fn error_to_value(err: EvalError) -> Value {
    match err {
        EvalError::Raised(boxed) => *boxed,
        EvalError::Custom { name, message } => Value::Error(ErrorValue::new(name, message)),
        EvalError::ParserError(message) => Value::Error(ErrorValue::new("ParserError", message)),
        EvalError::KeyNotFound(name) => {
            Value::Error(ErrorValue::new("KeyNotFound", format!("key not found: {}", name)))
        }
        EvalError::InvalidArgument { function, message } => Value::Error(ErrorValue::new(
            "InvalidArgument",
            format!("{}: {}", function, message),
        )),
        EvalError::InvalidOperation { type_name } => Value::Error(ErrorValue::new(
            "InvalidOperation",
            format!("cannot apply value of type {} as an operator", type_name),
        )),
        EvalError::UnexpectedInput(message) => {
            Value::Error(ErrorValue::new("UnexpectedInput", message))
        }
    }
}

/// The member-call fallback: the operator is a `Dict` or `Environment`, so
/// `args[0]` stringified names a member and the rest are its arguments.
/// Formalized as [`MemberCallable`], implemented only by the two data
/// types that support it; every other value raises `InvalidOperation`.
pub trait MemberCallable {
    fn call_member(&self, member: &str, args: &[Value]) -> Result<Value, EvalError>;
}

impl MemberCallable for Rc<RefCell<HashMap<String, Value>>> {
    fn call_member(&self, member: &str, args: &[Value]) -> Result<Value, EvalError> {
        let target = self
            .borrow()
            .get(member)
            .cloned()
            .ok_or_else(|| EvalError::key_not_found(member))?;
        apply_value(target, args.to_vec())
    }
}

impl MemberCallable for Rc<Environment> {
    fn call_member(&self, member: &str, args: &[Value]) -> Result<Value, EvalError> {
        let target = self.get(member)?;
        apply_value(target, args.to_vec())
    }
}

fn member_call(proc: &Value, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::invalid_argument(
            "member-call",
            "missing member name argument",
        ));
    }
    let member = args[0].to_display_string(false);
    let rest = &args[1..];
    match proc {
        Value::Dict(map) => map.call_member(&member, rest),
        Value::Environment(env) => env.call_member(&member, rest),
        other => Err(EvalError::invalid_operation(other)),
    }
}

/// Applies an already-evaluated procedure to already-evaluated arguments,
/// fully resolving the result rather than tail-looping. Used by the
/// member-call fallback, where there is no enclosing trampoline to
/// re-enter. `SpecialProcedure`s have no caller environment to observe in
/// this context and are rejected.
pub fn apply_value(proc: Value, args: Vec<Value>) -> Result<Value, EvalError> {
    match proc {
        Value::Lambda { params, body, env } => {
            let child = bind_params(&params, &args, env)?;
            evaluate(*body, child)
        }
        Value::Macro { params, body, env } => {
            let child = bind_params(&params, &args, env.clone())?;
            let expanded = evaluate(*body, child)?;
            evaluate(expanded, env)
        }
        Value::Procedure(handler) => handler(&args),
        Value::Dict(_) | Value::Environment(_) => member_call(&proc, &args),
        other => Err(EvalError::invalid_operation(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::reader::read_source;

    fn run(source: &str) -> Value {
        let env = Environment::new();
        register_builtins(&env);
        let forms = read_source(source).unwrap();
        let mut result = Value::Nil;
        for form in forms {
            result = evaluate(form, env.clone()).unwrap();
        }
        result
    }

    #[test]
    fn scenario_1_variadic_addition() {
        assert_eq!(run("(+ 1 2 3)"), Value::Number(6.0));
    }

    #[test]
    fn scenario_2_lambda_application() {
        let result = run("(begin (define add (lambda (x y) (+ x y))) (add 3 4))");
        assert_eq!(result, Value::Number(7.0));
    }

    #[test]
    fn scenario_3_tail_recursive_factorial() {
        let result = run(
            "(begin (define f (lambda (n a) (if (<= n 1) a (f (- n 1) (* n a))))) (f 10 1))",
        );
        assert_eq!(result, Value::Number(3628800.0));
    }

    #[test]
    fn scenario_4_lexical_capture() {
        let result = run("(begin (define mk (lambda (x) (lambda (y) (+ x y)))) ((mk 10) 5))");
        assert_eq!(result, Value::Number(15.0));
    }

    #[test]
    fn scenario_5_macro_builds_code() {
        let env = Environment::new();
        register_builtins(&env);
        let defn = read_source(
            "(define when (macro (c b) (list (quote if) c b (quote nil))))",
        )
        .unwrap();
        for form in defn {
            evaluate(form, env.clone()).unwrap();
        }
        let yes = evaluate(read_source("(when true 42)").unwrap().remove(0), env.clone()).unwrap();
        assert_eq!(yes, Value::Number(42.0));
        let no = evaluate(read_source("(when false 42)").unwrap().remove(0), env).unwrap();
        assert_eq!(no, Value::Nil);
    }

    #[test]
    fn scenario_6_error_recovery() {
        let result = run(
            "(try (error (error:custom (quote Oops) \"x\")) (lambda (e) (error:name e)))",
        );
        assert_eq!(result, Value::Symbol("Oops".to_string()));
    }

    #[test]
    fn scenario_7_first_class_environment() {
        let result = run(
            "(begin (define e (env:new (env:current))) (env:define e (quote a) 1) (env:get e (quote a)))",
        );
        assert_eq!(result, Value::Number(1.0));
    }

    #[test]
    fn truth_rule_matches_spec_exactly() {
        assert_eq!(run("(if false 1 2)"), Value::Number(2.0));
        assert_eq!(run("(if 0 1 2)"), Value::Number(1.0));
        assert_eq!(run("(if nil 1 2)"), Value::Number(1.0));
        assert_eq!(run(r#"(if "" 1 2)"#), Value::Number(1.0));
        assert_eq!(run("(if '() 1 2)"), Value::Number(1.0));
    }

    #[test]
    fn if_with_no_else_yields_nil() {
        assert_eq!(run("(if false 1)"), Value::Nil);
    }

    #[test]
    fn empty_begin_yields_nil() {
        assert_eq!(run("(begin)"), Value::Nil);
    }

    #[test]
    fn missing_positional_args_become_undefined() {
        let result = run("((lambda (a b) b) 1)");
        assert_eq!(result, Value::Undefined);
    }

    #[test]
    fn variadic_binding_collects_all_args() {
        let result = run("((lambda args args) 1 2 3)");
        assert_eq!(
            result,
            Value::List(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
        );
    }

    #[test]
    fn tail_call_elimination_handles_deep_recursion() {
        let result = run(
            "(begin (define count (lambda (n acc) (if (= n 0) acc (count (- n 1) (+ acc 1))))) (count 1000000 0))",
        );
        assert_eq!(result, Value::Number(1000000.0));
    }

    #[test]
    fn quote_returns_expression_unevaluated() {
        let result = run("(quote (a b c))");
        assert_eq!(
            result,
            Value::List(vec![
                Value::Symbol("a".to_string()),
                Value::Symbol("b".to_string()),
                Value::Symbol("c".to_string()),
            ])
        );
    }

    #[test]
    fn set_bang_requires_existing_binding() {
        let env = Environment::new();
        let result = evaluate(
            read_source("(set! never-defined 1)").unwrap().remove(0),
            env,
        );
        assert!(matches!(result, Err(EvalError::KeyNotFound(_))));
    }

    #[test]
    fn undefined_symbol_lookup_raises_key_not_found() {
        let env = Environment::new();
        let result = evaluate(Value::Symbol("missing".to_string()), env);
        assert!(matches!(result, Err(EvalError::KeyNotFound(_))));
    }

    #[test]
    fn member_call_dispatches_to_environment_binding() {
        let result = run(
            "(begin (define host (env:new (env:current))) (env:define host (quote greet) (lambda (who) who)) (host (quote greet) 42))",
        );
        assert_eq!(result, Value::Number(42.0));
    }

    #[test]
    fn non_callable_application_is_invalid_operation() {
        let env = Environment::new();
        let result = evaluate(read_source("(1 2 3)").unwrap().remove(0), env);
        assert!(matches!(result, Err(EvalError::InvalidOperation { .. })));
    }
}
