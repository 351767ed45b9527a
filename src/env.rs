// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static ENV_COUNT: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no parent.
    pub fn new() -> Rc<Self> {
        ENV_COUNT.fetch_add(1, Ordering::Relaxed);
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment of `parent`.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        ENV_COUNT.fetch_add(1, Ordering::Relaxed);
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Number of environments created so far in this process. Exposed for
    /// debugging, per the environment component's process-wide counter.
    pub fn created_count() -> usize {
        ENV_COUNT.load(Ordering::Relaxed)
    }

    /// Whether `name` is visible from this environment or an ancestor.
    pub fn present(&self, name: &str) -> bool {
        if self.bindings.borrow().contains_key(name) {
            return true;
        }
        match &self.parent {
            Some(parent) => parent.present(name),
            None => false,
        }
    }

    /// Looks up `name`, walking the parent chain. Raises `KeyNotFound` if
    /// unbound anywhere on the chain.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => Err(EvalError::key_not_found(name)),
        }
    }

    /// Binds `name` to `value` in this environment only.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Bulk local `define`; `names` and `values` are paired positionally.
    /// Extra names with no matching value are bound to `Undefined`.
    pub fn update(&self, names: &[String], values: &[Value]) {
        let mut bindings = self.bindings.borrow_mut();
        for (i, name) in names.iter().enumerate() {
            let value = values.get(i).cloned().unwrap_or(Value::Undefined);
            bindings.insert(name.clone(), value);
        }
    }

    /// Whether `name` is bound directly in this scope (not an ancestor).
    pub fn present_locally(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Assigns `value` to the nearest enclosing binding of `name`. Never
    /// creates a new binding; raises `KeyNotFound` if none exists.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::key_not_found(name)),
        }
    }

    /// Names visible from this environment, innermost scope first.
    /// Duplicates across scopes are included.
    pub fn keys(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        if let Some(parent) = &self.parent {
            names.extend(parent.keys());
        }
        names
    }

    /// The parent environment, if any.
    pub fn parent(self: &Rc<Self>) -> Option<Rc<Environment>> {
        self.parent.clone()
    }

    /// Walks to the root of the chain.
    pub fn top_level(self: &Rc<Self>) -> Rc<Environment> {
        match &self.parent {
            Some(parent) => parent.clone().top_level(),
            None => self.clone(),
        }
    }

    /// Debug rendering of the whole chain, one scope per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0;
        let mut current: Option<&Environment> = Some(self);
        while let Some(env) = current {
            let names: Vec<String> = env.bindings.borrow().keys().cloned().collect();
            out.push_str(&format!("scope {}: {:?}\n", depth, names));
            current = env.parent.as_deref();
            depth += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Number(42.0));
        match env.get("x") {
            Ok(Value::Number(n)) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number(42.0)"),
        }
    }

    #[test]
    fn test_undefined_symbol_raises_key_not_found() {
        let env = Environment::new();
        assert!(matches!(env.get("undefined"), Err(EvalError::KeyNotFound { .. })));
    }

    #[test]
    fn test_present_matches_get_success() {
        let env = Environment::new();
        assert!(!env.present("x"));
        env.define("x".to_string(), Value::Nil);
        assert!(env.present("x"));
        assert!(env.get("x").is_ok());
    }

    #[test]
    fn test_shadowing_and_parent_lookup() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(42.0));

        let child = Environment::with_parent(parent.clone());
        child.define("x".to_string(), Value::Number(100.0));

        match child.get("x") {
            Ok(Value::Number(n)) => assert_eq!(n, 100.0),
            _ => panic!("Expected Number(100.0)"),
        }
        match parent.get("x") {
            Ok(Value::Number(n)) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number(42.0)"),
        }
    }

    #[test]
    fn test_set_walks_to_binding_site() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(1.0));
        let child = Environment::with_parent(parent.clone());

        child.set("x", Value::Number(2.0)).unwrap();
        assert!(!child.present_locally("x"));
        match parent.get("x") {
            Ok(Value::Number(n)) => assert_eq!(n, 2.0),
            _ => panic!("expected updated parent binding"),
        }
    }

    #[test]
    fn test_set_without_binding_raises() {
        let env = Environment::new();
        assert!(env.set("never-defined", Value::Nil).is_err());
    }

    #[test]
    fn test_update_binds_missing_to_undefined() {
        let env = Environment::new();
        env.update(
            &["a".to_string(), "b".to_string()],
            &[Value::Number(1.0)],
        );
        assert!(matches!(env.get("a"), Ok(Value::Number(n)) if n == 1.0));
        assert!(matches!(env.get("b"), Ok(Value::Undefined)));
    }

    #[test]
    fn test_top_level_walks_to_root() {
        let root = Environment::new();
        let mid = Environment::with_parent(root.clone());
        let leaf = Environment::with_parent(mid);
        assert!(Rc::ptr_eq(&leaf.top_level(), &root));
    }

    #[test]
    fn test_keys_include_all_ancestors() {
        let parent = Environment::new();
        parent.define("a".to_string(), Value::Nil);
        let child = Environment::with_parent(parent);
        child.define("b".to_string(), Value::Nil);

        let keys = child.keys();
        assert!(keys.contains(&"a".to_string()));
        assert!(keys.contains(&"b".to_string()));
    }
}
