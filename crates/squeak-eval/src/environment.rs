//! Lexical environments.
//!
//! Environments form a forest of parent links, never a graph with cycles:
//! a function captures the environment active at its *declaration* site,
//! never one that could later point back at a frame depending on it. That
//! makes a plain `Rc`-based scheme sufficient — there is no way to build a
//! reference cycle through this API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

struct Frame {
    values: HashMap<String, Value>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    pub fn new_global() -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            parent: None,
        })))
    }

    pub fn child(parent: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            parent: Some(parent.clone()),
        })))
    }

    /// Installs a binding in this exact frame, regardless of whether an
    /// outer frame already declares the same name.
    pub fn declare(&self, name: &str, value: Value) {
        self.0.borrow_mut().values.insert(name.to_string(), value);
    }

    fn ancestor(&self, depth: u32) -> Environment {
        let mut env = self.clone();
        for _ in 0..depth {
            let parent = env
                .0
                .borrow()
                .parent
                .clone()
                .expect("resolver-assigned depth must stay within the environment chain");
            env = parent;
        }
        env
    }

    fn root(&self) -> Environment {
        let mut env = self.clone();
        loop {
            let parent = env.0.borrow().parent.clone();
            match parent {
                Some(p) => env = p,
                None => return env,
            }
        }
    }

    pub fn get_at(&self, depth: u32, name: &str) -> Option<Value> {
        self.ancestor(depth).0.borrow().values.get(name).cloned()
    }

    pub fn assign_at(&self, depth: u32, name: &str, value: Value) -> bool {
        let env = self.ancestor(depth);
        let mut frame = env.0.borrow_mut();
        if frame.values.contains_key(name) {
            frame.values.insert(name.to_string(), value);
            true
        } else {
            false
        }
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.root().0.borrow().values.get(name).cloned()
    }

    pub fn assign_global(&self, name: &str, value: Value) -> bool {
        let root = self.root();
        let mut frame = root.0.borrow_mut();
        if frame.values.contains_key(name) {
            frame.values.insert(name.to_string(), value);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_then_resolve_at_depth_zero() {
        let env = Environment::new_global();
        let child = Environment::child(&env);
        child.declare("x", Value::Number(1.0));
        assert_eq!(child.get_at(0, "x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn resolves_through_parent_chain_at_the_right_depth() {
        let global = Environment::new_global();
        global.declare("x", Value::Number(1.0));
        let a = Environment::child(&global);
        let b = Environment::child(&a);
        assert_eq!(b.get_at(2, "x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn declaration_never_mutates_an_outer_binding() {
        let global = Environment::new_global();
        global.declare("x", Value::Number(1.0));
        let child = Environment::child(&global);
        child.declare("x", Value::Number(2.0));
        assert_eq!(global.get_at(0, "x"), Some(Value::Number(1.0)));
        assert_eq!(child.get_at(0, "x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn assignment_without_a_binding_reports_failure_not_a_new_binding() {
        let global = Environment::new_global();
        let child = Environment::child(&global);
        assert!(!child.assign_global("missing", Value::Nil));
    }

    #[test]
    fn global_lookup_walks_all_the_way_to_the_root() {
        let global = Environment::new_global();
        global.declare("x", Value::Number(7.0));
        let a = Environment::child(&global);
        let b = Environment::child(&a);
        assert_eq!(b.get_global("x"), Some(Value::Number(7.0)));
    }
}
