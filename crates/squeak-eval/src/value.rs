use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use squeak_par::Stmt;

use crate::environment::Environment;
use crate::error::Result;
use crate::Evaluator;

/// A user-defined function: its declaration plus the environment that was
/// active when it was declared. Invoking it always extends *that*
/// environment, never the caller's — this is what makes closures correct.
pub struct FunctionValue {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub captured: Environment,
}

pub type BuiltinFn = fn(&mut Evaluator, &[Value], u32) -> Result<Value>;

pub struct BuiltinValue {
    pub name: String,
    pub arity: usize,
    pub func: BuiltinFn,
}

#[derive(Clone)]
pub enum Value {
    Number(f64),
    String(Rc<str>),
    Boolean(bool),
    Nil,
    List(Rc<RefCell<Vec<Value>>>),
    Function(Rc<FunctionValue>),
    Builtin(Rc<BuiltinValue>),
    Object(Rc<RefCell<IndexMap<String, Value>>>),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Value {
        Value::String(text.into())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// `Nil` and boolean `false` are falsy; everything else, including
    /// `0`, `""` and `[]`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Nil => "nil",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Object(_) => "object",
        }
    }

    pub fn arity(&self) -> Option<usize> {
        match self {
            Value::Function(f) => Some(f.params.len()),
            Value::Builtin(b) => Some(b.arity),
            _ => None,
        }
    }
}

/// Structural equality for primitives, reference identity for composites:
/// two lists or functions are equal only if they are the same allocation.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (key, val)) in fields.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {val}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_and_false_are_falsy_everything_else_truthy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(Value::list(vec![]).is_truthy());
    }

    #[test]
    fn nil_prints_as_the_word_nil() {
        assert_eq!(Value::Nil.to_string(), "nil");
    }

    #[test]
    fn whole_number_floats_print_without_a_fractional_part() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn lists_are_equal_only_by_reference_identity() {
        let a = Value::list(vec![Value::Number(1.0)]);
        let b = Value::list(vec![Value::Number(1.0)]);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
        let _ = b;
    }

    #[test]
    fn numbers_and_strings_compare_by_value() {
        assert_eq!(Value::Number(1.0), Value::Number(1.0));
        assert_eq!(Value::string("hi"), Value::string("hi"));
    }
}
