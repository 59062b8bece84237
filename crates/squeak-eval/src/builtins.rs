//! The self-test built-in library.
//!
//! Nothing in `Evaluator` knows about `print` or `length` directly — a
//! host installs whichever built-ins it wants into the global environment
//! before running a program. This module is the set this crate ships for
//! exercising the language on its own, and is what the driver crate
//! installs by default.

use std::io::Write;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Result, RuntimeError};
use crate::value::{BuiltinFn, BuiltinValue, Value};
use crate::Evaluator;

fn builtin_print(eval: &mut Evaluator, args: &[Value], _line: u32) -> Result<Value> {
    write!(eval.output(), "{}", args[0]).ok();
    Ok(Value::Nil)
}

fn builtin_println(eval: &mut Evaluator, args: &[Value], _line: u32) -> Result<Value> {
    writeln!(eval.output(), "{}", args[0]).ok();
    Ok(Value::Nil)
}

fn builtin_length(_eval: &mut Evaluator, args: &[Value], line: u32) -> Result<Value> {
    match &args[0] {
        Value::List(items) => Ok(Value::Number(items.borrow().len() as f64)),
        Value::String(s) => Ok(Value::Number(s.len() as f64)),
        other => Err(RuntimeError::IllegalArgument {
            message: format!("length() requires a list or string, got {}", other.type_name()),
            line,
        }),
    }
}

fn builtin_clone(_eval: &mut Evaluator, args: &[Value], _line: u32) -> Result<Value> {
    match &args[0] {
        Value::List(items) => Ok(Value::list(items.borrow().clone())),
        other => Ok(other.clone()),
    }
}

fn builtin_panic(_eval: &mut Evaluator, args: &[Value], line: u32) -> Result<Value> {
    Err(RuntimeError::IllegalArgument {
        message: args[0].to_string(),
        line,
    })
}

fn builtin_type_of(_eval: &mut Evaluator, args: &[Value], _line: u32) -> Result<Value> {
    Ok(Value::string(args[0].type_name()))
}

fn builtin_range(_eval: &mut Evaluator, args: &[Value], line: u32) -> Result<Value> {
    let n = match &args[0] {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => *n as i64,
        other => {
            return Err(RuntimeError::IllegalArgument {
                message: format!(
                    "range() requires a non-negative integral number, got {}",
                    other
                ),
                line,
            })
        }
    };
    Ok(Value::list((0..n).map(|i| Value::Number(i as f64)).collect()))
}

const BUILTINS: &[(&str, usize, BuiltinFn)] = &[
    ("print", 1, builtin_print as BuiltinFn),
    ("println", 1, builtin_println as BuiltinFn),
    ("length", 1, builtin_length as BuiltinFn),
    ("clone", 1, builtin_clone as BuiltinFn),
    ("panic", 1, builtin_panic as BuiltinFn),
    ("type_of", 1, builtin_type_of as BuiltinFn),
    ("range", 1, builtin_range as BuiltinFn),
];

/// Installs the self-test built-in library into `env`, which should be the
/// interpreter's global environment.
pub fn install_default_builtins(env: &Environment) {
    for (name, arity, func) in BUILTINS {
        env.declare(
            name,
            Value::Builtin(Rc::new(BuiltinValue {
                name: name.to_string(),
                arity: *arity,
                func: *func,
            })),
        );
    }
}
