//! squeak-eval - the Squeak tree-walking evaluator.
//!
//! Given an already-resolved program (a `Vec<Stmt>` plus the resolver's
//! `Resolution` side-table) this crate runs it to completion against an
//! output sink and an export table. Nothing here knows about files, the
//! command line, or HTTP — that belongs to whatever embeds this crate.

mod builtins;
mod environment;
mod error;
mod unwind;
mod value;

pub use builtins::install_default_builtins;
pub use environment::Environment;
pub use error::{Result, RuntimeError};
pub use unwind::Signal;
pub use value::{BuiltinFn, BuiltinValue, FunctionValue, Value};

use std::io::Write;
use std::rc::Rc;

use indexmap::IndexMap;
use squeak_par::{CallOp, Expr, InfixOp, LogicalOp, PrefixOp, Stmt};
use squeak_sem::Resolution;

/// Ties a global environment, an output sink and an export table together
/// and drives a resolved program through them. One instance per script run;
/// not safe to share across threads.
pub struct Evaluator {
    globals: Environment,
    output: Box<dyn Write>,
    exports: IndexMap<String, Value>,
}

impl Evaluator {
    pub fn new(output: Box<dyn Write>) -> Self {
        Evaluator {
            globals: Environment::new_global(),
            output,
            exports: IndexMap::new(),
        }
    }

    /// The global environment, for a host that wants to pre-seed bindings
    /// (built-ins, host objects) before calling `execute`.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Declares a binding directly in the global environment.
    pub fn declare(&mut self, name: &str, value: Value) {
        self.globals.declare(name, value);
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Values stashed by `export` statements, keyed by alias, in the order
    /// they were exported.
    pub fn exports(&self) -> &IndexMap<String, Value> {
        &self.exports
    }

    /// Runs every top-level statement in order against the global
    /// environment. A `return`, `break` or `continue` reaching the top
    /// level is a fault, since nothing at this level can catch one.
    pub fn execute(&mut self, program: &[Stmt], resolution: &Resolution) -> Result<()> {
        let global = self.globals.clone();
        for stmt in program {
            match self.exec_stmt(stmt, &global, resolution)? {
                Signal::Normal => {}
                other => {
                    return Err(RuntimeError::UnexpectedUnwind {
                        kind: other.name(),
                        line: other.line(),
                    })
                }
            }
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Environment, resolution: &Resolution) -> Result<Signal> {
        match stmt {
            Stmt::Expression(expr) => {
                self.eval_expr(expr, env, resolution)?;
                Ok(Signal::Normal)
            }
            Stmt::Declaration { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr, env, resolution)?,
                    None => Value::Nil,
                };
                env.declare(name, value);
                Ok(Signal::Normal)
            }
            Stmt::Block(body) => {
                let child = Environment::child(env);
                self.exec_block(body, &child, resolution)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval_expr(condition, env, resolution)?.is_truthy() {
                    self.exec_stmt(then_branch, env, resolution)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, env, resolution)
                } else {
                    Ok(Signal::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_expr(condition, env, resolution)?.is_truthy() {
                    match self.exec_stmt(body, env, resolution)? {
                        Signal::Normal | Signal::Continue(_) => {}
                        Signal::Break(_) => break,
                        ret @ Signal::Return(..) => return Ok(ret),
                    }
                }
                Ok(Signal::Normal)
            }
            Stmt::Function { name, params, body, .. } => {
                let func = FunctionValue {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    captured: env.clone(),
                };
                env.declare(name, Value::Function(Rc::new(func)));
                Ok(Signal::Normal)
            }
            Stmt::Return { value, line } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env, resolution)?,
                    None => Value::Nil,
                };
                Ok(Signal::Return(value, *line))
            }
            Stmt::Break { line } => Ok(Signal::Break(*line)),
            Stmt::Continue { line } => Ok(Signal::Continue(*line)),
            Stmt::Import { source, .. } => {
                // Delegated to the host; accepted here without side effects
                // unless a host hook is registered elsewhere.
                self.eval_expr(source, env, resolution)?;
                Ok(Signal::Normal)
            }
            Stmt::Export { value, alias, .. } => {
                let value = self.eval_expr(value, env, resolution)?;
                self.exports.insert(alias.clone(), value);
                Ok(Signal::Normal)
            }
            Stmt::Noop => Ok(Signal::Normal),
        }
    }

    fn exec_block(&mut self, body: &[Stmt], env: &Environment, resolution: &Resolution) -> Result<Signal> {
        for stmt in body {
            match self.exec_stmt(stmt, env, resolution)? {
                Signal::Normal => {}
                other => return Ok(other),
            }
        }
        Ok(Signal::Normal)
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment, resolution: &Resolution) -> Result<Value> {
        match expr {
            Expr::Integer(n, _) => Ok(Value::Number(*n as f64)),
            Expr::Float(n, _) => Ok(Value::Number(*n)),
            Expr::String(s, _) => Ok(Value::string(s.as_str())),
            Expr::Boolean(b, _) => Ok(Value::Boolean(*b)),
            Expr::Nil(_) => Ok(Value::Nil),
            Expr::List(items, _) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item, env, resolution)?);
                }
                Ok(Value::list(values))
            }
            Expr::Grouping(inner) => self.eval_expr(inner, env, resolution),
            Expr::Prefix { op, expr: operand, line } => {
                let value = self.eval_expr(operand, env, resolution)?;
                match op {
                    PrefixOp::Not => Ok(Value::Boolean(!value.is_truthy())),
                    PrefixOp::Negate => match value {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(RuntimeError::UnrecognizedOperandType {
                            op: format!("unary - on {}", other.type_name()),
                            line: *line,
                        }),
                    },
                }
            }
            Expr::Infix { op, left, right, line } => {
                let lhs = self.eval_expr(left, env, resolution)?;
                let rhs = self.eval_expr(right, env, resolution)?;
                self.eval_infix(*op, lhs, rhs, *line)
            }
            Expr::Logical { op, left, right, .. } => {
                let lhs = self.eval_expr(left, env, resolution)?;
                match op {
                    LogicalOp::And => {
                        if !lhs.is_truthy() {
                            Ok(lhs)
                        } else {
                            self.eval_expr(right, env, resolution)
                        }
                    }
                    LogicalOp::Or => {
                        if lhs.is_truthy() {
                            Ok(lhs)
                        } else {
                            self.eval_expr(right, env, resolution)
                        }
                    }
                }
            }
            Expr::Variable { id, name, line } => self.lookup(*id, name, env, resolution, *line),
            Expr::Assignment { id, name, value, line } => {
                let value = self.eval_expr(value, env, resolution)?;
                self.assign(*id, name, value.clone(), env, resolution, *line)?;
                Ok(value)
            }
            Expr::Call { callee, op, args, line } => {
                let callee_value = self.eval_expr(callee, env, resolution)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg, env, resolution)?);
                }
                match op {
                    CallOp::Call => self.call(callee_value, &arg_values, resolution, *line),
                    CallOp::Index => self.index(callee_value, &arg_values, *line),
                }
            }
        }
    }

    fn eval_infix(&mut self, op: InfixOp, lhs: Value, rhs: Value, line: u32) -> Result<Value> {
        use InfixOp::*;
        match op {
            Add => match (&lhs, &rhs) {
                (Value::String(a), Value::String(b)) => {
                    Ok(Value::string(format!("{a}{b}")))
                }
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                _ => Err(RuntimeError::UnrecognizedOperandType {
                    op: format!("+ between {} and {}", lhs.type_name(), rhs.type_name()),
                    line,
                }),
            },
            Sub | Mul | Div => {
                let (a, b) = numeric_pair(&lhs, &rhs, op_symbol(op), line)?;
                match op {
                    Sub => Ok(Value::Number(a - b)),
                    Mul => Ok(Value::Number(a * b)),
                    Div => {
                        if b == 0.0 {
                            Err(RuntimeError::IllegalArgument {
                                message: "division by zero".to_string(),
                                line,
                            })
                        } else {
                            Ok(Value::Number(a / b))
                        }
                    }
                    _ => unreachable!(),
                }
            }
            Lt | Gt => {
                let (a, b) = numeric_pair(&lhs, &rhs, op_symbol(op), line)?;
                let result = if op == Lt { a < b } else { a > b };
                Ok(Value::Boolean(result))
            }
            LtEq | GtEq => {
                let (a, b) = numeric_pair(&lhs, &rhs, op_symbol(op), line)?;
                let strict = if op == LtEq { a < b } else { a > b };
                Ok(Value::Boolean(strict || a == b))
            }
            Eq | NotEq => {
                let equal = match (&lhs, &rhs) {
                    (Value::Nil, Value::Nil) => true,
                    (Value::Nil, _) | (_, Value::Nil) => {
                        return Err(RuntimeError::UnrecognizedOperandType {
                            op: format!("{} between nil and {}", op_symbol(op), if matches!(lhs, Value::Nil) { rhs.type_name() } else { lhs.type_name() }),
                            line,
                        })
                    }
                    _ if lhs.type_name() != rhs.type_name() => {
                        return Err(RuntimeError::UnrecognizedOperandType {
                            op: format!("{} between {} and {}", op_symbol(op), lhs.type_name(), rhs.type_name()),
                            line,
                        })
                    }
                    _ => lhs == rhs,
                };
                Ok(Value::Boolean(if op == Eq { equal } else { !equal }))
            }
        }
    }

    fn lookup(&self, id: squeak_util::RefId, name: &str, env: &Environment, resolution: &Resolution, line: u32) -> Result<Value> {
        let found = match resolution.depth(id) {
            Some(depth) => env.get_at(depth, name),
            None => env.get_global(name),
        };
        found.ok_or_else(|| RuntimeError::NotDeclared { name: name.to_string(), line })
    }

    fn assign(&self, id: squeak_util::RefId, name: &str, value: Value, env: &Environment, resolution: &Resolution, line: u32) -> Result<()> {
        let ok = match resolution.depth(id) {
            Some(depth) => env.assign_at(depth, name, value),
            None => env.assign_global(name, value),
        };
        if ok {
            Ok(())
        } else {
            Err(RuntimeError::NotDeclared { name: name.to_string(), line })
        }
    }

    fn call(&mut self, callee: Value, args: &[Value], resolution: &Resolution, line: u32) -> Result<Value> {
        let expected = callee.arity().ok_or(RuntimeError::NotCallable { line })?;
        if expected != args.len() {
            return Err(RuntimeError::ArityMismatch {
                expected,
                got: args.len(),
                line,
            });
        }
        match callee {
            Value::Function(func) => self.call_function(&func, args, resolution),
            Value::Builtin(builtin) => (builtin.func)(self, args, line),
            _ => Err(RuntimeError::NotCallable { line }),
        }
    }

    fn call_function(&mut self, func: &FunctionValue, args: &[Value], resolution: &Resolution) -> Result<Value> {
        let call_env = Environment::child(&func.captured);
        for (param, arg) in func.params.iter().zip(args) {
            call_env.declare(param, arg.clone());
        }
        for stmt in &func.body {
            match self.exec_stmt(stmt, &call_env, resolution)? {
                Signal::Normal => {}
                Signal::Return(value, _) => return Ok(value),
                other => {
                    return Err(RuntimeError::UnexpectedUnwind {
                        kind: other.name(),
                        line: other.line(),
                    })
                }
            }
        }
        Ok(Value::Nil)
    }

    fn index(&self, target: Value, args: &[Value], line: u32) -> Result<Value> {
        let index = match &args[0] {
            Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => *n as usize,
            other => {
                return Err(RuntimeError::IllegalArgument {
                    message: format!("index must be a non-negative integer, got {other}"),
                    line,
                })
            }
        };
        match target {
            Value::List(items) => items.borrow().get(index).cloned().ok_or_else(|| {
                RuntimeError::IllegalArgument {
                    message: format!("index {index} out of bounds"),
                    line,
                }
            }),
            other => Err(RuntimeError::UnrecognizedOperandType {
                op: format!("index into {}", other.type_name()),
                line,
            }),
        }
    }
}

fn op_symbol(op: InfixOp) -> &'static str {
    match op {
        InfixOp::Add => "+",
        InfixOp::Sub => "-",
        InfixOp::Mul => "*",
        InfixOp::Div => "/",
        InfixOp::Eq => "==",
        InfixOp::NotEq => "!=",
        InfixOp::Lt => "<",
        InfixOp::LtEq => "<=",
        InfixOp::Gt => ">",
        InfixOp::GtEq => ">=",
    }
}

fn numeric_pair(lhs: &Value, rhs: &Value, op: &str, line: u32) -> Result<(f64, f64)> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::UnrecognizedOperandType {
            op: format!("{op} between {} and {}", lhs.type_name(), rhs.type_name()),
            line,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squeak_lex::Scanner;
    use squeak_par::Parser;
    use squeak_sem::Resolver;
    use std::io::Cursor as IoCursor;

    fn run(src: &str) -> Evaluator {
        let scanner = Scanner::new(IoCursor::new(src.as_bytes().to_vec())).unwrap();
        let (program, parse_errors) = Parser::new(scanner).unwrap().parse_program();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");
        let (resolution, resolve_errors) = Resolver::resolve(&program);
        assert!(resolve_errors.is_empty(), "unexpected resolve errors: {resolve_errors:?}");
        let mut eval = Evaluator::new(Box::new(Vec::new()));
        install_default_builtins(eval.globals());
        eval.execute(&program, &resolution).unwrap();
        eval
    }

    fn run_with_output(src: &str) -> String {
        use std::cell::RefCell;
        use std::rc::Rc as StdRc;

        struct Shared(StdRc<RefCell<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.borrow_mut().write(buf)
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let scanner = Scanner::new(IoCursor::new(src.as_bytes().to_vec())).unwrap();
        let (program, parse_errors) = Parser::new(scanner).unwrap().parse_program();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");
        let (resolution, resolve_errors) = Resolver::resolve(&program);
        assert!(resolve_errors.is_empty(), "unexpected resolve errors: {resolve_errors:?}");

        let buf = StdRc::new(RefCell::new(Vec::new()));
        let mut eval = Evaluator::new(Box::new(Shared(buf.clone())));
        install_default_builtins(eval.globals());
        eval.execute(&program, &resolution).unwrap();
        String::from_utf8(buf.borrow().clone()).unwrap()
    }

    #[test]
    fn arithmetic_and_string_concatenation() {
        let out = run_with_output(r#"println(1 + 2); println("a" + "b");"#);
        assert_eq!(out, "3\nab\n");
    }

    #[test]
    fn closures_capture_their_declaring_environment() {
        let out = run_with_output(
            r#"
            function make_counter() {
                var count = 0;
                function increment() {
                    count = count + 1;
                    return count;
                }
                return increment;
            }
            var counter = make_counter();
            println(counter());
            println(counter());
            "#,
        );
        assert_eq!(out, "1\n2\n");
    }

    #[test]
    fn while_loop_honors_break_and_continue() {
        let out = run_with_output(
            r#"
            var i = 0;
            while (true) {
                i = i + 1;
                if (i == 2) { continue; }
                if (i > 4) { break; }
                println(i);
            }
            "#,
        );
        assert_eq!(out, "1\n3\n4\n");
    }

    #[test]
    fn and_or_return_operands_unchanged_not_coerced_booleans() {
        let out = run_with_output(r#"println(0 or "fallback"); println(nil and "skipped");"#);
        assert_eq!(out, "0\nnil\n");
    }

    #[test]
    fn export_collects_values_under_their_alias() {
        let eval = run("export 42 as answer;");
        assert_eq!(eval.exports().get("answer"), Some(&Value::Number(42.0)));
    }

    #[test]
    fn undeclared_variable_is_a_runtime_fault() {
        let scanner = Scanner::new(IoCursor::new(b"x;".to_vec())).unwrap();
        let (program, _) = Parser::new(scanner).unwrap().parse_program();
        let (resolution, _) = Resolver::resolve(&program);
        let mut eval = Evaluator::new(Box::new(Vec::new()));
        let err = eval.execute(&program, &resolution).unwrap_err();
        assert!(matches!(err, RuntimeError::NotDeclared { .. }));
    }

    #[test]
    fn division_by_zero_is_a_fault() {
        let scanner = Scanner::new(IoCursor::new(b"1 / 0;".to_vec())).unwrap();
        let (program, _) = Parser::new(scanner).unwrap().parse_program();
        let (resolution, _) = Resolver::resolve(&program);
        let mut eval = Evaluator::new(Box::new(Vec::new()));
        let err = eval.execute(&program, &resolution).unwrap_err();
        assert!(matches!(err, RuntimeError::IllegalArgument { .. }));
    }
}
