//! squeak-sem - the Squeak resolver.
//!
//! A single pass over the AST that assigns every `Variable`/`Assignment`
//! reference a lexical depth before the evaluator ever runs, so variable
//! lookup at runtime is a fixed number of parent hops instead of a name
//! search. References that resolve to no lexical scope are left out of the
//! resulting table entirely — the evaluator treats an absent entry as a
//! global reference.

mod error;
mod scope;

pub use error::{ResolveError, Result};
pub use scope::{RibKind, ScopeTree};

use rustc_hash::FxHashMap;
use squeak_par::{Expr, Stmt};
use squeak_util::RefId;

/// The resolver's output: a side-table from reference id to lexical depth.
/// The AST itself is never mutated.
#[derive(Debug, Default)]
pub struct Resolution {
    depths: FxHashMap<RefId, u32>,
}

impl Resolution {
    pub fn depth(&self, id: RefId) -> Option<u32> {
        self.depths.get(&id).copied()
    }
}

pub struct Resolver {
    scopes: ScopeTree,
    resolution: Resolution,
    errors: Vec<ResolveError>,
}

impl Resolver {
    pub fn resolve(program: &[Stmt]) -> (Resolution, Vec<ResolveError>) {
        let mut resolver = Self {
            scopes: ScopeTree::new(),
            resolution: Resolution::default(),
            errors: Vec::new(),
        };
        for stmt in program {
            resolver.resolve_stmt(stmt);
        }
        (resolver.resolution, resolver.errors)
    }

    fn declare(&mut self, name: &str, line: u32) {
        if !self.scopes.declare(name) {
            self.errors.push(ResolveError::Redeclaration {
                name: name.to_string(),
                line,
            });
        }
    }

    fn resolve_reference(&mut self, id: RefId, name: &str) {
        if let Some(depth) = self.scopes.resolve(name) {
            self.resolution.depths.insert(id, depth);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::Declaration { name, initializer, line } => {
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.declare(name, *line);
            }
            Stmt::Block(body) => {
                self.scopes.enter_scope(RibKind::Block);
                for stmt in body {
                    self.resolve_stmt(stmt);
                }
                self.scopes.exit_scope();
            }
            Stmt::If { condition, then_branch, else_branch } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            Stmt::Function { name, params, body, line } => {
                // Declared in the enclosing scope (not the function's own
                // body scope): since the closure captures that scope by
                // reference and the binding is installed before the
                // closure is ever invoked, recursive self-calls already
                // resolve correctly without needing a second declaration.
                self.declare(name, *line);

                self.scopes.enter_scope(RibKind::Function);
                for param in params {
                    self.declare(param, *line);
                }
                for stmt in body {
                    self.resolve_stmt(stmt);
                }
                self.scopes.exit_scope();
            }
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Noop => {}
            Stmt::Import { source, .. } => self.resolve_expr(source),
            Stmt::Export { value, .. } => self.resolve_expr(value),
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Integer(..) | Expr::Float(..) | Expr::String(..) | Expr::Boolean(..) | Expr::Nil(..) => {}
            Expr::List(items, _) => {
                for item in items {
                    self.resolve_expr(item);
                }
            }
            Expr::Grouping(inner) => self.resolve_expr(inner),
            Expr::Prefix { expr, .. } => self.resolve_expr(expr),
            Expr::Infix { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Variable { id, name, .. } => self.resolve_reference(*id, name),
            Expr::Assignment { id, name, value, .. } => {
                self.resolve_expr(value);
                self.resolve_reference(*id, name);
            }
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squeak_lex::Scanner;
    use std::io::Cursor as IoCursor;

    fn resolve(src: &str) -> (Vec<Stmt>, Resolution, Vec<ResolveError>) {
        let scanner = Scanner::new(IoCursor::new(src.as_bytes().to_vec())).unwrap();
        let (stmts, parse_errors) = squeak_par::Parser::new(scanner).unwrap().parse_program();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");
        let (resolution, resolve_errors) = Resolver::resolve(&stmts);
        (stmts, resolution, resolve_errors)
    }

    fn first_variable_id(stmt: &Stmt) -> RefId {
        fn find(expr: &Expr) -> Option<RefId> {
            match expr {
                Expr::Variable { id, .. } => Some(*id),
                Expr::Grouping(inner) => find(inner),
                Expr::Prefix { expr, .. } => find(expr),
                Expr::Infix { left, right, .. } | Expr::Logical { left, right, .. } => {
                    find(left).or_else(|| find(right))
                }
                Expr::Call { callee, args, .. } => {
                    find(callee).or_else(|| args.iter().find_map(find))
                }
                Expr::Assignment { value, .. } => find(value),
                _ => None,
            }
        }
        match stmt {
            Stmt::Expression(expr) => find(expr).expect("no variable reference found"),
            _ => panic!("expected an expression statement"),
        }
    }

    #[test]
    fn global_reference_has_no_depth() {
        let (stmts, resolution, errors) = resolve("var x = 1; x;");
        assert!(errors.is_empty());
        let id = first_variable_id(&stmts[1]);
        assert_eq!(resolution.depth(id), None);
    }

    #[test]
    fn block_local_reference_resolves_at_depth_zero() {
        let (stmts, resolution, errors) = resolve("{ var x = 1; x; }");
        assert!(errors.is_empty());
        match &stmts[0] {
            Stmt::Block(body) => {
                let id = first_variable_id(&body[1]);
                assert_eq!(resolution.depth(id), Some(0));
            }
            _ => panic!("expected a block"),
        }
    }

    #[test]
    fn redeclaration_in_the_same_block_is_an_error() {
        let (_, _, errors) = resolve("{ var x = 1; var x = 2; }");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ResolveError::Redeclaration { .. }));
    }

    #[test]
    fn shadowing_in_a_nested_block_is_fine() {
        let (_, _, errors) = resolve("{ var x = 1; { var x = 2; } }");
        assert!(errors.is_empty());
    }
}
