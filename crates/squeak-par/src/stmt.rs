use std::io::Read;

use squeak_lex::TokenKind;

use crate::ast::{Expr, Stmt};
use crate::error::Result;
use crate::Parser;

impl<R: Read> Parser<R> {
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt> {
        match self.current.kind {
            TokenKind::Var => self.parse_declaration(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Function => self.parse_function(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let line = self.current.line;
                self.advance()?;
                self.expect(&TokenKind::Semicolon, "expected ';' after 'break'")?;
                Ok(Stmt::Break { line })
            }
            TokenKind::Continue => {
                let line = self.current.line;
                self.advance()?;
                self.expect(&TokenKind::Semicolon, "expected ';' after 'continue'")?;
                Ok(Stmt::Continue { line })
            }
            TokenKind::Import => self.parse_import(),
            TokenKind::Export => self.parse_export(),
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(Stmt::Noop)
            }
            _ => self.parse_expression_statement(),
        }
    }

    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect(&TokenKind::LBrace, "expected '{'")?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }
        self.expect(&TokenKind::RBrace, "expected '}' to close block")?;
        Ok(stmts)
    }

    fn parse_declaration(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.advance()?; // 'var'
        let name = self.expect_identifier("expected a variable name after 'var'")?;
        let initializer = if self.check(&TokenKind::Assign) {
            self.advance()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon, "expected ';' after variable declaration")?;
        Ok(Stmt::Declaration { name, initializer, line })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.advance()?; // 'if'
        let condition = self.parse_expression()?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.check(&TokenKind::Else) {
            self.advance()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        self.advance()?; // 'while'
        let condition = self.parse_expression()?;
        let body = Box::new(Stmt::Block(self.parse_block()?));
        Ok(Stmt::While { condition, body })
    }

    /// `for init cond ';' increment? block` desugars into
    /// `{ init; while cond { body...; increment; } }`.
    fn parse_for(&mut self) -> Result<Stmt> {
        self.advance()?; // 'for'
        let init = self.parse_declaration()?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, "expected ';' after for-loop condition")?;
        let increment = if !self.check(&TokenKind::LBrace) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let mut body = self.parse_block()?;
        if let Some(inc) = increment {
            body.push(Stmt::Expression(inc));
        }
        let while_stmt = Stmt::While {
            condition,
            body: Box::new(Stmt::Block(body)),
        };
        Ok(Stmt::Block(vec![init, while_stmt]))
    }

    fn parse_function(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.advance()?; // 'function'
        let name = self.expect_identifier("expected a function name")?;
        self.expect(&TokenKind::LParen, "expected '(' after function name")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.expect_identifier("expected a parameter name")?);
                if self.check(&TokenKind::Comma) {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "expected ')' after parameters")?;
        let body = self.parse_block()?;
        Ok(Stmt::Function { name, params, body, line })
    }

    fn parse_return(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.advance()?; // 'return'
        let value = if !self.check(&TokenKind::Semicolon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon, "expected ';' after return value")?;
        Ok(Stmt::Return { value, line })
    }

    fn parse_import(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.advance()?; // 'import'
        let source = match self.current.kind {
            TokenKind::String(sym) => {
                self.advance()?;
                Expr::String(sym.as_str().to_string(), line)
            }
            TokenKind::Identifier(sym) => {
                let name = sym.as_str().to_string();
                self.advance()?;
                Expr::Variable { id: self.refs.next(), name, line }
            }
            _ => return Err(self.error(line, "expected a string or identifier after 'import'")),
        };
        self.expect(&TokenKind::Semicolon, "expected ';' after import")?;
        Ok(Stmt::Import { source, line })
    }

    fn parse_export(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.advance()?; // 'export'
        let (value, default_alias) = match self.current.kind {
            TokenKind::Identifier(sym) => {
                let name = sym.as_str().to_string();
                self.advance()?;
                (
                    Expr::Variable { id: self.refs.next(), name: name.clone(), line },
                    Some(name),
                )
            }
            TokenKind::String(sym) => {
                let text = sym.as_str().to_string();
                self.advance()?;
                (Expr::String(text, line), None)
            }
            _ => return Err(self.error(line, "expected a value to export")),
        };

        let explicit_alias = if self.check(&TokenKind::As) {
            self.advance()?;
            Some(self.expect_identifier("expected an alias name after 'as'")?)
        } else {
            None
        };

        let alias = match explicit_alias.or(default_alias) {
            Some(alias) => alias,
            None => return Err(self.error(line, "exporting a literal requires an 'as' alias")),
        };

        self.expect(&TokenKind::Semicolon, "expected ';' after export")?;
        Ok(Stmt::Export { value, alias, line })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt> {
        let expr = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, "expected ';' after expression")?;
        Ok(Stmt::Expression(expr))
    }
}
