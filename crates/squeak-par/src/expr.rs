use std::io::Read;

use squeak_lex::TokenKind;

use crate::ast::{CallOp, Expr, PrefixOp};
use crate::error::Result;
use crate::{infix_binding_power, token_to_infix_op, LogicalOp, Parser};

impl<R: Read> Parser<R> {
    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_assignment()
    }

    /// Assignment is the lowest-precedence, right-associative expression
    /// form; its left-hand side must already have parsed as a `Variable`.
    fn parse_assignment(&mut self) -> Result<Expr> {
        let target = self.parse_or()?;

        if self.check(&TokenKind::Assign) {
            let line = self.current.line;
            self.advance()?;
            let value = self.parse_assignment()?;
            return match target {
                Expr::Variable { name, .. } => Ok(Expr::Assignment {
                    id: self.refs.next(),
                    name,
                    value: Box::new(value),
                    line,
                }),
                _ => Err(self.error(line, "invalid assignment target")),
            };
        }

        Ok(target)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::Or) {
            let line = self.current.line;
            self.advance()?;
            let right = self.parse_and()?;
            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_binary(0)?;
        while self.check(&TokenKind::And) {
            let line = self.current.line;
            self.advance()?;
            let right = self.parse_binary(0)?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }
        Ok(left)
    }

    /// Precedence-climbing loop over equality/comparison/term/factor. `and`
    /// and `or` are handled above this level since they produce a distinct
    /// `Logical` node rather than `Infix`.
    fn parse_binary(&mut self, min_bp: u8) -> Result<Expr> {
        let mut left = self.parse_prefix()?;

        loop {
            let Some((lbp, rbp)) = infix_binding_power(&self.current.kind) else {
                break;
            };
            if lbp < min_bp {
                break;
            }

            let op_kind = self.current.kind;
            let line = self.current.line;
            self.advance()?;
            let right = self.parse_binary(rbp)?;
            left = Expr::Infix {
                op: token_to_infix_op(&op_kind),
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        if self.check(&TokenKind::Bang) || self.check(&TokenKind::Minus) {
            let line = self.current.line;
            let is_bang = self.check(&TokenKind::Bang);
            self.advance()?;
            let expr = self.parse_prefix()?;
            let op = if is_bang { PrefixOp::Not } else { PrefixOp::Negate };
            return Ok(Expr::Prefix {
                op,
                expr: Box::new(expr),
                line,
            });
        }
        self.parse_call()
    }

    fn parse_call(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(&TokenKind::LParen) {
                let line = self.current.line;
                self.advance()?;
                let args = self.parse_arguments()?;
                self.expect(&TokenKind::RParen, "expected ')' after arguments")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    op: CallOp::Call,
                    args,
                    line,
                };
            } else if self.check(&TokenKind::LBracket) {
                let line = self.current.line;
                self.advance()?;
                let index = self.parse_expression()?;
                self.expect(&TokenKind::RBracket, "expected ']' after index")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    op: CallOp::Index,
                    args: vec![index],
                    line,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.check(&TokenKind::Comma) {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let line = self.current.line;
        match self.current.kind {
            TokenKind::Integer(n) => {
                self.advance()?;
                Ok(Expr::Integer(n, line))
            }
            TokenKind::Float(n) => {
                self.advance()?;
                Ok(Expr::Float(n, line))
            }
            TokenKind::String(sym) => {
                self.advance()?;
                Ok(Expr::String(sym.as_str().to_string(), line))
            }
            TokenKind::Boolean(b) => {
                self.advance()?;
                Ok(Expr::Boolean(b, line))
            }
            TokenKind::Nil => {
                self.advance()?;
                Ok(Expr::Nil(line))
            }
            TokenKind::Identifier(sym) => {
                let name = sym.as_str().to_string();
                self.advance()?;
                Ok(Expr::Variable {
                    id: self.refs.next(),
                    name,
                    line,
                })
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen, "expected ')' to close grouping")?;
                Ok(Expr::Grouping(Box::new(inner)))
            }
            TokenKind::LBracket => {
                self.advance()?;
                let mut items = Vec::new();
                if !self.check(&TokenKind::RBracket) {
                    loop {
                        items.push(self.parse_expression()?);
                        if self.check(&TokenKind::Comma) {
                            self.advance()?;
                        } else {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RBracket, "expected ']' to close list")?;
                Ok(Expr::List(items, line))
            }
            TokenKind::Illegal(c) => Err(self.error(line, format!("illegal character '{c}'"))),
            _ => Err(self.error(line, "expected an expression")),
        }
    }
}
