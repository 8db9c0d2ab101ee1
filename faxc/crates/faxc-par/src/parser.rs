//! Recursive descent over statements and blocks; shunting-yard over
//! binary expressions (spec §4.2).

use faxc_lex::{Token, TokenKind};
use faxc_util::{Position, Symbol};

use crate::ast::{Ast, Block, BinOp, Branches, ElseBranch, Expr, KVPair, Stmt, UnOp};
use crate::error::ParseError;

/// Parses a complete token stream (as produced by [`faxc_lex::Lexer::tokenize`],
/// always `Eof`-terminated) into an [`Ast`].
pub fn parse(tokens: Vec<Token>) -> Result<Ast, ParseError> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        assert!(!tokens.is_empty(), "token stream must end in Eof");
        Self { tokens, position: 0 }
    }

    /// `program := block(Eof)`.
    pub fn parse_program(&mut self) -> Result<Ast, ParseError> {
        self.parse_block(TokenKind::Eof)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn current_position(&self) -> Position {
        self.current().position
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.current_position(), message)
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// `block(T) := newline* (statement newline*)* until T`.
    fn parse_block(&mut self, terminator: TokenKind) -> Result<Block, ParseError> {
        let mut statements = Vec::new();
        self.skip_newlines();
        while !self.check(terminator) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.skip_newlines();
        }
        if !self.check(terminator) {
            return Err(self.error(format!("expected {terminator:?}")));
        }
        Ok(Block { statements })
    }

    /// `statement := assign | put | call | loop | if | include | return`.
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current().kind {
            TokenKind::Symbol => self.parse_assign_or_put(),
            TokenKind::Call => Ok(Stmt::Call(self.parse_call_expr()?)),
            TokenKind::Loop => self.parse_loop_stmt(),
            TokenKind::If => Ok(Stmt::If(self.parse_if()?)),
            TokenKind::Include => self.parse_include_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            _ => Err(self.error("expected statement")),
        }
    }

    /// `assign := Symbol '<-' expression`
    /// `put := Symbol ('[' expression ']' | '.' Symbol) '<-' expression`
    fn parse_assign_or_put(&mut self) -> Result<Stmt, ParseError> {
        let name_token = self.advance();
        let position = name_token.position;
        let name = Symbol::intern(&name_token.lexeme);

        if self.check(TokenKind::LeftSquare) {
            self.advance();
            let key = self.parse_expression()?;
            self.expect(TokenKind::RightSquare, "']'")?;
            self.expect(TokenKind::Assign, "'<-'")?;
            let value = self.parse_expression()?;
            Ok(Stmt::Put {
                receiver: name,
                key: Box::new(key),
                value,
                position,
            })
        } else if self.check(TokenKind::Dot) {
            self.advance();
            let field = self.expect(TokenKind::Symbol, "field name")?;
            let key = Expr::String(field.lexeme.clone(), field.position);
            self.expect(TokenKind::Assign, "'<-'")?;
            let value = self.parse_expression()?;
            Ok(Stmt::Put {
                receiver: name,
                key: Box::new(key),
                value,
                position,
            })
        } else {
            self.expect(TokenKind::Assign, "'<-'")?;
            let value = self.parse_expression()?;
            Ok(Stmt::Assign {
                name,
                value,
                position,
            })
        }
    }

    /// `loop := 'loop' expression '{' block('}') '}'`
    fn parse_loop_stmt(&mut self) -> Result<Stmt, ParseError> {
        let position = self.advance().position;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let body = self.parse_block(TokenKind::RightBrace)?;
        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(Stmt::Loop {
            condition,
            body,
            position,
        })
    }

    /// `if := 'if' expression '{' block('}') '}' (elsepart)?`
    /// `elsepart := 'else' ('if' expression '{' block '}' elsepart? | '{' block '}')`
    fn parse_if(&mut self) -> Result<Branches, ParseError> {
        let position = self.expect(TokenKind::If, "'if'")?.position;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::LeftBrace, "'{'")?;
        let then_block = self.parse_block(TokenKind::RightBrace)?;
        self.expect(TokenKind::RightBrace, "'}'")?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            if self.check(TokenKind::If) {
                Some(ElseBranch::ElseIf(Box::new(self.parse_if()?)))
            } else {
                self.expect(TokenKind::LeftBrace, "'{'")?;
                let block = self.parse_block(TokenKind::RightBrace)?;
                self.expect(TokenKind::RightBrace, "'}'")?;
                Some(ElseBranch::Else(block))
            }
        } else {
            None
        };

        Ok(Branches {
            condition,
            then_block,
            else_branch,
            position,
        })
    }

    /// `include := 'include' stringLiteral`
    fn parse_include_stmt(&mut self) -> Result<Stmt, ParseError> {
        let position = self.advance().position;
        let path_token = self.expect(TokenKind::String, "a string literal")?;
        Ok(Stmt::Include {
            path: path_token.lexeme,
            position,
        })
    }

    /// `return := 'return' expression`
    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let position = self.advance().position;
        let value = self.parse_expression()?;
        Ok(Stmt::Return { value, position })
    }

    /// `call := '@' expression '(' (expression (',' expression)*)? ')'`
    fn parse_call_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.expect(TokenKind::Call, "'@'")?.position;
        let callee = self.parse_expression()?;
        self.expect(TokenKind::LeftParen, "'('")?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            args.push(self.parse_expression()?);
            while self.check(TokenKind::Separator) {
                self.advance();
                args.push(self.parse_expression()?);
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            position,
        })
    }

    /// `expression := primary (binop primary)*`, lowered with the
    /// shunting-yard algorithm: an operand stack and an operator stack,
    /// popping onto the operand stack while the operator on top of the
    /// stack binds at least as tightly as the incoming one (all operators
    /// here are left-associative, spec §4.2).
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.parse_unary()?];
        let mut operators: Vec<(BinOp, Position)> = Vec::new();

        while let Some(op) = self.peek_binop() {
            let position = self.advance().position;
            while let Some(&(top, _)) = operators.last() {
                if top.precedence() >= op.precedence() {
                    Self::reduce(&mut operands, operators.pop().unwrap());
                } else {
                    break;
                }
            }
            operators.push((op, position));
            operands.push(self.parse_unary()?);
        }

        while let Some(top) = operators.pop() {
            Self::reduce(&mut operands, top);
        }

        Ok(operands
            .pop()
            .expect("shunting-yard leaves exactly one operand"))
    }

    fn reduce(operands: &mut Vec<Expr>, (op, position): (BinOp, Position)) {
        let right = operands.pop().expect("binary operator missing rhs");
        let left = operands.pop().expect("binary operator missing lhs");
        operands.push(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position,
        });
    }

    fn peek_binop(&self) -> Option<BinOp> {
        if self.current().kind != TokenKind::Operator {
            return None;
        }
        Some(match self.current().lexeme.as_str() {
            "||" => BinOp::Or,
            "&&" => BinOp::And,
            "|" => BinOp::BitOr,
            "^" => BinOp::BitXor,
            "&" => BinOp::BitAnd,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "<" => BinOp::Lt,
            "<=" => BinOp::Le,
            ">" => BinOp::Gt,
            ">=" => BinOp::Ge,
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "%" => BinOp::Mod,
            _ => return None,
        })
    }

    /// `unop primary`. Ambiguous unary/binary `+`/`-` is resolved
    /// positionally: reached only when a primary is expected, so any `+`,
    /// `-`, `!` or `~` here is necessarily unary (spec §4.2).
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let unop = if self.current().kind == TokenKind::Operator {
            match self.current().lexeme.as_str() {
                "-" => Some(UnOp::Neg),
                "+" => Some(UnOp::Pos),
                "!" => Some(UnOp::Not),
                "~" => Some(UnOp::BitNot),
                _ => None,
            }
        } else {
            None
        };

        if let Some(op) = unop {
            let position = self.advance().position;
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                position,
            });
        }

        self.parse_primary()
    }

    /// `primary := literal | reference | get | table | function | call
    /// | '(' expression ')' | unop primary`
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Integer => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| ParseError::new(token.position, "invalid integer literal"))?;
                Ok(Expr::Integer(value, token.position))
            }
            TokenKind::Float => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| ParseError::new(token.position, "invalid float literal"))?;
                Ok(Expr::Float(value, token.position))
            }
            TokenKind::Bool => {
                self.advance();
                Ok(Expr::Bool(token.lexeme == "true", token.position))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::String(token.lexeme, token.position))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Null(token.position))
            }
            TokenKind::Symbol => self.parse_reference_or_get(),
            TokenKind::LeftBrace => self.parse_table_expr(),
            TokenKind::Function => self.parse_function_expr(),
            TokenKind::Call => self.parse_call_expr(),
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(expr)
            }
            _ => Err(self.error("expected an expression")),
        }
    }

    /// `reference := Symbol`; `get := Symbol ('[' expression ']' | '.' Symbol)`.
    fn parse_reference_or_get(&mut self) -> Result<Expr, ParseError> {
        let name_token = self.advance();
        let position = name_token.position;
        let receiver = Symbol::intern(&name_token.lexeme);

        if self.check(TokenKind::LeftSquare) {
            self.advance();
            let key = self.parse_expression()?;
            self.expect(TokenKind::RightSquare, "']'")?;
            Ok(Expr::Get {
                receiver,
                key: Box::new(key),
                position,
            })
        } else if self.check(TokenKind::Dot) {
            self.advance();
            let field = self.expect(TokenKind::Symbol, "field name")?;
            let key = Expr::String(field.lexeme.clone(), field.position);
            Ok(Expr::Get {
                receiver,
                key: Box::new(key),
                position,
            })
        } else {
            Ok(Expr::Reference(receiver, position))
        }
    }

    /// `function := '$' '(' params? ')' '{' block('}') '}'`
    fn parse_function_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.expect(TokenKind::Function, "'$'")?.position;
        self.expect(TokenKind::LeftParen, "'('")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            let first = self.expect(TokenKind::Symbol, "a parameter name")?;
            params.push(Symbol::intern(&first.lexeme));
            while self.check(TokenKind::Separator) {
                self.advance();
                let next = self.expect(TokenKind::Symbol, "a parameter name")?;
                params.push(Symbol::intern(&next.lexeme));
            }
        }
        self.expect(TokenKind::RightParen, "')'")?;

        self.expect(TokenKind::LeftBrace, "'{'")?;
        let body = self.parse_block(TokenKind::RightBrace)?;
        self.expect(TokenKind::RightBrace, "'}'")?;

        Ok(Expr::Function {
            params,
            body,
            position,
        })
    }

    /// `table := '{' (kvpair (',' kvpair)*)? '}'`
    fn parse_table_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.expect(TokenKind::LeftBrace, "'{'")?.position;
        let mut entries = Vec::new();
        if !self.check(TokenKind::RightBrace) {
            entries.push(self.parse_kvpair()?);
            while self.check(TokenKind::Separator) {
                self.advance();
                entries.push(self.parse_kvpair()?);
            }
        }
        self.expect(TokenKind::RightBrace, "'}'")?;
        Ok(Expr::Table { entries, position })
    }

    /// `kvpair := expression ':' expression`
    fn parse_kvpair(&mut self) -> Result<KVPair, ParseError> {
        let key = self.parse_expression()?;
        self.expect(TokenKind::Colon, "':'")?;
        let value = self.parse_expression()?;
        Ok(KVPair { key, value })
    }
}
