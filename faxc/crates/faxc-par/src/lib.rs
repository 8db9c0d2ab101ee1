//! Parser: token stream → AST.
//!
//! Recursive descent over statements and blocks, shunting-yard over binary
//! expressions (spec grammar §4.2). A [`ParseError`] is fatal — parsing
//! stops at the first one; the driver renders it as a diagnostic.

pub mod ast;
pub mod error;
mod parser;

pub use ast::{Ast, BinOp, Block, Branches, ElseBranch, Expr, KVPair, Stmt, UnOp};
pub use error::ParseError;
pub use parser::{parse, Parser};
