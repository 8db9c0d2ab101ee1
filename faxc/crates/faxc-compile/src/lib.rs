//! Compiler: AST → bytecode [`Program`](faxc_bc::Program) (spec §4.3).
//!
//! Lowering walks the AST once, emitting instructions directly — there is
//! no separate IR or type-checking pass, since fax has no static types to
//! check. Scope resolution, constant interning, and jump patching all
//! happen inline as each node is visited. A [`ResolveError`] is fatal, same
//! as [`LexError`](faxc_lex::LexError) and [`ParseError`](faxc_par::ParseError)
//! upstream — no partial `Program` is ever handed back.

mod compiler;
mod error;
mod expr;
mod frame;
mod import;
mod jump;
mod stmt;

pub use compiler::{Compiler, ImportResolver};
pub use error::{ImportError, ResolveError};
pub use frame::VarRef;

use faxc_bc::Program;
use faxc_par::Ast;

/// Compiles a whole program with an import resolver that always fails —
/// for callers (and tests) that know the source has no `include`s.
pub fn compile(ast: &Ast) -> Result<Program, ResolveError> {
    compile_with_imports(ast, |path: &str| {
        Err(ImportError::NotFound {
            path: path.to_string(),
            position: faxc_util::Position::dummy(),
        })
    })
}

/// Compiles a whole program, resolving `include` paths through `resolver`.
pub fn compile_with_imports<'a>(
    ast: &Ast,
    resolver: impl Fn(&str) -> Result<String, ImportError> + 'a,
) -> Result<Program, ResolveError> {
    Compiler::new(resolver).compile(ast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faxc_bc::Opcode;
    use faxc_lex::Lexer;
    use faxc_par::parse;

    fn compile_source(source: &str) -> Program {
        let tokens = Lexer::new(source, "test.fax").tokenize().expect("lex");
        let ast = parse(tokens).expect("parse");
        compile(&ast).expect("compile")
    }

    fn ops(program: &Program) -> Vec<Opcode> {
        program.code.iter().map(|i| i.op()).collect()
    }

    // S1: x <- 1 + 2 * 3
    #[test]
    fn s1_constant_folding_precedence_and_store() {
        let program = compile_source("x <- 1 + 2 * 3\n");
        assert_eq!(program.constants.len(), 3);
        assert_eq!(
            ops(&program),
            vec![
                Opcode::Pushk,
                Opcode::Pushk,
                Opcode::Pushk,
                Opcode::Mul,
                Opcode::Add,
                Opcode::Storl,
            ]
        );
    }

    // S2: if/else — single jif past the then-block, single jmp past the
    // whole thing, both patched to exact boundaries.
    #[test]
    fn s2_if_else_jumps_land_on_block_boundaries() {
        let program = compile_source("if 1 {\n  x <- 1\n} else {\n  x <- 2\n}\n");
        let jif = program
            .code
            .iter()
            .position(|i| i.op() == Opcode::Jif)
            .expect("jif present");
        let jmp = program
            .code
            .iter()
            .position(|i| i.op() == Opcode::Jmp)
            .expect("jmp present");
        let jif_target = jif as i64 + 1 + program.code[jif].i16() as i64;
        assert_eq!(jif_target, (jmp + 1) as i64, "jif lands right after the jmp");
        let jmp_target = jmp as i64 + 1 + program.code[jmp].i16() as i64;
        assert_eq!(jmp_target, program.code.len() as i64, "jmp lands at the end");
    }

    // S3: loop — back-edge jmp to the condition, forward jif past the loop.
    #[test]
    fn s3_loop_back_edge_and_forward_exit() {
        let program = compile_source("loop 1 {\n  x <- 1\n}\n");
        let jif = program
            .code
            .iter()
            .position(|i| i.op() == Opcode::Jif)
            .expect("jif present");
        let jmp = program
            .code
            .iter()
            .position(|i| i.op() == Opcode::Jmp)
            .expect("jmp present");
        assert!(jmp > jif, "back-edge comes after the condition test");
        let jmp_target = jmp as i64 + 1 + program.code[jmp].i16() as i64;
        assert_eq!(jmp_target, 0, "back-edge returns to the condition's first instruction");
        let jif_target = jif as i64 + 1 + program.code[jif].i16() as i64;
        assert_eq!(jif_target, (jmp + 1) as i64, "forward exit lands right after the back-edge");
    }

    // S4: closure capturing an outer local.
    #[test]
    fn s4_closure_captures_outer_local() {
        let program = compile_source("y <- 1\nf <- $(){\n  return y\n}\n");
        let nested = program
            .constants
            .iter()
            .find_map(|v| match v {
                faxc_bc::Value::Program(p) => Some(p.clone()),
                _ => None,
            })
            .expect("nested program constant present");
        assert_eq!(nested.argc, 0);
        assert_eq!(nested.closure_table.len(), 1);
        assert_eq!(ops(&nested), vec![Opcode::Loadc, Opcode::Ret]);
        assert!(ops(&program).contains(&Opcode::Close));
    }

    // S5: table literal + dot assignment.
    #[test]
    fn s5_table_literal_and_dot_put() {
        let program = compile_source("t <- { \"a\": 1 }\nt.a <- 3\n");
        assert_eq!(
            ops(&program)[0..4],
            [Opcode::Tnew, Opcode::Pushk, Opcode::Pushk, Opcode::Tput]
        );
        let storl = program
            .code
            .iter()
            .position(|i| i.op() == Opcode::Storl)
            .expect("storl for t");
        assert_eq!(
            ops(&program)[storl + 1..storl + 4],
            [Opcode::Loadl, Opcode::Pushk, Opcode::Pushk]
        );
        assert_eq!(program.code.last().unwrap().op(), Opcode::Tput);
    }

    #[test]
    fn duplicate_parameter_is_rejected() {
        let tokens = Lexer::new("f <- $(a, a) { return a }\n", "test.fax")
            .tokenize()
            .expect("lex");
        let ast = parse(tokens).expect("parse");
        let err = compile(&ast).unwrap_err();
        assert!(matches!(err, ResolveError::DuplicateInScope { .. }));
    }

    #[test]
    fn assignment_to_unbound_name_declares_a_fresh_local() {
        let program = compile_source("x <- 1\n");
        assert_eq!(program.symbol_table.len(), 1);
        assert_eq!(*program.symbol_table.get_index(0).unwrap().1, 0);
    }

    #[test]
    fn reading_an_unbound_name_resolves_global() {
        let program = compile_source("@print(x)\n");
        assert!(ops(&program).contains(&Opcode::Loadg));
    }

    #[test]
    fn include_resolves_through_the_host_callback() {
        let tokens = Lexer::new("include \"lib.fax\"\n", "test.fax")
            .tokenize()
            .expect("lex");
        let ast = parse(tokens).expect("parse");
        let program = compile_with_imports(&ast, |path| {
            assert_eq!(path, "lib.fax");
            Ok("x <- 1\n".to_string())
        })
        .expect("compile with include");
        assert_eq!(program.symbol_table.len(), 1);
    }

    #[test]
    fn create_native_binds_a_local_to_a_native_program_constant() {
        let mut compiler = Compiler::new(|path: &str| {
            Err(ImportError::NotFound {
                path: path.to_string(),
                position: faxc_util::Position::dummy(),
            })
        });
        compiler.create_native("print", faxc_bc::NativeFnId(7), 1);
        let tokens = Lexer::new("x <- 1\n", "test.fax").tokenize().expect("lex");
        let ast = parse(tokens).expect("parse");
        let program = compiler.compile(&ast).expect("compile");
        assert!(program.symbol_table.contains_key(&faxc_util::Symbol::intern("print")));
        assert!(program.constants.iter().any(|v| matches!(
            v,
            faxc_bc::Value::Program(p) if p.native == Some(faxc_bc::NativeFnId(7)) && p.argc == 1
        )));
    }

    #[test]
    fn native_call_with_mismatched_arity_is_a_resolve_error() {
        let mut compiler = Compiler::new(|path: &str| {
            Err(ImportError::NotFound {
                path: path.to_string(),
                position: faxc_util::Position::dummy(),
            })
        });
        compiler.create_native("print", faxc_bc::NativeFnId(7), 1);
        let tokens = Lexer::new("@print(1, 2)\n", "test.fax").tokenize().expect("lex");
        let ast = parse(tokens).expect("parse");
        let err = compiler.compile(&ast).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::CallError {
                expected: 1,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn native_call_with_matching_arity_compiles() {
        let mut compiler = Compiler::new(|path: &str| {
            Err(ImportError::NotFound {
                path: path.to_string(),
                position: faxc_util::Position::dummy(),
            })
        });
        compiler.create_native("print", faxc_bc::NativeFnId(7), 1);
        let tokens = Lexer::new("@print(1)\n", "test.fax").tokenize().expect("lex");
        let ast = parse(tokens).expect("parse");
        let program = compiler.compile(&ast).expect("compile");
        assert!(ops(&program).contains(&Opcode::Call));
    }

    #[test]
    fn include_not_found_is_a_resolve_error() {
        let program_text = "include \"missing.fax\"\n";
        let tokens = Lexer::new(program_text, "test.fax").tokenize().expect("lex");
        let ast = parse(tokens).expect("parse");
        let err = compile(&ast).unwrap_err();
        assert!(matches!(err, ResolveError::Import(_)));
    }
}
