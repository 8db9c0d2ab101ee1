//! Pipeline orchestration: lex → parse → compile, plus the diagnostic
//! dumps the `run` subcommand prints for each stage (spec §6 / SPEC_FULL §10).

use std::fs;
use std::path::Path;

use faxc_bc::Program;
use faxc_compile::{compile_with_imports, ImportError};
use faxc_lex::{Lexer, Token};
use faxc_par::{parse, Ast};

use crate::error::DriverError;

/// Which stage(s) to print. `All` is the CLI default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitStage {
    Tokens,
    Ast,
    Bytecode,
    All,
}

impl EmitStage {
    fn wants_tokens(self) -> bool {
        matches!(self, EmitStage::Tokens | EmitStage::All)
    }

    fn wants_ast(self) -> bool {
        matches!(self, EmitStage::Ast | EmitStage::All)
    }

    fn wants_bytecode(self) -> bool {
        matches!(self, EmitStage::Bytecode | EmitStage::All)
    }
}

impl std::str::FromStr for EmitStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokens" => Ok(EmitStage::Tokens),
            "ast" => Ok(EmitStage::Ast),
            "bytecode" => Ok(EmitStage::Bytecode),
            "all" => Ok(EmitStage::All),
            other => Err(format!("unknown --emit stage '{other}'")),
        }
    }
}

/// Everything a successful run of the pipeline produced, one field per
/// stage, so the caller can print whichever subset `--emit` asked for.
pub struct PipelineOutput {
    pub tokens: Vec<Token>,
    pub ast: Ast,
    pub program: Program,
}

/// Reads `path`, then runs [`compile_source`] against it. `include`
/// statements resolve relative to `path`'s own directory, the same way the
/// teacher's driver resolved library paths relative to the including file.
pub fn compile_file(path: &Path) -> Result<PipelineOutput, DriverError> {
    let source = fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.to_string_lossy().into_owned();
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    compile_source(&source, &origin, move |include_path| {
        resolve_include(&base_dir, include_path)
    })
}

fn resolve_include(base_dir: &Path, include_path: &str) -> Result<String, ImportError> {
    let full_path = base_dir.join(include_path);
    fs::read_to_string(&full_path).map_err(|_| ImportError::NotFound {
        path: include_path.to_string(),
        position: faxc_util::Position::dummy(),
    })
}

/// Runs lex → parse → compile over in-memory `source`, resolving any
/// `include` through `resolve_import`. Used directly by tests and by
/// [`compile_file`] once the top-level file is on disk.
pub fn compile_source(
    source: &str,
    origin: &str,
    resolve_import: impl Fn(&str) -> Result<String, ImportError> + 'static,
) -> Result<PipelineOutput, DriverError> {
    let tokens = Lexer::new(source, origin).tokenize()?;
    let ast = parse(tokens.clone())?;
    let program = compile_with_imports(&ast, resolve_import)?;
    Ok(PipelineOutput {
        tokens,
        ast,
        program,
    })
}

/// Renders the stages `stage` selects, in the fixed order tokens → AST →
/// disassembly, each under its own header.
pub fn render_stage(output: &PipelineOutput, stage: EmitStage) -> String {
    let mut sections = Vec::new();
    if stage.wants_tokens() {
        let mut s = String::from("== tokens ==\n");
        for token in &output.tokens {
            s.push_str(&format!("{token:?}\n"));
        }
        sections.push(s);
    }
    if stage.wants_ast() {
        sections.push(format!("== ast ==\n{:#?}\n", output.ast));
    }
    if stage.wants_bytecode() {
        sections.push(format!(
            "== bytecode ==\n{}",
            faxc_bc::disassemble(&output.program)
        ));
    }
    sections.join("\n")
}

