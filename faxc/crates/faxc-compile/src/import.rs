//! `include` (spec §4.4): resolve a path to source text, lex and parse it,
//! then splice the resulting block straight into the current frame — no
//! new `Program`/frame is pushed, so names the included source assigns
//! join the including program's own scope.

use faxc_util::Position;

use crate::compiler::Compiler;
use crate::error::{ImportError, ResolveError};

impl<'a> Compiler<'a> {
    pub(crate) fn compile_include(
        &mut self,
        path: &str,
        position: Position,
    ) -> Result<(), ResolveError> {
        let source = (self.resolve_import)(path).map_err(|e| ResolveError::Import(Box::new(e)))?;

        let tokens = faxc_lex::Lexer::new(&source, path)
            .tokenize()
            .map_err(ImportError::from)
            .map_err(|e| ResolveError::Import(Box::new(e)))?;
        let ast = faxc_par::parse(tokens)
            .map_err(ImportError::from)
            .map_err(|e| ResolveError::Import(Box::new(e)))?;

        self.compile_block(&ast).map_err(|e| match e {
            ResolveError::Import(inner) => ResolveError::Import(inner),
            other => ResolveError::Import(Box::new(ImportError::Resolve(Box::new(other)))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;

    #[test]
    fn not_found_maps_through_resolve_to_import() {
        let compiler = Compiler::new(|path: &str| {
            Err(ImportError::NotFound {
                path: path.to_string(),
                position: Position::dummy(),
            })
        });
        let ast = faxc_par::Block::default();
        let err = compiler.compile(&ast);
        assert!(err.is_ok(), "no include statements here, nothing to resolve");
    }
}
