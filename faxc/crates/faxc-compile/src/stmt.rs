//! Statement and block codegen (spec §4.3).

use faxc_bc::{Instruction, Opcode};
use faxc_par::{Ast, Block, Branches, ElseBranch, Stmt};

use crate::compiler::Compiler;
use crate::error::ResolveError;

impl<'a> Compiler<'a> {
    pub(crate) fn compile_block(&mut self, block: &Block) -> Result<(), ResolveError> {
        for stmt in &block.statements {
            self.record_line_if_new(stmt.position());
            self.compile_stmt(stmt)?;
        }
        Ok(())
    }

    fn record_line_if_new(&mut self, position: faxc_util::Position) {
        let top = self.top();
        if self.frames[top].last_line != Some(position.line) {
            self.frames[top].last_line = Some(position.line);
            self.program_mut().record_line_boundary(position);
        }
    }

    fn compile_stmt(&mut self, stmt: &Stmt) -> Result<(), ResolveError> {
        match stmt {
            Stmt::Assign { name, value, .. } => {
                self.compile_expr(value)?;
                let target = self.resolve_assign_target(*name);
                self.emit_store(target);
            }
            Stmt::Put {
                receiver,
                key,
                value,
                ..
            } => {
                let var = self.resolve_reference(*receiver);
                self.emit_load(var);
                self.compile_expr(key)?;
                self.compile_expr(value)?;
                self.program_mut().emit(Instruction::bare(Opcode::Tput));
            }
            Stmt::Call(expr) => {
                self.compile_expr(expr)?;
                // Discard the call's result; a statement-position call
                // isn't itself an expression whose value is used.
                self.program_mut().emit(Instruction::bare(Opcode::Pop));
            }
            Stmt::Loop {
                condition,
                body,
                position,
            } => self.compile_loop(condition, body, *position)?,
            Stmt::If(branches) => self.compile_branches(branches)?,
            Stmt::Include { path, position } => self.compile_include(path, *position)?,
            Stmt::Return { value, .. } => {
                self.compile_expr(value)?;
                self.program_mut().emit(Instruction::bare(Opcode::Ret));
            }
        }
        Ok(())
    }

    fn compile_loop(
        &mut self,
        condition: &faxc_par::Expr,
        body: &Ast,
        position: faxc_util::Position,
    ) -> Result<(), ResolveError> {
        let top_of_loop = self.program().code.len() as u32;
        self.compile_expr(condition)?;
        let jif_site = self.emit_placeholder_jump(Opcode::Jif);
        self.compile_block(body)?;
        self.emit_jump_to(Opcode::Jmp, top_of_loop, position)?;
        self.patch_jump_to_here(jif_site, position)?;
        Ok(())
    }

    /// `compile cond; emit jif Jelse; compile then; emit jmp Jend; patch
    /// Jelse := here; recurse into the else branch; patch Jend := here`.
    /// Every level of an `else if` chain is itself a `Branches` and
    /// follows the same recursive shape.
    fn compile_branches(&mut self, branches: &Branches) -> Result<(), ResolveError> {
        let position = branches.position;
        self.compile_expr(&branches.condition)?;
        let jif_site = self.emit_placeholder_jump(Opcode::Jif);
        self.compile_block(&branches.then_block)?;
        let jmp_site = self.emit_placeholder_jump(Opcode::Jmp);
        self.patch_jump_to_here(jif_site, position)?;
        match &branches.else_branch {
            Some(ElseBranch::ElseIf(inner)) => self.compile_branches(inner)?,
            Some(ElseBranch::Else(block)) => self.compile_block(block)?,
            None => {}
        }
        self.patch_jump_to_here(jmp_site, position)?;
        Ok(())
    }
}
