//! Jump-site bookkeeping shared by `if`, `loop`, and short-circuit codegen
//! (spec §4.3 "Jump patching").

use faxc_bc::{Instruction, Opcode};
use faxc_util::Position;

use crate::compiler::Compiler;
use crate::error::ResolveError;

/// PC-relative displacement from `site` (the jump instruction's own index)
/// to `target`, or a `JumpOverflow` if it doesn't fit in `i16`.
fn displacement(position: Position, site: u32, target: u32) -> Result<i16, ResolveError> {
    let raw = target as i64 - site as i64 - 1;
    i16::try_from(raw).map_err(|_| ResolveError::JumpOverflow {
        position,
        displacement: raw,
    })
}

impl<'a> Compiler<'a> {
    /// Emits `op` with a placeholder operand, to be patched once the
    /// target is known.
    pub(crate) fn emit_placeholder_jump(&mut self, op: Opcode) -> u32 {
        self.program_mut().emit(Instruction::with_i16(op, 0))
    }

    /// Patches a placeholder jump to land on the instruction about to be
    /// emitted next.
    pub(crate) fn patch_jump_to_here(
        &mut self,
        site: u32,
        position: Position,
    ) -> Result<(), ResolveError> {
        let target = self.program().code.len() as u32;
        let disp = displacement(position, site, target)?;
        self.program_mut().patch_jump(site, disp);
        Ok(())
    }

    /// Emits `op` with the displacement to an already-known `target`
    /// (used for a `loop`'s back-edge).
    pub(crate) fn emit_jump_to(
        &mut self,
        op: Opcode,
        target: u32,
        position: Position,
    ) -> Result<(), ResolveError> {
        let site = self.program().code.len() as u32;
        let disp = displacement(position, site, target)?;
        self.program_mut().emit(Instruction::with_i16(op, disp));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_overflow_is_reported() {
        let pos = Position::dummy();
        let err = displacement(pos, 0, 1 << 20).unwrap_err();
        assert!(matches!(err, ResolveError::JumpOverflow { .. }));
    }

    #[test]
    fn displacement_skips_the_jump_instruction_itself() {
        // Jumping to the very next instruction is displacement 0.
        assert_eq!(displacement(Position::dummy(), 5, 6).unwrap(), 0);
    }
}
