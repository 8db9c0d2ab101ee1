//! Human-readable listing of a [`Program`], one line per instruction:
//! `index mnemonic operand ; comment`.

use std::fmt::Write as _;

use crate::opcode::OperandKind;
use crate::program::Program;
use crate::value::Value;

/// Renders `program`'s `code` as a flat listing, resolving operands
/// against `constants`/`symbol_table` where that makes the output more
/// readable (constant values, jump targets).
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();
    for (index, instr) in program.code.iter().enumerate() {
        let op = instr.op();
        let mnemonic = op.mnemonic();
        match op.operand_kind() {
            OperandKind::None => {
                let _ = writeln!(out, "{index:>6}  {mnemonic}");
            }
            OperandKind::U16 => {
                let operand = instr.u16();
                match comment_for_u16(program, op.mnemonic(), operand) {
                    Some(comment) => {
                        let _ = writeln!(out, "{index:>6}  {mnemonic} {operand:<6} ; {comment}");
                    }
                    None => {
                        let _ = writeln!(out, "{index:>6}  {mnemonic} {operand}");
                    }
                }
            }
            OperandKind::I16 => {
                let displacement = instr.i16();
                let target = index as i64 + 1 + displacement as i64;
                let _ = writeln!(
                    out,
                    "{index:>6}  {mnemonic} {displacement:<6} ; target={target}"
                );
            }
        }
    }
    out
}

fn comment_for_u16(program: &Program, mnemonic: &str, operand: u16) -> Option<String> {
    match mnemonic {
        "pushk" => program
            .constants
            .get(operand as usize)
            .map(describe_value),
        // Globals are always interned as `Value::Str` (see
        // `Compiler::resolve_global`); render the bare name, not a quoted
        // `describe_value` string (spec §6).
        "loadg" | "storg" => program.constants.get(operand as usize).and_then(|v| match v {
            Value::Str(s) => Some(s.to_string()),
            other => Some(describe_value(other)),
        }),
        "loadl" | "storl" => Some(format!("L{operand}")),
        "loadc" | "storc" => Some(format!("U{operand}")),
        _ => None,
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Integer(i) => format!("int:{i}"),
        Value::Float(f) => format!("float:{f}"),
        Value::Bool(b) => format!("bool:{b}"),
        Value::Str(s) => format!("str:{s:?}"),
        Value::Null => "null".to_string(),
        Value::Program(_) => "program".to_string(),
        Value::NativeFn(id) => format!("native:{}", id.0),
        Value::Table => "table".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;
    use crate::opcode::Opcode;
    use crate::value::ConstKey;

    #[test]
    fn bare_instruction_has_no_operand_column() {
        let mut program = Program::new(0);
        program.emit(Instruction::bare(Opcode::Add));
        let listing = disassemble(&program);
        assert_eq!(listing.trim(), "0  add");
    }

    #[test]
    fn pushk_shows_the_resolved_constant() {
        let mut program = Program::new(0);
        let k = program.intern_constant(ConstKey::Integer(42), Value::Integer(42));
        program.emit(Instruction::with_u16(Opcode::Pushk, k));
        let listing = disassemble(&program);
        assert!(listing.contains("pushk 0"));
        assert!(listing.contains("int:42"));
    }

    #[test]
    fn jump_shows_resolved_target() {
        let mut program = Program::new(0);
        program.emit(Instruction::with_i16(Opcode::Jmp, 2));
        let listing = disassemble(&program);
        assert!(listing.contains("target=3"));
    }

    #[test]
    fn local_and_upvalue_slots_render_with_l_and_u_prefixes() {
        let mut program = Program::new(0);
        program.emit(Instruction::with_u16(Opcode::Loadl, 3));
        program.emit(Instruction::with_u16(Opcode::Storl, 4));
        program.emit(Instruction::with_u16(Opcode::Loadc, 1));
        program.emit(Instruction::with_u16(Opcode::Storc, 2));
        let listing = disassemble(&program);
        assert!(listing.contains("; L3"));
        assert!(listing.contains("; L4"));
        assert!(listing.contains("; U1"));
        assert!(listing.contains("; U2"));
    }

    #[test]
    fn global_slots_render_as_the_bare_interned_name() {
        let mut program = Program::new(0);
        let rc: std::rc::Rc<str> = std::rc::Rc::from("counter");
        let k = program.intern_constant(ConstKey::Str(rc.clone()), Value::Str(rc));
        program.emit(Instruction::with_u16(Opcode::Loadg, k));
        program.emit(Instruction::with_u16(Opcode::Storg, k));
        let listing = disassemble(&program);
        assert!(listing.contains("; counter"));
        assert!(!listing.contains("str:"));
        assert!(!listing.contains('"'));
    }
}
