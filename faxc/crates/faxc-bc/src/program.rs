//! `Program`: the compiled IR unit (spec §3).

use indexmap::IndexMap;

use faxc_util::{FxHashMap, Position, Symbol};

use crate::instruction::Instruction;
use crate::value::{ConstKey, NativeFnId, Value};

/// Where a captured upvalue resolves to in the enclosing program (spec
/// §4.3: "each upvalue points either to the enclosing program's local
/// slot or to that program's upvalue slot").
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CaptureSource {
    Local(u16),
    Upvalue(u16),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClosureSlot {
    pub slot: u16,
    pub source: CaptureSource,
}

/// The IR unit. Exclusively owns `code`, `constants`, and the four
/// tables (spec §3 Ownership); a `Program` stored as a constant is owned
/// by that constant slot. `prev` (the enclosing program, used only
/// during compilation for closure capture lookups) is deliberately not a
/// field here — per Design Note 2 it is never a strong owning pointer
/// into a finished tree, so it lives only on the compiler's in-progress
/// `Frame`, not on `Program` itself.
#[derive(Debug, Default)]
pub struct Program {
    pub code: Vec<Instruction>,
    pub constants: Vec<Value>,
    pub argc: u8,
    pub symbol_table: IndexMap<Symbol, u16>,
    pub constant_table: FxHashMap<ConstKey, u16>,
    pub closure_table: IndexMap<Symbol, ClosureSlot>,
    pub line_address_table: Vec<(u32, Position)>,
    pub native: Option<NativeFnId>,
}

impl Program {
    pub fn new(argc: u8) -> Self {
        Self {
            argc,
            ..Default::default()
        }
    }

    /// A native dispatcher: `code` stays empty, `native` carries the
    /// host-resolved handle (spec §4.3 `create_native`).
    pub fn native(argc: u8, native: NativeFnId) -> Self {
        Self {
            argc,
            native: Some(native),
            ..Default::default()
        }
    }

    pub fn emit(&mut self, instr: Instruction) -> u32 {
        let index = self.code.len() as u32;
        self.code.push(instr);
        index
    }

    /// Overwrites the operand of an already-emitted jump instruction,
    /// keeping its opcode (spec §4.3 "Jump patching").
    pub fn patch_jump(&mut self, site: u32, displacement: i16) {
        let op = self.code[site as usize].op();
        self.code[site as usize] = Instruction::with_i16(op, displacement);
    }

    /// Interns an equal constant rather than duplicating it; `Program`
    /// constants skip this (spec §4.3, see [`ConstKey::for_value`]).
    pub fn intern_constant(&mut self, key: ConstKey, value: Value) -> u16 {
        if let Some(&index) = self.constant_table.get(&key) {
            return index;
        }
        let index = self.append_constant(value);
        self.constant_table.insert(key, index);
        index
    }

    /// Appends a constant without interning — used for nested `Program`
    /// values, which are always fresh (spec §4.3).
    pub fn append_constant(&mut self, value: Value) -> u16 {
        let index = self.constants.len();
        assert!(index <= u16::MAX as usize, "constant pool overflow");
        self.constants.push(value);
        index as u16
    }

    /// Records that the instruction about to be emitted begins a new
    /// source line (spec §4.3 "Line-address table"). Callers are
    /// responsible for only calling this at a line boundary; `Program`
    /// itself doesn't dedupe by line number.
    pub fn record_line_boundary(&mut self, position: Position) {
        let index = self.code.len() as u32;
        self.line_address_table.push((index, position));
    }

    /// Greatest recorded position with `index <= query` (spec §4.3
    /// `getaddresspos`).
    pub fn getaddresspos(&self, index: u32) -> Option<Position> {
        match self
            .line_address_table
            .binary_search_by_key(&index, |(i, _)| *i)
        {
            Ok(found) => Some(self.line_address_table[found].1),
            Err(0) => None,
            Err(insert_at) => Some(self.line_address_table[insert_at - 1].1),
        }
    }
}
