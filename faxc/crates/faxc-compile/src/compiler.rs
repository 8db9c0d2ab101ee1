//! The [`Compiler`]: owns the frame stack and drives AST → `Program`
//! lowering (spec §4.3). Statement codegen lives in `stmt.rs`, expression
//! codegen in `expr.rs`, jump bookkeeping in `jump.rs`, `include` handling
//! in `import.rs` — this module is the shared struct and the scope
//! resolution those modules call into.

use std::rc::Rc;

use faxc_bc::{ConstKey, Program, Value};
use faxc_par::Ast;
use faxc_util::{FxHashMap, Symbol};

use crate::error::{ImportError, ResolveError};
use crate::frame::{Frame, VarRef};

/// Resolves an `include` path to source text. The VM host supplies this;
/// the compiler only knows how to call it (spec §4.4).
pub type ImportResolver<'a> = dyn Fn(&str) -> Result<String, ImportError> + 'a;

pub struct Compiler<'a> {
    pub(crate) frames: Vec<Frame>,
    pub(crate) resolve_import: Box<ImportResolver<'a>>,
    /// Name -> declared argc for every `create_native`-registered binding,
    /// consulted at a direct call site to catch a literal argument-count
    /// mismatch at compile time (spec §9 Open Question / SPEC_FULL §7).
    pub(crate) native_arity: FxHashMap<Symbol, u8>,
}

impl<'a> Compiler<'a> {
    pub fn new(resolve_import: impl Fn(&str) -> Result<String, ImportError> + 'a) -> Self {
        Self {
            frames: vec![Frame::new(0, None)],
            resolve_import: Box::new(resolve_import),
            native_arity: FxHashMap::default(),
        }
    }

    /// Compiles a top-level `block(Eof)` into the finished top-level
    /// `Program`.
    pub fn compile(mut self, ast: &Ast) -> Result<Program, ResolveError> {
        self.compile_block(ast)?;
        debug_assert_eq!(self.frames.len(), 1, "frame stack unbalanced after compile");
        Ok(self.frames.pop().expect("top-level frame always present").program)
    }

    pub(crate) fn top(&self) -> usize {
        self.frames.len() - 1
    }

    pub(crate) fn program(&self) -> &Program {
        &self.frames[self.top()].program
    }

    pub(crate) fn program_mut(&mut self) -> &mut Program {
        let top = self.top();
        &mut self.frames[top].program
    }

    pub(crate) fn push_frame(&mut self, argc: u8) {
        let prev = self.top();
        self.frames.push(Frame::new(argc, Some(prev)));
    }

    /// Pops the innermost frame and returns its finished program, ready to
    /// be appended as a constant of the parent.
    pub(crate) fn pop_frame(&mut self) -> Program {
        self.frames.pop().expect("pop_frame called with empty stack").program
    }

    /// Declares a parameter as a fresh local, rejecting a repeated name
    /// (spec §4.3 `register_unique_variable_local`).
    pub(crate) fn declare_param(
        &mut self,
        name: Symbol,
        position: faxc_util::Position,
    ) -> Result<u16, ResolveError> {
        if self.program().symbol_table.contains_key(&name) {
            return Err(ResolveError::DuplicateInScope {
                name: name.as_str().to_string(),
                position,
            });
        }
        Ok(self.declare_local(name))
    }

    fn declare_local(&mut self, name: Symbol) -> u16 {
        let slot = self.program().symbol_table.len() as u16;
        self.program_mut().symbol_table.insert(name, slot);
        slot
    }

    /// `Local -> Closed -> Global` (spec §4.3 `register_variable`), used
    /// wherever a name is *read*.
    pub(crate) fn resolve_reference(&mut self, name: Symbol) -> VarRef {
        self.lookup_local_or_closed(name)
            .unwrap_or_else(|| self.resolve_global(name))
    }

    /// `Local -> Closed -> fresh Local` — used for assignment targets.
    /// Reading an unbound name falls back to the global table (it might be
    /// a builtin); *writing* one declares a fresh local in the current
    /// program instead, since fax has no separate `let`/declaration form
    /// and first-assignment is how a local comes into existence.
    pub(crate) fn resolve_assign_target(&mut self, name: Symbol) -> VarRef {
        self.lookup_local_or_closed(name)
            .unwrap_or_else(|| VarRef::Local(self.declare_local(name)))
    }

    fn lookup_local_or_closed(&mut self, name: Symbol) -> Option<VarRef> {
        let top = self.top();
        if let Some(&slot) = self.frames[top].program.symbol_table.get(&name) {
            return Some(VarRef::Local(slot));
        }
        self.establish_capture(top, name).map(VarRef::Closed)
    }

    fn resolve_global(&mut self, name: Symbol) -> VarRef {
        let rc: Rc<str> = Rc::from(name.as_str());
        let idx = self
            .program_mut()
            .intern_constant(ConstKey::Str(rc.clone()), Value::Str(rc));
        VarRef::Global(idx)
    }

    /// Walks the `prev` chain looking for `name`, recording a
    /// `closure_table` entry at every frame it has to cross (spec §4.3:
    /// "Capture entries form a chain: each upvalue points either to the
    /// enclosing program's local slot or to that program's upvalue slot").
    /// Returns the slot in `frames[frame_index]`'s own `closure_table`.
    fn establish_capture(&mut self, frame_index: usize, name: Symbol) -> Option<u16> {
        let prev_index = self.frames[frame_index].prev?;

        if let Some(&local_slot) = self.frames[prev_index].program.symbol_table.get(&name) {
            return Some(self.add_closure_slot(
                frame_index,
                name,
                faxc_bc::CaptureSource::Local(local_slot),
            ));
        }
        if let Some(existing) = self.frames[prev_index].program.closure_table.get(&name) {
            let upvalue_slot = existing.slot;
            return Some(self.add_closure_slot(
                frame_index,
                name,
                faxc_bc::CaptureSource::Upvalue(upvalue_slot),
            ));
        }
        let parent_slot = self.establish_capture(prev_index, name)?;
        Some(self.add_closure_slot(
            frame_index,
            name,
            faxc_bc::CaptureSource::Upvalue(parent_slot),
        ))
    }

    fn add_closure_slot(
        &mut self,
        frame_index: usize,
        name: Symbol,
        source: faxc_bc::CaptureSource,
    ) -> u16 {
        if let Some(existing) = self.frames[frame_index].program.closure_table.get(&name) {
            return existing.slot;
        }
        let slot = self.frames[frame_index].program.closure_table.len() as u16;
        self.frames[frame_index]
            .program
            .closure_table
            .insert(name, faxc_bc::ClosureSlot { slot, source });
        slot
    }

    /// Declares `name` as a local bound to a host native function (spec
    /// §4.3 `create_native`): appends a `Program{native, argc}` constant
    /// and binds `name` to it in the current program.
    pub fn create_native(
        &mut self,
        name: &str,
        native: faxc_bc::NativeFnId,
        argc: u8,
    ) -> u16 {
        let program = Program::native(argc, native);
        let k = self.program_mut().append_constant(Value::Program(Rc::new(program)));
        let symbol = Symbol::intern(name);
        self.declare_local(symbol);
        self.native_arity.insert(symbol, argc);
        k
    }
}
