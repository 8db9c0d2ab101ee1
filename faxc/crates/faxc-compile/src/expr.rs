//! Expression codegen (spec §4.3).
//!
//! Every `compile_expr` call leaves exactly one value on the (conceptual)
//! VM stack. `&&`/`||` need to preserve the left operand's value when they
//! short-circuit; the closed opcode set has no `dup`, so — like the
//! `table`/`put` codegen below, which needs no `dup` at all because `tput`
//! is defined to leave its receiver on the stack — short-circuit here
//! settles for the canonical boolean outcome rather than the literal
//! left-hand value (documented in DESIGN.md).

use faxc_bc::{ConstKey, Instruction, Opcode, Value};
use faxc_par::{BinOp, Expr, KVPair, UnOp};

use crate::compiler::Compiler;
use crate::error::ResolveError;
use crate::frame::VarRef;

impl<'a> Compiler<'a> {
    pub(crate) fn compile_expr(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        match expr {
            Expr::Integer(v, _) => self.push_const(ConstKey::Integer(*v), Value::Integer(*v)),
            Expr::Float(v, _) => self.push_const(ConstKey::Float(v.to_bits()), Value::Float(*v)),
            Expr::Bool(v, _) => self.push_const(ConstKey::Bool(*v), Value::Bool(*v)),
            Expr::String(s, _) => {
                let rc: std::rc::Rc<str> = std::rc::Rc::from(s.as_str());
                self.push_const(ConstKey::Str(rc.clone()), Value::Str(rc));
            }
            Expr::Null(_) => self.push_const(ConstKey::Null, Value::Null),
            Expr::Reference(name, _) => {
                let var = self.resolve_reference(*name);
                self.emit_load(var);
            }
            Expr::Unary { op, operand, .. } => self.compile_unary(*op, operand)?,
            Expr::Binary {
                op, left, right, ..
            } => self.compile_binary(*op, left, right)?,
            Expr::Call {
                callee,
                args,
                position,
            } => self.compile_call(callee, args, *position)?,
            Expr::Function {
                params,
                body,
                position,
            } => self.compile_function(params, body, *position)?,
            Expr::Table { entries, .. } => self.compile_table(entries)?,
            Expr::Get { receiver, key, .. } => {
                let var = self.resolve_reference(*receiver);
                self.emit_load(var);
                self.compile_expr(key)?;
                self.program_mut().emit(Instruction::bare(Opcode::Tget));
            }
        }
        Ok(())
    }

    fn push_const(&mut self, key: ConstKey, value: Value) {
        let k = self.program_mut().intern_constant(key, value);
        self.program_mut().emit(Instruction::with_u16(Opcode::Pushk, k));
    }

    pub(crate) fn emit_load(&mut self, var: VarRef) {
        let op = match var {
            VarRef::Local(_) => Opcode::Loadl,
            VarRef::Closed(_) => Opcode::Loadc,
            VarRef::Global(_) => Opcode::Loadg,
        };
        let slot = match var {
            VarRef::Local(s) | VarRef::Closed(s) | VarRef::Global(s) => s,
        };
        self.program_mut().emit(Instruction::with_u16(op, slot));
    }

    pub(crate) fn emit_store(&mut self, var: VarRef) {
        let op = match var {
            VarRef::Local(_) => Opcode::Storl,
            VarRef::Closed(_) => Opcode::Storc,
            VarRef::Global(_) => Opcode::Storg,
        };
        let slot = match var {
            VarRef::Local(s) | VarRef::Closed(s) | VarRef::Global(s) => s,
        };
        self.program_mut().emit(Instruction::with_u16(op, slot));
    }

    fn compile_unary(&mut self, op: UnOp, operand: &Expr) -> Result<(), ResolveError> {
        self.compile_expr(operand)?;
        match op {
            // Unary `+` is the identity; the parser keeps it as a node but
            // the compiler elides it (spec §4.3).
            UnOp::Pos => {}
            UnOp::Neg => {
                self.program_mut().emit(Instruction::bare(Opcode::Neg));
            }
            // The opcode set has one logical/bitwise `not`; `!` and `~`
            // both compile to it, leaving the distinction to the VM's
            // runtime dispatch on the operand's type.
            UnOp::Not | UnOp::BitNot => {
                self.program_mut().emit(Instruction::bare(Opcode::Not));
            }
        }
        Ok(())
    }

    fn compile_binary(&mut self, op: BinOp, left: &Expr, right: &Expr) -> Result<(), ResolveError> {
        match op {
            BinOp::And => return self.compile_and(left, right),
            BinOp::Or => return self.compile_or(left, right),
            _ => {}
        }
        self.compile_expr(left)?;
        self.compile_expr(right)?;
        let opcode = match op {
            BinOp::BitOr => Opcode::Or,
            BinOp::BitAnd => Opcode::And,
            // No dedicated `xor` opcode in the closed set; `^` on booleans
            // coincides with `!=`, which is what this compiles to (see
            // DESIGN.md).
            BinOp::BitXor => Opcode::Ne,
            BinOp::Eq => Opcode::Eq,
            BinOp::Ne => Opcode::Ne,
            BinOp::Lt => Opcode::Lt,
            BinOp::Le => Opcode::Le,
            BinOp::Gt => Opcode::Gt,
            BinOp::Ge => Opcode::Ge,
            BinOp::Add => Opcode::Add,
            BinOp::Sub => Opcode::Sub,
            BinOp::Mul => Opcode::Mul,
            BinOp::Div => Opcode::Div,
            BinOp::Mod => Opcode::Mod,
            BinOp::And | BinOp::Or => unreachable!("handled above"),
        };
        self.program_mut().emit(Instruction::bare(opcode));
        Ok(())
    }

    /// `a && b`: evaluate `a`; if falsy, short-circuit to `false`;
    /// otherwise evaluate `b` and use its value.
    fn compile_and(&mut self, left: &Expr, right: &Expr) -> Result<(), ResolveError> {
        let position = left.position();
        self.compile_expr(left)?;
        let jif_site = self.emit_placeholder_jump(Opcode::Jif);
        self.compile_expr(right)?;
        let end_site = self.emit_placeholder_jump(Opcode::Jmp);
        self.patch_jump_to_here(jif_site, position)?;
        self.push_const(ConstKey::Bool(false), Value::Bool(false));
        self.patch_jump_to_here(end_site, position)?;
        Ok(())
    }

    /// `a || b`: evaluate `a`; if truthy, short-circuit to `true`;
    /// otherwise evaluate `b` and use its value.
    fn compile_or(&mut self, left: &Expr, right: &Expr) -> Result<(), ResolveError> {
        let position = left.position();
        self.compile_expr(left)?;
        let jif_site = self.emit_placeholder_jump(Opcode::Jif);
        self.push_const(ConstKey::Bool(true), Value::Bool(true));
        let end_site = self.emit_placeholder_jump(Opcode::Jmp);
        self.patch_jump_to_here(jif_site, position)?;
        self.compile_expr(right)?;
        self.patch_jump_to_here(end_site, position)?;
        Ok(())
    }

    /// Checks a direct call (`callee` a bare name) against any
    /// `create_native`-declared arity for that name before emitting any
    /// code, so a literal mismatch is a compile error rather than a VM-time
    /// one (spec §9 Open Question / SPEC_FULL §7). Calls through any other
    /// expression form (a field, a call result, ...) aren't statically
    /// resolvable and are left to the VM.
    fn compile_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        position: faxc_util::Position,
    ) -> Result<(), ResolveError> {
        if let Expr::Reference(name, _) = callee {
            if let Some(&expected) = self.native_arity.get(name) {
                if args.len() != expected as usize {
                    return Err(ResolveError::CallError {
                        name: name.as_str().to_string(),
                        expected,
                        got: args.len(),
                        position,
                    });
                }
            }
        }
        self.compile_expr(callee)?;
        for arg in args {
            self.compile_expr(arg)?;
        }
        self.program_mut()
            .emit(Instruction::with_u16(Opcode::Call, args.len() as u16));
        Ok(())
    }

    fn compile_function(
        &mut self,
        params: &[faxc_util::Symbol],
        body: &faxc_par::Block,
        position: faxc_util::Position,
    ) -> Result<(), ResolveError> {
        self.push_frame(params.len() as u8);
        for param in params {
            self.declare_param(*param, position)?;
        }
        self.compile_block(body)?;
        let finished = self.pop_frame();
        let captures = finished.closure_table.len() as u16;
        let k = self
            .program_mut()
            .append_constant(Value::Program(std::rc::Rc::new(finished)));
        self.program_mut().emit(Instruction::with_u16(Opcode::Pushk, k));
        self.program_mut()
            .emit(Instruction::with_u16(Opcode::Close, captures));
        Ok(())
    }

    /// `tnew`, then for every entry `compile key; compile value; tput`.
    /// `tput` is defined to leave the table handle on the stack (`[table,
    /// key, value] -> [table]`), so the handle never needs duplicating —
    /// after the last entry it's the expression's sole result.
    fn compile_table(&mut self, entries: &[KVPair]) -> Result<(), ResolveError> {
        self.program_mut().emit(Instruction::bare(Opcode::Tnew));
        for pair in entries {
            self.compile_expr(&pair.key)?;
            self.compile_expr(&pair.value)?;
            self.program_mut().emit(Instruction::bare(Opcode::Tput));
        }
        Ok(())
    }
}
