//! Runtime value representation (spec §3).

use std::rc::Rc;

use crate::program::Program;

/// Opaque handle to a host-provided native function. The host (the VM,
/// out of scope here) owns the mapping from id to actual function
/// pointer; the compiler only ever stores and compares the handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NativeFnId(pub u32);

/// `Integer|Float|Bool|String|Null|Program|NativeFn|Table` (spec §3).
///
/// `Table` is declared for forward compatibility with the VM's runtime
/// table type, but the compiler never constructs one — `TNEW`/`TPUT`/
/// `TGET` emit instructions, they don't allocate a `Value::Table` at
/// compile time (spec: "The compiler materializes only the first five as
/// constants").
#[derive(Clone, Debug)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    Null,
    Program(Rc<Program>),
    NativeFn(NativeFnId),
    Table,
}

/// Canonical interning key: `<kind>:<printable form>` (spec §4.3). Floats
/// key on their bit pattern since `f64` has no `Eq`/`Hash`; `Program`
/// values never go through this — they're always appended fresh (spec
/// §4.3: "nested `Program` values are always appended fresh, not
/// interned").
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ConstKey {
    Integer(i64),
    Float(u64),
    Bool(bool),
    Str(Rc<str>),
    Null,
}

impl ConstKey {
    pub fn for_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Integer(i) => ConstKey::Integer(*i),
            Value::Float(f) => ConstKey::Float(f.to_bits()),
            Value::Bool(b) => ConstKey::Bool(*b),
            Value::Str(s) => ConstKey::Str(s.clone()),
            Value::Null => ConstKey::Null,
            Value::Program(_) | Value::NativeFn(_) | Value::Table => return None,
        })
    }
}
