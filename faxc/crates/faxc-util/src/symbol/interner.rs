//! Global string interner backing [`Symbol`](super::Symbol).
//!
//! Interned strings are leaked to get a `'static` slice, then handed out by
//! index. The compiler runs for a finite duration and total source size
//! bounds the leak, so this is the usual interner trade-off, not a real
//! leak in practice.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

pub(super) struct StringTable {
    inner: Mutex<Inner>,
}

struct Inner {
    strings: Vec<&'static str>,
    map: HashMap<&'static str, u32>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                strings: Vec::new(),
                map: HashMap::new(),
            }),
        }
    }

    pub(super) fn intern(&self, s: &str) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        if let Some(&idx) = inner.map.get(s) {
            return idx;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = inner.strings.len() as u32;
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        idx
    }

    pub(super) fn get(&self, index: u32) -> Option<&'static str> {
        let inner = self.inner.lock().unwrap();
        inner.strings.get(index as usize).copied()
    }

    pub(super) fn len(&self) -> usize {
        self.inner.lock().unwrap().strings.len()
    }
}

pub(super) fn table() -> &'static StringTable {
    static TABLE: OnceLock<StringTable> = OnceLock::new();
    TABLE.get_or_init(StringTable::new)
}
