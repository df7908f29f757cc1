use crate::constant::{Constant, PoolKind};
use pk_core::{PackError, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// Interning side of the bridge. The same literal always maps to the same
/// index for the lifetime of the pool.
pub trait ConstantPool {
    fn intern_descriptor(&mut self, descriptor: &str) -> u32;
    fn intern_utf8(&mut self, value: &str) -> u32;
    fn intern_constant(&mut self, constant: Constant) -> u32;
}

/// Resolving side of the bridge.
pub trait ConstantLookup {
    fn descriptor(&self, index: i64) -> Result<&str>;
    fn utf8(&self, index: i64) -> Result<&str>;
    fn constant(&self, pool: PoolKind, index: i64) -> Result<Constant>;
}

/// Dense first-seen-order table.
#[derive(Debug, Clone)]
struct Table<T> {
    entries: Vec<T>,
    index: HashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> Table<T> {
    fn new() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }

    fn intern(&mut self, value: T) -> u32 {
        if let Some(&i) = self.index.get(&value) {
            return i;
        }
        let i = self.entries.len() as u32;
        self.entries.push(value.clone());
        self.index.insert(value, i);
        i
    }

    fn get(&self, pool: PoolKind, index: i64) -> Result<&T> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get(i))
            .ok_or(PackError::UnresolvedReference { pool: pool.name(), index })
    }
}

/// In-memory constant pool with one index space per [`PoolKind`].
#[derive(Debug, Clone)]
pub struct CpBands {
    utf8: Table<String>,
    signatures: Table<String>,
    constants: HashMap<PoolKind, Table<Constant>>,
}

impl CpBands {
    pub fn new() -> Self {
        Self {
            utf8: Table::new(),
            signatures: Table::new(),
            constants: HashMap::new(),
        }
    }

    pub fn len(&self, pool: PoolKind) -> usize {
        match pool {
            PoolKind::Utf8 => self.utf8.entries.len(),
            PoolKind::Signature => self.signatures.entries.len(),
            other => self.constants.get(&other).map_or(0, |t| t.entries.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.utf8.entries.is_empty()
            && self.signatures.entries.is_empty()
            && self.constants.values().all(|t| t.entries.is_empty())
    }
}

impl Default for CpBands {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantPool for CpBands {
    fn intern_descriptor(&mut self, descriptor: &str) -> u32 {
        self.signatures.intern(descriptor.to_string())
    }

    fn intern_utf8(&mut self, value: &str) -> u32 {
        self.utf8.intern(value.to_string())
    }

    fn intern_constant(&mut self, constant: Constant) -> u32 {
        self.constants
            .entry(constant.pool())
            .or_insert_with(Table::new)
            .intern(constant)
    }
}

impl ConstantLookup for CpBands {
    fn descriptor(&self, index: i64) -> Result<&str> {
        self.signatures.get(PoolKind::Signature, index).map(String::as_str)
    }

    fn utf8(&self, index: i64) -> Result<&str> {
        self.utf8.get(PoolKind::Utf8, index).map(String::as_str)
    }

    fn constant(&self, pool: PoolKind, index: i64) -> Result<Constant> {
        let unresolved = PackError::UnresolvedReference { pool: pool.name(), index };
        match pool {
            PoolKind::Utf8 | PoolKind::Signature => Err(unresolved),
            _ => match self.constants.get(&pool) {
                Some(table) => table.get(pool, index).copied(),
                None => Err(unresolved),
            },
        }
    }
}
