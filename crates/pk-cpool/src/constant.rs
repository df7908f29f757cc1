use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A numeric literal headed for one of the constant pools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Constant {
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
}

impl Constant {
    pub fn pool(&self) -> PoolKind {
        match self {
            Self::Int(_) => PoolKind::Int,
            Self::Float(_) => PoolKind::Float,
            Self::Long(_) => PoolKind::Long,
            Self::Double(_) => PoolKind::Double,
        }
    }

    fn bits(&self) -> u64 {
        match *self {
            Self::Int(v) => v as u32 as u64,
            Self::Float(v) => v.to_bits() as u64,
            Self::Long(v) => v as u64,
            Self::Double(v) => v.to_bits(),
        }
    }
}

// Bitwise identity: NaN equals itself, 0.0 and -0.0 stay apart.
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        self.pool() == other.pool() && self.bits() == other.bits()
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pool().hash(state);
        self.bits().hash(state);
    }
}

/// The separate index spaces of a segment's constant pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolKind {
    Utf8,
    Signature,
    Int,
    Float,
    Long,
    Double,
}

impl PoolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "cp_Utf8",
            Self::Signature => "cp_Signature",
            Self::Int => "cp_Int",
            Self::Float => "cp_Float",
            Self::Long => "cp_Long",
            Self::Double => "cp_Double",
        }
    }
}
