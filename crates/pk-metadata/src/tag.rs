//! Value tag alphabet and its dispatch table.
//!
//! [`Tag::dispatch`] is the only place that knows which case band a tag
//! feeds. Flattening, undo and decoding all route through it.

use crate::band::BandId;
use crate::value::Operand;
use pk_core::Result;
use pk_cpool::{ConstantLookup, PoolKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Byte,
    Char,
    Int,
    Short,
    Boolean,
    Double,
    Float,
    Long,
    Class,
    Enum,
    String,
    Array,
    Annotation,
}

/// Where a tagged value goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// One interned operand per listed case band, in order.
    Literal(&'static [CaseBand]),
    /// A `casearray_N` count followed by that many values.
    Array,
    /// A `nesttype_RS`/`nestpair_N` header followed by that many named values.
    Nested,
}

impl Dispatch {
    /// Operands consumed directly by the tag.
    pub fn arity(&self) -> usize {
        match self {
            Self::Literal(cases) => cases.len(),
            Self::Array | Self::Nested => 0,
        }
    }
}

impl Tag {
    pub const ALL: [Tag; 13] = [
        Self::Byte,
        Self::Char,
        Self::Int,
        Self::Short,
        Self::Boolean,
        Self::Double,
        Self::Float,
        Self::Long,
        Self::Class,
        Self::Enum,
        Self::String,
        Self::Array,
        Self::Annotation,
    ];

    pub fn as_char(self) -> char {
        match self {
            Self::Byte => 'B',
            Self::Char => 'C',
            Self::Int => 'I',
            Self::Short => 'S',
            Self::Boolean => 'Z',
            Self::Double => 'D',
            Self::Float => 'F',
            Self::Long => 'J',
            Self::Class => 'c',
            Self::Enum => 'e',
            Self::String => 's',
            Self::Array => '[',
            Self::Annotation => '@',
        }
    }

    /// Value stored in the `T` band.
    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    pub fn from_byte(byte: u8) -> Option<Tag> {
        Self::ALL.into_iter().find(|t| t.as_byte() == byte)
    }

    pub fn dispatch(self) -> Dispatch {
        match self {
            Self::Byte | Self::Char | Self::Int | Self::Short | Self::Boolean => {
                Dispatch::Literal(&[CaseBand::Int])
            }
            Self::Double => Dispatch::Literal(&[CaseBand::Double]),
            Self::Float => Dispatch::Literal(&[CaseBand::Float]),
            Self::Long => Dispatch::Literal(&[CaseBand::Long]),
            Self::Class => Dispatch::Literal(&[CaseBand::Class]),
            Self::Enum => Dispatch::Literal(&[CaseBand::EnumType, CaseBand::EnumName]),
            Self::String => Dispatch::Literal(&[CaseBand::String]),
            Self::Array => Dispatch::Array,
            Self::Annotation => Dispatch::Nested,
        }
    }
}

/// The literal-carrying bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseBand {
    Int,
    Double,
    Float,
    Long,
    Class,
    EnumType,
    EnumName,
    String,
}

impl CaseBand {
    pub fn band(self) -> BandId {
        match self {
            Self::Int => BandId::CaseIKi,
            Self::Double => BandId::CaseDKd,
            Self::Float => BandId::CaseFKf,
            Self::Long => BandId::CaseJKj,
            Self::Class => BandId::CasecRs,
            Self::EnumType => BandId::CaseetRs,
            Self::EnumName => BandId::CaseecRu,
            Self::String => BandId::CasesRu,
        }
    }

    /// Pool the band's indices point into.
    pub fn pool(self) -> PoolKind {
        match self {
            Self::Int => PoolKind::Int,
            Self::Double => PoolKind::Double,
            Self::Float => PoolKind::Float,
            Self::Long => PoolKind::Long,
            Self::Class | Self::EnumType => PoolKind::Signature,
            Self::EnumName | Self::String => PoolKind::Utf8,
        }
    }

    pub fn resolve<'l, L: ConstantLookup>(self, lookup: &'l L, index: i64) -> Result<Operand<'l>> {
        Ok(match self.pool() {
            PoolKind::Signature => Operand::Descriptor(lookup.descriptor(index)?),
            PoolKind::Utf8 => Operand::Utf8(lookup.utf8(index)?),
            pool => Operand::Constant(lookup.constant(pool, index)?),
        })
    }
}
