//! Annotation value trees.

use crate::tag::Tag;
use pk_core::{PackError, Result};
use pk_cpool::{Constant, PoolKind};
use serde::{Deserialize, Serialize};

/// One annotation: a type descriptor and its name/value pairs in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub descriptor: String,
    pub pairs: Vec<(String, ElementValue)>,
}

impl Annotation {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self { descriptor: descriptor.into(), pairs: Vec::new() }
    }

    pub fn with(mut self, name: impl Into<String>, value: ElementValue) -> Self {
        self.pairs.push((name.into(), value));
        self
    }

    /// Depth of the deepest pair value; 0 for a marker annotation.
    pub fn depth(&self) -> usize {
        self.pairs.iter().map(|(_, v)| v.depth()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementValue {
    Byte(i8),
    Char(u16),
    Int(i32),
    Short(i16),
    Boolean(bool),
    Double(f64),
    Float(f32),
    Long(i64),
    /// Class literal, as a field descriptor.
    Class(String),
    Enum { type_descriptor: String, const_name: String },
    String(String),
    Array(Vec<ElementValue>),
    Annotation(Annotation),
}

/// A literal ready for interning (or just resolved from a pool).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Constant(Constant),
    Descriptor(&'a str),
    Utf8(&'a str),
}

impl Operand<'_> {
    pub fn pool(&self) -> PoolKind {
        match self {
            Self::Constant(c) => c.pool(),
            Self::Descriptor(_) => PoolKind::Signature,
            Self::Utf8(_) => PoolKind::Utf8,
        }
    }
}

impl ElementValue {
    pub fn tag(&self) -> Tag {
        match self {
            Self::Byte(_) => Tag::Byte,
            Self::Char(_) => Tag::Char,
            Self::Int(_) => Tag::Int,
            Self::Short(_) => Tag::Short,
            Self::Boolean(_) => Tag::Boolean,
            Self::Double(_) => Tag::Double,
            Self::Float(_) => Tag::Float,
            Self::Long(_) => Tag::Long,
            Self::Class(_) => Tag::Class,
            Self::Enum { .. } => Tag::Enum,
            Self::String(_) => Tag::String,
            Self::Array(_) => Tag::Array,
            Self::Annotation(_) => Tag::Annotation,
        }
    }

    /// Literal operands in case-band order. Empty for arrays and nested
    /// annotations, whose content is carried by child values.
    pub fn operands(&self) -> Vec<Operand<'_>> {
        match self {
            Self::Byte(v) => vec![Operand::Constant(Constant::Int(*v as i32))],
            Self::Char(v) => vec![Operand::Constant(Constant::Int(*v as i32))],
            Self::Int(v) => vec![Operand::Constant(Constant::Int(*v))],
            Self::Short(v) => vec![Operand::Constant(Constant::Int(*v as i32))],
            Self::Boolean(v) => vec![Operand::Constant(Constant::Int(*v as i32))],
            Self::Double(v) => vec![Operand::Constant(Constant::Double(*v))],
            Self::Float(v) => vec![Operand::Constant(Constant::Float(*v))],
            Self::Long(v) => vec![Operand::Constant(Constant::Long(*v))],
            Self::Class(descriptor) => vec![Operand::Descriptor(descriptor)],
            Self::Enum { type_descriptor, const_name } => {
                vec![Operand::Descriptor(type_descriptor), Operand::Utf8(const_name)]
            }
            Self::String(s) => vec![Operand::Utf8(s)],
            Self::Array(_) | Self::Annotation(_) => Vec::new(),
        }
    }

    /// Rebuild a literal value from its resolved operands.
    pub fn from_operands(tag: Tag, operands: &[Operand<'_>]) -> Result<Self> {
        use Operand::{Constant as K, Descriptor, Utf8};
        let value = match (tag, operands) {
            (Tag::Byte, [K(Constant::Int(v))]) => Self::Byte(*v as i8),
            (Tag::Char, [K(Constant::Int(v))]) => Self::Char(*v as u16),
            (Tag::Int, [K(Constant::Int(v))]) => Self::Int(*v),
            (Tag::Short, [K(Constant::Int(v))]) => Self::Short(*v as i16),
            (Tag::Boolean, [K(Constant::Int(v))]) => Self::Boolean(*v != 0),
            (Tag::Double, [K(Constant::Double(v))]) => Self::Double(*v),
            (Tag::Float, [K(Constant::Float(v))]) => Self::Float(*v),
            (Tag::Long, [K(Constant::Long(v))]) => Self::Long(*v),
            (Tag::Class, [Descriptor(d)]) => Self::Class(d.to_string()),
            (Tag::Enum, [Descriptor(t), Utf8(n)]) => Self::Enum {
                type_descriptor: t.to_string(),
                const_name: n.to_string(),
            },
            (Tag::String, [Utf8(s)]) => Self::String(s.to_string()),
            _ => {
                return Err(PackError::ArityMismatch {
                    tag: tag.as_char(),
                    expected: tag.dispatch().arity(),
                    found: operands.len(),
                })
            }
        };
        Ok(value)
    }

    pub fn as_array(&self) -> Option<&[ElementValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            Self::Annotation(a) => Some(a),
            _ => None,
        }
    }

    /// 1 for a scalar; arrays and nested annotations add one level.
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Annotation(a) => 1 + a.depth(),
            _ => 1,
        }
    }

    /// Backwards calls this subtree contributes: array elements plus nested pairs.
    pub fn backwards_calls(&self) -> u64 {
        match self {
            Self::Array(items) => {
                items.len() as u64 + items.iter().map(Self::backwards_calls).sum::<u64>()
            }
            Self::Annotation(a) => {
                a.pairs.len() as u64 + a.pairs.iter().map(|(_, v)| v.backwards_calls()).sum::<u64>()
            }
            _ => 0,
        }
    }
}
