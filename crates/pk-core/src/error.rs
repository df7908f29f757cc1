use thiserror::Error;

use crate::types::AnnotationKind;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("{operation} is not valid for {kind} band groups")]
    WrongKind { kind: AnnotationKind, operation: &'static str },
    #[error("No open entry in {band}")]
    NoOpenEntry { band: &'static str },
    #[error("Too many parameters: {count} (param_NB holds at most 255)")]
    TooManyParameters { count: usize },
    #[error("Value nesting exceeds the configured limit of {limit}")]
    NestingTooDeep { limit: usize },
    #[error("Tag '{tag}' expects {expected} operand(s), got {found}")]
    ArityMismatch { tag: char, expected: usize, found: usize },
    #[error("Band {band} out of step: expected {expected} entries, found {found}")]
    Desync { band: &'static str, expected: usize, found: usize },
    #[error("Value {value} cannot be encoded with {codec}")]
    ValueOutOfRange { codec: &'static str, value: i64 },
    #[error("Unexpected end of input while reading {band}")]
    UnexpectedEof { band: &'static str },
    #[error("Unknown value tag: {0:#04x}")]
    UnknownTag(i64),
    #[error("Unresolved {pool} reference: {index}")]
    UnresolvedReference { pool: &'static str, index: i64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PackError>;
