//! Numeric band codecs.
//!
//! A band is a sequence of integers; this crate turns one into a byte run
//! and back. Only the two fixed BHSD codecs metadata bands use are
//! provided: `BYTE1` for tags and small counts, `UNSIGNED5` for
//! references and larger counts.

pub mod bhsd;
pub mod numeric;

pub use bhsd::Codec;
pub use numeric::{BhsdCodec, NumericCodec};
