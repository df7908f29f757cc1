//! Banded annotation encoder.
//!
//! Flattens annotation trees into the parallel integer bands of a
//! metadata band group (`class_RVA_bands`, `method_AD_bands`, ...), one
//! group per (context, kind) pair:
//!
//! - [`value`]: the annotation and element-value tree
//! - [`tag`]: the value tag alphabet and its case-band dispatch table
//! - [`band`]: band identities, wire order and storage
//! - [`group`]: [`MetadataBandGroup`], which adds, undoes and packs
//! - [`cursor`]: the sequential walk shared by undo and decoding
//! - [`reader`]: reading packed bands back into trees

pub mod band;
pub mod cursor;
pub mod group;
pub mod reader;
pub mod tag;
pub mod value;

pub use band::{BandId, BandMark, Bands};
pub use cursor::BandCursor;
pub use group::{MetadataBandGroup, MAX_PARAMETERS};
pub use reader::{BandReader, DecodedBands, Entry};
pub use tag::{CaseBand, Dispatch, Tag};
pub use value::{Annotation, ElementValue, Operand};
