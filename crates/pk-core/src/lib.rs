//! Shared vocabulary for the banded annotation encoder.
//!
//! Holds the error type every crate in the workspace returns, the
//! encoder configuration, and the (context, kind) pair that names a
//! metadata band group.

pub mod config;
pub mod error;
pub mod types;

pub use config::MetadataConfig;
pub use error::{PackError, Result};
pub use types::{AnnotationContext, AnnotationKind};

#[cfg(test)]
mod tests;
