//! Constant-pool bridge.
//!
//! Band groups never hold literals; they hold indices handed out by a
//! [`ConstantPool`]. Decoding goes the other way through
//! [`ConstantLookup`]. [`CpBands`] implements both in memory.

pub mod constant;
pub mod pool;

pub use constant::{Constant, PoolKind};
pub use pool::{ConstantLookup, ConstantPool, CpBands};

#[cfg(test)]
mod tests;
