//! BHSD(B, H) unsigned byte codec.
//!
//! Each value takes between 1 and `B` bytes. With `L = 256 - H`, a byte
//! below `L` terminates the value; bytes at or above `L` carry a base-`H`
//! digit and continue, except in the `B`-th position which always
//! terminates.

use pk_core::{PackError, Result};
use std::fmt;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codec {
    b: u32,
    h: u32,
    name: &'static str,
}

impl Codec {
    /// (1, 256): one raw byte per value.
    pub const BYTE1: Codec = Codec { b: 1, h: 256, name: "BYTE1" };
    /// (5, 64): the general-purpose variable length unsigned codec.
    pub const UNSIGNED5: Codec = Codec { b: 5, h: 64, name: "UNSIGNED5" };

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn max_bytes(&self) -> u32 {
        self.b
    }

    fn low(&self) -> i64 {
        256 - self.h as i64
    }

    /// Number of distinct values the codec can represent.
    pub fn cardinality(&self) -> i64 {
        let h = self.h as i64;
        let mut digits = 0;
        let mut power = 1;
        for _ in 0..self.b {
            digits += power;
            power *= h;
        }
        self.low() * digits + power
    }

    pub fn largest(&self) -> i64 {
        self.cardinality() - 1
    }

    pub fn encodes(&self, value: i64) -> bool {
        (0..=self.largest()).contains(&value)
    }

    /// Append the encoding of one value to `out`.
    pub fn encode_value(&self, value: i64, out: &mut Vec<u8>) -> Result<()> {
        if !self.encodes(value) {
            return Err(PackError::ValueOutOfRange { codec: self.name, value });
        }
        let l = self.low();
        let h = self.h as i64;
        let mut z = value;
        for _ in 0..self.b {
            let byte = if z < l {
                z
            } else {
                let mut digit = z % h;
                while digit < l {
                    digit += h;
                }
                digit
            };
            out.push(byte as u8);
            if byte < l {
                break;
            }
            z = (z - byte) / h;
        }
        Ok(())
    }

    /// Read one value.
    pub fn decode_value(&self, input: &mut dyn Read) -> Result<i64> {
        let l = self.low();
        let h = self.h as i64;
        let mut value = 0;
        let mut power = 1;
        for _ in 0..self.b {
            let mut byte = [0u8; 1];
            input.read_exact(&mut byte)?;
            let byte = byte[0] as i64;
            value += byte * power;
            if byte < l {
                break;
            }
            power *= h;
        }
        Ok(value)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.name, self.b, self.h)
    }
}
