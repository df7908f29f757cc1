use crate::bhsd::Codec;
use pk_core::Result;
use std::io::Read;

/// Turns whole bands into byte runs and back.
///
/// Runs carry no framing; the reader must already know how many values
/// to expect.
pub trait NumericCodec {
    fn encode(&self, values: &[i64], codec: Codec) -> Result<Vec<u8>>;
    fn decode(&self, input: &mut dyn Read, count: usize, codec: Codec) -> Result<Vec<i64>>;
}

/// Straight BHSD coding with no codec selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BhsdCodec;

impl NumericCodec for BhsdCodec {
    fn encode(&self, values: &[i64], codec: Codec) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(values.len());
        for &value in values {
            codec.encode_value(value, &mut out)?;
        }
        tracing::trace!(codec = %codec, count = values.len(), bytes = out.len(), "Encoded band");
        Ok(out)
    }

    fn decode(&self, input: &mut dyn Read, count: usize, codec: Codec) -> Result<Vec<i64>> {
        (0..count).map(|_| codec.decode_value(input)).collect()
    }
}
