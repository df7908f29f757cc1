//! Forward walk over flattened bands.
//!
//! Reads each band sequentially, exactly as a decoder would, and counts
//! the backwards calls it passes. Undo uses it to measure the region it
//! is about to drop; decoding uses it to rebuild value trees.

use crate::band::{BandId, BandMark, Bands};
use crate::tag::{Dispatch, Tag};
use crate::value::{Annotation, ElementValue};
use pk_core::{PackError, Result};
use pk_cpool::ConstantLookup;

pub struct BandCursor<'a> {
    bands: &'a Bands,
    pos: [usize; BandId::COUNT],
    backwards_calls: u64,
    max_depth: usize,
}

impl<'a> BandCursor<'a> {
    pub fn new(bands: &'a Bands) -> Self {
        Self {
            bands,
            pos: [0; BandId::COUNT],
            backwards_calls: 0,
            max_depth: usize::MAX,
        }
    }

    /// Start at `mark` instead of the beginning of every band.
    pub fn at(bands: &'a Bands, mark: &BandMark) -> Self {
        let mut cursor = Self::new(bands);
        for id in BandId::ALL {
            cursor.pos[id.index()] = mark.len(id);
        }
        cursor
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn backwards_calls(&self) -> u64 {
        self.backwards_calls
    }

    pub fn position(&self, id: BandId) -> usize {
        self.pos[id.index()]
    }

    pub fn next(&mut self, id: BandId) -> Result<i64> {
        let i = self.pos[id.index()];
        let value = *self.bands.get(id).get(i).ok_or(PackError::Desync {
            band: id.name(),
            expected: i + 1,
            found: self.bands.len(id),
        })?;
        self.pos[id.index()] = i + 1;
        Ok(value)
    }

    pub fn next_count(&mut self, id: BandId) -> Result<usize> {
        let value = self.next(id)?;
        usize::try_from(value)
            .map_err(|_| PackError::ValueOutOfRange { codec: id.codec().name(), value })
    }

    pub fn next_tag(&mut self) -> Result<Tag> {
        let value = self.next(BandId::T)?;
        u8::try_from(value)
            .ok()
            .and_then(Tag::from_byte)
            .ok_or(PackError::UnknownTag(value))
    }

    /// Fail unless every listed band has been consumed completely.
    pub fn ensure_exhausted(&self, ids: impl IntoIterator<Item = BandId>) -> Result<()> {
        for id in ids {
            let (at, len) = (self.position(id), self.bands.len(id));
            if at != len {
                return Err(PackError::Desync { band: id.name(), expected: at, found: len });
            }
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(PackError::NestingTooDeep { limit: self.max_depth });
        }
        Ok(())
    }

    // ---- skipping ----

    pub fn skip_annotation(&mut self) -> Result<()> {
        self.next(BandId::TypeRs)?;
        let pairs = self.next_count(BandId::PairN)?;
        for _ in 0..pairs {
            self.next(BandId::NameRu)?;
            self.skip_value_at(1)?;
        }
        Ok(())
    }

    pub fn skip_value(&mut self) -> Result<()> {
        self.skip_value_at(1)
    }

    fn skip_value_at(&mut self, depth: usize) -> Result<()> {
        self.check_depth(depth)?;
        let tag = self.next_tag()?;
        match tag.dispatch() {
            Dispatch::Literal(cases) => {
                for case in cases {
                    self.next(case.band())?;
                }
            }
            Dispatch::Array => {
                let len = self.next_count(BandId::CasearrayN)?;
                self.backwards_calls += len as u64;
                for _ in 0..len {
                    self.skip_value_at(depth + 1)?;
                }
            }
            Dispatch::Nested => {
                self.next(BandId::NesttypeRs)?;
                let pairs = self.next_count(BandId::NestpairN)?;
                self.backwards_calls += pairs as u64;
                for _ in 0..pairs {
                    self.next(BandId::NestnameRu)?;
                    self.skip_value_at(depth + 1)?;
                }
            }
        }
        Ok(())
    }

    // ---- reading ----

    pub fn read_annotation<L: ConstantLookup>(&mut self, lookup: &L) -> Result<Annotation> {
        let descriptor = lookup.descriptor(self.next(BandId::TypeRs)?)?.to_string();
        let pairs = self.next_count(BandId::PairN)?;
        self.read_pairs(lookup, descriptor, pairs, BandId::NameRu, 1)
    }

    pub fn read_value<L: ConstantLookup>(&mut self, lookup: &L) -> Result<ElementValue> {
        self.read_value_at(lookup, 1)
    }

    fn read_pairs<L: ConstantLookup>(
        &mut self,
        lookup: &L,
        descriptor: String,
        pairs: usize,
        names: BandId,
        depth: usize,
    ) -> Result<Annotation> {
        let mut annotation = Annotation::new(descriptor);
        for _ in 0..pairs {
            let name = lookup.utf8(self.next(names)?)?.to_string();
            let value = self.read_value_at(lookup, depth)?;
            annotation.pairs.push((name, value));
        }
        Ok(annotation)
    }

    fn read_value_at<L: ConstantLookup>(&mut self, lookup: &L, depth: usize) -> Result<ElementValue> {
        self.check_depth(depth)?;
        let tag = self.next_tag()?;
        match tag.dispatch() {
            Dispatch::Literal(cases) => {
                let mut operands = Vec::with_capacity(cases.len());
                for &case in cases {
                    let index = self.next(case.band())?;
                    operands.push(case.resolve(lookup, index)?);
                }
                ElementValue::from_operands(tag, &operands)
            }
            Dispatch::Array => {
                let len = self.next_count(BandId::CasearrayN)?;
                self.backwards_calls += len as u64;
                let items = (0..len)
                    .map(|_| self.read_value_at(lookup, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ElementValue::Array(items))
            }
            Dispatch::Nested => {
                let descriptor = lookup.descriptor(self.next(BandId::NesttypeRs)?)?.to_string();
                let pairs = self.next_count(BandId::NestpairN)?;
                self.backwards_calls += pairs as u64;
                let nested = self.read_pairs(lookup, descriptor, pairs, BandId::NestnameRu, depth + 1)?;
                Ok(ElementValue::Annotation(nested))
            }
        }
    }
}
