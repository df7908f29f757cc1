//! Reading packed metadata bands back.
//!
//! Bands carry no framing, so every count comes from somewhere else: the
//! number of entries from the surrounding structure, the number of
//! backwards calls from the segment header, and everything after that
//! from bands already read.

use crate::band::{BandId, Bands};
use crate::cursor::BandCursor;
use crate::tag::{Dispatch, Tag};
use crate::value::{Annotation, ElementValue};
use pk_codec::NumericCodec;
use pk_core::{AnnotationKind, MetadataConfig, PackError, Result};
use pk_cpool::ConstantLookup;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read};

/// One decoded entry of a band group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    /// The annotations of one class, field or method.
    Annotations(Vec<Annotation>),
    /// The annotations of each parameter position of one method.
    Parameters(Vec<Vec<Annotation>>),
    /// The default value of one annotation-type method.
    Default(ElementValue),
}

#[derive(Debug, Clone)]
pub struct BandReader {
    kind: AnnotationKind,
    config: MetadataConfig,
}

impl BandReader {
    pub fn new(kind: AnnotationKind) -> Self {
        Self::with_config(kind, MetadataConfig::default())
    }

    pub fn with_config(kind: AnnotationKind, config: MetadataConfig) -> Self {
        Self { kind, config }
    }

    /// Read every transmitted band for `entries` entries holding
    /// `backwards_calls` array elements and nested pairs between them.
    pub fn read<C: NumericCodec, R: Read>(
        &self,
        codec: &C,
        input: &mut R,
        entries: usize,
        backwards_calls: u64,
    ) -> Result<DecodedBands> {
        let mut bands = Bands::new();
        let mut read = |bands: &mut Bands, id: BandId, count: usize| -> Result<()> {
            let values = codec.decode(&mut *input, count, id.codec()).map_err(|e| match e {
                PackError::Io(io) if io.kind() == ErrorKind::UnexpectedEof => {
                    PackError::UnexpectedEof { band: id.name() }
                }
                other => other,
            })?;
            bands.set(id, values);
            Ok(())
        };

        let roots = if self.kind.has_descriptors() {
            let anno_entries = if self.kind.is_parameter() {
                read(&mut bands, BandId::ParamNb, entries)?;
                count(&bands, BandId::ParamNb)?
            } else {
                entries
            };
            read(&mut bands, BandId::AnnoN, anno_entries)?;
            let annotations = count(&bands, BandId::AnnoN)?;
            read(&mut bands, BandId::TypeRs, annotations)?;
            read(&mut bands, BandId::PairN, annotations)?;
            let pairs = count(&bands, BandId::PairN)?;
            read(&mut bands, BandId::NameRu, pairs)?;
            pairs
        } else {
            entries
        };

        let tag_count = usize::try_from(backwards_calls)
            .ok()
            .and_then(|calls| roots.checked_add(calls))
            .ok_or(PackError::ValueOutOfRange {
                codec: BandId::T.codec().name(),
                value: saturate(backwards_calls),
            })?;
        read(&mut bands, BandId::T, tag_count)?;
        let tags = bands
            .get(BandId::T)
            .iter()
            .map(|&b| u8::try_from(b).ok().and_then(Tag::from_byte).ok_or(PackError::UnknownTag(b)))
            .collect::<Result<Vec<_>>>()?;

        let mut case_counts = [0usize; BandId::COUNT];
        let (mut arrays, mut nested) = (0, 0);
        for tag in &tags {
            match tag.dispatch() {
                Dispatch::Literal(cases) => {
                    for case in cases {
                        case_counts[case.band().index()] += 1;
                    }
                }
                Dispatch::Array => arrays += 1,
                Dispatch::Nested => nested += 1,
            }
        }
        for id in [
            BandId::CaseIKi,
            BandId::CaseDKd,
            BandId::CaseFKf,
            BandId::CaseJKj,
            BandId::CasecRs,
            BandId::CaseetRs,
            BandId::CaseecRu,
            BandId::CasesRu,
        ] {
            read(&mut bands, id, case_counts[id.index()])?;
        }
        read(&mut bands, BandId::CasearrayN, arrays)?;
        read(&mut bands, BandId::NesttypeRs, nested)?;
        read(&mut bands, BandId::NestpairN, nested)?;
        let nested_pairs = count(&bands, BandId::NestpairN)?;
        read(&mut bands, BandId::NestnameRu, nested_pairs)?;

        let desync = |found| PackError::Desync { band: BandId::T.name(), expected: tag_count - roots, found };
        let expanded = count(&bands, BandId::CasearrayN)?
            .checked_add(nested_pairs)
            .ok_or_else(|| desync(usize::MAX))?;
        if expanded != tag_count - roots {
            return Err(desync(expanded));
        }

        Ok(DecodedBands { kind: self.kind, config: self.config.clone(), entries, bands })
    }
}

fn saturate(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn count(bands: &Bands, id: BandId) -> Result<usize> {
    let sum = bands.sum(id);
    usize::try_from(sum).map_err(|_| PackError::ValueOutOfRange { codec: id.codec().name(), value: sum })
}

/// Bands as read from a byte stream, not yet turned back into trees.
#[derive(Debug, Clone)]
pub struct DecodedBands {
    kind: AnnotationKind,
    config: MetadataConfig,
    entries: usize,
    bands: Bands,
}

impl DecodedBands {
    pub fn bands(&self) -> &Bands {
        &self.bands
    }

    pub fn band(&self, id: BandId) -> &[i64] {
        self.bands.get(id)
    }

    pub fn entries<L: ConstantLookup>(&self, lookup: &L) -> Result<Vec<Entry>> {
        decode_entries(&self.bands, self.kind, self.entries, self.config.max_nesting_depth, lookup)
    }
}

/// Walk `bands` from the start and rebuild `entries` entries.
pub(crate) fn decode_entries<L: ConstantLookup>(
    bands: &Bands,
    kind: AnnotationKind,
    entries: usize,
    max_depth: usize,
    lookup: &L,
) -> Result<Vec<Entry>> {
    let mut cursor = BandCursor::new(bands).with_max_depth(max_depth);
    let mut out = Vec::with_capacity(entries);
    for _ in 0..entries {
        let entry = match kind {
            AnnotationKind::Default => Entry::Default(cursor.read_value(lookup)?),
            k if k.is_parameter() => {
                let params = cursor.next_count(BandId::ParamNb)?;
                let counts = (0..params)
                    .map(|_| cursor.next_count(BandId::AnnoN))
                    .collect::<Result<Vec<_>>>()?;
                let mut parameters = Vec::with_capacity(params);
                for n in counts {
                    let annotations = (0..n)
                        .map(|_| cursor.read_annotation(lookup))
                        .collect::<Result<Vec<_>>>()?;
                    parameters.push(annotations);
                }
                Entry::Parameters(parameters)
            }
            _ => {
                let n = cursor.next_count(BandId::AnnoN)?;
                let annotations = (0..n)
                    .map(|_| cursor.read_annotation(lookup))
                    .collect::<Result<Vec<_>>>()?;
                Entry::Annotations(annotations)
            }
        };
        out.push(entry);
    }
    cursor.ensure_exhausted(BandId::ALL)?;
    Ok(out)
}
