//! A group of metadata bands, e.g. `Class_RVA` or `Method_AD`.

use crate::band::{BandId, BandMark, Bands};
use crate::cursor::BandCursor;
use crate::reader::{decode_entries, Entry};
use crate::tag::Dispatch;
use crate::value::{Annotation, ElementValue, Operand};
use pk_codec::NumericCodec;
use pk_core::{AnnotationContext, AnnotationKind, MetadataConfig, PackError, Result};
use pk_cpool::{ConstantLookup, ConstantPool};
use std::io::Write;

/// Most parameter positions one param_NB entry can describe.
pub const MAX_PARAMETERS: usize = 255;

/// All bands for one (context, kind) pair.
///
/// Annotations are flattened depth first into the bands as they are
/// added. Each added annotation (or default value) records a mark of the
/// band lengths before it, which is what [`remove_latest`] cuts back to.
///
/// [`remove_latest`]: MetadataBandGroup::remove_latest
#[derive(Debug, Clone)]
pub struct MetadataBandGroup {
    kind: AnnotationKind,
    context: AnnotationContext,
    config: MetadataConfig,
    bands: Bands,
    backwards_calls: u64,
    marks: Vec<BandMark>,
}

impl MetadataBandGroup {
    pub fn new(kind: AnnotationKind, context: AnnotationContext) -> Self {
        Self::with_config(kind, context, MetadataConfig::default())
    }

    pub fn with_config(kind: AnnotationKind, context: AnnotationContext, config: MetadataConfig) -> Self {
        Self {
            kind,
            context,
            config,
            bands: Bands::new(),
            backwards_calls: 0,
            marks: Vec::new(),
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    pub fn context(&self) -> AnnotationContext {
        self.context
    }

    pub fn bands(&self) -> &Bands {
        &self.bands
    }

    pub fn band(&self, id: BandId) -> &[i64] {
        self.bands.get(id)
    }

    /// Group label, e.g. `Method_RVPA`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.context.label(), self.kind.code())
    }

    /// Band label used in logs, e.g. `Method_RVPA param_NB`.
    pub fn qualified_name(&self, id: BandId) -> String {
        format!("{} {}", self.label(), id.name())
    }

    /// True while at least one annotation or default value is live.
    /// param_NB entries alone do not count.
    pub fn has_content(&self) -> bool {
        !self.marks.is_empty()
    }

    pub fn num_backwards_calls(&self) -> u64 {
        self.backwards_calls
    }

    /// Live entries as the surrounding structure counts them: default
    /// values for AD, param_NB entries for parameter kinds, anno_N
    /// entries otherwise.
    pub fn entry_count(&self) -> usize {
        match self.kind {
            AnnotationKind::Default => self.marks.len(),
            k if k.is_parameter() => self.bands.len(BandId::ParamNb),
            _ => self.bands.len(BandId::AnnoN),
        }
    }

    fn require(&self, ok: bool, operation: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(PackError::WrongKind { kind: self.kind, operation })
        }
    }

    fn is_member_kind(&self) -> bool {
        self.kind.has_descriptors() && !self.kind.is_parameter()
    }

    // ---- anno_N bookkeeping ----

    /// Open a new anno_N entry counting one annotation.
    pub fn new_entry_in_anno_n(&mut self) -> Result<()> {
        self.require(self.is_member_kind(), "new_entry_in_anno_n")?;
        self.bands.push(BandId::AnnoN, 1);
        Ok(())
    }

    /// Count one more annotation in the latest anno_N entry.
    pub fn increment_anno_n(&mut self) -> Result<()> {
        self.require(self.is_member_kind(), "increment_anno_n")?;
        let last = self
            .bands
            .last_mut(BandId::AnnoN)
            .ok_or(PackError::NoOpenEntry { band: BandId::AnnoN.name() })?;
        *last += 1;
        Ok(())
    }

    // ---- adding ----

    /// Flatten one RVA/RIA annotation. anno_N is left to the caller, see
    /// [`new_entry_in_anno_n`](Self::new_entry_in_anno_n) and
    /// [`increment_anno_n`](Self::increment_anno_n).
    pub fn add_annotation<P: ConstantPool>(&mut self, cp: &mut P, annotation: &Annotation) -> Result<()> {
        self.require(self.is_member_kind(), "add_annotation")?;
        self.transaction(|group| group.push_annotation(cp, annotation))
    }

    /// All annotations of one class member: flattens each and records them
    /// as a single anno_N entry. An empty slice adds nothing.
    pub fn add_member_annotations<P: ConstantPool>(&mut self, cp: &mut P, annotations: &[Annotation]) -> Result<()> {
        self.require(self.is_member_kind(), "add_member_annotations")?;
        if annotations.is_empty() {
            return Ok(());
        }
        self.transaction(|group| {
            for annotation in annotations {
                group.push_annotation(cp, annotation)?;
            }
            group.bands.push(BandId::AnnoN, annotations.len() as i64);
            Ok(())
        })
    }

    /// Annotations of every parameter position of one method.
    pub fn add_parameter_annotations<P: ConstantPool>(
        &mut self,
        cp: &mut P,
        parameters: &[Vec<Annotation>],
    ) -> Result<()> {
        self.require(self.kind.is_parameter(), "add_parameter_annotations")?;
        if parameters.len() > MAX_PARAMETERS {
            return Err(PackError::TooManyParameters { count: parameters.len() });
        }
        self.transaction(|group| {
            group.bands.push(BandId::ParamNb, parameters.len() as i64);
            for annotations in parameters {
                group.bands.push(BandId::AnnoN, annotations.len() as i64);
            }
            for annotation in parameters.iter().flatten() {
                group.push_annotation(cp, annotation)?;
            }
            Ok(())
        })
    }

    /// Default value of one annotation-type method.
    pub fn add_default_value<P: ConstantPool>(&mut self, cp: &mut P, value: &ElementValue) -> Result<()> {
        self.require(self.kind == AnnotationKind::Default, "add_default_value")?;
        self.transaction(|group| {
            let mark = group.bands.mark();
            group.push_value(cp, value, 1)?;
            group.marks.push(mark);
            Ok(())
        })
    }

    /// Run `f`, restoring bands, marks and counters if it fails.
    fn transaction<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mark = self.bands.mark();
        let marks = self.marks.len();
        let backwards_calls = self.backwards_calls;
        let result = f(self);
        if result.is_err() {
            self.bands.truncate(&mark);
            self.marks.truncate(marks);
            self.backwards_calls = backwards_calls;
        }
        result
    }

    fn push_annotation<P: ConstantPool>(&mut self, cp: &mut P, annotation: &Annotation) -> Result<()> {
        let mark = self.bands.mark();
        self.bands.push(BandId::TypeRs, cp.intern_descriptor(&annotation.descriptor) as i64);
        self.bands.push(BandId::PairN, annotation.pairs.len() as i64);
        for (name, value) in &annotation.pairs {
            self.bands.push(BandId::NameRu, cp.intern_utf8(name) as i64);
            self.push_value(cp, value, 1)?;
        }
        self.marks.push(mark);
        tracing::trace!(descriptor = %annotation.descriptor, pairs = annotation.pairs.len(), "Added annotation");
        Ok(())
    }

    fn push_value<P: ConstantPool>(&mut self, cp: &mut P, value: &ElementValue, depth: usize) -> Result<()> {
        if depth > self.config.max_nesting_depth {
            return Err(PackError::NestingTooDeep { limit: self.config.max_nesting_depth });
        }
        let tag = value.tag();
        let dispatch = tag.dispatch();
        let mismatch = |found| PackError::ArityMismatch { tag: tag.as_char(), expected: dispatch.arity(), found };
        self.bands.push(BandId::T, tag.as_byte() as i64);
        match dispatch {
            Dispatch::Literal(cases) => {
                let operands = value.operands();
                if operands.len() != cases.len() {
                    return Err(mismatch(operands.len()));
                }
                for (&case, operand) in cases.iter().zip(operands) {
                    if operand.pool() != case.pool() {
                        return Err(mismatch(cases.len()));
                    }
                    let index = match operand {
                        Operand::Constant(c) => cp.intern_constant(c),
                        Operand::Descriptor(d) => cp.intern_descriptor(d),
                        Operand::Utf8(s) => cp.intern_utf8(s),
                    };
                    self.bands.push(case.band(), index as i64);
                }
            }
            Dispatch::Array => {
                let items = value.as_array().ok_or_else(|| mismatch(0))?;
                self.bands.push(BandId::CasearrayN, items.len() as i64);
                self.backwards_calls += items.len() as u64;
                for item in items {
                    self.push_value(cp, item, depth + 1)?;
                }
            }
            Dispatch::Nested => {
                let nested = value.as_annotation().ok_or_else(|| mismatch(0))?;
                self.bands.push(BandId::NesttypeRs, cp.intern_descriptor(&nested.descriptor) as i64);
                self.bands.push(BandId::NestpairN, nested.pairs.len() as i64);
                self.backwards_calls += nested.pairs.len() as u64;
                for (name, item) in &nested.pairs {
                    self.bands.push(BandId::NestnameRu, cp.intern_utf8(name) as i64);
                    self.push_value(cp, item, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    // ---- undo ----

    /// Drop the most recent entry and everything it flattened.
    ///
    /// For RVA/RIA that is the last anno_N entry with the annotations it
    /// counts; for parameter kinds the last param_NB entry with its anno_N
    /// entries; for AD the last default value.
    pub fn remove_latest(&mut self) -> Result<()> {
        let (entry_counts, units) = self.latest_entry()?;
        if units > self.marks.len() {
            return Err(PackError::Desync {
                band: BandId::AnnoN.name(),
                expected: units,
                found: self.marks.len(),
            });
        }
        let first = self.marks.len() - units;
        let start = self.marks.get(first).copied().unwrap_or_else(|| self.bands.mark());
        let removed_calls = self.unwound_calls(&start, units)?;

        for (id, n) in entry_counts {
            for _ in 0..n {
                self.bands.pop(id);
            }
        }
        self.marks.truncate(first);
        self.bands.truncate_content(&start);
        self.backwards_calls -= removed_calls;
        tracing::debug!(
            group = %self.label(),
            units,
            removed_calls,
            "Removed latest entry"
        );
        Ok(())
    }

    /// Entry-count pops the latest entry needs, and how many annotations
    /// (or default values) it covers. Nothing is mutated.
    fn latest_entry(&self) -> Result<(Vec<(BandId, usize)>, usize)> {
        let count_of = |v: i64| usize::try_from(v).unwrap_or(0);
        match self.kind {
            AnnotationKind::Default => {
                if self.marks.is_empty() {
                    return Err(PackError::NoOpenEntry { band: BandId::T.name() });
                }
                Ok((Vec::new(), 1))
            }
            kind if kind.is_parameter() => {
                let params = self
                    .bands
                    .get(BandId::ParamNb)
                    .last()
                    .copied()
                    .ok_or(PackError::NoOpenEntry { band: BandId::ParamNb.name() })?;
                let params = count_of(params);
                let anno_n = self.bands.get(BandId::AnnoN);
                if anno_n.len() < params {
                    return Err(PackError::Desync {
                        band: BandId::AnnoN.name(),
                        expected: params,
                        found: anno_n.len(),
                    });
                }
                let units = anno_n[anno_n.len() - params..].iter().map(|&n| count_of(n)).sum();
                Ok((vec![(BandId::ParamNb, 1), (BandId::AnnoN, params)], units))
            }
            _ => {
                let latest = self
                    .bands
                    .get(BandId::AnnoN)
                    .last()
                    .copied()
                    .ok_or(PackError::NoOpenEntry { band: BandId::AnnoN.name() })?;
                Ok((vec![(BandId::AnnoN, 1)], count_of(latest)))
            }
        }
    }

    /// Backwards calls held by the `units` annotations (or values) flattened
    /// since `start`.
    fn unwound_calls(&self, start: &BandMark, units: usize) -> Result<u64> {
        if !self.config.verify_undo {
            let calls = self.bands.sum_since(BandId::CasearrayN, start)
                + self.bands.sum_since(BandId::NestpairN, start);
            return Ok(calls as u64);
        }
        let mut cursor = BandCursor::at(&self.bands, start).with_max_depth(self.config.max_nesting_depth);
        for _ in 0..units {
            if self.kind.has_descriptors() {
                cursor.skip_annotation()?;
            } else {
                cursor.skip_value()?;
            }
        }
        cursor.ensure_exhausted(BandId::ALL.into_iter().filter(|id| !id.is_entry_count()))?;
        Ok(cursor.backwards_calls())
    }

    // ---- output ----

    /// Rebuild the live entries from the bands.
    pub fn decode<L: ConstantLookup>(&self, lookup: &L) -> Result<Vec<Entry>> {
        decode_entries(&self.bands, self.kind, self.entry_count(), self.config.max_nesting_depth, lookup)
    }

    /// Encode every transmitted band in wire order and write them to `out`.
    /// Writes nothing when the group has no content. Returns bytes written.
    pub fn pack<C: NumericCodec, W: Write>(self, codec: &C, out: &mut W) -> Result<usize> {
        tracing::debug!(
            group = %self.label(),
            has_content = self.has_content(),
            "Writing metadata band group"
        );
        if !self.has_content() {
            return Ok(0);
        }
        let mut written = 0;
        for id in BandId::ALL.into_iter().filter(|id| id.is_transmitted(self.kind)) {
            let values = self.bands.get(id);
            let encoded = codec.encode(values, id.codec())?;
            out.write_all(&encoded)?;
            written += encoded.len();
            if self.config.log_bands {
                tracing::debug!(
                    band = %self.qualified_name(id),
                    bytes = encoded.len(),
                    count = values.len(),
                    "Wrote band"
                );
            }
        }
        Ok(written)
    }
}
