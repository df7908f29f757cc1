//! Band identities and storage.

use pk_codec::Codec;
use pk_core::AnnotationKind;

/// Every band of a metadata group, listed in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandId {
    ParamNb,
    AnnoN,
    TypeRs,
    PairN,
    NameRu,
    T,
    CaseIKi,
    CaseDKd,
    CaseFKf,
    CaseJKj,
    CasecRs,
    CaseetRs,
    CaseecRu,
    CasesRu,
    CasearrayN,
    NesttypeRs,
    NestpairN,
    NestnameRu,
}

impl BandId {
    pub const COUNT: usize = 18;

    pub const ALL: [BandId; Self::COUNT] = [
        Self::ParamNb,
        Self::AnnoN,
        Self::TypeRs,
        Self::PairN,
        Self::NameRu,
        Self::T,
        Self::CaseIKi,
        Self::CaseDKd,
        Self::CaseFKf,
        Self::CaseJKj,
        Self::CasecRs,
        Self::CaseetRs,
        Self::CaseecRu,
        Self::CasesRu,
        Self::CasearrayN,
        Self::NesttypeRs,
        Self::NestpairN,
        Self::NestnameRu,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ParamNb => "param_NB",
            Self::AnnoN => "anno_N",
            Self::TypeRs => "type_RS",
            Self::PairN => "pair_N",
            Self::NameRu => "name_RU",
            Self::T => "T",
            Self::CaseIKi => "caseI_KI",
            Self::CaseDKd => "caseD_KD",
            Self::CaseFKf => "caseF_KF",
            Self::CaseJKj => "caseJ_KJ",
            Self::CasecRs => "casec_RS",
            Self::CaseetRs => "caseet_RS",
            Self::CaseecRu => "caseec_RU",
            Self::CasesRu => "cases_RU",
            Self::CasearrayN => "casearray_N",
            Self::NesttypeRs => "nesttype_RS",
            Self::NestpairN => "nestpair_N",
            Self::NestnameRu => "nestname_RU",
        }
    }

    pub fn codec(self) -> Codec {
        match self {
            Self::ParamNb | Self::T => Codec::BYTE1,
            _ => Codec::UNSIGNED5,
        }
    }

    /// Bands that count entries of the surrounding structure rather than
    /// annotation content.
    pub fn is_entry_count(self) -> bool {
        matches!(self, Self::ParamNb | Self::AnnoN)
    }

    pub fn is_transmitted(self, kind: AnnotationKind) -> bool {
        match self {
            Self::ParamNb => kind.is_parameter(),
            Self::AnnoN | Self::TypeRs | Self::PairN | Self::NameRu => kind.has_descriptors(),
            _ => true,
        }
    }
}

/// Band lengths at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandMark {
    lens: [usize; BandId::COUNT],
}

impl BandMark {
    pub fn len(&self, id: BandId) -> usize {
        self.lens[id.index()]
    }
}

/// The parallel sequences of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bands {
    values: [Vec<i64>; BandId::COUNT],
}

impl Bands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: BandId) -> &[i64] {
        &self.values[id.index()]
    }

    pub fn len(&self, id: BandId) -> usize {
        self.values[id.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Vec::is_empty)
    }

    pub fn sum(&self, id: BandId) -> i64 {
        self.values[id.index()].iter().sum()
    }

    pub fn mark(&self) -> BandMark {
        BandMark { lens: std::array::from_fn(|i| self.values[i].len()) }
    }

    pub(crate) fn push(&mut self, id: BandId, value: i64) {
        self.values[id.index()].push(value);
    }

    pub(crate) fn pop(&mut self, id: BandId) -> Option<i64> {
        self.values[id.index()].pop()
    }

    pub(crate) fn last_mut(&mut self, id: BandId) -> Option<&mut i64> {
        self.values[id.index()].last_mut()
    }

    pub(crate) fn set(&mut self, id: BandId, values: Vec<i64>) {
        self.values[id.index()] = values;
    }

    /// Cut every band back to `mark`.
    pub(crate) fn truncate(&mut self, mark: &BandMark) {
        for id in BandId::ALL {
            self.values[id.index()].truncate(mark.len(id));
        }
    }

    /// Cut content bands back to `mark`, leaving param_NB and anno_N alone.
    pub(crate) fn truncate_content(&mut self, mark: &BandMark) {
        for id in BandId::ALL.into_iter().filter(|id| !id.is_entry_count()) {
            self.values[id.index()].truncate(mark.len(id));
        }
    }

    /// Sum of the entries of `id` past `mark`.
    pub(crate) fn sum_since(&self, id: BandId, mark: &BandMark) -> i64 {
        self.get(id).get(mark.len(id)..).map_or(0, |tail| tail.iter().sum())
    }
}
