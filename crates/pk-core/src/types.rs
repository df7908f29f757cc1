use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural position an annotation group applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationContext {
    Class,
    Field,
    Method,
}

impl AnnotationContext {
    /// Label used as the prefix of qualified band names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Field => "Field",
            Self::Method => "Method",
        }
    }
}

impl fmt::Display for AnnotationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Annotation group variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// `AD`: annotation default values of annotation-type methods.
    Default,
    /// `RVA`
    RuntimeVisible,
    /// `RIA`
    RuntimeInvisible,
    /// `RVPA`
    RuntimeVisibleParameter,
    /// `RIPA`
    RuntimeInvisibleParameter,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 5] = [
        Self::Default,
        Self::RuntimeVisible,
        Self::RuntimeInvisible,
        Self::RuntimeVisibleParameter,
        Self::RuntimeInvisibleParameter,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Default => "AD",
            Self::RuntimeVisible => "RVA",
            Self::RuntimeInvisible => "RIA",
            Self::RuntimeVisibleParameter => "RVPA",
            Self::RuntimeInvisibleParameter => "RIPA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Parameter variants transmit `param_NB` ahead of `anno_N`.
    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::RuntimeVisibleParameter | Self::RuntimeInvisibleParameter)
    }

    /// Everything except `AD` carries anno_N, type_RS, pair_N and name_RU.
    pub fn has_descriptors(&self) -> bool {
        !matches!(self, Self::Default)
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
