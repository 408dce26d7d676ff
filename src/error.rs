use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Kind, ScalarKind};

/// A raw string that does not parse as the requested scalar type.
#[derive(Debug, Error)]
#[error("cannot parse {raw:?} as {kind}: {reason}")]
pub struct CoerceError {
    pub kind: ScalarKind,
    pub raw: String,
    pub reason: String,
}

impl CoerceError {
    pub fn new(kind: ScalarKind, raw: &str, reason: impl ToString) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Why a single key could not be placed into the destination.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error(transparent)]
    Coerce(#[from] CoerceError),

    #[error("unsupported kind {kind} for value {raw:?}")]
    UnsupportedKind { kind: Kind, raw: String },

    #[error("cannot descend into field {field:?} (kind {kind}), leftover {leftover:?}")]
    CannotDescend {
        field: String,
        kind: Kind,
        leftover: Vec<String>,
    },

    #[error("cannot parse sequence index {index:?} for field {field:?}")]
    SequenceIndex { field: String, index: String },

    #[error("sequence index {index} for field {field:?} is beyond the limit of {limit} elements")]
    SequenceLimit {
        field: String,
        index: usize,
        limit: usize,
    },

    #[error("sequence field {field:?} cannot grow to hold index {index}")]
    SequenceCapacity { field: String, index: usize },

    #[error("unsupported map key type {key_type}; only string keys allowed")]
    UnsupportedMapKey { key_type: &'static str },

    #[error("cannot set {target} (not addressable)")]
    Inaccessible { target: String },
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum DotfigError {
    #[error("Destination must be a record or a present pointer to one, got {found}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(dotfig::invalid_destination),
            help("pass `&mut` to a struct declared with `dotfig::record!`")
        )
    )]
    InvalidDestination { found: String },

    #[error("Failed to parse env input: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(dotfig::parse)))]
    Parse(#[from] dotenvy::Error),

    #[error("Failed to read {}: {source}", path.display())]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(dotfig::io)))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("key `{key}`: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(dotfig::key)))]
    Key { key: String, source: AssignError },
}
