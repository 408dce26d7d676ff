//! Schema description consumed by the decoder.
//!
//! There is no runtime reflection to lean on, so every type that can appear in
//! a destination describes itself: [`Shape`] carries the static metadata used
//! for matching (declared type name, composite kind, zero value) and
//! [`Decode::place`] hands out a mutable, kind-classified [`Place`] the engine
//! walks. Records get their description from the [`record!`](crate::record)
//! macro; std and third-party types are covered in `impls`.

use std::collections::TryReserveError;

use crate::error::{AssignError, CoerceError};
use crate::types::{Kind, ScalarKind};

/// A value the decoder can write into.
pub trait Decode {
    fn place(&mut self) -> Place<'_>;
}

/// Static description of a type that can appear as a record field, sequence
/// element, map value or pointee.
pub trait Shape: Decode {
    /// Declared type name used for type-name matching. `None` for unnamed
    /// composites such as `Option<T>` or `Vec<T>`.
    const TYPE_NAME: Option<&'static str>;
    const KIND: Kind;

    /// Value used when storage is allocated lazily or a sequence grows.
    fn zero() -> Self;
}

/// Mutable view onto one location, classified by composite kind.
pub enum Place<'a> {
    Scalar(&'a mut dyn Scalar),
    Pointer(&'a mut dyn Pointer),
    Record(&'a mut dyn Record),
    Map(&'a mut dyn Mapping),
    Sequence(&'a mut dyn Sequence),
    Dynamic(&'a mut dyn Dynamic),
}

impl Place<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Place::Scalar(scalar) => Kind::Scalar(scalar.kind()),
            Place::Pointer(_) => Kind::Pointer,
            Place::Record(_) => Kind::Record,
            Place::Map(_) => Kind::Map,
            Place::Sequence(_) => Kind::Sequence,
            Place::Dynamic(_) => Kind::Dynamic,
        }
    }
}

/// One declared field of a record, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub type_name: Option<&'static str>,
    pub kind: Kind,
    /// Whether the field is visible outside its module. Unexported fields are
    /// still written through the record's own accessor.
    pub exported: bool,
}

pub trait Record {
    fn type_name(&self) -> &'static str;

    fn fields(&self) -> &'static [FieldDef];

    /// Mutable view of the named field, or `None` if it cannot be written.
    fn field_mut(&mut self, name: &str) -> Option<Place<'_>>;
}

pub trait Scalar {
    fn kind(&self) -> ScalarKind;

    /// Parse `raw` as this scalar's type and store it.
    fn assign(&mut self, raw: &str) -> Result<(), CoerceError>;
}

pub trait Pointer {
    fn is_present(&self) -> bool;

    /// Allocate a zero-valued referent if absent and return a view of it.
    /// `None` when the referent cannot be borrowed mutably.
    fn get_or_alloc(&mut self) -> Option<Place<'_>>;
}

pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extend with zero values up to `len` elements. Never shrinks. Fails
    /// without touching the sequence when the storage cannot be reserved.
    fn try_grow(&mut self, len: usize) -> Result<(), TryReserveError>;

    fn element(&mut self, index: usize) -> Option<Place<'_>>;
}

/// Callback filling a freshly zeroed map value.
pub type Fill<'f> = dyn FnMut(Place<'_>) -> Result<(), AssignError> + 'f;

pub trait Mapping {
    fn key_type(&self) -> &'static str;

    /// Build a zero value, let `fill` populate it, then insert it under `key`.
    /// The map is left untouched when the key type is not string-like or
    /// `fill` fails.
    fn insert_with(&mut self, key: &str, fill: &mut Fill<'_>) -> Result<(), AssignError>;
}

/// A value that accepts an arbitrary raw string as-is.
pub trait Dynamic {
    fn set_raw(&mut self, raw: &str);
}

/// Key type of a mapping field.
pub trait MapKey: Sized {
    const TYPE_NAME: &'static str;

    /// `None` for key types that are not string-like.
    fn from_key(key: &str) -> Option<Self>;
}
