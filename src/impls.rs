//! Schema descriptions for std and third-party types.

use std::collections::{BTreeMap, HashMap, TryReserveError, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use num_complex::Complex;

use crate::coerce;
use crate::error::{AssignError, CoerceError};
use crate::shape::{Decode, Dynamic, Fill, MapKey, Mapping, Place, Pointer, Scalar, Sequence, Shape};
use crate::types::{Kind, ScalarKind};

// --- Scalars ---

macro_rules! scalar_shape {
    ($ty:ty, $name:expr, $kind:expr, $zero:expr) => {
        impl Decode for $ty {
            fn place(&mut self) -> Place<'_> {
                Place::Scalar(self)
            }
        }

        impl Shape for $ty {
            const TYPE_NAME: Option<&'static str> = Some($name);
            const KIND: Kind = Kind::Scalar($kind);

            fn zero() -> Self {
                $zero
            }
        }
    };
}

impl Scalar for String {
    fn kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
        raw.clone_into(self);
        Ok(())
    }
}
scalar_shape!(String, "String", ScalarKind::String, String::new());

impl Scalar for bool {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Bool
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = coerce::parse_bool(raw)?;
        Ok(())
    }
}
scalar_shape!(bool, "bool", ScalarKind::Bool, false);

macro_rules! int_scalars {
    ($($ty:ident),*) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Int($ty::BITS)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
                *self = coerce::parse_int(raw, self.kind())?;
                Ok(())
            }
        }
        scalar_shape!($ty, stringify!($ty), ScalarKind::Int($ty::BITS), 0);
    )*};
}
int_scalars!(i8, i16, i32, i64, i128, isize);

macro_rules! uint_scalars {
    ($($ty:ident),*) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Uint($ty::BITS)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
                *self = coerce::parse_uint(raw, self.kind())?;
                Ok(())
            }
        }
        scalar_shape!($ty, stringify!($ty), ScalarKind::Uint($ty::BITS), 0);
    )*};
}
uint_scalars!(u8, u16, u32, u64, u128, usize);

macro_rules! float_scalars {
    ($($ty:ident => $bits:literal),*) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Float($bits)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
                *self = coerce::parse_float(raw, self.kind())?;
                Ok(())
            }
        }
        scalar_shape!($ty, stringify!($ty), ScalarKind::Float($bits), 0.0);
    )*};
}
float_scalars!(f32 => 32, f64 => 64);

macro_rules! complex_scalars {
    ($($part:ident => $bits:literal, $name:literal),*) => {$(
        impl Scalar for Complex<$part> {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Complex($bits)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
                *self = coerce::parse_complex(raw, self.kind())?;
                Ok(())
            }
        }
        scalar_shape!(Complex<$part>, $name, ScalarKind::Complex($bits), Complex::new(0.0, 0.0));
    )*};
}
complex_scalars!(f32 => 64, "Complex32", f64 => 128, "Complex64");

impl Scalar for Duration {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Duration
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = coerce::parse_duration(raw)?;
        Ok(())
    }
}
scalar_shape!(Duration, "Duration", ScalarKind::Duration, Duration::ZERO);

// --- Pointers ---

impl<T: Shape> Decode for Option<T> {
    fn place(&mut self) -> Place<'_> {
        Place::Pointer(self)
    }
}

impl<T: Shape> Pointer for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }

    fn get_or_alloc(&mut self) -> Option<Place<'_>> {
        Some(self.get_or_insert_with(T::zero).place())
    }
}

impl<T: Shape> Shape for Option<T> {
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = Kind::Pointer;

    fn zero() -> Self {
        None
    }
}

// Rc and Arc are always present but only writable while unshared.
macro_rules! shared_pointer {
    ($($ptr:ident),*) => {$(
        impl<T: Shape> Decode for $ptr<T> {
            fn place(&mut self) -> Place<'_> {
                Place::Pointer(self)
            }
        }

        impl<T: Shape> Pointer for $ptr<T> {
            fn is_present(&self) -> bool {
                true
            }

            fn get_or_alloc(&mut self) -> Option<Place<'_>> {
                $ptr::get_mut(self).map(T::place)
            }
        }

        impl<T: Shape> Shape for $ptr<T> {
            const TYPE_NAME: Option<&'static str> = None;
            const KIND: Kind = Kind::Pointer;

            fn zero() -> Self {
                $ptr::new(T::zero())
            }
        }
    )*};
}
shared_pointer!(Rc, Arc);

// A box is never absent, so it is transparent to the engine.
impl<T: Decode + ?Sized> Decode for Box<T> {
    fn place(&mut self) -> Place<'_> {
        (**self).place()
    }
}

impl<T: Shape> Shape for Box<T> {
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = T::KIND;

    fn zero() -> Self {
        Box::new(T::zero())
    }
}

// --- Sequences ---

impl<T: Shape> Decode for Vec<T> {
    fn place(&mut self) -> Place<'_> {
        Place::Sequence(self)
    }
}

impl<T: Shape> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn try_grow(&mut self, len: usize) -> Result<(), TryReserveError> {
        if let Some(additional) = len.checked_sub(Vec::len(self)).filter(|n| *n > 0) {
            self.try_reserve(additional)?;
            self.resize_with(len, T::zero);
        }
        Ok(())
    }

    fn element(&mut self, index: usize) -> Option<Place<'_>> {
        self.get_mut(index).map(T::place)
    }
}

impl<T: Shape> Shape for Vec<T> {
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = Kind::Sequence;

    fn zero() -> Self {
        Vec::new()
    }
}

impl<T: Shape> Decode for VecDeque<T> {
    fn place(&mut self) -> Place<'_> {
        Place::Sequence(self)
    }
}

impl<T: Shape> Sequence for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn try_grow(&mut self, len: usize) -> Result<(), TryReserveError> {
        if let Some(additional) = len.checked_sub(VecDeque::len(self)).filter(|n| *n > 0) {
            self.try_reserve(additional)?;
            self.resize_with(len, T::zero);
        }
        Ok(())
    }

    fn element(&mut self, index: usize) -> Option<Place<'_>> {
        self.get_mut(index).map(T::place)
    }
}

impl<T: Shape> Shape for VecDeque<T> {
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = Kind::Sequence;

    fn zero() -> Self {
        VecDeque::new()
    }
}

// --- Mappings ---

macro_rules! string_keys {
    ($($ty:ty => $name:literal),*) => {$(
        impl MapKey for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_key(key: &str) -> Option<Self> {
                Some(key.into())
            }
        }
    )*};
}
string_keys!(String => "String", Box<str> => "Box<str>", Rc<str> => "Rc<str>", Arc<str> => "Arc<str>");

macro_rules! rejected_keys {
    ($($ty:ident),*) => {$(
        impl MapKey for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn from_key(_key: &str) -> Option<Self> {
                None
            }
        }
    )*};
}
rejected_keys!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn fill_and_insert<K: MapKey, V: Shape>(
    key: &str,
    fill: &mut Fill<'_>,
    insert: impl FnOnce(K, V),
) -> Result<(), AssignError> {
    let key = K::from_key(key).ok_or(AssignError::UnsupportedMapKey {
        key_type: K::TYPE_NAME,
    })?;
    let mut value = V::zero();
    fill(value.place())?;
    insert(key, value);
    Ok(())
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Shape,
    S: BuildHasher,
{
    fn place(&mut self) -> Place<'_> {
        Place::Map(self)
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Shape,
    S: BuildHasher,
{
    fn key_type(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn insert_with(&mut self, key: &str, fill: &mut Fill<'_>) -> Result<(), AssignError> {
        fill_and_insert(key, fill, |k: K, v: V| {
            self.insert(k, v);
        })
    }
}

impl<K, V, S> Shape for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Shape,
    S: BuildHasher + Default,
{
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = Kind::Map;

    fn zero() -> Self {
        HashMap::default()
    }
}

impl<K, V, S> Decode for IndexMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Shape,
    S: BuildHasher,
{
    fn place(&mut self) -> Place<'_> {
        Place::Map(self)
    }
}

impl<K, V, S> Mapping for IndexMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Shape,
    S: BuildHasher,
{
    fn key_type(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn insert_with(&mut self, key: &str, fill: &mut Fill<'_>) -> Result<(), AssignError> {
        fill_and_insert(key, fill, |k: K, v: V| {
            self.insert(k, v);
        })
    }
}

impl<K, V, S> Shape for IndexMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Shape,
    S: BuildHasher + Default,
{
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = Kind::Map;

    fn zero() -> Self {
        IndexMap::default()
    }
}

impl<K: MapKey + Ord, V: Shape> Decode for BTreeMap<K, V> {
    fn place(&mut self) -> Place<'_> {
        Place::Map(self)
    }
}

impl<K: MapKey + Ord, V: Shape> Mapping for BTreeMap<K, V> {
    fn key_type(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn insert_with(&mut self, key: &str, fill: &mut Fill<'_>) -> Result<(), AssignError> {
        fill_and_insert(key, fill, |k: K, v: V| {
            self.insert(k, v);
        })
    }
}

impl<K: MapKey + Ord, V: Shape> Shape for BTreeMap<K, V> {
    const TYPE_NAME: Option<&'static str> = None;
    const KIND: Kind = Kind::Map;

    fn zero() -> Self {
        BTreeMap::new()
    }
}

// --- Dynamic values ---

impl Dynamic for toml::Value {
    fn set_raw(&mut self, raw: &str) {
        *self = toml::Value::String(raw.to_string());
    }
}

impl Decode for toml::Value {
    fn place(&mut self) -> Place<'_> {
        Place::Dynamic(self)
    }
}

impl Shape for toml::Value {
    const TYPE_NAME: Option<&'static str> = Some("Value");
    const KIND: Kind = Kind::Dynamic;

    fn zero() -> Self {
        toml::Value::String(String::new())
    }
}

impl Dynamic for serde_json::Value {
    fn set_raw(&mut self, raw: &str) {
        *self = serde_json::Value::String(raw.to_string());
    }
}

impl Decode for serde_json::Value {
    fn place(&mut self) -> Place<'_> {
        Place::Dynamic(self)
    }
}

impl Shape for serde_json::Value {
    const TYPE_NAME: Option<&'static str> = Some("Value");
    const KIND: Kind = Kind::Dynamic;

    fn zero() -> Self {
        serde_json::Value::Null
    }
}
