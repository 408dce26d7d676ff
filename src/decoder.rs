//! Decoder entry points.
//!
//! Text parsing is delegated to `dotenvy`; this module validates the
//! destination, applies the configured key prefix, and feeds every key through
//! the assignment engine. The first failing key aborts the decode and is
//! reported together with its cause.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::assign::{self, Outcome};
use crate::builder::DotenvDecoderBuilder;
use crate::error::DotfigError;
use crate::shape::{Decode, Place, Record, Shape};
use crate::types::DecodeOptions;

/// A text format that can be decoded into a destination value.
pub trait Decoder {
    /// Short format name, e.g. `"env"`.
    fn format(&self) -> &'static str;

    /// Parse `data` and write it into `dest`, which must be a record or a
    /// present pointer to one.
    fn unmarshal(&self, data: &[u8], dest: &mut dyn Decode) -> Result<(), DotfigError>;
}

/// Decodes `.env` text into records.
#[derive(Debug, Clone, Default)]
pub struct DotenvDecoder {
    options: DecodeOptions,
}

impl DotenvDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> DotenvDecoderBuilder {
        DotenvDecoderBuilder::new()
    }

    pub(crate) fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode_str(&self, input: &str, dest: &mut dyn Decode) -> Result<(), DotfigError> {
        self.unmarshal(input.as_bytes(), dest)
    }

    /// Read and decode a `.env` file.
    pub fn decode_path(&self, path: impl AsRef<Path>, dest: &mut dyn Decode) -> Result<(), DotfigError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| DotfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "decoding env file");
        self.unmarshal(&data, dest)
    }

    /// Decode the process environment. Variables whose name or value is not
    /// valid Unicode are skipped.
    pub fn decode_env(&self, dest: &mut dyn Decode) -> Result<(), DotfigError> {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        self.decode_vars(vars, dest)
    }

    /// Decode an already-parsed flat mapping of keys to raw values.
    ///
    /// Takes an iterator so callers can pass pairs from any source.
    pub fn decode_vars(
        &self,
        vars: impl IntoIterator<Item = (String, String)>,
        dest: &mut dyn Decode,
    ) -> Result<(), DotfigError> {
        let record = destination(dest)?;
        for (raw_key, raw_value) in vars {
            self.apply(record, &raw_key, &raw_value)?;
        }
        Ok(())
    }

    fn apply(&self, record: &mut dyn Record, raw_key: &str, raw_value: &str) -> Result<(), DotfigError> {
        let key = match &self.options.prefix {
            Some(prefix) => match strip_key_prefix(raw_key, prefix) {
                Some(rest) => rest,
                None => {
                    trace!(key = raw_key, "key outside prefix, ignored");
                    return Ok(());
                }
            },
            None => raw_key,
        };
        if key.is_empty() {
            return Ok(());
        }

        let segments: Vec<&str> = key.split('_').collect();
        match assign::assign(record, &segments, raw_value, &self.options) {
            Ok(Outcome::Assigned) => trace!(key = raw_key, "assigned"),
            Ok(Outcome::Ignored) => debug!(key = raw_key, "no field matches key, ignored"),
            Err(source) => {
                return Err(DotfigError::Key {
                    key: raw_key.to_string(),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl Decoder for DotenvDecoder {
    fn format(&self) -> &'static str {
        "env"
    }

    fn unmarshal(&self, data: &[u8], dest: &mut dyn Decode) -> Result<(), DotfigError> {
        let pairs = parse(data)?;
        debug!(format = self.format(), keys = pairs.len(), "decoding");
        self.decode_vars(pairs, dest)
    }
}

/// Parse env text into ordered pairs. A repeated key keeps its first position
/// and its last value.
fn parse(data: &[u8]) -> Result<IndexMap<String, String>, DotfigError> {
    let mut pairs = IndexMap::new();
    for item in dotenvy::from_read_iter(data) {
        let (key, value) = item?;
        pairs.insert(key, value);
    }
    Ok(pairs)
}

/// Strip `{prefix}_` from `key`, comparing the prefix without regard to ASCII
/// case like the rest of the key.
fn strip_key_prefix<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    let head = key.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    key[prefix.len()..].strip_prefix('_')
}

fn destination(dest: &mut dyn Decode) -> Result<&mut dyn Record, DotfigError> {
    match dest.place() {
        Place::Record(record) => Ok(record),
        Place::Pointer(pointer) if pointer.is_present() => match pointer.get_or_alloc() {
            Some(Place::Record(record)) => Ok(record),
            Some(other) => Err(DotfigError::InvalidDestination {
                found: format!("pointer to {}", other.kind()),
            }),
            None => Err(DotfigError::InvalidDestination {
                found: "shared pointer".into(),
            }),
        },
        Place::Pointer(_) => Err(DotfigError::InvalidDestination {
            found: "absent pointer".into(),
        }),
        other => Err(DotfigError::InvalidDestination {
            found: other.kind().to_string(),
        }),
    }
}

/// Decode `.env` bytes into a zero-valued `T`.
pub fn from_slice<T: Shape + Record>(data: &[u8]) -> Result<T, DotfigError> {
    let mut value = T::zero();
    DotenvDecoder::new().unmarshal(data, &mut value)?;
    Ok(value)
}

/// Decode `.env` text into a zero-valued `T`.
pub fn from_str<T: Shape + Record>(input: &str) -> Result<T, DotfigError> {
    from_slice(input.as_bytes())
}

/// Read a `.env` file and decode it into a zero-valued `T`.
pub fn from_path<T: Shape + Record>(path: impl AsRef<Path>) -> Result<T, DotfigError> {
    let mut value = T::zero();
    DotenvDecoder::new().decode_path(path, &mut value)?;
    Ok(value)
}
