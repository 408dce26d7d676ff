//! Decode flat `.env` files into nested, typed Rust structs.
//!
//! A `.env` file is a flat list of `KEY=value` pairs. Application config is
//! usually a tree: a server section, a database section, a list of replicas.
//! Dotfig maps one onto the other by splitting every key on `_` and matching
//! the pieces against the fields of your struct.
//!
//! ```
//! use std::time::Duration;
//!
//! dotfig::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Config {
//!         pub host: String,
//!         pub database: Database,
//!     }
//! }
//!
//! dotfig::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Database {
//!         pub pool_size: u32,
//!         pub idle_timeout: Duration,
//!     }
//! }
//!
//! let config: Config = dotfig::from_str(
//!     "HOST=0.0.0.0\nDATABASE_POOL_SIZE=16\nDATABASE_IDLE_TIMEOUT=90s\n",
//! )?;
//! assert_eq!(config.database.pool_size, 16);
//! assert_eq!(config.database.idle_timeout, Duration::from_secs(90));
//! # Ok::<(), dotfig::DotfigError>(())
//! ```
//!
//! # Describing a struct
//!
//! Rust has no runtime reflection, so the decoder works against a small schema
//! description instead. Every decodable type implements [`Decode`], which
//! hands out a [`Place`]: a mutable view tagged with what kind of thing it is
//! (scalar, pointer, record, map, sequence or dynamic value).
//!
//! - The [`record!`] macro declares a struct and implements [`Record`] for it:
//!   the ordered field list plus mutable access to each field by name.
//! - The [`scalar_newtype!`] macro wraps a built-in scalar in a named type.
//!   The new name is what type-name matching sees.
//! - Strings, booleans, every integer and float width, complex numbers and
//!   [`std::time::Duration`] are scalars out of the box.
//! - `Option<T>`, `Rc<T>` and `Arc<T>` are pointers. `Box<T>` is transparent.
//! - `Vec` and `VecDeque` are sequences; `HashMap`, `BTreeMap` and `IndexMap`
//!   with string keys are maps.
//! - `toml::Value` and `serde_json::Value` store the raw string as-is when
//!   used as map values.
//!
//! # Key resolution
//!
//! A key such as `DATABASE_POOL_SIZE` is split into segments
//! `[DATABASE, POOL, SIZE]`. The longest prefix is tried first: the segments
//! are joined, lowercased and stripped of underscores (`databasepoolsize`),
//! then compared to every field name and type name normalized the same way.
//! On a miss the last segment is dropped and the search repeats. The first
//! match commits; the leftover segments descend into that field.
//!
//! | Key | Lands in |
//! |-----|----------|
//! | `HOST` | `host` |
//! | `DB_HOST`, `dbhost` | `db_host` |
//! | `DATABASE_POOL_SIZE` | `database.pool_size` |
//! | `REPLICAS_2_HOST` | `replicas[2].host` |
//! | `TAGS_Team_Name` | `tags["Team_Name"]` |
//!
//! Fields are checked in declaration order, by name or by type name, and the
//! first one that matches wins. Map keys keep their original case and
//! underscores. Sequences grow to fit the index they are given.
//!
//! Keys that match nothing are ignored. Anything else that goes wrong (a value
//! that does not parse, a bad index, a non-string map key) aborts the decode
//! with a [`DotfigError::Key`] naming the offending key.
//!
//! # Configuring the decoder
//!
//! [`DotenvDecoder::builder()`] sets a key prefix and an optional cap on
//! sequence growth:
//!
//! ```
//! # dotfig::record! {
//! #     #[derive(Debug, Default)]
//! #     pub struct Config { pub port: u16 }
//! # }
//! let decoder = dotfig::DotenvDecoder::builder().prefix("MYAPP").build();
//! let mut config = Config::default();
//! decoder.decode_str("MYAPP_PORT=8080\nPORT=1\n", &mut config)?;
//! assert_eq!(config.port, 8080);
//! # Ok::<(), dotfig::DotfigError>(())
//! ```
//!
//! # Logging
//!
//! Decoding emits [`tracing`] events: `debug` for ignored keys and per-call
//! summaries, `trace` for every field match, allocation and sequence growth.
//! Nothing is printed unless the application installs a subscriber.

pub mod coerce;
pub mod error;
pub mod types;

mod assign;
mod builder;
mod container;
mod decoder;
mod impls;
mod record;
mod resolve;
mod shape;

#[cfg(test)]
mod fixtures;

pub use builder::DotenvDecoderBuilder;
pub use decoder::{Decoder, DotenvDecoder, from_path, from_slice, from_str};
pub use error::{AssignError, CoerceError, DotfigError};
pub use resolve::normalize;
pub use shape::{
    Decode, Dynamic, FieldDef, Fill, MapKey, Mapping, Place, Pointer, Record, Scalar, Sequence,
    Shape,
};
pub use types::{DecodeOptions, Kind, ScalarKind};
