//! Descent into composite fields once a key prefix has matched.

use tracing::trace;

use crate::assign::{self, Outcome};
use crate::coerce;
use crate::error::AssignError;
use crate::shape::{FieldDef, Mapping, Place, Sequence};
use crate::types::{DecodeOptions, Kind};

/// Consume `leftover` segments inside the matched `field`.
pub fn descend(
    field: &FieldDef,
    place: Place<'_>,
    leftover: &[&str],
    raw: &str,
    options: &DecodeOptions,
) -> Result<Outcome, AssignError> {
    match place {
        Place::Record(record) => assign::assign(record, leftover, raw, options),
        Place::Pointer(pointer) => {
            let was_present = pointer.is_present();
            match pointer.get_or_alloc() {
                Some(Place::Record(record)) => {
                    if !was_present {
                        trace!(field = field.name, "allocated pointee");
                    }
                    assign::assign(record, leftover, raw, options)
                }
                Some(other) => Err(cannot_descend(field, other.kind(), leftover)),
                None => Err(inaccessible(field)),
            }
        }
        Place::Map(map) => insert_entry(map, &leftover.join("_"), raw),
        Place::Sequence(seq) => index_sequence(field, seq, leftover, raw, options),
        other => Err(cannot_descend(field, other.kind(), leftover)),
    }
}

/// Store `raw` under the un-normalized `key`. Dynamic values take the raw
/// string; everything else is coerced.
fn insert_entry(map: &mut dyn Mapping, key: &str, raw: &str) -> Result<Outcome, AssignError> {
    trace!(key, key_type = map.key_type(), "inserting map entry");
    map.insert_with(key, &mut |place| match place {
        Place::Dynamic(value) => {
            value.set_raw(raw);
            Ok(())
        }
        other => coerce::coerce_into(other, raw),
    })?;
    Ok(Outcome::Assigned)
}

fn index_sequence(
    field: &FieldDef,
    seq: &mut dyn Sequence,
    leftover: &[&str],
    raw: &str,
    options: &DecodeOptions,
) -> Result<Outcome, AssignError> {
    let (index_raw, rest) = match leftover.split_first() {
        Some(split) => split,
        None => return Err(cannot_descend(field, Kind::Sequence, leftover)),
    };
    let index: usize = index_raw.parse().map_err(|_| AssignError::SequenceIndex {
        field: field.name.to_string(),
        index: index_raw.to_string(),
    })?;
    if let Some(limit) = options.max_sequence_len
        && index >= limit
    {
        return Err(AssignError::SequenceLimit {
            field: field.name.to_string(),
            index,
            limit,
        });
    }

    if index >= seq.len() {
        let capacity = || AssignError::SequenceCapacity {
            field: field.name.to_string(),
            index,
        };
        let len = index.checked_add(1).ok_or_else(capacity)?;
        trace!(field = field.name, from = seq.len(), to = len, "growing sequence");
        seq.try_grow(len).map_err(|_| capacity())?;
    }
    let element = seq.element(index).ok_or_else(|| AssignError::SequenceIndex {
        field: field.name.to_string(),
        index: index_raw.to_string(),
    })?;

    if rest.is_empty() {
        coerce::coerce_into(element, raw)?;
        return Ok(Outcome::Assigned);
    }

    match element {
        Place::Record(record) => assign::assign(record, rest, raw, options),
        Place::Pointer(pointer) => match pointer.get_or_alloc() {
            Some(Place::Record(record)) => assign::assign(record, rest, raw, options),
            Some(other) => Err(cannot_descend(field, other.kind(), rest)),
            None => Err(inaccessible(field)),
        },
        other => Err(cannot_descend(field, other.kind(), rest)),
    }
}

fn cannot_descend(field: &FieldDef, kind: Kind, leftover: &[&str]) -> AssignError {
    AssignError::CannotDescend {
        field: field.name.to_string(),
        kind,
        leftover: leftover.iter().map(|s| s.to_string()).collect(),
    }
}

fn inaccessible(field: &FieldDef) -> AssignError {
    AssignError::Inaccessible {
        target: format!("field {:?} behind a shared pointer", field.name),
    }
}
