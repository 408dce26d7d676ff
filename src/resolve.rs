//! Field resolution: which declared field a key prefix addresses.
//!
//! Field names, type names and key prefixes are compared after
//! [`normalize`], so `DB_HOST`, `dbhost` and `Db_Host` all address a field
//! named `db_host` (or a field of type `DbHost`).

use crate::shape::FieldDef;

/// Lower-case `s` and strip every `_`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase().replace('_', "")
}

/// Find the field a normalized `candidate` addresses.
///
/// Fields are visited in declaration order and the first whose name or
/// declared type name matches wins, so an earlier field matched by type beats
/// a later field matched by name. Unnamed types (`Option<T>`, `Vec<T>`, maps)
/// never match by type.
pub fn find_field<'f>(fields: &'f [FieldDef], candidate: &str) -> Option<&'f FieldDef> {
    fields.iter().find(|field| {
        normalize(field.name) == candidate
            || field
                .type_name
                .is_some_and(|type_name| normalize(type_name) == candidate)
    })
}
