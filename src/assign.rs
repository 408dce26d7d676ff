//! Path assignment: place one raw value at the location its key segments
//! address inside a record.
//!
//! For segments `[s1..sn]` the longest prefix is tried first: `s1.._sn`
//! joined with `_`, then `s1.._s(n-1)`, down to `s1`. The first field the
//! resolver returns for a prefix wins, and the remaining segments are handed
//! to the container logic (or, when none remain, the value is coerced into the
//! field). A key no prefix matches is ignored.

use tracing::trace;

use crate::coerce;
use crate::container;
use crate::error::AssignError;
use crate::resolve::{find_field, normalize};
use crate::shape::Record;
use crate::types::DecodeOptions;

/// What happened to a key that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Assigned,
    /// No field matched at some level; nothing past that level was written.
    Ignored,
}

pub fn assign(
    record: &mut dyn Record,
    segments: &[&str],
    raw: &str,
    options: &DecodeOptions,
) -> Result<Outcome, AssignError> {
    let fields = record.fields();
    let type_name = record.type_name();

    for prefix_len in (1..=segments.len()).rev() {
        let candidate = normalize(&segments[..prefix_len].join("_"));
        let Some(field) = find_field(fields, &candidate) else {
            continue;
        };
        let leftover = &segments[prefix_len..];
        trace!(
            record = type_name,
            field = field.name,
            kind = %field.kind,
            exported = field.exported,
            leftover = leftover.len(),
            "matched field"
        );

        let place = record
            .field_mut(field.name)
            .ok_or_else(|| AssignError::Inaccessible {
                target: format!("field {:?} of {type_name}", field.name),
            })?;
        if leftover.is_empty() {
            coerce::coerce_into(place, raw)?;
            return Ok(Outcome::Assigned);
        }
        return container::descend(field, place, leftover, raw, options);
    }

    Ok(Outcome::Ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::*;
    use crate::types::{Kind, ScalarKind};
    use std::time::Duration;

    fn apply(record: &mut dyn Record, key: &str, raw: &str) -> Result<Outcome, AssignError> {
        let segments: Vec<&str> = key.split('_').collect();
        assign(record, &segments, raw, &DecodeOptions::default())
    }

    #[test]
    fn top_level_scalar() {
        let mut config = AppConfig::default();
        assert_eq!(apply(&mut config, "PORT", "8080").unwrap(), Outcome::Assigned);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn key_spelling_is_normalized() {
        for key in ["DB_HOST", "dbhost", "Db_Host", "DBHOST"] {
            let mut config = AppConfig::default();
            apply(&mut config, key, "db.internal").unwrap();
            assert_eq!(config.db_host, "db.internal", "{key}");
        }
    }

    #[test]
    fn underscored_field_name_spans_segments() {
        let mut config = AppConfig::default();
        apply(&mut config, "READ_TIMEOUT", "1h30m").unwrap();
        assert_eq!(config.read_timeout, Duration::from_secs(90 * 60));
    }

    #[test]
    fn duration_garbage_is_a_coercion_failure() {
        let mut config = AppConfig::default();
        let err = apply(&mut config, "READ_TIMEOUT", "abc").unwrap_err();
        assert!(matches!(
            err,
            AssignError::Coerce(ref e) if e.kind == ScalarKind::Duration
        ));
    }

    #[test]
    fn nested_record() {
        let mut config = AppConfig::default();
        apply(&mut config, "DATABASE_POOL_SIZE", "20").unwrap();
        assert_eq!(config.database.pool_size, 20);
    }

    #[test]
    fn deep_path_allocates_optional_record() {
        let mut outer = Outer::default();
        assert!(outer.inner.is_none());
        apply(&mut outer, "INNER_PORT", "8080").unwrap();
        assert_eq!(outer.inner.as_ref().unwrap().port, 8080);
    }

    #[test]
    fn deep_path_through_three_levels() {
        let mut root = Root::default();
        apply(&mut root, "OUTER_INNER_PORT", "8080").unwrap();
        assert_eq!(root.outer.inner.unwrap().port, 8080);
    }

    #[test]
    fn type_name_addresses_field() {
        let mut config = AppConfig::default();
        apply(&mut config, "CACHE_SETTINGS_TTL", "30s").unwrap();
        assert_eq!(config.store.ttl, Duration::from_secs(30));
    }

    #[test]
    fn earlier_type_match_beats_later_name_match() {
        let mut preferred = Preferred::default();
        apply(&mut preferred, "CACHE_SETTINGS_TTL", "5s").unwrap();
        assert_eq!(preferred.primary.ttl, Duration::from_secs(5));
        assert_eq!(preferred.cache_settings, "");
    }

    #[test]
    fn numeric_scalars_by_key() {
        let mut config = AppConfig::default();
        apply(&mut config, "RATIO", "0.25").unwrap();
        apply(&mut config, "OFFSET", "-40").unwrap();
        apply(&mut config, "SIGNAL", "1.5-2i").unwrap();
        assert_eq!(config.ratio, 0.25);
        assert_eq!(config.offset, -40);
        assert_eq!(config.signal, num_complex::Complex::new(1.5, -2.0));
    }

    #[test]
    fn longest_prefix_wins() {
        let mut shadow = Shadow::default();
        apply(&mut shadow, "A_B_X", "long").unwrap();
        assert_eq!(shadow.a_b.x, "long");
        assert_eq!(shadow.a.b.x, "");
    }

    #[test]
    fn matched_prefix_is_never_revisited() {
        let mut shadow = Shadow::default();
        apply(&mut shadow, "A_B_Y", "long").unwrap();
        assert_eq!(shadow.a_b.y, "long");
        assert_eq!(shadow.a.b.y, "");
    }

    #[test]
    fn shorter_prefix_used_when_longer_misses() {
        let mut shadow = Shadow::default();
        apply(&mut shadow, "A_Z", "short").unwrap();
        assert_eq!(shadow.a.z, "short");
    }

    #[test]
    fn same_length_ties_go_to_first_declared() {
        let mut tie = Tie::default();
        apply(&mut tie, "HOST_NAME", "first").unwrap();
        assert_eq!(tie.host_name, "first");
        assert_eq!(tie.hostname, "");
    }

    #[test]
    fn unknown_key_is_ignored_and_leaves_record_unchanged() {
        let mut config = AppConfig::default();
        assert_eq!(apply(&mut config, "NOPE_NOT_HERE", "x").unwrap(), Outcome::Ignored);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn private_fields_are_writable() {
        let mut config = AppConfig::default();
        apply(&mut config, "API_TOKEN", "s3cret").unwrap();
        assert_eq!(config.api_token(), "s3cret");
        let def = config
            .fields()
            .iter()
            .find(|f| f.name == "api_token")
            .unwrap();
        assert!(!def.exported);
    }

    #[test]
    fn scalar_with_leftover_cannot_descend() {
        let mut config = AppConfig::default();
        let err = apply(&mut config, "DEBUG_EXTRA", "true").unwrap_err();
        match err {
            AssignError::CannotDescend {
                field,
                kind,
                leftover,
            } => {
                assert_eq!(field, "debug");
                assert_eq!(kind, Kind::Scalar(ScalarKind::Bool));
                assert_eq!(leftover, vec!["EXTRA".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn record_at_leaf_is_unsupported() {
        let mut config = AppConfig::default();
        let err = apply(&mut config, "DATABASE", "x").unwrap_err();
        assert!(matches!(
            err,
            AssignError::UnsupportedKind {
                kind: Kind::Record,
                ..
            }
        ));
    }
}
