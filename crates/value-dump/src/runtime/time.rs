// crates/value-dump/src/runtime/time.rs
// ============================================================================
// Module: Time Classifier
// Description: Recognition and textual rendering of time-like values.
// Purpose: Let the sorter and renderers treat time values uniformly.
// Dependencies: time
// ============================================================================

//! ## Overview
//! A value is time-like when it is a struct whose type is the canonical time
//! type or structurally convertible to it, or a pointer chain whose static
//! pointee type is. Pointers are only followed when their declared pointee
//! type leads to a time type, so classification never inspects unrelated
//! data. Nil pointers to time types classify with no instant and order first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::model::types::TimeKind;
use crate::model::types::Type;
use crate::model::value::Data;
use crate::model::value::Value;

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Time-like view of a value used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeView {
    /// Pointer indirections above the time struct.
    pub(crate) depth: usize,
    /// Canonical instant; `None` for a nil pointer.
    pub(crate) instant: Option<OffsetDateTime>,
}

impl TimeView {
    /// Orders nil first, then shallower chains, then earlier instants.
    pub(crate) fn compare(&self, other: &Self) -> Ordering {
        self.instant
            .is_some()
            .cmp(&other.instant.is_some())
            .then(self.depth.cmp(&other.depth))
            .then(self.instant.cmp(&other.instant))
    }
}

/// Returns the pointer depth above a time type, following declared pointees.
fn time_depth(ty: &Type) -> Option<usize> {
    let mut depth = 0;
    let mut current = ty;
    while let Some(elem) = current.elem() {
        depth += 1;
        current = elem;
    }
    current.time_kind().map(|_| depth)
}

/// Classifies `value` as time-like, or returns `None`.
pub(crate) fn classify(value: &Value) -> Option<TimeView> {
    let expected = time_depth(value.ty())?;
    let mut current = value.clone();
    for depth in 0 ..= expected {
        let next = match current.data() {
            Data::Struct(data) if current.ty().time_kind().is_some() => {
                return data.instant.map(|instant| TimeView {
                    depth,
                    instant: Some(instant),
                });
            }
            Data::Pointer(None) => {
                return Some(TimeView {
                    depth,
                    instant: None,
                });
            }
            Data::Pointer(Some(slot)) => slot.get(),
            _ => return None,
        };
        current = next;
    }
    None
}

/// Returns true for a populated value of the canonical time type.
pub(crate) fn is_genuine_time(value: &Value) -> bool {
    value.ty().time_kind() == Some(TimeKind::Genuine) && value.instant().is_some()
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders an instant as `2009-11-10 23:00:00.5 +0000 UTC`.
///
/// Fractional seconds drop trailing zeros. Non-zero offsets repeat the
/// numeric offset in place of a zone abbreviation.
pub(crate) fn time_text(instant: OffsetDateTime) -> String {
    let date_time = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let mut text = instant.format(date_time).unwrap_or_default();
    let nanos = instant.nanosecond();
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    let offset = instant.offset();
    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    let numeric = format!("{sign}{:02}{:02}", hours.unsigned_abs(), minutes.unsigned_abs());
    let zone = if offset.is_utc() { "UTC" } else { numeric.as_str() };
    format!("{text} {numeric} {zone}")
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use time::macros::datetime;

    use super::*;

    #[test]
    fn renders_utc_and_offsets() {
        assert_eq!(time_text(datetime!(2009-11-10 23:00:00 UTC)), "2009-11-10 23:00:00 +0000 UTC");
        assert_eq!(
            time_text(datetime!(2024-01-02 03:04:05.25 -7:30)),
            "2024-01-02 03:04:05.25 -0730 -0730"
        );
    }

    #[test]
    fn classifies_direct_pointer_and_convertible() {
        let instant = datetime!(2020-01-01 00:00:00 UTC);
        let direct = Value::time(instant);
        let pointer = Value::pointer_to(direct.clone());
        let convertible = Value::time_like(Type::named("pkg.Stamp"), instant);
        assert_eq!(classify(&direct).map(|view| view.depth), Some(0));
        assert_eq!(classify(&pointer).map(|view| view.depth), Some(1));
        assert_eq!(classify(&convertible).map(|view| view.instant), Some(Some(instant)));
        assert!(is_genuine_time(&direct));
        assert!(!is_genuine_time(&convertible));
    }

    #[test]
    fn nil_time_pointer_orders_first() {
        let nil = classify(&Value::nil_pointer(&Type::time())).unwrap();
        let set = classify(&Value::time(datetime!(1970-01-01 00:00:00 UTC))).unwrap();
        assert_eq!(nil.instant, None);
        assert_eq!(nil.compare(&set), Ordering::Less);
    }

    #[test]
    fn non_time_values_are_not_classified() {
        assert!(classify(&Value::int(3)).is_none());
        assert!(classify(&Value::pointer_to(Value::string("x"))).is_none());
    }
}
