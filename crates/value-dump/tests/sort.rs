// crates/value-dump/tests/sort.rs
// ============================================================================
// Module: Key Ordering Tests
// Description: Checks the deterministic ordering used for map keys.
// Purpose: Validate per-class ordering and stability on mixed inputs.
// ============================================================================

//! Ordering tests for [`value_dump::sort_values`], including property checks.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use time::Duration;
use time::macros::datetime;
use value_dump::Config;
use value_dump::ConfigOverrides;
use value_dump::Type;
use value_dump::Value;

fn sorted(mut values: Vec<Value>) -> Vec<Value> {
    value_dump::sort_values(&mut values, &Config::default());
    values
}

#[test]
fn booleans_sort_false_first() {
    let values = sorted(vec![Value::bool(true), Value::bool(false), Value::bool(false)]);
    let flags: Vec<bool> = values.iter().filter_map(Value::as_bool).collect();
    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn strings_sort_lexically() {
    let values = sorted(vec![Value::string("b"), Value::string("a"), Value::string("c")]);
    let texts: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn times_sort_chronologically() {
    let base = datetime!(2020-01-01 00:00:00 UTC);
    let values = sorted(vec![
        Value::time(base + Duration::hours(2)),
        Value::time(base),
        Value::time(base + Duration::hours(1)),
    ]);
    let instants: Vec<_> = values.iter().filter_map(Value::instant).collect();
    assert_eq!(instants, vec![base, base + Duration::hours(1), base + Duration::hours(2)]);
}

#[test]
fn interface_wrapped_keys_sort_by_content() {
    let values = sorted(vec![
        Value::interface(Value::int(3)),
        Value::interface(Value::int(1)),
        Value::interface(Value::int(2)),
    ]);
    let numbers: Vec<i64> =
        values.iter().filter_map(|value| value.elem().and_then(Value::as_i64)).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn unordered_keys_keep_their_position_without_spew_keys() {
    let first = Value::structure(Type::named("main.K"), vec![("n", Value::int(2))]);
    let second = Value::structure(Type::named("main.K"), vec![("n", Value::int(1))]);
    let values = sorted(vec![first, second]);
    assert_eq!(values[0].field("n").and_then(Value::as_i64), Some(2));

    let config = Config::merged(&ConfigOverrides {
        spew_keys: Some(true),
        ..ConfigOverrides::default()
    });
    let mut values = values;
    value_dump::sort_values(&mut values, &config);
    assert_eq!(values[0].field("n").and_then(Value::as_i64), Some(1));
}

#[test]
fn time_keyed_map_dumps_in_order() {
    let base = datetime!(2020-01-01 00:00:00 UTC);
    let map = Value::map(&Type::time(), &Type::int());
    map.insert(Value::time(base + Duration::days(1)), Value::int(2));
    map.insert(Value::time(base), Value::int(1));
    let config = Config::merged(&ConfigOverrides {
        sort_keys: Some(true),
        ..ConfigOverrides::default()
    });
    let out = config.sdump(&[map]);
    let first = out.find("2020-01-01").unwrap();
    let second = out.find("2020-01-02").unwrap();
    assert!(first < second, "{out}");
}

proptest! {
    #[test]
    fn integers_sort_like_std(mut numbers in prop::collection::vec(any::<i64>(), 0 .. 32)) {
        let values = sorted(numbers.iter().copied().map(Value::int64).collect());
        let actual: Vec<i64> = values.iter().filter_map(Value::as_i64).collect();
        numbers.sort_unstable();
        prop_assert_eq!(actual, numbers);
    }

    #[test]
    fn strings_sort_like_std(mut texts in prop::collection::vec("[a-z]{0,5}", 0 .. 16)) {
        let values = sorted(texts.iter().cloned().map(Value::string).collect());
        let actual: Vec<String> =
            values.iter().filter_map(Value::as_str).map(str::to_string).collect();
        texts.sort();
        prop_assert_eq!(actual, texts);
    }

    #[test]
    fn integers_stay_ordered_among_nearby_floats(
        picks in prop::collection::vec((any::<bool>(), -64_i64 .. 64), 0 .. 48)
    ) {
        let base = 1_i64 << 53;
        let values: Vec<Value> = picks
            .iter()
            .map(|(float, offset)| {
                let number = base + offset;
                if *float { Value::float64(number as f64) } else { Value::int64(number) }
            })
            .collect();
        let values = sorted(values);
        let ints: Vec<i64> = values.iter().filter_map(Value::as_i64).collect();
        prop_assert!(ints.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", ints);
        let floats: Vec<f64> = values.iter().filter_map(Value::as_f64).collect();
        prop_assert!(floats.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", floats);
    }

    #[test]
    fn mixed_sorting_is_idempotent(
        picks in prop::collection::vec((any::<bool>(), any::<i16>()), 0 .. 16)
    ) {
        let values: Vec<Value> = picks
            .iter()
            .map(|(text, number)| {
                if *text { Value::string(number.to_string()) } else { Value::int16(*number) }
            })
            .collect();
        let once = sorted(values);
        let twice = sorted(once.clone());
        prop_assert_eq!(format!("{once:?}"), format!("{twice:?}"));
    }
}
