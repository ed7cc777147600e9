// crates/value-dump/tests/inspect.rs
// ============================================================================
// Module: Native Conversion Tests
// Description: Renders native Rust data through the Inspect conversions.
// Purpose: Confirm the conventional type names and nil mapping of Option.
// ============================================================================

//! Tests for [`value_dump::Inspect`].

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

use std::collections::BTreeMap;
use std::collections::HashMap;

use value_dump::Config;
use value_dump::ConfigOverrides;
use value_dump::Inspect;

#[test]
fn scalars_carry_sized_type_names() {
    assert_eq!(value_dump::sdump(&[42_i32.inspect()]), "(int32) 42\n");
    assert_eq!(value_dump::sdump(&[7_usize.inspect()]), "(uint) 7\n");
    assert_eq!(value_dump::sdump(&['a'.inspect()]), "(int32) 97\n");
    assert_eq!(value_dump::sdump(&[0.25_f32.inspect()]), "(float32) 0.25\n");
}

#[test]
fn vectors_and_arrays() {
    let words = vec!["a", "b"].inspect();
    assert_eq!(format!("{:#}", value_dump::format(&words)), "([]string)[a b]");
    assert_eq!(format!("{:#}", value_dump::format(&[1_u16, 1].inspect())), "([2]uint16)[1 1]");
}

#[test]
fn byte_vectors_dump_as_hex() {
    let out = value_dump::sdump(&[b"AB".to_vec().inspect()]);
    assert!(out.starts_with("([]uint8) (len=2 cap=2) {\n 00000000  41 42"), "{out}");
    assert!(out.ends_with("|AB|\n}\n"), "{out}");
}

#[test]
fn options_map_to_pointers() {
    let config = Config::merged(&ConfigOverrides {
        disable_pointer_addresses: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.sdump(&[Inspect::inspect(&None::<i64>)]), "(*int64)(<nil>)\n");
    assert_eq!(config.sdump(&[Inspect::inspect(&Some(3_i64))]), "(*int64)(3)\n");
}

#[test]
fn maps_convert_entries() {
    let ordered: BTreeMap<String, i32> =
        [("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect();
    assert_eq!(value_dump::format(&ordered.inspect()).to_string(), "map[a:1 b:2]");

    let hashed: HashMap<&str, u8> = [("y", 2), ("x", 1)].into_iter().collect();
    let config = Config::merged(&ConfigOverrides {
        sort_keys: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.formatter(&hashed.inspect()).to_string(), "map[x:1 y:2]");
    assert_eq!(
        <HashMap<&str, u8> as Inspect>::value_type().name(),
        "map[string]uint8"
    );
}
