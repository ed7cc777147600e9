// crates/value-dump/tests/dump.rs
// ============================================================================
// Module: Dump Rendering Tests
// Description: End-to-end checks of the multi-line dump layout.
// Purpose: Pin the dump output for scalars, composites, pointers, and cycles.
// ============================================================================

//! Integration tests for the verbose dump renderer.

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

use time::macros::datetime;
use value_dump::Config;
use value_dump::ConfigOverrides;
use value_dump::Receiver;
use value_dump::Slot;
use value_dump::Type;
use value_dump::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn no_addresses() -> Config {
    Config::merged(&ConfigOverrides {
        disable_pointer_addresses: Some(true),
        ..ConfigOverrides::default()
    })
}

fn pair() -> Value {
    Value::structure(
        Type::named("main.Pair"),
        vec![("A", Value::int8(127)), ("B", Value::uint8(255))],
    )
}

fn self_pointer() -> (Slot, Value) {
    let slot = Slot::new(Value::nil_interface());
    let pointer = Value::pointer_typed(Type::pointer_to(&Type::interface()), &slot);
    slot.set(Value::interface(pointer.clone()));
    (slot, pointer)
}

// ============================================================================
// SECTION: Scalars
// ============================================================================

#[test]
fn scalar_dump_has_type_prefix() {
    assert_eq!(value_dump::sdump(&[Value::int8(127)]), "(int8) 127\n");
    assert_eq!(value_dump::sdump(&[Value::bool(true)]), "(bool) true\n");
    assert_eq!(value_dump::sdump(&[Value::string("hi")]), "(string) (len=2) \"hi\"\n");
}

#[test]
fn each_value_gets_its_own_line() {
    let out = value_dump::sdump(&[Value::int(1), Value::uint16(2)]);
    assert_eq!(out, "(int) 1\n(uint16) 2\n");
}

#[test]
fn nil_and_invalid_values() {
    assert_eq!(value_dump::sdump(&[Value::nil_slice(&Type::int())]), "([]int) <nil>\n");
    assert_eq!(value_dump::sdump(&[Value::nil_interface()]), "(interface {}) <nil>\n");
    assert_eq!(value_dump::sdump(&[Value::invalid()]), "<invalid>\n");
    assert_eq!(
        value_dump::sdump(&[Value::channel(&Type::int(), 0, 0, 0)]),
        "(chan int) <nil>\n"
    );
}

#[test]
fn channel_shows_length_and_capacity() {
    let out = value_dump::sdump(&[Value::channel(&Type::int(), 0xc000, 1, 4)]);
    assert_eq!(out, "(chan int) (len=1 cap=4) 0xc000\n");
}

#[test]
fn nested_interfaces_render_their_concrete_value() {
    let nested = Value::interface(Value::interface(Value::int(7)));
    assert_eq!(value_dump::sdump(&[nested.clone()]), "(int) 7\n");
    let slice = Value::slice(&Type::interface(), vec![nested.clone()]);
    assert_eq!(value_dump::sdump(&[slice]), "([]interface {}) (len=1 cap=1) {\n (int) 7\n}\n");
    assert_eq!(no_addresses().sdump(&[Value::pointer_to(nested)]), "(*int)(7)\n");
}

#[test]
fn fdump_writes_the_same_text() {
    let mut sink = Vec::new();
    value_dump::fdump(&mut sink, &[Value::int8(127)]).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), "(int8) 127\n");
}

// ============================================================================
// SECTION: Composites
// ============================================================================

#[test]
fn struct_fields_render_one_per_line() {
    assert_eq!(
        value_dump::sdump(&[pair()]),
        "(main.Pair) {\n A: (int8) 127,\n B: (uint8) 255\n}\n"
    );
}

#[test]
fn sorted_map_renders_keys_in_order() {
    let map = Value::map(&Type::string(), &Type::int());
    map.insert(Value::string("two"), Value::int(2));
    map.insert(Value::string("one"), Value::int(1));
    let config = Config::merged(&ConfigOverrides {
        sort_keys: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(
        config.sdump(&[map]),
        "(map[string]int) (len=2) {\n (string) (len=3) \"one\": (int) 1,\n (string) (len=3) \
         \"two\": (int) 2\n}\n"
    );
}

#[test]
fn capacities_can_be_hidden() {
    let slice = Value::slice_with_cap(&Type::int(), vec![Value::int(1), Value::int(2)], 10);
    assert_eq!(
        value_dump::sdump(&[slice.clone()]),
        "([]int) (len=2 cap=10) {\n (int) 1,\n (int) 2\n}\n"
    );
    let config = Config::merged(&ConfigOverrides {
        disable_capacities: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.sdump(&[slice]), "([]int) (len=2) {\n (int) 1,\n (int) 2\n}\n");
}

#[test]
fn byte_slices_render_as_hex_dump() {
    let out = value_dump::sdump(&[Value::bytes(b"hello".to_vec())]);
    let expected = format!(
        "([]uint8) (len=5 cap=5) {{\n 00000000  68 65 6c 6c 6f {}|hello|\n}}\n",
        " ".repeat(35)
    );
    assert_eq!(out, expected);
}

#[test]
fn custom_indent_is_repeated_per_level() {
    let config = Config::merged(&ConfigOverrides {
        indent: Some("\t".into()),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.sdump(&[pair()]), "(main.Pair) {\n\tA: (int8) 127,\n\tB: (uint8) 255\n}\n");
}

#[test]
fn depth_limit_replaces_nested_body() {
    let inner = Value::structure(Type::named("main.Inner"), vec![("v", Value::int(1))]);
    let outer = Value::structure(Type::named("main.Outer"), vec![("inner", inner)]);
    let config = Config::merged(&ConfigOverrides {
        max_depth: Some(1),
        ..ConfigOverrides::default()
    });
    assert_eq!(
        config.sdump(&[outer]),
        "(main.Outer) {\n inner: (main.Inner) {\n  <max depth reached>\n }\n}\n"
    );
}

// ============================================================================
// SECTION: Pointers
// ============================================================================

#[test]
fn pointer_prints_address_chain_and_pointee() {
    let slot = Slot::new(Value::int(5));
    let pointer = Value::pointer(&slot);
    assert_eq!(
        value_dump::sdump(&[pointer.clone()]),
        format!("(*int)({:#x})(5)\n", slot.address())
    );
    assert_eq!(no_addresses().sdump(&[pointer]), "(*int)(5)\n");
}

#[test]
fn nested_pointers_count_indirections() {
    let pointer = Value::pointer_to(Value::pointer_to(Value::string("x")));
    assert_eq!(no_addresses().sdump(&[pointer]), "(**string)((len=1) \"x\")\n");
}

#[test]
fn nil_pointer_prints_nil() {
    assert_eq!(value_dump::sdump(&[Value::nil_pointer(&Type::int())]), "(*int)(<nil>)\n");
}

#[test]
fn shared_pointer_in_siblings_is_not_a_cycle() {
    let shared = Value::pointer_to(Value::int(1));
    let value = Value::structure(
        Type::named("main.Two"),
        vec![("a", shared.clone()), ("b", shared)],
    );
    assert_eq!(no_addresses().sdump(&[value]), "(main.Two) {\n a: (*int)(1),\n b: (*int)(1)\n}\n");
}

#[test]
fn shared_map_in_siblings_is_not_a_cycle() {
    let map = Value::map(&Type::string(), &Type::int());
    map.insert(Value::string("k"), Value::int(1));
    let slice = Value::slice(&Type::map_of(&Type::string(), &Type::int()), vec![map.clone(), map]);
    let body = "(map[string]int) (len=1) {\n  (string) (len=1) \"k\": (int) 1\n }";
    let out = value_dump::sdump(&[slice]);
    assert_eq!(out, format!("([]map[string]int) (len=2 cap=2) {{\n {body},\n {body}\n}}\n"));
    assert!(!out.contains("<already shown>"), "{out}");
}

#[test]
fn self_referencing_pointer_terminates() {
    let (_slot, pointer) = self_pointer();
    assert_eq!(no_addresses().sdump(&[pointer]), "(**interface {})(<already shown>)\n");
}

#[test]
fn self_containing_map_terminates() {
    let map = Value::map(&Type::string(), &Type::interface());
    map.insert(Value::string("x"), Value::interface(map.clone()));
    assert_eq!(
        value_dump::sdump(&[map]),
        "(map[string]interface {}) (len=1) {\n (string) (len=1) \"x\": (map[string]interface {}) \
         (len=1) <already shown>\n}\n"
    );
}

// ============================================================================
// SECTION: Rendering Capabilities
// ============================================================================

fn greeter(receiver: Receiver) -> Value {
    let ty = Type::named("main.Greeter").with_text(receiver, |_| "hi".to_string());
    Value::structure(ty, vec![("n", Value::int(1))])
}

#[test]
fn text_capability_replaces_structure() {
    assert_eq!(value_dump::sdump(&[greeter(Receiver::Value)]), "(main.Greeter) hi\n");
}

#[test]
fn continue_on_method_keeps_structure() {
    let config = Config::merged(&ConfigOverrides {
        continue_on_method: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(
        config.sdump(&[greeter(Receiver::Value)]),
        "(main.Greeter) (hi) {\n n: (int) 1\n}\n"
    );
}

#[test]
fn disabled_methods_render_structure() {
    let config = Config::merged(&ConfigOverrides {
        disable_methods: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.sdump(&[greeter(Receiver::Value)]), "(main.Greeter) {\n n: (int) 1\n}\n");
}

#[test]
fn pointer_receiver_needs_an_addressable_value() {
    let value = greeter(Receiver::Pointer);
    assert_eq!(value_dump::sdump(&[value.clone()]), "(main.Greeter) {\n n: (int) 1\n}\n");
    let pointer = Value::pointer_to(value);
    assert_eq!(no_addresses().sdump(&[pointer.clone()]), "(*main.Greeter)(hi)\n");

    let config = no_addresses().with_overrides(&ConfigOverrides {
        disable_pointer_methods: Some(true),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.sdump(&[pointer]), "(*main.Greeter)({\n n: (int) 1\n})\n");
}

#[test]
fn error_capability_wins_over_text() {
    let ty = Type::named("main.Failure")
        .with_text(Receiver::Value, |_| "text".to_string())
        .with_error(Receiver::Value, |_| "boom".to_string());
    let value = Value::structure(ty, vec![("code", Value::int(3))]);
    assert_eq!(value_dump::sdump(&[value]), "(main.Failure) boom\n");
}

#[test]
fn panicking_capability_is_contained() {
    let ty = Type::named("main.Bomb").with_text(Receiver::Value, |_| panic!("test panic"));
    let value = Value::structure(ty, vec![("n", Value::int(1))]);
    let out = value_dump::sdump(&[value]);
    assert!(out.contains("(PANIC=test panic)"), "{out}");
    assert!(out.contains("n: (int) 1"), "{out}");
}

#[test]
fn time_values_use_their_text_form() {
    let value = Value::time(datetime!(2009-11-10 23:00:00 UTC));
    assert_eq!(value_dump::sdump(&[value]), "(time.Time) 2009-11-10 23:00:00 +0000 UTC\n");
}

// ============================================================================
// SECTION: Determinism
// ============================================================================

#[test]
fn repeated_dumps_are_identical() {
    let map = Value::map(&Type::interface(), &Type::interface());
    map.insert(Value::interface(Value::int(1)), Value::interface(pair()));
    map.insert(Value::interface(Value::string("b")), Value::interface(Value::int(2)));
    map.insert(Value::interface(Value::string("a")), Value::interface(map.clone()));
    let config = no_addresses().with_overrides(&ConfigOverrides {
        sort_keys: Some(true),
        ..ConfigOverrides::default()
    });
    let first = config.sdump(&[map.clone()]);
    assert_eq!(first, config.sdump(&[map]));
    assert!(first.find("\"a\"") < first.find("\"b\""), "{first}");
}
