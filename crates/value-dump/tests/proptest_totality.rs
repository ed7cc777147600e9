// crates/value-dump/tests/proptest_totality.rs
// ============================================================================
// Module: Rendering Totality Property-Based Tests
// Description: Renders generated value graphs under every policy.
// Purpose: Ensure rendering terminates, never panics, and is repeatable.
// ============================================================================

//! Property-based tests for rendering totality over arbitrary graphs.
//!
//! Generated recipes are plain data; graphs (including cycles) are built on
//! a worker thread so a hang is reported as a timeout instead of stalling
//! the suite.

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

use std::panic;
use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::thread;
use std::time::Duration;

use proptest::prelude::*;
use time::OffsetDateTime;
use value_dump::Config;
use value_dump::ConfigOverrides;
use value_dump::Receiver;
use value_dump::Slot;
use value_dump::Type;
use value_dump::Value;

// ============================================================================
// SECTION: Recipes
// ============================================================================

#[derive(Debug, Clone)]
enum Recipe {
    Int(i64),
    Byte(u8),
    Float(f64),
    Text(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Time(i64),
    NilSlice,
    NilMap,
    NilPointer,
    NilInterface,
    Invalid,
    SelfPointer,
    SelfMap,
    Slice(Vec<Self>),
    Array(Vec<Self>),
    Map(Vec<(Self, Self)>),
    Struct(Vec<Self>),
    Pointer(Box<Self>),
    Interface(Box<Self>),
    Panicking(Box<Self>),
    Rendered(Box<Self>),
}

fn build(recipe: &Recipe) -> Value {
    match recipe {
        Recipe::Int(value) => Value::int(*value),
        Recipe::Byte(value) => Value::uint8(*value),
        Recipe::Float(value) => Value::float64(*value),
        Recipe::Text(value) => Value::string(value.as_str()),
        Recipe::Bool(value) => Value::bool(*value),
        Recipe::Bytes(bytes) => Value::bytes(bytes.clone()),
        Recipe::Time(seconds) => Value::time(
            OffsetDateTime::from_unix_timestamp(*seconds).unwrap_or(OffsetDateTime::UNIX_EPOCH),
        ),
        Recipe::NilSlice => Value::nil_slice(&Type::int()),
        Recipe::NilMap => Value::nil_map(&Type::string(), &Type::int()),
        Recipe::NilPointer => Value::nil_pointer(&Type::int()),
        Recipe::NilInterface => Value::nil_interface(),
        Recipe::Invalid => Value::invalid(),
        Recipe::SelfPointer => {
            let slot = Slot::new(Value::nil_interface());
            let pointer = Value::pointer_typed(Type::pointer_to(&Type::interface()), &slot);
            slot.set(Value::interface(pointer.clone()));
            pointer
        }
        Recipe::SelfMap => {
            let map = Value::map(&Type::string(), &Type::interface());
            map.insert(Value::string("self"), Value::interface(map.clone()));
            map
        }
        Recipe::Slice(items) => Value::slice(&Type::interface(), boxed(items)),
        Recipe::Array(items) => Value::array(&Type::interface(), boxed(items)),
        Recipe::Map(entries) => {
            let map = Value::map(&Type::interface(), &Type::interface());
            for (key, value) in entries {
                map.insert(Value::interface(build(key)), Value::interface(build(value)));
            }
            map
        }
        Recipe::Struct(fields) => Value::structure(
            Type::named("fuzz.Record"),
            fields.iter().enumerate().map(|(index, field)| (format!("F{index}"), build(field))).collect(),
        ),
        Recipe::Pointer(inner) => Value::pointer_to(build(inner)),
        Recipe::Interface(inner) => Value::interface(build(inner)),
        Recipe::Panicking(inner) => build(inner)
            .with_type(Type::named("fuzz.Bomb").with_text(Receiver::Value, |_| panic!("fuzz panic"))),
        Recipe::Rendered(inner) => build(inner)
            .with_type(Type::named("fuzz.Named").with_text(Receiver::Pointer, |_| "named".to_string())),
    }
}

fn boxed(items: &[Recipe]) -> Vec<Value> {
    items.iter().map(|item| Value::interface(build(item))).collect()
}

fn recipe_strategy() -> impl Strategy<Value = Recipe> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Recipe::Int),
        any::<u8>().prop_map(Recipe::Byte),
        any::<f64>().prop_map(Recipe::Float),
        "[a-z\"\\\\]{0,6}".prop_map(Recipe::Text),
        any::<bool>().prop_map(Recipe::Bool),
        prop::collection::vec(any::<u8>(), 0 .. 40).prop_map(Recipe::Bytes),
        (-1_000_000_000_i64 .. 1_000_000_000).prop_map(Recipe::Time),
        prop_oneof![
            Just(Recipe::NilSlice),
            Just(Recipe::NilMap),
            Just(Recipe::NilPointer),
            Just(Recipe::NilInterface),
            Just(Recipe::Invalid),
        ],
        Just(Recipe::SelfPointer),
        Just(Recipe::SelfMap),
    ];

    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Recipe::Slice),
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Recipe::Array),
            prop::collection::vec((inner.clone(), inner.clone()), 0 .. 4).prop_map(Recipe::Map),
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Recipe::Struct),
            inner.clone().prop_map(|recipe| Recipe::Pointer(Box::new(recipe))),
            inner.clone().prop_map(|recipe| Recipe::Interface(Box::new(recipe))),
            inner.clone().prop_map(|recipe| Recipe::Panicking(Box::new(recipe))),
            inner.prop_map(|recipe| Recipe::Rendered(Box::new(recipe))),
        ]
    })
}

// ============================================================================
// SECTION: Harness
// ============================================================================

fn policies() -> Vec<Config> {
    let variants = [
        ConfigOverrides::default(),
        ConfigOverrides {
            sort_keys: Some(true),
            spew_keys: Some(true),
            ..ConfigOverrides::default()
        },
        ConfigOverrides {
            disable_methods: Some(true),
            enable_time_stringer: Some(true),
            ..ConfigOverrides::default()
        },
        ConfigOverrides {
            continue_on_method: Some(true),
            disable_pointer_methods: Some(true),
            ..ConfigOverrides::default()
        },
        ConfigOverrides {
            max_depth: Some(2),
            disable_pointer_addresses: Some(true),
            disable_capacities: Some(true),
            ..ConfigOverrides::default()
        },
    ];
    variants.iter().map(Config::merged).collect()
}

/// Renders the graph under every policy; returns false on nondeterminism.
fn exercise(recipe: &Recipe) -> bool {
    let value = build(recipe);
    policies().iter().all(|config| {
        let dump = config.sdump(&[value.clone()]);
        let formatter = config.formatter(&value);
        let inline = [
            format!("{formatter}"),
            format!("{formatter:+}"),
            format!("{formatter:#}"),
            format!("{formatter:+#}"),
            format!("{formatter:>12}"),
        ];
        let _ = config.sprint(&[value.clone(), Value::string("x"), value.clone()]);
        dump.ends_with('\n')
            && dump == config.sdump(&[value.clone()])
            && inline[0] == config.formatter(&value).to_string()
    })
}

/// Runs [`exercise`] on a worker thread with a wall-clock budget.
fn render_within_budget(recipe: Recipe) -> Result<(), String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let outcome = panic::catch_unwind(|| exercise(&recipe));
        let _ = sender.send(outcome);
    });
    match receiver.recv_timeout(Duration::from_secs(1)) {
        Ok(Ok(true)) => Ok(()),
        Ok(Ok(false)) => Err("rendering was not repeatable".to_string()),
        Ok(Err(_)) => Err("panic escaped rendering".to_string()),
        Err(RecvTimeoutError::Timeout) => Err("rendering did not finish within 1s".to_string()),
        Err(RecvTimeoutError::Disconnected) => Err("worker thread vanished".to_string()),
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rendering_is_total(recipe in recipe_strategy()) {
        let outcome = render_within_budget(recipe);
        prop_assert!(outcome.is_ok(), "{:?}", outcome);
    }
}

#[test]
fn cyclic_graphs_finish_within_budget() {
    let nested = Recipe::Map(vec![
        (Recipe::Text("p".to_string()), Recipe::Pointer(Box::new(Recipe::SelfPointer))),
        (Recipe::Text("m".to_string()), Recipe::Slice(vec![Recipe::SelfMap, Recipe::SelfMap])),
    ]);
    assert_eq!(render_within_budget(nested), Ok(()));
}
