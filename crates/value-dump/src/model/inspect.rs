// crates/value-dump/src/model/inspect.rs
// ============================================================================
// Module: Native Value Conversion
// Description: Conversion of native Rust data into dynamic values.
// Purpose: Let callers dump ordinary Rust data without building values by hand.
// Dependencies: crate::model::{types, value}, time
// ============================================================================

//! ## Overview
//! [`Inspect`] maps native Rust types onto the dynamic model using the
//! conventional type names (`int64`, `[]string`, `map[string]int`, ...).
//! `Option<T>` maps onto a pointer so absent values render as `<nil>`.
//! Hash maps keep their iteration order; enable key sorting for stable output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

use time::OffsetDateTime;

use crate::model::types::Type;
use crate::model::value::Value;

// ============================================================================
// SECTION: Inspect Trait
// ============================================================================

/// Converts native data into a dynamic [`Value`].
pub trait Inspect {
    /// Returns the static type of converted values.
    fn value_type() -> Type
    where
        Self: Sized;

    /// Converts the data into a dynamic value.
    fn inspect(&self) -> Value;
}

/// Implements [`Inspect`] for a scalar through a value constructor.
macro_rules! inspect_scalar {
    ($($rust:ty => $ty:ident, $ctor:expr;)*) => {
        $(
            impl Inspect for $rust {
                fn value_type() -> Type {
                    Type::$ty()
                }

                fn inspect(&self) -> Value {
                    ($ctor)(*self)
                }
            }
        )*
    };
}

inspect_scalar! {
    bool => bool, Value::bool;
    i8 => int8, Value::int8;
    i16 => int16, Value::int16;
    i32 => int32, Value::int32;
    i64 => int64, Value::int64;
    u8 => uint8, Value::uint8;
    u16 => uint16, Value::uint16;
    u32 => uint32, Value::uint32;
    u64 => uint64, Value::uint64;
    f32 => float32, Value::float32;
    f64 => float64, Value::float64;
    isize => int, |value: isize| Value::int(i64::try_from(value).unwrap_or(i64::MAX));
    usize => uint, |value: usize| Value::uint(u64::try_from(value).unwrap_or(u64::MAX));
    char => int32, |value: char| Value::int32(i32::try_from(u32::from(value)).unwrap_or(i32::MAX));
}

impl Inspect for String {
    fn value_type() -> Type {
        Type::string()
    }

    fn inspect(&self) -> Value {
        Value::string(self.as_str())
    }
}

impl Inspect for &str {
    fn value_type() -> Type {
        Type::string()
    }

    fn inspect(&self) -> Value {
        Value::string(*self)
    }
}

impl Inspect for OffsetDateTime {
    fn value_type() -> Type {
        Type::time()
    }

    fn inspect(&self) -> Value {
        Value::time(*self)
    }
}

// ============================================================================
// SECTION: Containers
// ============================================================================

impl<T: Inspect> Inspect for Vec<T> {
    fn value_type() -> Type {
        Type::slice_of(&T::value_type())
    }

    fn inspect(&self) -> Value {
        Value::slice(&T::value_type(), self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn value_type() -> Type {
        Type::array_of(&T::value_type(), N)
    }

    fn inspect(&self) -> Value {
        Value::array(&T::value_type(), self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn value_type() -> Type {
        Type::pointer_to(&T::value_type())
    }

    fn inspect(&self) -> Value {
        self.as_ref().map_or_else(
            || Value::nil_pointer(&T::value_type()),
            |inner| Value::pointer_to(inner.inspect()),
        )
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn value_type() -> Type {
        Type::map_of(&K::value_type(), &V::value_type())
    }

    fn inspect(&self) -> Value {
        let entries = self.iter().map(|(key, value)| (key.inspect(), value.inspect())).collect();
        Value::map_from(&K::value_type(), &V::value_type(), entries)
    }
}

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn value_type() -> Type {
        Type::map_of(&K::value_type(), &V::value_type())
    }

    fn inspect(&self) -> Value {
        let entries = self.iter().map(|(key, value)| (key.inspect(), value.inspect())).collect();
        Value::map_from(&K::value_type(), &V::value_type(), entries)
    }
}
