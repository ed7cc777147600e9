// crates/value-dump/src/runtime/sort.rs
// ============================================================================
// Module: Sorter
// Description: Deterministic ordering of heterogeneous dynamic values.
// Purpose: Give map entries a stable order without unsafe probing.
// Dependencies: crate::{config, model, runtime::{format, methods, time}}
// ============================================================================

//! ## Overview
//! Every key is classified once into a sort key; the first applicable
//! rule wins:
//!
//! 1. booleans, false first
//! 2. integers, floats and complex numbers, numerically
//! 3. strings, byte-wise
//! 4. arrays, element-wise using rules 1 to 5
//! 5. time-like values: nil first, then shallower pointer chains, then instant
//! 6. text from a rendering capability, when methods are permitted
//! 7. the typed compact rendering, when `spew_keys` is set
//!
//! Anything else is unordered. Keys of different classes are incomparable and
//! never move relative to each other. Array elements are never dereferenced
//! unless their static type is a pointer to a time type. Capability hooks
//! run at most once per key and a panicking hook makes its key unordered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::mem;

use crate::config::Config;
use crate::model::value::Data;
use crate::model::value::Items;
use crate::model::value::Value;
use crate::runtime::format;
use crate::runtime::format::FormatFlags;
use crate::runtime::methods;
use crate::runtime::time::TimeView;
use crate::runtime::time::classify as classify_time;
use crate::runtime::walker::unpack;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// 2^127 as a float; the exclusive upper bound of `i128`.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

// ============================================================================
// SECTION: Sort Keys
// ============================================================================

/// Real part of a numeric key.
#[derive(Debug, Clone, Copy)]
enum Real {
    /// Exact integer.
    Int(i128),
    /// Floating point.
    Float(f64),
}

/// Precomputed ordering class of a value.
#[derive(Debug, Clone)]
enum SortKey {
    /// Rule 1.
    Bool(bool),
    /// Rule 2.
    Number {
        /// Real part.
        real: Real,
        /// Imaginary part; zero for non-complex kinds.
        imag: f64,
    },
    /// Rule 3.
    Text(String),
    /// Rule 4.
    Array(Vec<SortKey>),
    /// Rule 5.
    Time(TimeView),
    /// Rules 6 and 7.
    Rendered(String),
    /// No applicable rule.
    Unordered,
}

impl SortKey {
    /// Classifies a top-level key, falling back to rendered text.
    fn classify(value: &Value, config: &Config) -> Self {
        let value = unpack(value);
        let key = Self::structural(&value);
        if !matches!(key, Self::Unordered) {
            return key;
        }
        if let Some(text) = methods::render_text(config, &value) {
            return Self::Rendered(text);
        }
        if config.spew_keys {
            let plain = Config {
                sort_keys: false,
                ..config.clone()
            };
            return Self::Rendered(format::render(&plain, &value, FormatFlags::TYPED));
        }
        Self::Unordered
    }

    /// Classifies by rules 1 to 5 only.
    fn structural(value: &Value) -> Self {
        match value.data() {
            Data::Bool(value) => Self::Bool(*value),
            Data::Int(value, _) => Self::Number {
                real: Real::Int(i128::from(*value)),
                imag: 0.0,
            },
            Data::Uint(value, _) => Self::Number {
                real: Real::Int(i128::from(*value)),
                imag: 0.0,
            },
            Data::Float(value) => Self::Number {
                real: Real::Float(value.as_f64()),
                imag: 0.0,
            },
            Data::Complex(value) => {
                let (re, im) = value.parts();
                Self::Number {
                    real: Real::Float(re.as_f64()),
                    imag: im.as_f64(),
                }
            }
            Data::String(text) => Self::Text(text.to_string()),
            Data::Array(sequence) => Self::Array(match &sequence.items {
                Items::Values(values) => {
                    values.iter().map(|element| Self::structural(&unpack(element))).collect()
                }
                Items::Bytes(bytes) => bytes
                    .iter()
                    .map(|byte| Self::Number {
                        real: Real::Int(i128::from(*byte)),
                        imag: 0.0,
                    })
                    .collect(),
            }),
            _ => classify_time(value).map_or(Self::Unordered, Self::Time),
        }
    }

    /// Compares two keys; `None` when they are incomparable.
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => Some(left.cmp(right)),
            (
                Self::Number {
                    real: left_real,
                    imag: left_imag,
                },
                Self::Number {
                    real: right_real,
                    imag: right_imag,
                },
            ) => {
                let real = compare_real(*left_real, *right_real)?;
                Some(real.then(left_imag.partial_cmp(right_imag)?))
            }
            (Self::Text(left), Self::Text(right)) | (Self::Rendered(left), Self::Rendered(right)) => {
                Some(left.as_bytes().cmp(right.as_bytes()))
            }
            (Self::Array(left), Self::Array(right)) => {
                for (left, right) in left.iter().zip(right) {
                    match left.compare(right)? {
                        Ordering::Equal => {}
                        order => return Some(order),
                    }
                }
                Some(left.len().cmp(&right.len()))
            }
            (Self::Time(left), Self::Time(right)) => Some(left.compare(right)),
            _ => None,
        }
    }

    /// Returns true when `compare` is total over keys of this class.
    fn is_total(&self) -> bool {
        match self {
            Self::Bool(_) | Self::Text(_) | Self::Time(_) | Self::Rendered(_) => true,
            Self::Number {
                real,
                imag,
            } => {
                !imag.is_nan()
                    && match real {
                        Real::Int(_) => true,
                        Real::Float(value) => !value.is_nan(),
                    }
            }
            Self::Array(_) | Self::Unordered => false,
        }
    }
}

/// Compares real parts exactly, including integer against float.
fn compare_real(left: Real, right: Real) -> Option<Ordering> {
    match (left, right) {
        (Real::Int(left), Real::Int(right)) => Some(left.cmp(&right)),
        (Real::Float(left), Real::Float(right)) => left.partial_cmp(&right),
        (Real::Int(left), Real::Float(right)) => compare_int_float(left, right),
        (Real::Float(left), Real::Int(right)) => {
            compare_int_float(right, left).map(Ordering::reverse)
        }
    }
}

/// Compares an integer with a float without rounding either side.
#[allow(
    clippy::cast_possible_truncation,
    reason = "The truncated float is integral and inside the i128 range."
)]
fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I128_BOUND {
        return Some(Ordering::Less);
    }
    if float < -I128_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        order => Some(order),
    }
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

/// Returns the stable permutation that orders `keys`.
fn permutation(keys: &[SortKey]) -> Vec<usize> {
    let mut order: Vec<usize> = (0 .. keys.len()).collect();
    let homogeneous = keys.first().is_some_and(|first| {
        keys.iter().all(|key| key.is_total() && mem::discriminant(key) == mem::discriminant(first))
    });
    if homogeneous {
        order.sort_by(|left, right| {
            keys[*left].compare(&keys[*right]).unwrap_or(Ordering::Equal)
        });
        return order;
    }
    for index in 1 .. order.len() {
        let mut cursor = index;
        while cursor > 0
            && keys[order[cursor]].compare(&keys[order[cursor - 1]]) == Some(Ordering::Less)
        {
            order.swap(cursor, cursor - 1);
            cursor -= 1;
        }
    }
    order
}

/// Sorts `values` in place using the deterministic key ordering.
///
/// Values without an applicable rule keep their relative order.
pub fn sort_values(values: &mut [Value], config: &Config) {
    let keys: Vec<SortKey> = values.iter().map(|value| SortKey::classify(value, config)).collect();
    let sorted: Vec<Value> = permutation(&keys).into_iter().map(|index| values[index].clone()).collect();
    values.clone_from_slice(&sorted);
}

/// Sorts map entries in place by key.
pub(crate) fn sort_entries(entries: &mut [(Value, Value)], config: &Config) {
    let keys: Vec<SortKey> =
        entries.iter().map(|(key, _)| SortKey::classify(key, config)).collect();
    let sorted: Vec<(Value, Value)> =
        permutation(&keys).into_iter().map(|index| entries[index].clone()).collect();
    entries.clone_from_slice(&sorted);
}
