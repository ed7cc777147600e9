// crates/value-dump/src/lib.rs
// ============================================================================
// Module: Value Dump Library
// Description: Public API surface for the value dumper and formatter.
// Purpose: Expose the value model, configuration, and rendering entry points.
// Dependencies: crate::{config, model, runtime}
// ============================================================================

//! ## Overview
//! `value-dump` renders arbitrary dynamic value graphs either as a verbose,
//! indented, type-annotated dump or as a compact single-line format. Both
//! policies share one traversal core that terminates on cyclic graphs,
//! contains panics raised by user rendering hooks, and can order map entries
//! deterministically.
//!
//! The free functions use [`Config::DEFAULT`]; build a [`Config`] (directly,
//! with [`Config::merged`], or from TOML) for other policies.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod model;
mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::Config;
pub use config::ConfigError;
pub use config::ConfigOverrides;
pub use model::Field;
pub use model::Inspect;
pub use model::Kind;
pub use model::Method;
pub use model::MethodSet;
pub use model::Receiver;
pub use model::RenderFn;
pub use model::Slot;
pub use model::TimeKind;
pub use model::Type;
pub use model::Value;
pub use runtime::format::ValueFormatter;
pub use runtime::sort::sort_values;

// ============================================================================
// SECTION: Default Entry Points
// ============================================================================

/// Process-wide default policy backing the free functions.
static DEFAULT_CONFIG: Config = Config::DEFAULT;

/// Dumps each value with the default policy.
#[must_use]
pub fn sdump(values: &[Value]) -> String {
    DEFAULT_CONFIG.sdump(values)
}

/// Dumps each value to `writer` with the default policy.
///
/// # Errors
///
/// Returns the writer's error when writing fails.
pub fn fdump<W: std::io::Write + ?Sized>(writer: &mut W, values: &[Value]) -> std::io::Result<()> {
    DEFAULT_CONFIG.fdump(writer, values)
}

/// Wraps `value` for inline rendering with the default policy.
#[must_use]
pub fn format(value: &Value) -> ValueFormatter<'static> {
    DEFAULT_CONFIG.formatter(value)
}

/// Renders values inline with the default policy.
#[must_use]
pub fn sprint(values: &[Value]) -> String {
    DEFAULT_CONFIG.sprint(values)
}

/// Renders values inline with the default policy, newline terminated.
#[must_use]
pub fn sprintln(values: &[Value]) -> String {
    DEFAULT_CONFIG.sprintln(values)
}
