// crates/value-dump/src/runtime/methods.rs
// ============================================================================
// Module: Method Invoker
// Description: Capability probing and panic-contained invocation.
// Purpose: Run foreign text/error rendering hooks without ever unwinding out.
// Dependencies: tracing, crate::{config, model, runtime::time}
// ============================================================================

//! ## Overview
//! Probing checks the error capability before the text capability. A
//! capability declared on the pointer receiver is only usable when pointer
//! methods are enabled and the value is addressable. Each value gets exactly
//! one invocation attempt; a panic inside the hook is caught and reported as
//! [`MethodOutcome::Panicked`] so the caller can print a placeholder followed
//! by the structural rendering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::panic;
use std::panic::AssertUnwindSafe;

use crate::config::Config;
use crate::model::types::Method;
use crate::model::types::Receiver;
use crate::model::value::Kind;
use crate::model::value::Value;
use crate::runtime::time::is_genuine_time;
use crate::runtime::time::time_text;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of invoking a rendering capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MethodOutcome {
    /// The hook returned text.
    Rendered(String),
    /// The hook panicked with the given message.
    Panicked(String),
}

// ============================================================================
// SECTION: Invocation
// ============================================================================

/// Invokes the first usable capability of `value`, if any.
///
/// With methods disabled, only the canonical time rendering is available and
/// only when `enable_time_stringer` is set.
pub(crate) fn invoke(config: &Config, value: &Value, addressable: bool) -> Option<MethodOutcome> {
    if matches!(value.kind(), Kind::Interface | Kind::Invalid) {
        return None;
    }
    if config.disable_methods {
        return stringify_time(config, value).map(MethodOutcome::Rendered);
    }
    let method = probe(config, value, addressable)?;
    Some(call(method, value))
}

/// Renders `value` as text for ordering; panics and absent hooks yield `None`.
pub(crate) fn render_text(config: &Config, value: &Value) -> Option<String> {
    match invoke(config, value, false)? {
        MethodOutcome::Rendered(text) => Some(text),
        MethodOutcome::Panicked(_) => None,
    }
}

/// Returns the canonical time text when the time stringer is enabled.
fn stringify_time(config: &Config, value: &Value) -> Option<String> {
    if !config.enable_time_stringer || !is_genuine_time(value) {
        return None;
    }
    value.instant().map(time_text)
}

/// Finds the capability to call, error before text.
fn probe<'v>(config: &Config, value: &'v Value, addressable: bool) -> Option<&'v Method> {
    let methods = value.ty().methods();
    let usable = |method: &&Method| match method.receiver() {
        Receiver::Value => true,
        Receiver::Pointer => !config.disable_pointer_methods && addressable,
    };
    methods.error().filter(usable).or_else(|| methods.text().filter(usable))
}

/// Calls `method` under panic containment.
fn call(method: &Method, value: &Value) -> MethodOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| method.call(value))) {
        Ok(text) => MethodOutcome::Rendered(text),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(
                type_name = value.type_name(),
                panic = %message,
                "panic during rendering method"
            );
            MethodOutcome::Panicked(message)
        }
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "non-string panic payload".to_string()
}
