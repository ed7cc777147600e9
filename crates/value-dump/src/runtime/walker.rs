// crates/value-dump/src/runtime/walker.rs
// ============================================================================
// Module: Value Walker
// Description: Kind dispatch shared by the dump and format renderers.
// Purpose: Own the traversal order, method probing, and map cycle guarding.
// Dependencies: tracing, crate::{config, model, runtime}
// ============================================================================

//! ## Overview
//! [`walk`] classifies a value and routes it to the active [`Renderer`]:
//! pointers go to the renderer's pointer handler, everything else is
//! annotated, offered to the method invoker, and dispatched by kind.
//! Primitive literals are written here because both policies print them
//! identically; layout of composites belongs to the renderer.
//!
//! Addressability flows down the walk: pointees and slice elements are
//! addressable, struct fields and array elements inherit it from their
//! parent, and map keys and values never are.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use crate::config::Config;
use crate::model::value::Data;
use crate::model::value::Field;
use crate::model::value::IntWidth;
use crate::model::value::Items;
use crate::model::value::MapRef;
use crate::model::value::Sequence;
use crate::model::value::Value;
use crate::runtime::guard::CycleGuard;
use crate::runtime::methods;
use crate::runtime::methods::MethodOutcome;
use crate::runtime::primitives;
use crate::runtime::sort;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Element type name suffixes of C character aliases rendered as hex dumps.
const C_BYTE_SUFFIXES: [&str; 3] = ["._Ctype_char", "._Ctype_unsignedchar", "._Ctype_uint8_t"];

// ============================================================================
// SECTION: Traversal State
// ============================================================================

/// Call-scoped traversal bookkeeping.
///
/// # Invariants
/// - `depth` returns to its starting value after every composite.
/// - Each transient flag is consumed by the next value that could use it.
#[derive(Debug, Default)]
pub(crate) struct TraversalState {
    /// Current nesting depth.
    pub(crate) depth: usize,
    /// Ancestors on the current path.
    pub(crate) guard: CycleGuard,
    /// Skip the next type annotation.
    pub(crate) suppress_type: bool,
    /// Skip the next indent.
    pub(crate) suppress_indent: bool,
}

impl TraversalState {
    /// Enters a composite; returns false when `max_depth` is exceeded.
    pub(crate) fn enter(&mut self, max_depth: usize) -> bool {
        self.depth += 1;
        let within = max_depth == 0 || self.depth <= max_depth;
        if !within {
            tracing::debug!(depth = self.depth, max_depth, "depth limit reached");
        }
        within
    }

    /// Leaves a composite entered with [`TraversalState::enter`].
    pub(crate) const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

// ============================================================================
// SECTION: Renderer Seam
// ============================================================================

/// Output policy driven by [`walk`].
pub(crate) trait Renderer {
    /// Returns the active configuration.
    fn config(&self) -> &Config;

    /// Returns the traversal state.
    fn state(&mut self) -> &mut TraversalState;

    /// Returns the output sink.
    fn out(&mut self) -> &mut String;

    /// Returns true when structural rendering follows a rendered capability.
    fn continues_after_method(&self) -> bool;

    /// Replaces a non-nil interface by its concrete value.
    fn unpack(&mut self, value: &Value) -> Value {
        unpack(value)
    }

    /// Renders a pointer value, including its chain and pointee.
    fn render_pointer(&mut self, pointer: &Value);

    /// Writes the type (and, where applicable, length) annotation.
    fn annotate(&mut self, value: &Value);

    /// Writes a string payload.
    fn render_string(&mut self, text: &str);

    /// Writes a non-nil slice or array.
    fn render_sequence(&mut self, sequence: &Sequence, addressable: bool);

    /// Writes a non-nil map that is not an ancestor.
    fn render_map(&mut self, table: &MapRef);

    /// Writes struct fields in declaration order.
    fn render_struct(&mut self, fields: &[Field], addressable: bool);

    /// Writes the marker for a map that is its own ancestor.
    fn render_cycle(&mut self);
}

// ============================================================================
// SECTION: Walk
// ============================================================================

/// Renders `value` through `renderer`.
pub(crate) fn walk<R: Renderer + ?Sized>(renderer: &mut R, value: &Value, addressable: bool) {
    if matches!(value.data(), Data::Invalid) {
        renderer.out().push_str(primitives::INVALID);
        let state = renderer.state();
        state.suppress_type = false;
        state.suppress_indent = false;
        return;
    }
    if matches!(value.data(), Data::Pointer(_)) {
        renderer.render_pointer(value);
        return;
    }
    renderer.annotate(value);
    if let Some(outcome) = methods::invoke(renderer.config(), value, addressable) {
        let continues = renderer.continues_after_method();
        let out = renderer.out();
        match outcome {
            MethodOutcome::Rendered(text) if continues => {
                out.push('(');
                out.push_str(&text);
                out.push_str(") ");
            }
            MethodOutcome::Rendered(text) => {
                out.push_str(&text);
                return;
            }
            MethodOutcome::Panicked(message) => {
                out.push_str(primitives::PANIC_PREFIX);
                out.push_str(&message);
                out.push(')');
            }
        }
    }
    match value.data() {
        Data::Invalid | Data::Pointer(_) => {}
        Data::Bool(value) => primitives::write_bool(renderer.out(), *value),
        Data::Int(value, _) => primitives::write_int(renderer.out(), *value),
        Data::Uint(value, _) => primitives::write_uint(renderer.out(), *value),
        Data::Float(value) => primitives::write_float(renderer.out(), *value),
        Data::Complex(value) => primitives::write_complex(renderer.out(), *value),
        Data::String(text) => renderer.render_string(text),
        Data::Slice(None) | Data::Map(None) | Data::Interface(None) => {
            renderer.out().push_str(primitives::NIL);
        }
        Data::Interface(Some(inner)) => {
            let inner = unpack(inner);
            let state = renderer.state();
            state.suppress_type = true;
            state.suppress_indent = true;
            walk(renderer, &inner, addressable);
        }
        Data::Slice(Some(sequence)) => renderer.render_sequence(sequence, true),
        Data::Array(sequence) => renderer.render_sequence(sequence, addressable),
        Data::Map(Some(table)) => walk_map(renderer, table),
        Data::Struct(data) => renderer.render_struct(&data.fields, addressable),
        Data::Channel {
            addr,
            ..
        }
        | Data::Function(addr)
        | Data::UnsafePointer(addr) => primitives::write_hex_ptr(renderer.out(), *addr),
    }
}

/// Guards a map against reentry before handing it to the renderer.
fn walk_map<R: Renderer + ?Sized>(renderer: &mut R, table: &MapRef) {
    let addr = table.address();
    let state = renderer.state();
    let depth = state.depth;
    state.guard.prune(depth);
    if state.guard.seen(addr, depth) {
        tracing::debug!(addr, depth, "map cycle detected");
        renderer.render_cycle();
        return;
    }
    state.guard.record(addr, depth);
    renderer.render_map(table);
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Replaces non-nil interfaces, however nested, by their concrete value.
pub(crate) fn unpack(value: &Value) -> Value {
    let mut current = value.clone();
    loop {
        let Some(inner) = current.elem().cloned() else {
            return current;
        };
        current = inner;
    }
}

/// Returns the elements of a sequence in index order.
pub(crate) fn elements(sequence: &Sequence) -> Vec<Value> {
    (0 .. sequence.len()).filter_map(|index| sequence.get(index)).collect()
}

/// Returns map entries, ordered when `sort_keys` is set.
pub(crate) fn ordered_entries(config: &Config, table: &MapRef) -> Vec<(Value, Value)> {
    let mut entries = table.entries();
    if config.sort_keys {
        sort::sort_entries(&mut entries, config);
    }
    entries
}

/// Returns the bytes of a byte-like sequence, or `None` to render elements.
///
/// Packed storage is borrowed with the `zero-copy` feature and copied
/// otherwise; element storage is always converted element by element.
pub(crate) fn byte_view(sequence: &Sequence) -> Option<Cow<'_, [u8]>> {
    match &sequence.items {
        Items::Bytes(bytes) if bytes.is_empty() => None,
        Items::Bytes(bytes) => Some(if cfg!(feature = "zero-copy") {
            Cow::Borrowed(bytes.as_slice())
        } else {
            Cow::Owned(bytes.clone())
        }),
        Items::Values(values) => {
            let first = values.first()?;
            if !is_byte_like(first) {
                return None;
            }
            values.iter().map(byte_of).collect::<Option<Vec<u8>>>().map(Cow::Owned)
        }
    }
}

/// Returns true for 8-bit unsigned integers and 8-bit C character aliases.
fn is_byte_like(value: &Value) -> bool {
    match value.data() {
        Data::Uint(_, IntWidth::W8) => true,
        Data::Int(_, IntWidth::W8) => {
            C_BYTE_SUFFIXES.iter().any(|suffix| value.type_name().ends_with(suffix))
        }
        _ => false,
    }
}

/// Converts an integer element to its low byte.
fn byte_of(value: &Value) -> Option<u8> {
    match value.data() {
        Data::Int(value, _) => Some(value.to_le_bytes()[0]),
        Data::Uint(value, _) => Some(value.to_le_bytes()[0]),
        _ => None,
    }
}
