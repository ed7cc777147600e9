// crates/value-dump/src/model/mod.rs
// ============================================================================
// Module: Value Model
// Description: Dynamic value handles, type descriptors, and native conversion.
// Purpose: Give the dumper a closed, kind-tagged view of arbitrary values.
// Dependencies: crate::model::{inspect, types, value}
// ============================================================================

//! ## Overview
//! The model is the dumper's only input surface. Values are built either with
//! the explicit constructors on [`Value`] or from native Rust data through the
//! [`Inspect`] trait.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod inspect;
pub mod types;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use inspect::Inspect;
pub use types::Method;
pub use types::MethodSet;
pub use types::Receiver;
pub use types::RenderFn;
pub use types::TimeKind;
pub use types::Type;
pub use value::Field;
pub use value::Kind;
pub use value::Slot;
pub use value::Value;
