// crates/value-dump/src/runtime/mod.rs
// ============================================================================
// Module: Rendering Runtime
// Description: Traversal core, ordering, and the two output policies.
// Purpose: Turn value graphs into dump or format text in finite steps.
// Dependencies: crate::{config, model}
// ============================================================================

//! ## Overview
//! Leaves first: primitive writers, the cycle guard, the pointer resolver,
//! the time classifier, the method invoker, and the sorter feed the shared
//! walker, which drives either the dump or the format renderer. Each call
//! owns its traversal state; nothing here is shared between calls.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub(crate) mod dump;
pub(crate) mod format;
pub(crate) mod guard;
pub(crate) mod methods;
pub(crate) mod pointer;
pub(crate) mod primitives;
pub(crate) mod sort;
pub(crate) mod time;
pub(crate) mod walker;
