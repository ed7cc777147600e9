// crates/value-dump/src/runtime/pointer.rs
// ============================================================================
// Module: Pointer Resolver
// Description: Follows pointer chains through interfaces to a terminal value.
// Purpose: Count indirections and detect nil links and cycles by identity.
// Dependencies: smallvec, tracing, crate::runtime::guard
// ============================================================================

//! ## Overview
//! Resolution dereferences while the current value is a pointer, unwrapping
//! one interface level after each step. Identity is the slot allocation
//! address; two slots holding equal values are never a cycle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use smallvec::SmallVec;

use crate::model::value::Data;
use crate::model::value::Value;
use crate::runtime::guard::CycleGuard;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Outcome of following a pointer chain.
#[derive(Debug)]
pub(crate) struct PointerResolution {
    /// Pointers dereferenced before reaching the terminal.
    pub(crate) indirections: usize,
    /// Value where resolution stopped.
    pub(crate) terminal: Value,
    /// Resolution stopped at a nil pointer or nil interface.
    pub(crate) nil_found: bool,
    /// Resolution stopped at an ancestor address.
    pub(crate) cycle_found: bool,
    /// Addresses visited in order, including a repeated cycle address.
    pub(crate) chain: SmallVec<[usize; 4]>,
}

/// Resolves `pointer` at `depth`, recording visited slots in `guard`.
pub(crate) fn resolve(pointer: &Value, depth: usize, guard: &mut CycleGuard) -> PointerResolution {
    guard.prune(depth);
    let mut resolution = PointerResolution {
        indirections: 0,
        terminal: pointer.clone(),
        nil_found: false,
        cycle_found: false,
        chain: SmallVec::new(),
    };
    while let Data::Pointer(slot) = resolution.terminal.data() {
        let Some(slot) = slot.clone() else {
            resolution.nil_found = true;
            break;
        };
        let addr = slot.address();
        resolution.chain.push(addr);
        if guard.seen(addr, depth) {
            tracing::debug!(addr, depth, "pointer cycle detected");
            resolution.cycle_found = true;
            break;
        }
        resolution.indirections += 1;
        guard.record(addr, depth);
        resolution.terminal = slot.get();
        while let Data::Interface(inner) = resolution.terminal.data() {
            let Some(inner) = inner.as_deref().cloned() else {
                resolution.nil_found = true;
                return resolution;
            };
            resolution.terminal = inner;
        }
    }
    resolution
}
