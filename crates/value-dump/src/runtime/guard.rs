// crates/value-dump/src/runtime/guard.rs
// ============================================================================
// Module: Cycle Guard
// Description: Depth-scoped identity map for shared pointer and map nodes.
// Purpose: Detect reentry into an ancestor without flagging sibling reuse.
// Dependencies: std::collections
// ============================================================================

//! ## Overview
//! The guard maps a node address to the depth at which it was first seen on
//! the current path. Callers prune entries at or below the active depth
//! before processing a pointer chain or map, so a node shared by two
//! siblings renders in full both times while a true ancestor is reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Identity to depth map for the active traversal path.
///
/// # Invariants
/// - After `prune(d)`, every remaining entry has a depth below `d`.
#[derive(Debug, Default)]
pub(crate) struct CycleGuard {
    /// Address to depth first seen.
    seen: HashMap<usize, usize>,
}

impl CycleGuard {
    /// Removes entries recorded at `depth` or deeper.
    pub(crate) fn prune(&mut self, depth: usize) {
        self.seen.retain(|_, recorded| *recorded < depth);
    }

    /// Returns true when `addr` is an ancestor at or above `depth`.
    pub(crate) fn seen(&self, addr: usize, depth: usize) -> bool {
        self.seen.get(&addr).is_some_and(|recorded| *recorded <= depth)
    }

    /// Records `addr` as visited at `depth`.
    pub(crate) fn record(&mut self, addr: usize, depth: usize) {
        self.seen.insert(addr, depth);
    }
}
