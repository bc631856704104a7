#![warn(missing_docs)]
//! Core item primitives shared across the workspace.

pub mod catalog;
pub mod item;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use catalog::{CatalogError, ItemCatalog, ItemDef};
pub use item::{ItemId, ItemStack, DEFAULT_STACK_SIZE};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
