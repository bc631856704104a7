//! Ingredient consumption for a resolved craft.
//!
//! Consumption is confined to the winning placement: an advanced
//! match decrements every occupied input cell, a window match touches
//! only the nine cells of its window. An item declaring a remainder
//! (an emptied vessel, say) leaves one unit of that remainder behind
//! when its stack runs out instead of clearing the slot.

use crate::grid::{window_cell_index, CraftingGrid, INPUT_SLOT_COUNT, WINDOW_WIDTH};
use crate::resolve::{Candidate, CandidatePlacement};
use craftbench_core::{ItemCatalog, ItemStack};

/// Deduct one unit from every ingredient cell of the winning
/// candidate, mutating the grid in place.
///
/// Cells outside the candidate's placement are untouched, even when
/// physically adjacent to it.
pub fn consume(grid: &mut CraftingGrid, candidate: &Candidate, catalog: &ItemCatalog) {
    match candidate.placement {
        CandidatePlacement::Advanced => {
            // Advanced crafts are a plain decrement; remainder items
            // apply only to window crafts.
            for slot in 0..INPUT_SLOT_COUNT {
                decrement_slot(grid, slot, None);
            }
        }
        CandidatePlacement::Window {
            start_row,
            start_col,
        } => {
            for r in 0..WINDOW_WIDTH {
                for c in 0..WINDOW_WIDTH {
                    let slot = window_cell_index(start_row, start_col, r, c);
                    let remainder = grid
                        .get(slot)
                        .and_then(|stack| catalog.remainder(stack.item_id));
                    decrement_slot(grid, slot, remainder);
                }
            }
        }
    }
}

/// Remove one unit from a slot. A drained slot becomes one unit of
/// `remainder` when given, otherwise empty.
fn decrement_slot(grid: &mut CraftingGrid, slot: usize, remainder: Option<craftbench_core::ItemId>) {
    let Some(stack) = grid.get_mut(slot) else {
        return;
    };

    stack.count = stack.count.saturating_sub(1);
    if stack.count == 0 {
        grid.set(slot, remainder.map(|id| ItemStack::new(id, 1)));
    }
}
