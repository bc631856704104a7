//! Workbench block-entity state: preview, trigger, and comparator.
//!
//! The workbench reacts to two independent stimuli. Any external
//! input mutation recomputes a non-destructive preview into the
//! output slot. A rising edge on the trigger signal commits at most
//! one craft: ingredients are consumed and the result is stacked into
//! the output, all-or-nothing.

use crate::consume::consume;
use crate::grid::{CraftingGrid, INPUT_SLOT_COUNT};
use crate::recipe::RecipeSource;
use crate::resolve::resolve_grid;
use craftbench_core::{ItemCatalog, ItemStack, SimTick};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Comparator signal for an empty grid.
const SIGNAL_EMPTY: u8 = 0;

/// Maximum comparator signal strength.
const SIGNAL_MAX: u8 = 15;

/// Persisted state of a workbench.
///
/// The previous trigger signal is persisted so a signal held high
/// across a save/load is not re-detected as a fresh pulse. The
/// current signal and tick counter are transient: the wiring
/// collaborator re-supplies the signal every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbenchState {
    /// The 26-slot grid (25 inputs + output).
    pub grid: CraftingGrid,
    /// Last observed trigger signal (edge-detection).
    #[serde(default)]
    prev_signal: bool,
    /// Signal supplied for the current tick.
    #[serde(skip)]
    signal: bool,
    /// Tick counter, advanced once per [`WorkbenchState::tick`].
    #[serde(skip)]
    tick: SimTick,
}

impl Default for WorkbenchState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbenchState {
    /// Create an empty workbench.
    pub fn new() -> Self {
        Self {
            grid: CraftingGrid::new(),
            prev_signal: false,
            signal: false,
            tick: SimTick::ZERO,
        }
    }

    /// Current tick counter.
    pub fn tick_count(&self) -> SimTick {
        self.tick
    }

    /// Place a stack into an input slot and recompute the preview.
    ///
    /// Panics if `slot >= 25`; the output slot is engine-owned and
    /// not externally writable.
    pub fn set_input<R: RecipeSource>(
        &mut self,
        slot: usize,
        stack: Option<ItemStack>,
        recipes: &R,
    ) {
        assert!(slot < INPUT_SLOT_COUNT, "input slot {slot} out of range");
        self.grid.set(slot, stack);
        self.update_preview(recipes);
    }

    /// Remove and return the stack in an input slot, recomputing the
    /// preview. Panics if `slot >= 25`.
    pub fn take_input<R: RecipeSource>(&mut self, slot: usize, recipes: &R) -> Option<ItemStack> {
        assert!(slot < INPUT_SLOT_COUNT, "input slot {slot} out of range");
        let taken = self.grid.take(slot);
        self.update_preview(recipes);
        taken
    }

    /// Recompute the preview result into the output slot without
    /// consuming anything.
    ///
    /// The output is overwritten with the resolved result, or cleared
    /// when nothing resolves. Idempotent for an unchanged grid.
    pub fn update_preview<R: RecipeSource>(&mut self, recipes: &R) {
        let preview = resolve_grid(&self.grid, recipes).map(|candidate| candidate.result);
        debug!(resolved = preview.is_some(), "preview updated");
        self.grid.set_output(preview);
    }

    /// Record the trigger signal for the upcoming tick. Called by the
    /// wiring collaborator before [`WorkbenchState::tick`].
    pub fn set_signal(&mut self, signal: bool) {
        self.signal = signal;
    }

    /// Advance one tick, firing at most one craft on a rising edge of
    /// the trigger signal. Returns whether a craft was committed.
    pub fn tick<R: RecipeSource>(&mut self, recipes: &R, catalog: &ItemCatalog) -> bool {
        let rising_edge = self.signal && !self.prev_signal;
        let crafted = if rising_edge {
            self.try_commit_craft(recipes, catalog)
        } else {
            false
        };

        // The edge detector advances every tick, craft or no craft.
        self.prev_signal = self.signal;
        self.tick = self.tick.advance(1);
        crafted
    }

    /// Resolve the authoritative best candidate and commit it.
    ///
    /// The candidate is recomputed here rather than reusing the
    /// preview: inputs may have changed since the last preview ran,
    /// and the output slot is never trusted as a source of truth.
    fn try_commit_craft<R: RecipeSource>(&mut self, recipes: &R, catalog: &ItemCatalog) -> bool {
        let Some(candidate) = resolve_grid(&self.grid, recipes) else {
            debug!("trigger fired with no matching recipe");
            return false;
        };
        if candidate.result.count == 0 {
            return false;
        }

        match self.grid.output() {
            None => {
                consume(&mut self.grid, &candidate, catalog);
                debug!(
                    item_id = candidate.result.item_id,
                    count = candidate.result.count,
                    "craft committed into empty output"
                );
                self.grid.set_output(Some(candidate.result));
                true
            }
            Some(held) => {
                let max_stack = catalog.max_stack_size(held.item_id);
                let combined = held.count as u16 + candidate.result.count as u16;
                if !held.can_merge(&candidate.result) || combined > max_stack as u16 {
                    debug!(
                        held_item = held.item_id,
                        result_item = candidate.result.item_id,
                        "craft aborted: output slot cannot accept result"
                    );
                    return false;
                }

                consume(&mut self.grid, &candidate, catalog);
                let added = candidate.result.count;
                if let Some(output) = self.grid.get_mut(crate::grid::OUTPUT_SLOT) {
                    output.count += added;
                }
                debug!(
                    item_id = candidate.result.item_id,
                    added, "craft committed onto existing output"
                );
                true
            }
        }
    }

    /// Analog comparator signal in `[0, 15]`, derived from input slot
    /// occupancy. Pure and recomputed on demand.
    pub fn comparator_signal(&self) -> u8 {
        let filled = self.grid.filled_input_count();
        if filled == 0 {
            return SIGNAL_EMPTY;
        }

        let scaled = (filled * (SIGNAL_MAX as usize - 1)) / INPUT_SLOT_COUNT;
        1 + scaled as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::input_index;
    use crate::recipe::{RecipeRegistry, RecipeResult, ShapedRecipe};
    use craftbench_core::ItemDef;

    fn registry_with_pair() -> RecipeRegistry {
        // Two planks stacked vertically in the window's top-left.
        let mut pattern = [None; 9];
        pattern[0] = Some(1);
        pattern[3] = Some(1);
        let mut registry = RecipeRegistry::new();
        registry.add_shaped(ShapedRecipe {
            id: "frame".to_string(),
            pattern,
            result: RecipeResult {
                item_id: 10,
                count: 1,
            },
        });
        registry
    }

    fn loaded_bench(registry: &RecipeRegistry) -> WorkbenchState {
        let mut bench = WorkbenchState::new();
        bench.set_input(input_index(0, 0), Some(ItemStack::new(1, 1)), registry);
        bench.set_input(input_index(1, 0), Some(ItemStack::new(1, 1)), registry);
        bench
    }

    #[test]
    fn preview_is_non_destructive_and_idempotent() {
        let registry = registry_with_pair();
        let mut bench = loaded_bench(&registry);

        assert_eq!(bench.grid.output().unwrap().item_id, 10);
        // Ingredients untouched by the preview.
        assert_eq!(bench.grid.get(input_index(0, 0)).unwrap().count, 1);

        bench.update_preview(&registry);
        bench.update_preview(&registry);
        assert_eq!(bench.grid.output().unwrap().item_id, 10);
    }

    #[test]
    fn preview_clears_when_no_match() {
        let registry = registry_with_pair();
        let mut bench = loaded_bench(&registry);

        bench.take_input(input_index(1, 0), &registry);
        assert!(bench.grid.output().is_none());
    }

    #[test]
    fn rising_edge_crafts_once() {
        let registry = registry_with_pair();
        let catalog = ItemCatalog::new();
        let mut bench = loaded_bench(&registry);
        // Clear the preview so the commit path owns the output write.
        bench.grid.set_output(None);

        bench.set_signal(true);
        assert!(bench.tick(&registry, &catalog));

        let output = bench.grid.output().unwrap();
        assert_eq!(output.item_id, 10);
        assert_eq!(output.count, 1);
        assert!(bench.grid.get(input_index(0, 0)).is_none());
        assert!(bench.grid.get(input_index(1, 0)).is_none());
    }

    #[test]
    fn held_signal_does_not_repeat_craft() {
        let registry = registry_with_pair();
        let catalog = ItemCatalog::new();
        let mut bench = WorkbenchState::new();

        // Enough ingredients for two crafts.
        bench.set_input(input_index(0, 0), Some(ItemStack::new(1, 2)), &registry);
        bench.set_input(input_index(1, 0), Some(ItemStack::new(1, 2)), &registry);
        bench.grid.set_output(None);

        bench.set_signal(true);
        assert!(bench.tick(&registry, &catalog));
        bench.set_signal(true);
        assert!(!bench.tick(&registry, &catalog));

        // Falling then rising again crafts a second time.
        bench.set_signal(false);
        assert!(!bench.tick(&registry, &catalog));
        bench.set_signal(true);
        assert!(bench.tick(&registry, &catalog));

        assert_eq!(bench.grid.output().unwrap().count, 2);
        assert_eq!(bench.tick_count(), SimTick(4));
    }

    #[test]
    fn craft_stacks_onto_matching_output() {
        let registry = registry_with_pair();
        let catalog = ItemCatalog::new();
        let mut bench = loaded_bench(&registry);

        // Output already previews item 10 with count 1; commit should
        // consume and stack on top of an identical held stack.
        bench.grid.set_output(Some(ItemStack::new(10, 1)));
        bench.set_signal(true);
        assert!(bench.tick(&registry, &catalog));
        assert_eq!(bench.grid.output().unwrap().count, 2);
    }

    #[test]
    fn craft_aborts_on_mismatched_output() {
        let registry = registry_with_pair();
        let catalog = ItemCatalog::new();
        let mut bench = loaded_bench(&registry);

        bench.grid.set_output(Some(ItemStack::new(99, 1)));
        bench.set_signal(true);
        assert!(!bench.tick(&registry, &catalog));

        // All-or-nothing: nothing consumed, output unchanged.
        assert_eq!(bench.grid.get(input_index(0, 0)).unwrap().count, 1);
        assert_eq!(bench.grid.output().unwrap().item_id, 99);
    }

    #[test]
    fn craft_aborts_on_full_output_stack() {
        let registry = registry_with_pair();
        let mut catalog = ItemCatalog::new();
        catalog
            .register(ItemDef {
                item_id: 10,
                name: "frame".to_string(),
                max_stack_size: 2,
                remainder: None,
            })
            .unwrap();

        let mut bench = loaded_bench(&registry);
        bench.grid.set_output(Some(ItemStack::new(10, 2)));

        bench.set_signal(true);
        assert!(!bench.tick(&registry, &catalog));
        assert_eq!(bench.grid.output().unwrap().count, 2);
        assert_eq!(bench.grid.get(input_index(0, 0)).unwrap().count, 1);
    }

    #[test]
    fn comparator_signal_levels() {
        let registry = RecipeRegistry::new();
        let mut bench = WorkbenchState::new();
        assert_eq!(bench.comparator_signal(), 0);

        bench.set_input(0, Some(ItemStack::new(1, 1)), &registry);
        assert_eq!(bench.comparator_signal(), 1);

        for slot in 1..INPUT_SLOT_COUNT {
            bench.set_input(slot, Some(ItemStack::new(1, 1)), &registry);
        }
        assert_eq!(bench.comparator_signal(), 15);

        // Output contents never affect the signal.
        bench.grid.set_output(Some(ItemStack::new(9, 64)));
        assert_eq!(bench.comparator_signal(), 15);
    }
}
