//! 5×5 crafting grid with a dedicated output slot.
//!
//! Slots 0-24 are inputs in row-major order (`index = row * 5 + col`);
//! slot 25 is the output, written only by the engine. Out-of-range
//! access is a caller bug and panics rather than clamping.

use craftbench_core::ItemStack;
use serde::{Deserialize, Serialize};

/// Width (and height) of the input grid.
pub const GRID_WIDTH: usize = 5;

/// Number of input slots (5×5).
pub const INPUT_SLOT_COUNT: usize = GRID_WIDTH * GRID_WIDTH;

/// Index of the output slot.
pub const OUTPUT_SLOT: usize = INPUT_SLOT_COUNT;

/// Total number of slots including the output.
pub const SLOT_COUNT: usize = INPUT_SLOT_COUNT + 1;

/// Width (and height) of a recipe window.
pub const WINDOW_WIDTH: usize = 3;

/// Number of cells in a recipe window.
pub const WINDOW_CELL_COUNT: usize = WINDOW_WIDTH * WINDOW_WIDTH;

/// Exclusive upper bound for window start offsets (rows and columns).
pub const WINDOW_OFFSET_BOUND: usize = GRID_WIDTH - WINDOW_WIDTH + 1;

/// Map an input row/column pair to its absolute slot index.
///
/// Panics if `row` or `col` is outside the 5×5 grid.
pub fn input_index(row: usize, col: usize) -> usize {
    assert!(
        row < GRID_WIDTH && col < GRID_WIDTH,
        "input cell ({row}, {col}) out of range"
    );
    row * GRID_WIDTH + col
}

/// Map a window cell back to its absolute slot index.
///
/// Panics if the offsets or the cell coordinates are out of range.
pub fn window_cell_index(start_row: usize, start_col: usize, r: usize, c: usize) -> usize {
    assert!(
        start_row < WINDOW_OFFSET_BOUND && start_col < WINDOW_OFFSET_BOUND,
        "window offset ({start_row}, {start_col}) out of range"
    );
    assert!(
        r < WINDOW_WIDTH && c < WINDOW_WIDTH,
        "window cell ({r}, {c}) out of range"
    );
    input_index(start_row + r, start_col + c)
}

/// The 26-slot crafting grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingGrid {
    slots: [Option<ItemStack>; SLOT_COUNT],
}

impl Serialize for CraftingGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(SLOT_COUNT))?;
        for slot in &self.slots {
            seq.serialize_element(slot)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for CraftingGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let slots: Vec<Option<ItemStack>> = Vec::deserialize(deserializer)?;
        if slots.len() != SLOT_COUNT {
            return Err(serde::de::Error::custom(format!(
                "Expected {} slots, got {}",
                SLOT_COUNT,
                slots.len()
            )));
        }

        let slots: [Option<ItemStack>; SLOT_COUNT] = slots
            .try_into()
            .map_err(|_| serde::de::Error::custom("Failed to convert to slot array"))?;

        Ok(CraftingGrid { slots })
    }
}

impl CraftingGrid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Get the stack in a slot. Panics if `slot >= 26`.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        assert!(slot < SLOT_COUNT, "slot index {slot} out of range");
        self.slots[slot].as_ref()
    }

    /// Get a mutable reference to the stack in a slot. Panics if
    /// `slot >= 26`.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        assert!(slot < SLOT_COUNT, "slot index {slot} out of range");
        self.slots[slot].as_mut()
    }

    /// Set the stack in a slot. Panics if `slot >= 26`.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        assert!(slot < SLOT_COUNT, "slot index {slot} out of range");
        self.slots[slot] = stack;
    }

    /// Take the stack from a slot, leaving it empty. Panics if
    /// `slot >= 26`.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        assert!(slot < SLOT_COUNT, "slot index {slot} out of range");
        self.slots[slot].take()
    }

    /// The 25 input slots in row-major order.
    pub fn inputs(&self) -> &[Option<ItemStack>] {
        &self.slots[..INPUT_SLOT_COUNT]
    }

    /// The output slot contents.
    pub fn output(&self) -> Option<&ItemStack> {
        self.slots[OUTPUT_SLOT].as_ref()
    }

    /// Replace the output slot contents.
    pub fn set_output(&mut self, stack: Option<ItemStack>) {
        self.slots[OUTPUT_SLOT] = stack;
    }

    /// Take the output slot contents, leaving it empty.
    pub fn take_output(&mut self) -> Option<ItemStack> {
        self.slots[OUTPUT_SLOT].take()
    }

    /// Extract the 3×3 window at `(start_row, start_col)` as a value
    /// snapshot, row-major relative to the window.
    ///
    /// Panics if either offset is outside `[0, 2]`.
    pub fn window(&self, start_row: usize, start_col: usize) -> [Option<ItemStack>; WINDOW_CELL_COUNT] {
        assert!(
            start_row < WINDOW_OFFSET_BOUND && start_col < WINDOW_OFFSET_BOUND,
            "window offset ({start_row}, {start_col}) out of range"
        );

        std::array::from_fn(|i| {
            let r = i / WINDOW_WIDTH;
            let c = i % WINDOW_WIDTH;
            self.slots[input_index(start_row + r, start_col + c)].clone()
        })
    }

    /// Count occupied input slots (the output does not count).
    pub fn filled_input_count(&self) -> usize {
        self.inputs().iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if every input slot is empty.
    pub fn inputs_empty(&self) -> bool {
        self.inputs().iter().all(|slot| slot.is_none())
    }

    /// Drop any zero-count stacks, normalizing them to empty slots.
    ///
    /// Used after deserializing untrusted data so a malformed save
    /// cannot introduce phantom stacks.
    pub fn normalize(&mut self) {
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|stack| stack.count == 0) {
                *slot = None;
            }
        }
    }
}

impl Default for CraftingGrid {
    fn default() -> Self {
        Self::new()
    }
}
