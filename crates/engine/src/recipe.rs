//! Recipe registry with JSON-based recipe loading.
//!
//! The engine consumes recipes through the [`RecipeSource`] seam,
//! which takes plain slot-array views and returns the result stack of
//! the first matching recipe. [`RecipeRegistry`] is the shipped
//! implementation: positional shaped patterns for 3×3 windows and
//! right-padded exact patterns for the full 5×5 grid.

use crate::grid::{INPUT_SLOT_COUNT, WINDOW_CELL_COUNT};
use anyhow::{Context, Result};
use craftbench_core::{ItemId, ItemStack};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Capability the engine queries for recipe matches.
///
/// Implementations own the matching contract (equality rules, tag
/// handling); the engine only relies on "zero or one result per
/// view". Both methods are pure.
pub trait RecipeSource {
    /// Match a 3×3 window view, row-major. Returns the result stack
    /// of the matching recipe, if any.
    fn match_small(&self, cells: &[Option<ItemStack>; WINDOW_CELL_COUNT]) -> Option<ItemStack>;

    /// Match the full 25-cell input view, row-major. Returns the
    /// result stack of the matching advanced recipe, if any.
    fn match_advanced(&self, inputs: &[Option<ItemStack>]) -> Option<ItemStack>;
}

/// Result stack produced by a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResult {
    /// Item produced.
    pub item_id: ItemId,
    /// Amount produced per craft.
    pub count: u8,
}

impl RecipeResult {
    fn to_stack(self) -> ItemStack {
        ItemStack::new(self.item_id, self.count)
    }
}

/// A shaped 3×3 recipe matched positionally against a window.
///
/// `None` cells must be empty in the window; translation within the
/// grid is handled by the window scan, not by the recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapedRecipe {
    /// Unique recipe identifier (e.g. "oak_door").
    pub id: String,
    /// Required item per window cell, row-major.
    pub pattern: [Option<ItemId>; WINDOW_CELL_COUNT],
    /// Item stack produced.
    pub result: RecipeResult,
}

impl ShapedRecipe {
    /// Check the recipe against a window view.
    pub fn matches(&self, cells: &[Option<ItemStack>; WINDOW_CELL_COUNT]) -> bool {
        self.pattern
            .iter()
            .zip(cells.iter())
            .all(|(required, cell)| cell_matches(*required, cell))
    }
}

/// An advanced recipe matched against the whole 5×5 input grid.
///
/// A recipe may declare fewer than 25 ingredients; undeclared trailing
/// cells must be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedRecipe {
    /// Unique recipe identifier.
    pub id: String,
    /// Required item per input cell, row-major, at most 25 entries.
    pub ingredients: Vec<Option<ItemId>>,
    /// Item stack produced.
    pub result: RecipeResult,
}

impl AdvancedRecipe {
    /// Check the recipe against the 25 input cells.
    pub fn matches(&self, inputs: &[Option<ItemStack>]) -> bool {
        debug_assert_eq!(inputs.len(), INPUT_SLOT_COUNT);
        (0..INPUT_SLOT_COUNT).all(|i| {
            let required = self.ingredients.get(i).copied().flatten();
            cell_matches(required, &inputs[i])
        })
    }
}

fn cell_matches(required: Option<ItemId>, cell: &Option<ItemStack>) -> bool {
    match (required, cell) {
        (Some(id), Some(stack)) => stack.item_id == id,
        (None, None) => true,
        _ => false,
    }
}

/// On-disk recipe file: shaped and advanced sections, both optional.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecipeFile {
    #[serde(default)]
    shaped: Vec<ShapedRecipe>,
    #[serde(default)]
    advanced: Vec<AdvancedRecipe>,
}

/// Recipe registry managing all loaded recipes.
///
/// Within each arity, the first recipe added wins when several match
/// the same view, so registration order is part of the data contract.
#[derive(Debug, Clone, Default)]
pub struct RecipeRegistry {
    shaped: Vec<ShapedRecipe>,
    advanced: Vec<AdvancedRecipe>,
}

impl RecipeRegistry {
    /// Create a new empty recipe registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recipes from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read recipe file")?;
        Self::load_from_str(&content)
    }

    /// Load recipes from a JSON string.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let file: RecipeFile =
            serde_json::from_str(content).context("Failed to parse recipe JSON")?;

        let mut registry = Self::new();
        for recipe in file.shaped {
            registry.add_shaped(recipe);
        }
        for recipe in file.advanced {
            registry.add_advanced(recipe)?;
        }

        Ok(registry)
    }

    /// Add a shaped 3×3 recipe.
    pub fn add_shaped(&mut self, recipe: ShapedRecipe) {
        self.shaped.push(recipe);
    }

    /// Add an advanced 5×5 recipe. Fails if it declares more than 25
    /// ingredient cells.
    pub fn add_advanced(&mut self, recipe: AdvancedRecipe) -> Result<()> {
        anyhow::ensure!(
            recipe.ingredients.len() <= INPUT_SLOT_COUNT,
            "advanced recipe {:?} declares {} ingredient cells (max {})",
            recipe.id,
            recipe.ingredients.len(),
            INPUT_SLOT_COUNT
        );
        self.advanced.push(recipe);
        Ok(())
    }

    /// Total number of registered recipes across both arities.
    pub fn recipe_count(&self) -> usize {
        self.shaped.len() + self.advanced.len()
    }
}

impl RecipeSource for RecipeRegistry {
    fn match_small(&self, cells: &[Option<ItemStack>; WINDOW_CELL_COUNT]) -> Option<ItemStack> {
        self.shaped
            .iter()
            .find(|recipe| recipe.matches(cells))
            .map(|recipe| recipe.result.to_stack())
    }

    fn match_advanced(&self, inputs: &[Option<ItemStack>]) -> Option<ItemStack> {
        self.advanced
            .iter()
            .find(|recipe| recipe.matches(inputs))
            .map(|recipe| recipe.result.to_stack())
    }
}
