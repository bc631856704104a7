//! Candidate scanning and resolution policy.
//!
//! A scan first checks the whole 5×5 grid against advanced recipes
//! (short-circuiting on a hit), then evaluates every 3×3 window
//! offset independently. Resolution picks the advanced candidate
//! unconditionally, otherwise the window candidate using the most
//! ingredients; ties go to the earliest offset in scan order.

use crate::grid::{CraftingGrid, WINDOW_OFFSET_BOUND};
use crate::recipe::RecipeSource;
use craftbench_core::ItemStack;

/// Where a candidate's ingredients live in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePlacement {
    /// The full 25-cell input grid.
    Advanced,
    /// A 3×3 window at the given top-left offset.
    Window {
        /// Window start row, in `[0, 2]`.
        start_row: usize,
        /// Window start column, in `[0, 2]`.
        start_col: usize,
    },
}

/// A provisional recipe match produced during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Grid region the match covers.
    pub placement: CandidatePlacement,
    /// Stack the recipe would produce.
    pub result: ItemStack,
    /// Occupied cells in the matched region; sole tie-break metric.
    pub ingredient_count: usize,
}

/// Enumerate every recipe match in the grid.
///
/// An advanced match short-circuits: the returned list is then that
/// single candidate and no window is scanned. Windows whose nine
/// cells are all empty are skipped without querying the registry, so
/// empty-pattern recipes can never match an empty region.
pub fn scan<R: RecipeSource>(grid: &CraftingGrid, recipes: &R) -> Vec<Candidate> {
    if let Some(result) = recipes.match_advanced(grid.inputs()) {
        return vec![Candidate {
            placement: CandidatePlacement::Advanced,
            result,
            ingredient_count: grid.filled_input_count(),
        }];
    }

    let mut candidates = Vec::new();
    for start_row in 0..WINDOW_OFFSET_BOUND {
        for start_col in 0..WINDOW_OFFSET_BOUND {
            let window = grid.window(start_row, start_col);
            let occupied = window.iter().filter(|cell| cell.is_some()).count();
            if occupied == 0 {
                continue;
            }

            if let Some(result) = recipes.match_small(&window) {
                candidates.push(Candidate {
                    placement: CandidatePlacement::Window {
                        start_row,
                        start_col,
                    },
                    result,
                    ingredient_count: occupied,
                });
            }
        }
    }

    candidates
}

/// Choose the single best candidate.
///
/// The advanced candidate (if present) wins outright. Among window
/// candidates the strictly greatest `ingredient_count` wins; ties are
/// broken by scan order, i.e. the lexicographically smallest
/// `(start_row, start_col)`.
pub fn resolve(candidates: Vec<Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for candidate in candidates {
        if candidate.placement == CandidatePlacement::Advanced {
            return Some(candidate);
        }

        match &best {
            Some(current) if candidate.ingredient_count <= current.ingredient_count => {}
            _ => best = Some(candidate),
        }
    }

    best
}

/// Scan and resolve in one step.
pub fn resolve_grid<R: RecipeSource>(grid: &CraftingGrid, recipes: &R) -> Option<Candidate> {
    let candidates = scan(grid, recipes);
    tracing::trace!(candidates = candidates.len(), "scan complete");
    resolve(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::input_index;
    use crate::recipe::{AdvancedRecipe, RecipeRegistry, RecipeResult, ShapedRecipe};
    use craftbench_core::ItemId;

    fn shaped(id: &str, cells: &[(usize, ItemId)], result_item: ItemId) -> ShapedRecipe {
        let mut pattern = [None; 9];
        for &(idx, item) in cells {
            pattern[idx] = Some(item);
        }
        ShapedRecipe {
            id: id.to_string(),
            pattern,
            result: RecipeResult {
                item_id: result_item,
                count: 1,
            },
        }
    }

    #[test]
    fn empty_grid_yields_no_candidates() {
        let mut registry = RecipeRegistry::new();
        // A pathological all-empty pattern must not match empty windows.
        registry.add_shaped(shaped("empty", &[], 99));

        let grid = CraftingGrid::new();
        assert!(scan(&grid, &registry).is_empty());
        assert!(resolve_grid(&grid, &registry).is_none());
    }

    #[test]
    fn single_window_match() {
        let mut registry = RecipeRegistry::new();
        registry.add_shaped(shaped("single", &[(0, 1)], 10));

        let mut grid = CraftingGrid::new();
        grid.set(input_index(2, 2), Some(ItemStack::new(1, 1)));

        // Only the window whose top-left cell is (2,2) has the item in
        // the pattern's required position.
        let candidates = scan(&grid, &registry);
        assert_eq!(candidates.len(), 1);

        let best = resolve(candidates).unwrap();
        assert_eq!(best.result.item_id, 10);
        assert_eq!(best.ingredient_count, 1);
        assert_eq!(
            best.placement,
            CandidatePlacement::Window {
                start_row: 2,
                start_col: 2
            }
        );
    }

    #[test]
    fn advanced_match_short_circuits() {
        let mut registry = RecipeRegistry::new();
        registry.add_shaped(shaped("small", &[(0, 1)], 10));
        registry
            .add_advanced(AdvancedRecipe {
                id: "big".to_string(),
                ingredients: vec![Some(1)],
                result: RecipeResult {
                    item_id: 20,
                    count: 1,
                },
            })
            .unwrap();

        let mut grid = CraftingGrid::new();
        grid.set(input_index(0, 0), Some(ItemStack::new(1, 1)));

        let candidates = scan(&grid, &registry);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].placement, CandidatePlacement::Advanced);

        let best = resolve(candidates).unwrap();
        assert_eq!(best.result.item_id, 20);
    }

    #[test]
    fn most_ingredients_wins() {
        let mut registry = RecipeRegistry::new();
        // One-item recipe anchored at window cell 0 and a three-item
        // bottom row.
        registry.add_shaped(shaped("one", &[(0, 2)], 10));
        registry.add_shaped(shaped("row", &[(6, 1), (7, 1), (8, 1)], 11));

        let mut grid = CraftingGrid::new();
        grid.set(input_index(0, 0), Some(ItemStack::new(2, 1)));
        grid.set(input_index(4, 2), Some(ItemStack::new(1, 1)));
        grid.set(input_index(4, 3), Some(ItemStack::new(1, 1)));
        grid.set(input_index(4, 4), Some(ItemStack::new(1, 1)));

        let best = resolve(scan(&grid, &registry)).unwrap();
        assert_eq!(best.result.item_id, 11);
        assert_eq!(best.ingredient_count, 3);
        assert_eq!(
            best.placement,
            CandidatePlacement::Window {
                start_row: 2,
                start_col: 2
            }
        );
    }

    #[test]
    fn tie_breaks_by_scan_order() {
        let mut registry = RecipeRegistry::new();
        registry.add_shaped(shaped("anchor", &[(4, 1)], 10));

        // Two disjoint single-item matches centered at (1,1) and (3,3).
        let mut grid = CraftingGrid::new();
        grid.set(input_index(1, 1), Some(ItemStack::new(1, 1)));
        grid.set(input_index(3, 3), Some(ItemStack::new(1, 1)));

        let best = resolve(scan(&grid, &registry)).unwrap();
        assert_eq!(
            best.placement,
            CandidatePlacement::Window {
                start_row: 0,
                start_col: 0
            }
        );
    }

    #[test]
    fn scan_is_deterministic() {
        let mut registry = RecipeRegistry::new();
        registry.add_shaped(shaped("anchor", &[(4, 1)], 10));

        let mut grid = CraftingGrid::new();
        grid.set(input_index(1, 1), Some(ItemStack::new(1, 1)));
        grid.set(input_index(2, 3), Some(ItemStack::new(1, 1)));

        let first = scan(&grid, &registry);
        let second = scan(&grid, &registry);
        assert_eq!(first, second);
    }
}
