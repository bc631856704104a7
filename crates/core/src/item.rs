//! Item stacks and the identifiers that key them.
//!
//! An [`ItemStack`] is the unit of storage in every slot-based
//! container: an item id, a count, and optional opaque metadata that
//! participates in merge equality (damage, tags, and so on).

use serde::{Deserialize, Serialize};

/// Item identifier referencing the item catalog.
pub type ItemId = u16;

/// Maximum stack size for items without a catalog entry.
pub const DEFAULT_STACK_SIZE: u8 = 64;

/// A stack of items occupying a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type identifier.
    pub item_id: ItemId,
    /// Number of items in this stack.
    pub count: u8,
    /// Optional item metadata (damage, tags, etc.).
    pub metadata: Option<Vec<u8>>,
}

impl ItemStack {
    /// Create a new item stack with no metadata.
    pub fn new(item_id: ItemId, count: u8) -> Self {
        Self {
            item_id,
            count,
            metadata: None,
        }
    }

    /// Create an item stack carrying metadata.
    pub fn with_metadata(item_id: ItemId, count: u8, metadata: Vec<u8>) -> Self {
        Self {
            item_id,
            count,
            metadata: Some(metadata),
        }
    }

    /// Check if this stack can merge with another stack.
    ///
    /// Stacks merge only when both the item id and the metadata are
    /// identical; two stacks of the same item with different damage
    /// values stay separate.
    pub fn can_merge(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id && self.metadata == other.metadata
    }

    /// Try to add items up to `max_stack`, returning the amount that
    /// didn't fit.
    pub fn add(&mut self, amount: u8, max_stack: u8) -> u8 {
        let space = max_stack.saturating_sub(self.count);
        let added = amount.min(space);
        self.count += added;
        amount - added
    }

    /// Try to remove items from this stack, returning the amount
    /// actually removed.
    pub fn remove(&mut self, amount: u8) -> u8 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Split this stack, taking the specified amount into a new stack.
    pub fn split(&mut self, amount: u8) -> Option<ItemStack> {
        if amount == 0 || amount > self.count {
            return None;
        }

        self.count -= amount;
        Some(ItemStack {
            item_id: self.item_id,
            count: amount,
            metadata: self.metadata.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_requires_matching_metadata() {
        let plain = ItemStack::new(7, 1);
        let tagged = ItemStack::with_metadata(7, 1, vec![1, 2]);
        let tagged_same = ItemStack::with_metadata(7, 3, vec![1, 2]);

        assert!(!plain.can_merge(&tagged));
        assert!(tagged.can_merge(&tagged_same));
        assert!(plain.can_merge(&ItemStack::new(7, 60)));
        assert!(!plain.can_merge(&ItemStack::new(8, 1)));
    }

    #[test]
    fn add_respects_max_stack() {
        let mut stack = ItemStack::new(1, 60);
        let overflow = stack.add(10, 64);

        assert_eq!(overflow, 6);
        assert_eq!(stack.count, 64);
    }

    #[test]
    fn remove_floors_at_zero() {
        let mut stack = ItemStack::new(1, 3);
        assert_eq!(stack.remove(5), 3);
        assert_eq!(stack.count, 0);
    }

    #[test]
    fn split_preserves_metadata() {
        let mut stack = ItemStack::with_metadata(5, 10, vec![9]);
        let split = stack.split(4).unwrap();

        assert_eq!(split.count, 4);
        assert_eq!(split.metadata, Some(vec![9]));
        assert_eq!(stack.count, 6);

        assert!(stack.split(0).is_none());
        assert!(stack.split(7).is_none());
    }
}
