//! Item catalog.
//!
//! The catalog owns the per-item properties the engine needs at
//! runtime: maximum stack size and the optional remainder item left
//! behind when a stack is consumed as an ingredient (e.g. an emptied
//! vessel). Items absent from the catalog fall back to defaults.

use crate::item::{ItemId, DEFAULT_STACK_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error raised while building or loading an [`ItemCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two definitions share the same item id.
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    /// An item name failed validation.
    #[error("invalid item name {name:?}: {reason}")]
    InvalidName {
        /// The offending name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// A definition declared a zero maximum stack size.
    #[error("item {0} declares max_stack_size 0")]
    ZeroStackSize(ItemId),
    /// The catalog JSON could not be parsed.
    #[error("failed to parse item catalog JSON")]
    Parse(#[from] serde_json::Error),
}

fn default_stack_size() -> u8 {
    DEFAULT_STACK_SIZE
}

/// Authoring-time definition of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Item identifier this definition applies to.
    pub item_id: ItemId,
    /// Stable lowercase name used for authoring and diagnostics.
    pub name: String,
    /// Maximum stack size (defaults to 64).
    #[serde(default = "default_stack_size")]
    pub max_stack_size: u8,
    /// Item left behind when one unit is consumed as an ingredient.
    #[serde(default)]
    pub remainder: Option<ItemId>,
}

/// Registry of item definitions indexed by item id.
///
/// Lookups never fail: unregistered ids report the default stack size
/// and no remainder.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    defs: HashMap<ItemId, ItemDef>,
}

impl ItemCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            defs: HashMap::new(),
        }
    }

    /// Load a catalog from a JSON array of [`ItemDef`] records.
    pub fn load_from_str(content: &str) -> Result<Self, CatalogError> {
        let defs: Vec<ItemDef> = serde_json::from_str(content)?;

        let mut catalog = Self::new();
        for def in defs {
            catalog.register(def)?;
        }

        Ok(catalog)
    }

    /// Register a single item definition.
    pub fn register(&mut self, def: ItemDef) -> Result<(), CatalogError> {
        validate_name(&def.name)?;
        if def.max_stack_size == 0 {
            return Err(CatalogError::ZeroStackSize(def.item_id));
        }
        if self.defs.contains_key(&def.item_id) {
            return Err(CatalogError::DuplicateId(def.item_id));
        }

        self.defs.insert(def.item_id, def);
        Ok(())
    }

    /// Look up a definition by item id.
    pub fn get(&self, item_id: ItemId) -> Option<&ItemDef> {
        self.defs.get(&item_id)
    }

    /// Maximum stack size for an item (default 64 when unregistered).
    pub fn max_stack_size(&self, item_id: ItemId) -> u8 {
        self.defs
            .get(&item_id)
            .map(|def| def.max_stack_size)
            .unwrap_or(DEFAULT_STACK_SIZE)
    }

    /// Remainder item left behind when one unit of `item_id` is
    /// consumed, if the item declares one.
    pub fn remainder(&self, item_id: ItemId) -> Option<ItemId> {
        self.defs.get(&item_id).and_then(|def| def.remainder)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.is_empty() {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "name cannot be empty",
        });
    }
    if name.len() > 64 {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "name too long (max 64)",
        });
    }
    if !name
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
    {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: "invalid characters (allowed: a-z0-9_.-)",
        });
    }
    Ok(())
}
