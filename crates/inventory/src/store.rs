use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult, Entity, ItemId};

use crate::item::{InventoryItem, NewItem};
use crate::matching::is_used_by;

/// In-memory inventory, always ordered ascending by expiry date.
///
/// Items sharing an expiry date keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `item`, assign it a fresh id and insert it.
    pub fn add(&mut self, item: NewItem) -> DomainResult<ItemId> {
        item.validate()?;
        let id = ItemId::new();
        self.insert(item.into_item(id))?;
        Ok(id)
    }

    /// Insert an already-identified item at its expiry position.
    pub fn insert(&mut self, item: InventoryItem) -> DomainResult<()> {
        if self.contains(item.id()) {
            return Err(DomainError::conflict(format!("item {} already exists", item.id())));
        }
        let at = self
            .items
            .partition_point(|existing| existing.expiry_date() <= item.expiry_date());
        self.items.insert(at, item);
        Ok(())
    }

    /// Delete the item with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &ItemId) -> Option<InventoryItem> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }

    /// Remove every item matching `predicate`, each exactly once.
    ///
    /// Both the removed and the retained items keep their relative order.
    pub fn remove_matching<F>(&mut self, mut predicate: F) -> Vec<InventoryItem>
    where
        F: FnMut(&InventoryItem) -> bool,
    {
        let (taken, kept): (Vec<_>, Vec<_>) = core::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| predicate(item));
        self.items = kept;
        taken
    }

    /// Remove the items a recipe uses: every item whose name is a
    /// case-insensitive substring of at least one ingredient line.
    pub fn remove_used_by<S: AsRef<str>>(&mut self, ingredients: &[S]) -> Vec<InventoryItem> {
        self.remove_matching(|item| is_used_by(item.name(), ingredients))
    }

    pub fn get(&self, id: &ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
