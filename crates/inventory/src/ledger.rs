use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// One item that left the inventory because it was cooked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumedItem {
    pub item: InventoryItem,
    pub recipe_name: String,
    pub consumed_at: DateTime<Utc>,
}

/// Append-only record of cooked items for the lifetime of a session.
///
/// No dedup and no capacity bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumptionLedger {
    entries: Vec<ConsumedItem>,
}

impl ConsumptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ConsumedItem) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConsumedItem] {
        &self.entries
    }

    /// Item names in consumption order (duplicates preserved).
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.item.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
