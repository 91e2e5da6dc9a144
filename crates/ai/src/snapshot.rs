use serde::{Deserialize, Serialize};

/// One pantry line as the recipe prompt sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    pub name: String,
    pub quantity: String,
    pub days_until_expiry: i64,
}

impl PantryItem {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        days_until_expiry: i64,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            days_until_expiry,
        }
    }

    pub fn expiry_note(&self) -> String {
        if self.days_until_expiry < 0 {
            format!("(expired {} days ago)", -self.days_until_expiry)
        } else {
            format!("(expires in {} days)", self.days_until_expiry)
        }
    }

    pub fn prompt_line(&self) -> String {
        format!("- {} ({}) {}", self.name, self.quantity, self.expiry_note())
    }
}

/// Inventory snapshot handed to the recipe suggester.
///
/// Always ordered nearest-to-expiry first, so the model sees the urgent items at
/// the top. Equal days keep the caller's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantrySnapshot {
    items: Vec<PantryItem>,
}

impl PantrySnapshot {
    pub fn new(items: impl IntoIterator<Item = PantryItem>) -> Self {
        let mut items: Vec<PantryItem> = items.into_iter().collect();
        items.sort_by_key(|item| item.days_until_expiry);
        Self { items }
    }

    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
