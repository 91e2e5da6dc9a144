use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult, Entity, ItemId};

use crate::expiry::{days_until_expiry, ExpiryStatus};

/// An item as entered by the user (manual form or reviewed receipt line), before
/// it has an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub quantity: String,
    pub expiry_date: NaiveDate,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            expiry_date,
        }
    }

    /// Name is required; quantity is free text and may be empty.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(
                "Please fill in at least the item name and expiry date.",
            ));
        }
        Ok(())
    }

    pub(crate) fn into_item(self, id: ItemId) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            expiry_date: self.expiry_date,
        }
    }
}

/// Entity: a perishable item in the kitchen.
///
/// Never edited in place; it only leaves the inventory by deletion or by being
/// cooked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    quantity: String,
    expiry_date: NaiveDate,
}

impl InventoryItem {
    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        days_until_expiry(self.expiry_date, today)
    }

    pub fn status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::from_days(self.days_until_expiry(today))
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
