//! Kitchen inventory domain module.
//!
//! This crate contains the expiry-aware inventory engine, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no wall clock). "Today" is always
//! passed in by the caller.

pub mod alerts;
pub mod expiry;
pub mod item;
pub mod kitchen;
pub mod ledger;
pub mod matching;
pub mod store;

pub use alerts::{expiring_within, expiry_join_key, ExpiryAlert, ExpiryNotifier, ReminderThreshold};
pub use expiry::{days_until_expiry, offset_date, parse_expiry_date, ExpiryStatus};
pub use item::{InventoryItem, NewItem};
pub use kitchen::{
    AddItem, AddItems, ItemAdded, ItemRemoved, ItemsConsumed, Kitchen, KitchenCommand,
    KitchenEvent, MarkCooked, RemoveItem,
};
pub use ledger::{ConsumedItem, ConsumptionLedger};
pub use matching::{ingredient_mentions, is_used_by};
pub use store::InventoryStore;
