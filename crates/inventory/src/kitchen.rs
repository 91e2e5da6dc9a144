use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_core::{Aggregate, AggregateRoot, DomainError, Entity, ItemId, KitchenId};
use larder_events::Event;

use crate::item::{InventoryItem, NewItem};
use crate::ledger::{ConsumedItem, ConsumptionLedger};
use crate::matching::is_used_by;
use crate::store::InventoryStore;

/// Aggregate root: Kitchen.
///
/// Owns the inventory and the consumption ledger. Every mutation goes through
/// `handle` (decide) and `apply` (evolve), so transitions are pure and testable
/// without any presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kitchen {
    id: KitchenId,
    store: InventoryStore,
    ledger: ConsumptionLedger,
    version: u64,
}

impl Kitchen {
    pub fn empty(id: KitchenId) -> Self {
        Self {
            id,
            store: InventoryStore::new(),
            ledger: ConsumptionLedger::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> KitchenId {
        self.id
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn items(&self) -> &[InventoryItem] {
        self.store.items()
    }

    pub fn ledger(&self) -> &ConsumptionLedger {
        &self.ledger
    }
}

impl AggregateRoot for Kitchen {
    type Id = KitchenId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem (manual entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item_id: ItemId,
    pub item: NewItem,
    pub occurred_at: DateTime<Utc>,
}

impl AddItem {
    /// Assigns a fresh id and stamps the current time.
    pub fn new(item: NewItem) -> Self {
        Self {
            item_id: ItemId::new(),
            item,
            occurred_at: Utc::now(),
        }
    }
}

/// Command: AddItems (confirmed receipt lines, all-or-nothing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItems {
    pub items: Vec<(ItemId, NewItem)>,
    pub occurred_at: DateTime<Utc>,
}

impl AddItems {
    pub fn new(items: impl IntoIterator<Item = NewItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (ItemId::new(), item)).collect(),
            occurred_at: Utc::now(),
        }
    }
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

impl RemoveItem {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            occurred_at: Utc::now(),
        }
    }
}

/// Command: MarkCooked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkCooked {
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

impl MarkCooked {
    pub fn new(recipe_name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            ingredients,
            occurred_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitchenCommand {
    AddItem(AddItem),
    AddItems(AddItems),
    RemoveItem(RemoveItem),
    MarkCooked(MarkCooked),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: InventoryItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemsConsumed (moved from the inventory into the ledger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsConsumed {
    pub recipe_name: String,
    pub item_ids: Vec<ItemId>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KitchenEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    ItemsConsumed(ItemsConsumed),
}

impl Event for KitchenEvent {
    fn event_type(&self) -> &'static str {
        match self {
            KitchenEvent::ItemAdded(_) => "kitchen.item.added",
            KitchenEvent::ItemRemoved(_) => "kitchen.item.removed",
            KitchenEvent::ItemsConsumed(_) => "kitchen.items.consumed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            KitchenEvent::ItemAdded(e) => e.occurred_at,
            KitchenEvent::ItemRemoved(e) => e.occurred_at,
            KitchenEvent::ItemsConsumed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Kitchen {
    type Command = KitchenCommand;
    type Event = KitchenEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            KitchenEvent::ItemAdded(e) => {
                // Ids were checked in `handle`; a replayed duplicate is not applied.
                if self.store.insert(e.item.clone()).is_err() {
                    return;
                }
            }
            KitchenEvent::ItemRemoved(e) => {
                self.store.remove(&e.item_id);
            }
            KitchenEvent::ItemsConsumed(e) => {
                let used = self.store.remove_matching(|item| e.item_ids.contains(item.id()));
                for item in used {
                    self.ledger.record(ConsumedItem {
                        item,
                        recipe_name: e.recipe_name.clone(),
                        consumed_at: e.occurred_at,
                    });
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            KitchenCommand::AddItem(cmd) => self.handle_add(cmd),
            KitchenCommand::AddItems(cmd) => self.handle_add_many(cmd),
            KitchenCommand::RemoveItem(cmd) => Ok(self.handle_remove(cmd)),
            KitchenCommand::MarkCooked(cmd) => Ok(self.handle_cooked(cmd)),
        }
    }
}

impl Kitchen {
    fn ensure_new_id(&self, item_id: &ItemId) -> Result<(), DomainError> {
        if self.store.contains(item_id) {
            return Err(DomainError::conflict(format!("item {item_id} already exists")));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<KitchenEvent>, DomainError> {
        cmd.item.validate()?;
        self.ensure_new_id(&cmd.item_id)?;
        Ok(vec![KitchenEvent::ItemAdded(ItemAdded {
            item: cmd.item.clone().into_item(cmd.item_id),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_many(&self, cmd: &AddItems) -> Result<Vec<KitchenEvent>, DomainError> {
        if cmd.items.is_empty() {
            return Err(DomainError::validation("no items to add"));
        }
        let mut seen: Vec<&ItemId> = Vec::with_capacity(cmd.items.len());
        for (item_id, item) in &cmd.items {
            item.validate()?;
            self.ensure_new_id(item_id)?;
            if seen.contains(&item_id) {
                return Err(DomainError::conflict(format!("item {item_id} appears twice")));
            }
            seen.push(item_id);
        }
        Ok(cmd
            .items
            .iter()
            .map(|(item_id, item)| {
                KitchenEvent::ItemAdded(ItemAdded {
                    item: item.clone().into_item(*item_id),
                    occurred_at: cmd.occurred_at,
                })
            })
            .collect())
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Vec<KitchenEvent> {
        if !self.store.contains(&cmd.item_id) {
            return Vec::new();
        }
        vec![KitchenEvent::ItemRemoved(ItemRemoved {
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_cooked(&self, cmd: &MarkCooked) -> Vec<KitchenEvent> {
        let item_ids: Vec<ItemId> = self
            .store
            .iter()
            .filter(|item| is_used_by(item.name(), &cmd.ingredients))
            .map(|item| item.id_typed())
            .collect();

        if item_ids.is_empty() {
            return Vec::new();
        }

        vec![KitchenEvent::ItemsConsumed(ItemsConsumed {
            recipe_name: cmd.recipe_name.clone(),
            item_ids,
            occurred_at: cmd.occurred_at,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use larder_events::execute;
    use proptest::prelude::*;

    use crate::expiry::offset_date;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn new_item(name: &str, days: i64) -> NewItem {
        NewItem::new(name, "1", offset_date(today(), days))
    }

    fn kitchen_with(items: &[(&str, i64)]) -> Kitchen {
        let mut kitchen = Kitchen::empty(KitchenId::new());
        for (name, days) in items {
            let cmd = KitchenCommand::AddItem(AddItem::new(new_item(name, *days)));
            execute(&mut kitchen, &cmd).unwrap();
        }
        kitchen
    }

    fn names(kitchen: &Kitchen) -> Vec<&str> {
        kitchen.items().iter().map(|i| i.name()).collect()
    }

    #[test]
    fn add_item_emits_item_added_event() {
        let kitchen = Kitchen::empty(KitchenId::new());
        let cmd = AddItem::new(new_item("Eggs", 10));

        let events = kitchen.handle(&KitchenCommand::AddItem(cmd.clone())).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            KitchenEvent::ItemAdded(e) => {
                assert_eq!(e.item.id_typed(), cmd.item_id);
                assert_eq!(e.item.name(), "Eggs");
            }
            _ => panic!("Expected ItemAdded event"),
        }
        assert_eq!(events[0].event_type(), "kitchen.item.added");
    }

    #[test]
    fn handle_does_not_mutate() {
        let kitchen = kitchen_with(&[("Milk", 2)]);
        let before = kitchen.clone();
        let _ = kitchen.handle(&KitchenCommand::AddItem(AddItem::new(new_item("Eggs", 3))));
        assert_eq!(kitchen, before);
    }

    #[test]
    fn add_item_rejects_blank_name() {
        let mut kitchen = Kitchen::empty(KitchenId::new());
        let err = execute(&mut kitchen, &KitchenCommand::AddItem(AddItem::new(new_item("", 1))));
        assert!(matches!(err, Err(DomainError::Validation(_))));
        assert_eq!(kitchen.version(), 0);
    }

    #[test]
    fn add_item_rejects_reused_id() {
        let mut kitchen = kitchen_with(&[("Milk", 2)]);
        let existing = kitchen.items()[0].id_typed();
        let mut cmd = AddItem::new(new_item("Cream", 3));
        cmd.item_id = existing;
        let err = execute(&mut kitchen, &KitchenCommand::AddItem(cmd));
        assert!(matches!(err, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn version_tracks_applied_events() {
        let kitchen = kitchen_with(&[("Milk", 2), ("Eggs", 5)]);
        assert_eq!(kitchen.version(), 2);
    }

    #[test]
    fn add_items_is_all_or_nothing() {
        let mut kitchen = Kitchen::empty(KitchenId::new());
        let batch = AddItems::new(vec![new_item("Apples", 7), new_item(" ", 7)]);
        assert!(execute(&mut kitchen, &KitchenCommand::AddItems(batch)).is_err());
        assert!(kitchen.items().is_empty());

        let batch = AddItems::new(vec![new_item("Apples", 7), new_item("Bread", 2)]);
        let events = execute(&mut kitchen, &KitchenCommand::AddItems(batch)).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(names(&kitchen), vec!["Bread", "Apples"]);
    }

    #[test]
    fn add_items_rejects_empty_batch() {
        let mut kitchen = Kitchen::empty(KitchenId::new());
        let err = execute(&mut kitchen, &KitchenCommand::AddItems(AddItems::new(Vec::new())));
        assert!(matches!(err, Err(DomainError::Validation(_))));
    }

    #[test]
    fn add_items_rejects_duplicate_ids_in_batch() {
        let kitchen = Kitchen::empty(KitchenId::new());
        let id = ItemId::new();
        let cmd = AddItems {
            items: vec![(id, new_item("A", 1)), (id, new_item("B", 2))],
            occurred_at: Utc::now(),
        };
        let err = kitchen.handle(&KitchenCommand::AddItems(cmd));
        assert!(matches!(err, Err(DomainError::Conflict(_))));
    }

    #[test]
    fn replayed_duplicate_add_is_not_counted() {
        let mut kitchen = Kitchen::empty(KitchenId::new());
        let cmd = KitchenCommand::AddItem(AddItem::new(new_item("Eggs", 4)));
        let events = execute(&mut kitchen, &cmd).unwrap();

        kitchen.apply(&events[0]);

        assert_eq!(kitchen.items().len(), 1);
        assert_eq!(kitchen.version(), 1);
    }

    #[test]
    fn remove_absent_item_emits_nothing() {
        let mut kitchen = kitchen_with(&[("Milk", 2)]);
        let cmd = KitchenCommand::RemoveItem(RemoveItem::new(ItemId::new()));
        let events = execute(&mut kitchen, &cmd).unwrap();
        assert!(events.is_empty());
        assert_eq!(kitchen.version(), 1);
        assert_eq!(kitchen.items().len(), 1);
    }

    #[test]
    fn remove_item_deletes_it() {
        let mut kitchen = kitchen_with(&[("Milk", 2), ("Eggs", 4)]);
        let milk = kitchen.items()[0].id_typed();
        execute(&mut kitchen, &KitchenCommand::RemoveItem(RemoveItem::new(milk))).unwrap();
        assert_eq!(names(&kitchen), vec!["Eggs"]);
        assert!(kitchen.ledger().is_empty());
    }

    #[test]
    fn mark_cooked_moves_only_matching_items() {
        let mut kitchen = kitchen_with(&[("Broccoli", 5), ("Bell Peppers", 7)]);
        let cmd = MarkCooked::new(
            "Chicken & Broccoli",
            vec!["2 cups broccoli".to_string(), "chicken breast".to_string()],
        );

        let events = execute(&mut kitchen, &KitchenCommand::MarkCooked(cmd)).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(names(&kitchen), vec!["Bell Peppers"]);
        assert_eq!(kitchen.ledger().names(), vec!["Broccoli"]);
        assert_eq!(kitchen.ledger().entries()[0].recipe_name, "Chicken & Broccoli");
    }

    #[test]
    fn mark_cooked_without_matches_is_noop() {
        let mut kitchen = kitchen_with(&[("Yogurt", 1)]);
        let cmd = MarkCooked::new("Toast", vec!["2 slices bread".to_string()]);
        let events = execute(&mut kitchen, &KitchenCommand::MarkCooked(cmd)).unwrap();
        assert!(events.is_empty());
        assert_eq!(names(&kitchen), vec!["Yogurt"]);
        assert!(kitchen.ledger().is_empty());
    }

    #[test]
    fn events_serialize() {
        let kitchen = Kitchen::empty(KitchenId::new());
        let events = kitchen
            .handle(&KitchenCommand::AddItem(AddItem::new(new_item("Eggs", 1))))
            .unwrap();
        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["ItemAdded"]["item"]["name"], "Eggs");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: cooking moves exactly the mentioned items and conserves the total.
        #[test]
        fn cooking_conserves_items(
            picks in prop::collection::vec((0usize..6, -5i64..15), 0..20),
            ingredient_picks in prop::collection::vec(0usize..6, 0..4),
        ) {
            const NAMES: [&str; 6] =
                ["Broccoli", "Bell Peppers", "Chicken", "Yogurt", "Rice", "Garlic"];
            let items: Vec<(&str, i64)> = picks.iter().map(|(n, d)| (NAMES[*n], *d)).collect();
            let mut kitchen = kitchen_with(&items);
            let ingredients: Vec<String> = ingredient_picks
                .iter()
                .map(|n| format!("1 cup chopped {}", NAMES[*n].to_lowercase()))
                .collect();

            let total_before = kitchen.items().len() + kitchen.ledger().len();
            let expected_moved = kitchen
                .items()
                .iter()
                .filter(|i| is_used_by(i.name(), &ingredients))
                .count();

            let cmd = KitchenCommand::MarkCooked(MarkCooked::new("r", ingredients.clone()));
            execute(&mut kitchen, &cmd).unwrap();

            prop_assert_eq!(kitchen.items().len() + kitchen.ledger().len(), total_before);
            prop_assert_eq!(kitchen.ledger().len(), expected_moved);
            prop_assert!(kitchen.items().iter().all(|i| !is_used_by(i.name(), &ingredients)));
            prop_assert!(kitchen
                .ledger()
                .entries()
                .iter()
                .all(|e| is_used_by(e.item.name(), &ingredients)));
            prop_assert!(kitchen
                .items()
                .windows(2)
                .all(|w| w[0].expiry_date() <= w[1].expiry_date()));
        }
    }
}
