//! The kitchen session: one owner for inventory, reminder, suggestions and
//! pending receipt lines.
//!
//! Every inventory mutation is a [`KitchenCommand`] run through
//! [`larder_events::execute`]; the session only adds the pieces that are not
//! domain state (clock, gateway, banner visibility, last error).

use chrono::NaiveDate;
use tracing::{info, warn};

use larder_ai::{AiGateway, PantryItem, PantrySnapshot, ReceiptImage, Recipe, ScannedItem};
use larder_core::{AggregateRoot, Clock, DomainError, ItemId, KitchenId};
use larder_events::{execute, Event};
use larder_inventory::{
    expiring_within, offset_date, AddItem, AddItems, ExpiryAlert, ExpiryNotifier, ExpiryStatus,
    InventoryItem, Kitchen, KitchenCommand, KitchenEvent, MarkCooked, NewItem, ReminderThreshold,
    RemoveItem,
};

use crate::config::DEFAULT_SCAN_EXPIRY_DAYS;
use crate::error::SessionError;
use crate::summary::ConsumptionSummary;

pub const EMPTY_INVENTORY_MESSAGE: &str = "Please add some items to your inventory first.";

pub const NOTHING_FOUND_MESSAGE: &str =
    "The AI couldn't find any food items on the receipt. Please try another image.";

/// An inventory line with its freshness for `today`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub item: InventoryItem,
    pub days_until_expiry: i64,
    pub status: ExpiryStatus,
}

/// Result of reading a receipt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The receipt had no food lines. Not an error.
    NothingFound,
    /// This many lines are waiting for review.
    Found(usize),
}

pub struct KitchenSession<G> {
    kitchen: Kitchen,
    gateway: G,
    clock: Box<dyn Clock>,
    threshold: ReminderThreshold,
    notifier: ExpiryNotifier,
    recipes: Vec<Recipe>,
    scanned: Vec<ScannedItem>,
    last_error: Option<String>,
    scan_expiry_days: u32,
}

impl<G: AiGateway> KitchenSession<G> {
    pub fn new(gateway: G, clock: impl Clock + 'static) -> Self {
        Self {
            kitchen: Kitchen::empty(KitchenId::new()),
            gateway,
            clock: Box::new(clock),
            threshold: ReminderThreshold::default(),
            notifier: ExpiryNotifier::new(),
            recipes: Vec::new(),
            scanned: Vec::new(),
            last_error: None,
            scan_expiry_days: DEFAULT_SCAN_EXPIRY_DAYS,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: ReminderThreshold) -> Self {
        self.set_threshold(threshold);
        self
    }

    /// Days from today proposed as the expiry of scanned lines.
    #[must_use]
    pub fn with_scan_expiry_days(mut self, days: u32) -> Self {
        self.scan_expiry_days = days;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn kitchen(&self) -> &Kitchen {
        &self.kitchen
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn threshold(&self) -> ReminderThreshold {
        self.threshold
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Receipt lines awaiting confirmation.
    pub fn scanned(&self) -> &[ScannedItem] {
        &self.scanned
    }

    /// Message of the last failed gateway operation, cleared when the next one starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ---------------------------------------------------------------------
    // Inventory
    // ---------------------------------------------------------------------

    pub fn add_item(&mut self, item: NewItem) -> Result<ItemId, SessionError> {
        let command = AddItem::new(item);
        let item_id = command.item_id;
        self.dispatch(KitchenCommand::AddItem(command))?;
        Ok(item_id)
    }

    /// Remove by id. Returns the removed item, `None` if it was not there.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<Option<InventoryItem>, SessionError> {
        let existing = self.kitchen.store().get(&item_id).cloned();
        self.dispatch(KitchenCommand::RemoveItem(RemoveItem::new(item_id)))?;
        Ok(existing)
    }

    pub fn inventory_view(&self) -> Vec<InventoryRow> {
        let today = self.today();
        self.kitchen
            .items()
            .iter()
            .map(|item| InventoryRow {
                item: item.clone(),
                days_until_expiry: item.days_until_expiry(today),
                status: item.status(today),
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Expiry reminder
    // ---------------------------------------------------------------------

    pub fn set_threshold(&mut self, threshold: ReminderThreshold) {
        info!(threshold = threshold.as_days(), "reminder threshold changed");
        self.threshold = threshold;
        self.refresh();
    }

    pub fn expiring_items(&self) -> Vec<&InventoryItem> {
        expiring_within(self.kitchen.items(), self.threshold, self.today())
    }

    /// The banner for today's expiring set.
    ///
    /// Re-observes first, so a set that changed because the date moved re-arms
    /// a dismissed banner.
    pub fn alert(&mut self) -> Option<ExpiryAlert> {
        self.refresh();
        self.notifier.alert(&self.expiring_items())
    }

    /// Hide the banner until the expiring set changes.
    pub fn dismiss_alert(&mut self) {
        self.refresh();
        self.notifier.dismiss();
    }

    /// Re-evaluate the reminder against today's date.
    pub fn refresh(&mut self) {
        let expiring = expiring_within(self.kitchen.items(), self.threshold, self.clock.today());
        if self.notifier.observe(&expiring) {
            info!(count = expiring.len(), "expiry reminder re-armed");
        }
    }

    // ---------------------------------------------------------------------
    // Recipes
    // ---------------------------------------------------------------------

    /// Ask the gateway for recipes using the current inventory.
    pub async fn suggest_recipes(&mut self) -> Result<&[Recipe], SessionError> {
        if self.kitchen.items().is_empty() {
            return Err(self.fail(DomainError::validation(EMPTY_INVENTORY_MESSAGE)));
        }

        self.last_error = None;
        self.recipes.clear();

        let pantry = self.pantry_snapshot();
        match self.gateway.suggest_recipes(&pantry).await {
            Ok(recipes) => {
                info!(gateway = self.gateway.name(), count = recipes.len(), "recipes suggested");
                self.recipes = recipes;
                Ok(&self.recipes)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Move every inventory item the recipe mentions into the ledger.
    pub fn mark_cooked(&mut self, recipe: &Recipe) -> Result<Vec<InventoryItem>, SessionError> {
        let command = MarkCooked::new(recipe.name.clone(), recipe.ingredients.clone());
        let events = self.dispatch(KitchenCommand::MarkCooked(command))?;

        let consumed = events
            .iter()
            .filter_map(|event| match event {
                KitchenEvent::ItemsConsumed(e) => Some(e.item_ids.as_slice()),
                _ => None,
            })
            .flatten()
            .filter_map(|id| {
                self.kitchen
                    .ledger()
                    .entries()
                    .iter()
                    .rev()
                    .find(|entry| entry.item.id_typed() == *id)
                    .map(|entry| entry.item.clone())
            })
            .collect();
        Ok(consumed)
    }

    pub fn pantry_snapshot(&self) -> PantrySnapshot {
        let today = self.today();
        PantrySnapshot::new(self.kitchen.items().iter().map(|item| {
            PantryItem::new(item.name(), item.quantity(), item.days_until_expiry(today))
        }))
    }

    // ---------------------------------------------------------------------
    // Receipt scanning
    // ---------------------------------------------------------------------

    pub async fn scan_receipt(
        &mut self,
        image: &ReceiptImage,
    ) -> Result<ScanOutcome, SessionError> {
        self.last_error = None;

        let items = match self.gateway.parse_receipt(image).await {
            Ok(items) => items,
            Err(err) => return Err(self.fail(err)),
        };

        if items.is_empty() {
            info!(gateway = self.gateway.name(), "{NOTHING_FOUND_MESSAGE}");
            return Ok(ScanOutcome::NothingFound);
        }

        info!(gateway = self.gateway.name(), count = items.len(), "receipt lines awaiting review");
        let count = items.len();
        self.scanned = items;
        Ok(ScanOutcome::Found(count))
    }

    /// Pending lines as editable drafts, each proposed to expire a fixed number of days out.
    pub fn review_drafts(&self) -> Vec<NewItem> {
        let expiry = offset_date(self.today(), i64::from(self.scan_expiry_days));
        self.scanned
            .iter()
            .map(|line| NewItem::new(line.name.clone(), line.quantity.clone(), expiry))
            .collect()
    }

    /// Add the reviewed lines. All of them are validated before any is added.
    pub fn confirm_scanned(&mut self, items: Vec<NewItem>) -> Result<Vec<ItemId>, SessionError> {
        let command = AddItems::new(items);
        let ids = command.items.iter().map(|(id, _)| *id).collect();
        self.dispatch(KitchenCommand::AddItems(command))?;
        self.scanned.clear();
        Ok(ids)
    }

    pub fn reject_scanned(&mut self) {
        if !self.scanned.is_empty() {
            info!(count = self.scanned.len(), "scanned receipt lines discarded");
        }
        self.scanned.clear();
    }

    // ---------------------------------------------------------------------
    // Consumption
    // ---------------------------------------------------------------------

    /// Breakdown of cooked items by category. `None` while nothing was cooked.
    pub async fn consumption_summary(
        &mut self,
    ) -> Result<Option<ConsumptionSummary>, SessionError> {
        let names = self.kitchen.ledger().names();
        if names.is_empty() {
            return Ok(None);
        }

        self.last_error = None;
        match self.gateway.categorize_items(&names).await {
            Ok(categorized) => Ok(ConsumptionSummary::from_categorized(&categorized)),
            Err(err) => Err(self.fail(err)),
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn dispatch(&mut self, command: KitchenCommand) -> Result<Vec<KitchenEvent>, SessionError> {
        let events = execute(&mut self.kitchen, &command).inspect_err(|err| {
            warn!(error = %err, "kitchen command rejected");
        })?;

        for event in &events {
            info!(
                event_type = event.event_type(),
                version = self.kitchen.version(),
                "kitchen event applied"
            );
        }

        self.refresh();
        Ok(events)
    }

    fn fail(&mut self, err: impl Into<SessionError>) -> SessionError {
        let err = err.into();
        self.last_error = Some(err.user_message());
        err
    }
}

impl<G: AiGateway> core::fmt::Debug for KitchenSession<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KitchenSession")
            .field("gateway", &self.gateway.name())
            .field("items", &self.kitchen.items().len())
            .field("threshold", &self.threshold)
            .field("recipes", &self.recipes.len())
            .field("scanned", &self.scanned.len())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
