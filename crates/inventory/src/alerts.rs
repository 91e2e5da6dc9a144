//! "Expiring soon" filtering and the dismissible reminder banner state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::Entity;

use crate::item::InventoryItem;

/// How many days ahead an item counts as "expiring soon".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderThreshold(u32);

impl ReminderThreshold {
    /// Choices offered by the settings panel.
    pub const PRESETS: [ReminderThreshold; 3] = [Self(1), Self(3), Self(7)];

    pub const DEFAULT_DAYS: u32 = 3;

    pub const fn days(days: u32) -> Self {
        Self(days)
    }

    pub const fn as_days(&self) -> u32 {
        self.0
    }
}

impl Default for ReminderThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl core::fmt::Display for ReminderThreshold {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0 == 1 {
            write!(f, "{} Day", self.0)
        } else {
            write!(f, "{} Days", self.0)
        }
    }
}

/// Items expiring today or within `threshold` days, in store order.
///
/// Already-expired items are excluded here; they are surfaced by
/// [`ExpiryStatus`](crate::ExpiryStatus) in the main list instead.
pub fn expiring_within<'a>(
    items: &'a [InventoryItem],
    threshold: ReminderThreshold,
    today: NaiveDate,
) -> Vec<&'a InventoryItem> {
    let max = i64::from(threshold.as_days());
    items
        .iter()
        .filter(|item| (0..=max).contains(&item.days_until_expiry(today)))
        .collect()
}

/// Order-independent identity of a set of items: sorted ids joined by `,`.
pub fn expiry_join_key(items: &[&InventoryItem]) -> String {
    let mut ids: Vec<String> = items.iter().map(|item| item.id().to_string()).collect();
    ids.sort_unstable();
    ids.join(",")
}

/// Visibility of the expiry reminder banner.
///
/// The banner re-appears whenever the *set* of expiring items changes, and stays
/// hidden after a dismissal until then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryNotifier {
    visible: bool,
    last_key: Option<String>,
}

impl Default for ExpiryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpiryNotifier {
    pub fn new() -> Self {
        Self {
            visible: true,
            last_key: None,
        }
    }

    /// Record the current expiring set. Returns `true` if this re-armed the banner.
    pub fn observe(&mut self, expiring: &[&InventoryItem]) -> bool {
        let key = expiry_join_key(expiring);
        if self.last_key.as_deref() == Some(key.as_str()) {
            return false;
        }
        self.last_key = Some(key);
        if expiring.is_empty() {
            return false;
        }
        self.visible = true;
        true
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The banner to show for `expiring`, if any.
    pub fn alert(&self, expiring: &[&InventoryItem]) -> Option<ExpiryAlert> {
        if !self.visible || expiring.is_empty() {
            return None;
        }
        Some(ExpiryAlert {
            items: expiring.iter().map(|item| (*item).clone()).collect(),
        })
    }
}

/// Reminder banner contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryAlert {
    pub items: Vec<InventoryItem>,
}

impl ExpiryAlert {
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name()).collect()
    }

    pub fn message(&self) -> String {
        format!(
            "Heads up! These items are expiring soon: {}",
            self.item_names().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::ItemId;
    use proptest::prelude::*;

    use crate::expiry::offset_date;
    use crate::item::NewItem;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn item(name: &str, days: i64) -> InventoryItem {
        NewItem::new(name, "1", offset_date(today(), days)).into_item(ItemId::new())
    }

    #[test]
    fn yogurt_tomorrow_is_within_three_days_but_not_zero() {
        let items = vec![item("Yogurt", 1)];
        let within_3 = expiring_within(&items, ReminderThreshold::days(3), today());
        assert_eq!(within_3.len(), 1);
        assert_eq!(within_3[0].name(), "Yogurt");

        assert!(expiring_within(&items, ReminderThreshold::days(0), today()).is_empty());
    }

    #[test]
    fn range_is_inclusive_and_excludes_expired() {
        let items = vec![item("Old", -1), item("Today", 0), item("Edge", 3), item("Later", 4)];
        let names: Vec<_> = expiring_within(&items, ReminderThreshold::days(3), today())
            .iter()
            .map(|i| i.name())
            .collect();
        assert_eq!(names, vec!["Today", "Edge"]);
    }

    #[test]
    fn default_threshold_is_three_days() {
        assert_eq!(ReminderThreshold::default().as_days(), 3);
        assert!(ReminderThreshold::PRESETS.contains(&ReminderThreshold::default()));
        assert_eq!(ReminderThreshold::days(1).to_string(), "1 Day");
        assert_eq!(ReminderThreshold::days(7).to_string(), "7 Days");
    }

    #[test]
    fn join_key_ignores_order() {
        let a = item("A", 1);
        let b = item("B", 2);
        assert_eq!(expiry_join_key(&[&a, &b]), expiry_join_key(&[&b, &a]));
        assert_ne!(expiry_join_key(&[&a]), expiry_join_key(&[&a, &b]));
    }

    #[test]
    fn dismissal_sticks_until_the_set_changes() {
        let a = item("A", 1);
        let b = item("B", 2);
        let mut notifier = ExpiryNotifier::new();

        assert!(notifier.observe(&[&a]));
        assert!(notifier.alert(&[&a]).is_some());

        notifier.dismiss();
        assert!(!notifier.observe(&[&a]));
        assert!(notifier.alert(&[&a]).is_none());

        // Same set, different order: still dismissed.
        notifier.observe(&[&a, &b]);
        notifier.dismiss();
        assert!(!notifier.observe(&[&b, &a]));
        assert!(!notifier.is_visible());

        // Set changes: banner comes back.
        assert!(notifier.observe(&[&b]));
        assert!(notifier.is_visible());
    }

    #[test]
    fn empty_set_does_not_rearm() {
        let a = item("A", 1);
        let mut notifier = ExpiryNotifier::new();
        notifier.observe(&[&a]);
        notifier.dismiss();
        assert!(!notifier.observe(&[]));
        assert!(!notifier.is_visible());
        assert!(notifier.alert(&[]).is_none());
    }

    #[test]
    fn same_set_returning_after_empty_rearms() {
        let a = item("A", 1);
        let mut notifier = ExpiryNotifier::new();
        notifier.observe(&[&a]);
        notifier.dismiss();

        assert!(!notifier.observe(&[]));
        assert!(notifier.observe(&[&a]));
        assert_eq!(notifier.alert(&[&a]).unwrap().item_names(), vec!["A"]);
    }

    #[test]
    fn alert_message_lists_names() {
        let a = item("Yogurt", 1);
        let b = item("Chicken Breasts", 3);
        let alert = ExpiryNotifier::new().alert(&[&a, &b]).unwrap();
        assert_eq!(
            alert.message(),
            "Heads up! These items are expiring soon: Yogurt, Chicken Breasts"
        );
    }

    proptest! {
        /// Property: filtering never yields items outside [0, threshold].
        #[test]
        fn filter_stays_in_range(
            offsets in prop::collection::vec(-20i64..20i64, 0..30),
            threshold in 0u32..10u32,
        ) {
            let items: Vec<_> = offsets.iter().map(|d| item("x", *d)).collect();
            let picked = expiring_within(&items, ReminderThreshold::days(threshold), today());
            for it in &picked {
                let days = it.days_until_expiry(today());
                prop_assert!(days >= 0 && days <= i64::from(threshold));
            }
            let expected = offsets
                .iter()
                .filter(|d| **d >= 0 && **d <= i64::from(threshold))
                .count();
            prop_assert_eq!(picked.len(), expected);
        }
    }
}
