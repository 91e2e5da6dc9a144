use chrono::NaiveDate;

use larder_inventory::{offset_date, NewItem};

/// Name, quantity, days until expiry.
const DEMO_ITEMS: [(&str, &str, i64); 4] = [
    ("Chicken Breasts", "2 lbs", 3),
    ("Broccoli", "1 head", 5),
    ("Bell Peppers", "2", 7),
    ("Yogurt", "500g", 1),
];

/// Starter inventory for a fresh session, dated relative to `today`.
pub fn demo_inventory(today: NaiveDate) -> Vec<NewItem> {
    DEMO_ITEMS
        .iter()
        .map(|(name, quantity, days)| NewItem::new(*name, *quantity, offset_date(today, *days)))
        .collect()
}
