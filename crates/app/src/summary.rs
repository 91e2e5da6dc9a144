//! Per-category breakdown of cooked items.

use serde::Serialize;

use larder_ai::{CategorizedItem, Category};

/// One slice of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    /// Whole-number share of the total, rounded half up.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumptionSummary {
    pub total: usize,
    /// In order of first appearance.
    pub shares: Vec<CategoryShare>,
}

impl ConsumptionSummary {
    /// `None` for an empty list.
    pub fn from_categorized(items: &[CategorizedItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let mut shares: Vec<CategoryShare> = Vec::new();
        for item in items {
            match shares.iter_mut().find(|share| share.category == item.category) {
                Some(share) => share.count += 1,
                None => shares.push(CategoryShare {
                    category: item.category,
                    count: 1,
                    percent: 0,
                }),
            }
        }

        let total = items.len();
        for share in &mut shares {
            share.percent = percent_of(share.count, total);
        }

        Some(Self { total, shares })
    }

    pub fn share(&self, category: Category) -> Option<&CategoryShare> {
        self.shares.iter().find(|share| share.category == category)
    }
}

fn percent_of(count: usize, total: usize) -> u32 {
    let rounded = (count * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
