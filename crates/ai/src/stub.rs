//! Deterministic in-process gateway for tests and offline demos.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AiError, AiOperation};
use crate::gateway::AiGateway;
use crate::snapshot::PantrySnapshot;
use crate::types::{CategorizedItem, Category, ReceiptImage, Recipe, ScannedItem};

/// A request the stub received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubCall {
    SuggestRecipes { pantry: PantrySnapshot },
    ParseReceipt { media_type: String, bytes: usize },
    CategorizeItems { names: Vec<String> },
}

/// Gateway returning canned answers.
///
/// Categorization answers one entry per input name, looking each name up
/// case-insensitively and falling back to [`Category::Other`].
#[derive(Debug, Default)]
pub struct StubGateway {
    recipes: Vec<Recipe>,
    scanned: Vec<ScannedItem>,
    categories: HashMap<String, Category>,
    failing: Vec<AiOperation>,
    calls: Mutex<Vec<StubCall>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    #[must_use]
    pub fn with_scanned_items(mut self, items: Vec<ScannedItem>) -> Self {
        self.scanned = items;
        self
    }

    #[must_use]
    pub fn with_category(mut self, name: &str, category: Category) -> Self {
        self.categories.insert(name.to_lowercase(), category);
        self
    }

    /// Make `op` fail with its generic error.
    #[must_use]
    pub fn failing_on(mut self, op: AiOperation) -> Self {
        self.failing.push(op);
        self
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: StubCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, op: AiOperation) -> Result<(), AiError> {
        if self.failing.contains(&op) {
            return Err(op.failure("stub configured to fail"));
        }
        Ok(())
    }
}

#[async_trait]
impl AiGateway for StubGateway {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn suggest_recipes(&self, pantry: &PantrySnapshot) -> Result<Vec<Recipe>, AiError> {
        self.record(StubCall::SuggestRecipes {
            pantry: pantry.clone(),
        });
        self.check(AiOperation::SuggestRecipes)?;
        Ok(self.recipes.clone())
    }

    async fn parse_receipt(&self, image: &ReceiptImage) -> Result<Vec<ScannedItem>, AiError> {
        self.record(StubCall::ParseReceipt {
            media_type: image.media_type().to_owned(),
            bytes: image.bytes().len(),
        });
        self.check(AiOperation::ParseReceipt)?;
        Ok(self.scanned.clone())
    }

    async fn categorize_items(&self, names: &[String]) -> Result<Vec<CategorizedItem>, AiError> {
        self.record(StubCall::CategorizeItems {
            names: names.to_vec(),
        });
        self.check(AiOperation::CategorizeItems)?;
        Ok(names
            .iter()
            .map(|name| CategorizedItem {
                name: name.clone(),
                category: self
                    .categories
                    .get(&name.to_lowercase())
                    .copied()
                    .unwrap_or(Category::Other),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn categorizes_one_entry_per_name() {
        let stub = StubGateway::new().with_category("broccoli", Category::Vegetable);
        let names = vec!["Broccoli".to_string(), "Mystery".to_string(), "Broccoli".to_string()];

        let out = stub.categorize_items(&names).await.unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].category, Category::Vegetable);
        assert_eq!(out[1].category, Category::Other);
        assert_eq!(stub.calls(), vec![StubCall::CategorizeItems { names }]);
    }

    #[tokio::test]
    async fn configured_failure_uses_generic_error() {
        let stub = StubGateway::new().failing_on(AiOperation::SuggestRecipes);
        let err = stub.suggest_recipes(&PantrySnapshot::default()).await.unwrap_err();
        assert!(matches!(err, AiError::SuggestionFailed { .. }));
        assert_eq!(stub.calls().len(), 1);
    }
}
