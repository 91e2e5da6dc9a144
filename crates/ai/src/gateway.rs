use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AiError;
use crate::snapshot::PantrySnapshot;
use crate::types::{CategorizedItem, ReceiptImage, Recipe, ScannedItem};

/// Request-in/response-out access to the generative model.
///
/// Each call is a single round trip: no retries, no streaming, no timeout policy.
/// Failures come back as the operation's generic [`AiError`].
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Short name for logs (e.g. "gemini", "stub").
    fn name(&self) -> &'static str;

    /// Recipes that use up the pantry, nearest-to-expiry items first.
    async fn suggest_recipes(&self, pantry: &PantrySnapshot) -> Result<Vec<Recipe>, AiError>;

    /// Food lines read from a receipt photo. An empty list means nothing was found.
    async fn parse_receipt(&self, image: &ReceiptImage) -> Result<Vec<ScannedItem>, AiError>;

    /// One category per input name.
    async fn categorize_items(&self, names: &[String]) -> Result<Vec<CategorizedItem>, AiError>;
}

#[async_trait]
impl<G> AiGateway for Arc<G>
where
    G: AiGateway + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn suggest_recipes(&self, pantry: &PantrySnapshot) -> Result<Vec<Recipe>, AiError> {
        (**self).suggest_recipes(pantry).await
    }

    async fn parse_receipt(&self, image: &ReceiptImage) -> Result<Vec<ScannedItem>, AiError> {
        (**self).parse_receipt(image).await
    }

    async fn categorize_items(&self, names: &[String]) -> Result<Vec<CategorizedItem>, AiError> {
        (**self).categorize_items(names).await
    }
}
