//! `larder-ai`
//!
//! **Responsibility:** boundary to the generative-AI service.
//!
//! This crate is intentionally **not** part of the inventory model:
//! - It must not depend on the kitchen aggregate; callers hand it snapshots.
//! - It must not mutate domain state.
//! - It returns suggestions and parsed data, never domain events.

pub mod error;
pub mod gateway;
pub mod gemini;
pub mod prompts;
pub mod snapshot;
pub mod stub;
pub mod types;

pub use error::{AiError, AiOperation};
pub use gateway::AiGateway;
pub use gemini::GeminiGateway;
pub use snapshot::{PantryItem, PantrySnapshot};
pub use stub::{StubCall, StubGateway};
pub use types::{CategorizedItem, Category, ReceiptImage, Recipe, ScannedItem};
