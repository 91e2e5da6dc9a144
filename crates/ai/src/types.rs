//! Payloads exchanged with the AI gateway.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use larder_core::ValueObject;

use crate::error::AiError;

/// A suggested recipe. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "recipeName")]
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl ValueObject for Recipe {}

/// A food line read off a receipt, awaiting user review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedItem {
    pub name: String,
    pub quantity: String,
}

impl ValueObject for ScannedItem {}

/// Closed set of food categories used by the consumption summary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    MeatAndFish,
    Vegetable,
    Fruit,
    DairyAndEggs,
    GrainsAndCarbs,
    PantryStaples,
    Beverages,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::MeatAndFish,
        Category::Vegetable,
        Category::Fruit,
        Category::DairyAndEggs,
        Category::GrainsAndCarbs,
        Category::PantryStaples,
        Category::Beverages,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::MeatAndFish => "Meat & Fish",
            Category::Vegetable => "Vegetable",
            Category::Fruit => "Fruit",
            Category::DairyAndEggs => "Dairy & Eggs",
            Category::GrainsAndCarbs => "Grains & Carbs",
            Category::PantryStaples => "Pantry Staples",
            Category::Beverages => "Beverages",
            Category::Other => "Other",
        }
    }

    /// Exact label lookup (case-insensitive, surrounding whitespace ignored).
    pub fn parse(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
    }

    /// Like [`Category::parse`], but anything outside the set becomes `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or_else(|| {
            tracing::warn!(label, "unknown category from model; counting as Other");
            Category::Other
        })
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedItem {
    pub name: String,
    pub category: Category,
}

/// A receipt photo to be parsed.
#[derive(Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    bytes: Vec<u8>,
    media_type: String,
}

impl ReceiptImage {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Result<Self, AiError> {
        let media_type = media_type.into().trim().to_ascii_lowercase();
        if bytes.is_empty() {
            return Err(AiError::InvalidInput("receipt image is empty".to_string()));
        }
        if !media_type.starts_with("image/") || media_type.len() == "image/".len() {
            return Err(AiError::InvalidInput(format!(
                "unsupported media type {media_type:?} (expected image/*)"
            )));
        }
        Ok(Self { bytes, media_type })
    }

    /// Build from base64 payload plus media type.
    pub fn from_base64(data: &str, media_type: impl Into<String>) -> Result<Self, AiError> {
        let bytes = BASE64
            .decode(data.trim())
            .map_err(|e| AiError::InvalidInput(format!("receipt image is not valid base64: {e}")))?;
        Self::new(bytes, media_type)
    }

    /// Build from a `data:<media type>;base64,<data>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, AiError> {
        let invalid = || AiError::InvalidInput("could not parse file data".to_string());
        let rest = url.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (header, data) = rest.split_once(',').ok_or_else(invalid)?;
        let media_type = header.strip_suffix(";base64").ok_or_else(invalid)?;
        if media_type.is_empty() || data.is_empty() {
            return Err(invalid());
        }
        Self::from_base64(data, media_type)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

impl core::fmt::Debug for ReceiptImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReceiptImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
