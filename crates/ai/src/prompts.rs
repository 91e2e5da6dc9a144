//! Prompt text and response schemas for each gateway operation.

use serde_json::{json, Value};

use crate::snapshot::PantrySnapshot;
use crate::types::Category;

pub fn recipe_prompt(pantry: &PantrySnapshot) -> String {
    let ingredients = pantry
        .items()
        .iter()
        .map(|item| item.prompt_line())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a creative chef's assistant specialized in reducing food waste. \
I have the following ingredients in my kitchen. Please suggest three distinct recipes \
that primarily use these ingredients, prioritizing those closest to their expiration date. \
Also consider common pantry staples I might have (like oil, salt, pepper, flour, sugar, spices).

My ingredients:
{ingredients}

For each recipe, provide a name, a short, enticing description (1-2 sentences), a list of \
all ingredients needed, and clear, step-by-step instructions. Structure your response as a \
JSON array of objects."
    )
}

pub const RECEIPT_PROMPT: &str = "You are an intelligent receipt scanner for a kitchen inventory app. \
Analyze this image of a grocery receipt and extract only the food items.

For each item, provide its name and quantity. Ignore all non-food items, taxes, totals, \
store information, discounts, and other irrelevant details.

Structure your response as a JSON array of objects, where each object has 'name' and \
'quantity' keys. If no food items are found, return an empty array.";

pub fn categorize_prompt(names: &[String]) -> String {
    let categories = Category::ALL
        .iter()
        .map(|c| format!("'{}'", c.label()))
        .collect::<Vec<_>>()
        .join(", ");
    let list = Value::from(names.to_vec());

    format!(
        "You are a food categorization expert for a kitchen inventory app. For each item in \
the list below, classify it into ONE of the following categories: {categories}.

Analyze this list: {list}

Return your response as a JSON array of objects, where each object has a 'name' and \
'category' key. The 'name' must exactly match the item name provided."
    )
}

pub fn recipe_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "recipeName": { "type": "STRING" },
                "description": { "type": "STRING" },
                "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
                "instructions": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["recipeName", "description", "ingredients", "instructions"]
        }
    })
}

pub fn scanned_items_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "quantity": { "type": "STRING" }
            },
            "required": ["name", "quantity"]
        }
    })
}

pub fn categories_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "category": { "type": "STRING" }
            },
            "required": ["name", "category"]
        }
    })
}
