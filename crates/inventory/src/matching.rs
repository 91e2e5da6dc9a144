//! Ingredient-to-inventory matching used when a recipe is marked as cooked.
//!
//! This is a heuristic: an inventory item counts as used when its name appears,
//! case-insensitively, anywhere inside an ingredient line. "Peppers" is not
//! found in "black pepper", while "Pepper" would match "bell peppers".
//! Callers get exactly that behavior; nothing here tries to be smarter.

/// Whether `ingredient` mentions the inventory item called `item_name`.
///
/// A blank name never matches (it would otherwise be a substring of everything).
pub fn ingredient_mentions(ingredient: &str, item_name: &str) -> bool {
    let needle = item_name.trim();
    if needle.is_empty() {
        return false;
    }
    ingredient.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether any of `ingredients` mentions `item_name`.
pub fn is_used_by<S: AsRef<str>>(item_name: &str, ingredients: &[S]) -> bool {
    ingredients
        .iter()
        .any(|ingredient| ingredient_mentions(ingredient.as_ref(), item_name))
}
