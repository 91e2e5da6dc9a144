//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A recipe handed
/// back by the AI gateway is one: two recipes with the same name, ingredients and
/// steps are the same recipe. An inventory item is not; it is an [`Entity`]
/// identified by its id even when two items share a name.
///
/// [`Entity`]: crate::Entity
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
