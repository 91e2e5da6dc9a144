//! Entity trait: things tracked by identity rather than by value.

/// Something that keeps its identity while its fields change or repeat.
///
/// Two cartons of "Milk" with the same expiry are still two inventory items.
pub trait Entity {
    /// Ids are ordered and printable so sets of entities have a stable key.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Display + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
