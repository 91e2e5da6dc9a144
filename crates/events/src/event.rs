use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate.
///
/// Payloads can be large (a whole inventory item), so the name alone is what
/// gets logged.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, e.g. "kitchen.item.added".
    fn event_type(&self) -> &'static str;

    /// Payload schema revision.
    fn version(&self) -> u32;

    /// When the command that produced it was issued.
    fn occurred_at(&self) -> DateTime<Utc>;
}
