//! Reducer traits: a decision step and an evolution step over one root.

/// The consistency boundary every command targets.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Count of events applied since the root was created.
    fn version(&self) -> u64;
}

/// Pure state machine over an [`AggregateRoot`].
///
/// `handle` looks at current state and a command and answers with events or a
/// rejection; `apply` folds one event into state. Neither performs IO. Ids,
/// timestamps and "today" are chosen by the caller and carried in the command,
/// so replaying the same events always yields the same state.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Fold one event into state and bump `version()` by one.
    fn apply(&mut self, event: &Self::Event);

    /// Decide without mutating. An empty vector means the command changes nothing.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}
