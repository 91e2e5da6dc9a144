/// Run one command against an aggregate in place.
///
/// Calls `handle` and, if it accepts, `apply`s each emitted event in order.
/// A rejected command leaves the aggregate untouched. The events are returned so
/// callers can log what changed.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: larder_core::Aggregate,
{
    let events = aggregate.handle(command)?;
    for event in &events {
        aggregate.apply(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{Aggregate, AggregateRoot};

    /// Shelf holding at most `capacity` jars.
    #[derive(Debug)]
    struct Shelf {
        jars: u32,
        capacity: u32,
        version: u64,
    }

    impl AggregateRoot for Shelf {
        type Id = u8;

        fn id(&self) -> &u8 {
            &0
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    impl Aggregate for Shelf {
        type Command = u32;
        type Event = ();
        type Error = String;

        fn apply(&mut self, _: &()) {
            self.jars += 1;
            self.version += 1;
        }

        fn handle(&self, add: &u32) -> Result<Vec<()>, String> {
            if self.jars + add > self.capacity {
                return Err("shelf full".to_owned());
            }
            Ok(vec![(); *add as usize])
        }
    }

    #[test]
    fn applies_every_emitted_event() {
        let mut shelf = Shelf { jars: 0, capacity: 3, version: 0 };
        let events = execute(&mut shelf, &2).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(shelf.jars, 2);
        assert_eq!(shelf.version(), 2);
    }

    #[test]
    fn rejection_leaves_state_alone() {
        let mut shelf = Shelf { jars: 2, capacity: 3, version: 5 };
        assert_eq!(execute(&mut shelf, &2).unwrap_err(), "shelf full");
        assert_eq!(shelf.jars, 2);
        assert_eq!(shelf.version(), 5);
    }

    #[test]
    fn empty_decision_is_a_no_op() {
        let mut shelf = Shelf { jars: 1, capacity: 3, version: 1 };
        assert!(execute(&mut shelf, &0).unwrap().is_empty());
        assert_eq!(shelf.version(), 1);
    }
}
