//! Identifier generation for cart items and donations.
//!
//! Identifiers are millisecond timestamps bumped past the last issued value, so they
//! stay time-shaped but are strictly increasing. Two items created in the same
//! millisecond (every member of a checkout batch, typically) still get distinct ids.

use chrono::{DateTime, Utc};

/// Identifier shared by cart items and donations.
pub type EntryId = u64;

/// Issues strictly increasing identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdGenerator {
    last: EntryId,
}

impl IdGenerator {
    /// Creates a generator that will only issue ids greater than `last`.
    #[must_use]
    pub const fn starting_after(last: EntryId) -> Self {
        Self { last }
    }

    /// Issues the next identifier for an entry created at `now`.
    ///
    /// Once the id space is exhausted the generator stays at `EntryId::MAX`;
    /// callers holding the issued ids must check for reuse at that point.
    pub fn next(&mut self, now: DateTime<Utc>) -> EntryId {
        let millis = EntryId::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last = millis.max(self.last.saturating_add(1));
        self.last
    }

    /// Raises the floor so that `id` is never issued again.
    pub fn observe(&mut self, id: EntryId) {
        self.last = self.last.max(id);
    }

    /// The most recently issued (or observed) identifier.
    #[must_use]
    pub const fn last(&self) -> EntryId {
        self.last
    }
}
