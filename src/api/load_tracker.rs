use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Handle for one in-flight file load.
///
/// The generation distinguishes a load from a later load of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    name: String,
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the latest load generation per dataset name.
#[derive(Debug, Clone, Default)]
pub(super) struct LoadTracker {
    pending: HashMap<String, u64>,
    next_generation: u64,
}

impl LoadTracker {
    pub(super) fn begin(&mut self, name: &str) -> LoadTicket {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.saturating_add(1);
        self.pending.insert(name.to_owned(), generation);
        LoadTicket {
            name: name.to_owned(),
            generation,
        }
    }

    /// Consumes `ticket` if it is still the latest load for its name.
    ///
    /// Returns `false` for superseded, cancelled or already completed tickets.
    pub(super) fn finish(&mut self, ticket: &LoadTicket) -> bool {
        if self.pending.get(&ticket.name) == Some(&ticket.generation) {
            self.pending.remove(&ticket.name);
            true
        } else {
            false
        }
    }

    pub(super) fn cancel(&mut self, name: &str) -> bool {
        self.pending.remove(name).is_some()
    }

    pub(super) fn is_pending(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }
}
