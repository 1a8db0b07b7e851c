//! Identifier generation for stored records

use std::sync::{Arc, Mutex, PoisonError};

/// Identifier type shared by dishes and orders
pub type RecordId = u64;

/// Issues record ids
///
/// The next id is one past the larger of the highest id currently stored and
/// the highest id this generator ever issued, so ids of deleted records are
/// never handed out again.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_issued: RecordId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose first id is `highest + 1`
    pub fn starting_after(highest: RecordId) -> Self {
        Self {
            last_issued: highest,
        }
    }

    /// Produce a fresh id given the ids currently present in the store
    pub fn next_id(&mut self, existing: impl IntoIterator<Item = RecordId>) -> RecordId {
        let highest = existing
            .into_iter()
            .max()
            .unwrap_or(0)
            .max(self.last_issued);
        self.last_issued = highest + 1;
        self.last_issued
    }
}

/// An [`IdGenerator`] shared by several stores
///
/// Every clone draws from the same sequence, so a dish and an order never
/// receive the same id.
#[derive(Debug, Clone, Default)]
pub struct SharedIdGenerator {
    inner: Arc<Mutex<IdGenerator>>,
}

impl SharedIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_after(highest: RecordId) -> Self {
        Self {
            inner: Arc::new(Mutex::new(IdGenerator::starting_after(highest))),
        }
    }

    /// Produce a fresh id given the ids currently present in the calling store
    pub fn next_id(&self, existing: impl IntoIterator<Item = RecordId>) -> RecordId {
        // the generator holds a single counter, so a poisoned lock is still consistent
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_id(existing)
    }
}
