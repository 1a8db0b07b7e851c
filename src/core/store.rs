//! In-memory record stores
//!
//! A [`RecordStore`] is a cheaply clonable handle onto an ordered
//! [`Collection`] guarded by a `RwLock`. Handlers receive store handles
//! through axum state; nothing is global.

use crate::core::error::{BistroError, BistroResult, EntityError};
use crate::core::id::{RecordId, SharedIdGenerator};
use crate::core::pipeline::{RequestContext, Step};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A record kept in a store
pub trait Record: Clone + Serialize + Send + Sync + 'static {
    /// Display name used in messages (e.g. "Dish")
    fn entity_type() -> &'static str;

    /// Plural path segment (e.g. "dishes")
    fn resource_name() -> &'static str;

    fn id(&self) -> RecordId;
}

/// Ordered records plus the id generator that feeds them
#[derive(Debug)]
pub struct Collection<T> {
    records: Vec<T>,
    ids: SharedIdGenerator,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<T>) -> Self {
        Self::with_ids(records, SharedIdGenerator::new())
    }

    /// Records that draw ids from a generator other collections may share
    pub fn with_ids(records: Vec<T>, ids: SharedIdGenerator) -> Self {
        Self { records, ids }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.records.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Append a record built around the next free id
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> &T {
        let id = self.ids.next_id(self.records.iter().map(|r| r.id()));
        self.records.push(build(id));
        &self.records[self.records.len() - 1]
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to one resource's collection
///
/// Uses RwLock for thread-safe access. A request that runs a pipeline holds
/// the write lock from its first step to the end of its terminal handler.
///
/// Terminal handlers only touch the collection after every step has passed,
/// and each mutation is a single push, replace, or remove. A handler that
/// panics therefore never leaves a half-applied change behind, and a poisoned
/// lock is recovered instead of failing every later request.
#[derive(Clone)]
pub struct RecordStore<T> {
    inner: Arc<RwLock<Collection<T>>>,
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self::with_shared_ids(records, SharedIdGenerator::new())
    }

    /// A store whose new records draw ids from `ids`
    pub fn with_shared_ids(records: Vec<T>, ids: SharedIdGenerator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection::with_ids(records, ids))),
        }
    }

    /// Snapshot of every record, in store order
    pub fn list(&self) -> Vec<T> {
        self.read().records().to_vec()
    }

    pub fn get(&self, id: RecordId) -> Option<T> {
        let collection = self.read();
        collection.position(id).map(|i| collection.records()[i].clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Exclusive access for the duration of one request
    pub fn write(&self) -> RwLockWriteGuard<'_, Collection<T>> {
        self.inner.write().unwrap_or_else(|poisoned| {
            self.recover();
            poisoned.into_inner()
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Collection<T>> {
        self.inner.read().unwrap_or_else(|poisoned| {
            self.recover();
            poisoned.into_inner()
        })
    }

    fn recover(&self) {
        tracing::warn!(
            resource = T::resource_name(),
            "recovering store after a panicked request"
        );
        self.inner.clear_poison();
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lookup step: find the record named by the route id
///
/// Route ids compare numerically; one that is not a number matches nothing.
pub struct ResourceExists;

impl<T: Record> Step<T> for ResourceExists {
    fn name(&self) -> &'static str {
        "resource_exists"
    }

    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()> {
        let route_id = ctx.route_id().ok_or_else(|| {
            BistroError::Internal("resource lookup without a route id".to_string())
        })?;

        let index = route_id
            .parse::<RecordId>()
            .ok()
            .and_then(|id| ctx.position(id));

        match index {
            Some(index) => {
                ctx.locate(index);
                Ok(())
            }
            None => Err(EntityError::NotFound {
                entity_type: T::entity_type(),
                id: route_id.to_string(),
            }
            .into()),
        }
    }
}
