//! Ordered request-processing pipelines
//!
//! A [`Pipeline`] is a fixed list of [`Step`]s followed by a terminal
//! handler. Steps inspect the per-request [`RequestContext`] and either pass
//! or halt with a [`BistroError`]. The runner stops at the first failing step
//! and never reaches the terminal handler in that case; when every step
//! passes, the terminal handler receives the context and may mutate the
//! store.
//!
//! ```text
//! request ─▶ step 1 ─▶ step 2 ─▶ ... ─▶ step n ─▶ terminal handler ─▶ response
//!              │         │                │
//!              └─────────┴──── Err ───────┴──▶ error response
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let pipeline = Pipeline::<Dish>::new("dish.read").step(ResourceExists);
//!
//! let mut dishes = store.write();
//! let ctx = RequestContext::new(&mut dishes, &data).with_route_id(&dish_id);
//! let dish = pipeline.run(ctx, |ctx| Ok(ctx.located()?.clone()))?;
//! ```

use crate::core::error::{BistroError, BistroResult};
use crate::core::id::RecordId;
use crate::core::store::{Collection, Record};
use serde_json::{Map, Value};

/// A single validation or lookup step
pub trait Step<T>: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Pass with `Ok(())` or halt the pipeline with an error
    fn apply(&self, ctx: &mut RequestContext<'_, T>) -> BistroResult<()>;
}

/// Per-request state shared between steps and the terminal handler
pub struct RequestContext<'a, T> {
    collection: &'a mut Collection<T>,
    data: &'a Map<String, Value>,
    route_id: Option<&'a str>,
    located: Option<usize>,
}

impl<'a, T: Record> RequestContext<'a, T> {
    pub fn new(collection: &'a mut Collection<T>, data: &'a Map<String, Value>) -> Self {
        Self {
            collection,
            data,
            route_id: None,
            located: None,
        }
    }

    /// Attach the identifier taken from the request path
    pub fn with_route_id(mut self, route_id: &'a str) -> Self {
        self.route_id = Some(route_id);
        self
    }

    pub fn records(&self) -> &[T] {
        self.collection.records()
    }

    /// Index of the stored record with this id
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.collection.position(id)
    }

    /// The unwrapped `data` object of the request body
    pub fn data(&self) -> &'a Map<String, Value> {
        self.data
    }

    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.data.get(name)
    }

    pub fn route_id(&self) -> Option<&'a str> {
        self.route_id
    }

    /// Remember the position of the record a lookup step found
    pub fn locate(&mut self, index: usize) {
        self.located = Some(index);
    }

    /// The record found by a lookup step
    pub fn located(&self) -> BistroResult<&T> {
        let index = self.located_index()?;
        self.collection
            .records()
            .get(index)
            .ok_or_else(|| BistroError::Internal("located record vanished".to_string()))
    }

    pub fn located_mut(&mut self) -> BistroResult<&mut T> {
        let index = self.located_index()?;
        self.collection
            .get_mut(index)
            .ok_or_else(|| BistroError::Internal("located record vanished".to_string()))
    }

    /// Remove the record found by a lookup step from the store
    pub fn remove_located(&mut self) -> BistroResult<T> {
        let index = self.located_index()?;
        self.located = None;
        self.collection
            .remove(index)
            .ok_or_else(|| BistroError::Internal("located record vanished".to_string()))
    }

    /// Append a record built around a freshly generated id
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> &T {
        self.collection.insert_with(build)
    }

    fn located_index(&self) -> BistroResult<usize> {
        self.located.ok_or_else(|| {
            BistroError::Internal(format!(
                "no {} was located for this request",
                T::entity_type()
            ))
        })
    }
}

/// An ordered list of steps for one operation
pub struct Pipeline<T> {
    name: &'static str,
    steps: Vec<Box<dyn Step<T>>>,
}

impl<T: Record> Pipeline<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Append a step; steps run in the order they are added
    pub fn step(mut self, step: impl Step<T> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step, then the terminal handler
    ///
    /// The first failing step ends the run with its error.
    pub fn run<'a, R>(
        &self,
        mut ctx: RequestContext<'a, T>,
        terminal: impl FnOnce(RequestContext<'a, T>) -> BistroResult<R>,
    ) -> BistroResult<R> {
        for step in &self.steps {
            if let Err(err) = step.apply(&mut ctx) {
                tracing::debug!(
                    pipeline = self.name,
                    step = step.name(),
                    error = %err,
                    "pipeline halted"
                );
                return Err(err);
            }
        }

        terminal(ctx)
    }
}
