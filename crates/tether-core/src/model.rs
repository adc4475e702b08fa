//! # Reactive models
//!
//! A model is plain Rust state that can be created from, and turned back
//! into, a JSON snapshot. `Store<M>` wraps one live instance in a signal so
//! every holder of the handle sees the same state and can subscribe to
//! changes.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use tether_core::*;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Todo {
//!     title: String,
//!     done: bool,
//! }
//! impl Model for Todo {}
//!
//! let todo = Store::<Todo>::create(&json!({ "title": "write docs" })).unwrap();
//! todo.update(|t| t.done = true);
//! assert_eq!(todo.snapshot().unwrap(), json!({ "title": "write docs", "done": true }));
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::effects::Dispose;
use crate::error::ModelError;
use crate::signal::Signal;

/// Plain data a model instance is created from.
pub type Snapshot = serde_json::Value;

/// The empty object snapshot, `{}`.
pub fn empty_snapshot() -> Snapshot {
    Snapshot::Object(serde_json::Map::new())
}

/// Shape of a model type. The defaults go through serde; override them when
/// a model needs validation or derived fields on creation.
pub trait Model: Serialize + DeserializeOwned + 'static {
    fn name() -> &'static str {
        type_name::<Self>()
    }

    fn create(snapshot: &Snapshot) -> Result<Self, ModelError> {
        serde_json::from_value(snapshot.clone()).map_err(|source| ModelError::InvalidSnapshot {
            model: Self::name(),
            source: Arc::new(source),
        })
    }

    fn snapshot(&self) -> Result<Snapshot, ModelError> {
        serde_json::to_value(self).map_err(|source| ModelError::Serialize {
            model: Self::name(),
            source: Arc::new(source),
        })
    }
}

/// A live, shared model instance.
pub struct Store<M: Model> {
    state: Signal<M>,
}

impl<M: Model> Store<M> {
    pub fn new(model: M) -> Self {
        Self {
            state: Signal::new(model),
        }
    }

    pub fn create(snapshot: &Snapshot) -> Result<Self, ModelError> {
        M::create(snapshot).map(Self::new)
    }

    pub fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        self.state.with(f)
    }

    pub fn get(&self) -> M
    where
        M: Clone,
    {
        self.state.get()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        self.state.update(f)
    }

    pub fn snapshot(&self) -> Result<Snapshot, ModelError> {
        self.state.with(M::snapshot)
    }

    /// Replaces the whole state with one created from `snapshot`. On error
    /// the current state is left untouched.
    pub fn apply_snapshot(&self, snapshot: &Snapshot) -> Result<(), ModelError> {
        let next = M::create(snapshot)?;
        self.state.set(next);
        Ok(())
    }

    /// Calls `f` after every change. Running the returned `Dispose` (or
    /// letting the enclosing component scope do it) unsubscribes.
    pub fn subscribe(&self, f: impl Fn(&M) + 'static) -> Dispose {
        let id = self.state.subscribe(f);
        let state = self.state.clone();
        Dispose::new(move || {
            state.unsubscribe(id);
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.subscriber_count()
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Signal::ptr_eq(&a.state, &b.state)
    }
}

impl<M: Model> Clone for Store<M> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<M: Model> fmt::Debug for Store<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").field("model", &M::name()).finish_non_exhaustive()
    }
}
