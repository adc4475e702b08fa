//! # Tether stores
//!
//! Identifier‑keyed stores for Tether components. A component creates a
//! model instance, publishes it for its subtree, and any nested component
//! reads it back by model type or by an explicit identifier:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use tether_core::{Component, Model};
//! use tether_store::*;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Counter {
//!     count: i64,
//! }
//! impl Model for Counter {}
//!
//! let app = Component::new("App");
//! let label = Component::new("Label");
//!
//! let shown = app.render(|| -> Result<_, StoreError> {
//!     let store = use_create_store_from::<Counter>(json!({ "count": 3 }))?;
//!     let provider = use_provider::<Counter>()?;
//!     provider.provide(store, || {
//!         label.render(|| use_store_map::<Counter, _>(|c| c.count))
//!     })
//! });
//! assert_eq!(shown.unwrap(), Some(3));
//! ```
//!
//! ## Pieces
//!
//! - [`ContextFactory`] / [`Provider`]: a publish/read pair over one
//!   composition local, with a default for readers outside any publish.
//! - [`StoreRegistry`]: hands out one context per [`Identifier`], created
//!   lazily and kept until cleared.
//! - `use_*` hooks: the registry plus `remember`, for use inside
//!   `Component::render`.
//!
//! Everything here is single‑threaded: handles are `Rc`‑based and each
//! thread has its own default registry.

pub mod context;
pub mod error;
pub mod hooks;
pub mod identifier;
pub mod registry;
mod tests;

pub use context::{ContextFactory, Provider, create_context_factory};
pub use error::StoreError;
pub use hooks::*;
pub use identifier::{Identifier, ModelKey, ObjectKey};
pub use registry::{StoreContext, StoreRegistry, reset_stores, retrieve_store, with_registry};
