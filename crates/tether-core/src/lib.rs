//! # Components, Locals, and Models
//!
//! Tether's core is the small runtime the store helpers in `tether-store`
//! are built on. There are four pieces:
//!
//! - `Local<T>`: a tree‑scoped value, provided for the extent of a
//!   closure, read by anything running inside it.
//! - `Component` + `remember*`: per‑instance storage that survives
//!   re‑renders until the instance is disposed.
//! - `Scope` / `effect`: cleanups bound to a component instance.
//! - `Model` / `Store<M>`: reactive model instances created from plain
//!   JSON snapshots.
//!
//! ## Remembered state
//!
//! ```rust
//! use tether_core::*;
//!
//! let view = Component::new("CounterView");
//! for _ in 0..3 {
//!     view.render(|| {
//!         let clicks = remember_state(|| 0);
//!         *clicks.borrow_mut() += 1;
//!     });
//! }
//! let total = view.render(|| *remember_state(|| 0).borrow());
//! assert_eq!(total, 3);
//! ```
//!
//! - `remember` and `remember_state` are order‑based: the Nth call in a
//!   render always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key‑based and more
//!   stable across conditional branches.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use tether_core::*;
//!
//! let view = Component::new("Example");
//! view.render(|| {
//!     remember(|| effect(|| {
//!         log::info!("Mounted Example");
//!         on_unmount(|| log::info!("Unmounted Example"))
//!     }));
//! });
//! view.dispose(); // runs the unmount cleanup
//! ```

pub mod effects;
pub mod error;
pub mod locals;
pub mod model;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;

pub use effects::*;
pub use error::*;
pub use locals::*;
pub use model::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
