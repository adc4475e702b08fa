//! # Context factories
//!
//! A `ContextFactory<T>` pairs a publish capability (`Provider<T>`) with a
//! read capability over one composition local:
//!
//! ```rust
//! use tether_store::ContextFactory;
//!
//! let ctx = ContextFactory::new(0);
//! let provider = ctx.provider();
//!
//! assert_eq!(ctx.read(), 0);
//! provider.provide(5, || {
//!     assert_eq!(ctx.read(), 5);
//!     assert_eq!(ctx.use_read(|v| v * 2), 10);
//! });
//! ```

use std::fmt;
use std::rc::Rc;

use tether_core::{Local, composition_local_of};

pub struct ContextFactory<T: 'static> {
    local: Rc<Local<T>>,
}

impl<T: 'static> ContextFactory<T> {
    pub fn new(default: T) -> Self {
        Self {
            local: Rc::new(composition_local_of(default)),
        }
    }

    pub fn provider(&self) -> Provider<T> {
        Provider {
            local: self.local.clone(),
        }
    }

    /// Nearest published value, or the default.
    pub fn read(&self) -> T
    where
        T: Clone,
    {
        self.local.current()
    }

    /// `projection(read())`. Panics in `projection` are not caught.
    pub fn use_read<R>(&self, projection: impl FnOnce(T) -> R) -> R
    where
        T: Clone,
    {
        projection(self.read())
    }

    /// Borrows the nearest published value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.local.with(f)
    }

    pub fn is_provided(&self) -> bool {
        self.local.is_provided()
    }

    pub fn default_value(&self) -> &T {
        self.local.default_value()
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.local, &b.local)
    }
}

/// Nothing published means `None`.
impl<T: 'static> Default for ContextFactory<Option<T>> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: 'static> Clone for ContextFactory<T> {
    fn clone(&self) -> Self {
        Self {
            local: self.local.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for ContextFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextFactory")
            .field("local", &self.local)
            .finish()
    }
}

pub fn create_context_factory<T: 'static>(default: T) -> ContextFactory<T> {
    ContextFactory::new(default)
}

/// Publish side of a [`ContextFactory`].
pub struct Provider<T: 'static> {
    local: Rc<Local<T>>,
}

impl<T: 'static> Provider<T> {
    /// Makes `value` visible to every read of the paired factory while
    /// `body` runs. Inner provides shadow outer ones.
    pub fn provide<R>(&self, value: impl Into<T>, body: impl FnOnce() -> R) -> R {
        self.local.provide(value.into(), body)
    }
}

impl<T: 'static> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            local: self.local.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").field("local", &self.local).finish()
    }
}
