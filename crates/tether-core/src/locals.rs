//! # Composition locals
//!
//! Tether keeps tree‑scoped values on a thread‑local stack of frames. A
//! value provided for a subtree is visible to every read executed while the
//! provider's closure runs, and disappears when it returns:
//!
//! ```rust
//! use tether_core::*;
//!
//! let accent = composition_local_of("grey");
//!
//! assert_eq!(accent.current(), "grey");
//! accent.provide("teal", || {
//!     assert_eq!(accent.current(), "teal");
//!     accent.provide("plum", || assert_eq!(accent.current(), "plum"));
//!     assert_eq!(accent.current(), "teal");
//! });
//! assert_eq!(accent.current(), "grey");
//! ```
//!
//! Two flavours share the same stack:
//!
//! - `Local<T>`: an explicit handle with its own identity and default.
//!   Two locals of the same type never see each other's values.
//! - `with_local::<T>` / `local::<T>()`: keyed by the Rust type, for
//!   ambient singletons such as an injected registry.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

/// Identity of a `Local`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalId(u64);

impl LocalId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "local#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LocalKey {
    Type(TypeId),
    Id(LocalId),
}

// Most frames carry a single provided value.
type LocalsFrame = SmallVec<[(LocalKey, Rc<dyn Any>); 2]>;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<LocalsFrame>> = const { RefCell::new(Vec::new()) };
}

fn with_locals_frame<R>(key: LocalKey, value: Rc<dyn Any>, f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| {
        let mut frame = LocalsFrame::new();
        frame.push((key, value));
        st.borrow_mut().push(frame);
    });
    let _guard = Guard;
    f()
}

/// Finds the innermost value for `key`. The stack borrow is released before
/// the caller touches the value, so readers may provide again.
fn lookup(key: LocalKey) -> Option<Rc<dyn Any>> {
    LOCALS_STACK.with(|st| {
        st.borrow().iter().rev().find_map(|frame| {
            frame
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        })
    })
}

/// Current nesting depth of provided locals on this thread.
pub fn locals_depth() -> usize {
    LOCALS_STACK.with(|st| st.borrow().len())
}

/// A tree‑scoped value with a default, created by [`composition_local_of`].
pub struct Local<T: 'static> {
    id: LocalId,
    default: Rc<T>,
}

impl<T: 'static> Local<T> {
    pub fn new(default: T) -> Self {
        Self {
            id: LocalId::next(),
            default: Rc::new(default),
        }
    }

    pub fn id(&self) -> LocalId {
        self.id
    }

    /// Makes `value` the current value of this local while `f` runs.
    pub fn provide<R>(&self, value: T, f: impl FnOnce() -> R) -> R {
        log::trace!("providing {}", self.id);
        with_locals_frame(LocalKey::Id(self.id), Rc::new(value), f)
    }

    /// Borrows the innermost provided value, or the default.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match lookup(LocalKey::Id(self.id)) {
            Some(v) => match v.downcast_ref::<T>() {
                Some(t) => f(t),
                None => f(self.default.as_ref()),
            },
            None => f(self.default.as_ref()),
        }
    }

    pub fn current(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// True when some enclosing scope provided a value for this local.
    pub fn is_provided(&self) -> bool {
        lookup(LocalKey::Id(self.id)).is_some()
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T: 'static> Clone for Local<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            default: self.default.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for Local<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Local")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

pub fn composition_local_of<T: 'static>(default: T) -> Local<T> {
    Local::new(default)
}

// Typed API

pub fn with_local<T: 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(LocalKey::Type(TypeId::of::<T>()), Rc::new(value), f)
}

pub fn local<T: Clone + 'static>() -> Option<T> {
    lookup(LocalKey::Type(TypeId::of::<T>())).and_then(|v| v.downcast_ref::<T>().cloned())
}
