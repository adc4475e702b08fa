use std::cell::RefCell;
use std::rc::{Rc, Weak};

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeInner>>> = const { RefCell::new(None) };
}

/// Rounds of newly registered cleanups [`Scope::dispose`] will run.
pub const MAX_DISPOSE_ROUNDS: usize = 16;

/// Collects cleanups for a component instance; disposed on unmount.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                disposers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<Weak<ScopeInner>>);
        impl Drop for Restore {
            fn drop(&mut self) {
                let prev = self.0.take();
                CURRENT_SCOPE.with(|current| *current.borrow_mut() = prev);
            }
        }

        let prev = CURRENT_SCOPE.with(|current| {
            current.replace(Some(Rc::downgrade(&self.inner)))
        });
        let _restore = Restore(prev);
        f()
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn disposer_count(&self) -> usize {
        self.inner.disposers.borrow().len()
    }

    /// Runs every disposer. Cleanups registered while disposing run too,
    /// for up to [`MAX_DISPOSE_ROUNDS`] rounds; anything still pending after
    /// that is dropped unrun.
    pub fn dispose(self) {
        for _ in 0..MAX_DISPOSE_ROUNDS {
            let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
            if disposers.is_empty() {
                return;
            }
            for disposer in disposers {
                disposer();
            }
        }
        let leftover = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        if !leftover.is_empty() {
            log::warn!(
                "scope still registering cleanups after {MAX_DISPOSE_ROUNDS} rounds; dropping {}",
                leftover.len()
            );
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade().map(|inner| Scope { inner }))
    })
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}
