use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A cleanup that runs at most once, shared by every clone.
#[derive(Clone)]
pub struct Dispose(Rc<Cell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(Cell::new(Some(Box::new(f)))))
    }

    pub fn run(&self) {
        if let Some(f) = self.0.take() {
            f()
        }
    }

    pub fn is_disposed(&self) -> bool {
        // Cell<Option<Box<_>>> can't be peeked; take and put back.
        let f = self.0.take();
        let done = f.is_none();
        self.0.set(f);
        done
    }
}

impl fmt::Debug for Dispose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dispose").field(&self.is_disposed()).finish()
    }
}

/// Runs `f()` now. When called during a component render, the returned
/// cleanup also runs when that component is disposed.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let d = f();
    if let Some(scope) = crate::scope::current_scope() {
        let d2 = d.clone();
        scope.add_disposer(move || d2.run());
    }
    d
}

/// Wraps the cleanup an `effect` hands back.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}
