use std::any::Any;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Stack of component renders currently in progress on this thread.
#[derive(Default)]
struct Composer {
    frames: Vec<SlotFrame>,
}

struct SlotFrame {
    slots: Rc<SlotTable>,
    cursor: usize,
}

#[derive(Default)]
struct SlotTable {
    slots: RefCell<Vec<Option<Box<dyn Any>>>>,
    keyed_slots: RefCell<HashMap<String, Box<dyn Any>>>,
}

impl SlotTable {
    fn clear(&self) {
        self.slots.borrow_mut().clear();
        self.keyed_slots.borrow_mut().clear();
    }
}

/// A component instance: owns the `remember` slots and the cleanup scope
/// that survive from one render to the next.
///
/// ```rust
/// use tether_core::*;
///
/// let counter = Component::new("Counter");
/// let first = counter.render(|| remember(|| 1));
/// let second = counter.render(|| remember(|| 2));
/// assert_eq!(*second, 1);
/// assert!(std::rc::Rc::ptr_eq(&first, &second));
/// ```
#[derive(Clone)]
pub struct Component {
    inner: Rc<ComponentInner>,
}

struct ComponentInner {
    name: Cow<'static, str>,
    slots: Rc<SlotTable>,
    scope: RefCell<Scope>,
    renders: Cell<u64>,
}

impl Component {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: Rc::new(ComponentInner {
                name: name.into(),
                slots: Rc::new(SlotTable::default()),
                scope: RefCell::new(Scope::new()),
                renders: Cell::new(0),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Runs one render pass of this instance. `remember` calls inside `f`
    /// resolve against this instance's slots, and effects register their
    /// cleanup in its scope.
    pub fn render<R>(&self, f: impl FnOnce() -> R) -> R {
        struct Guard;
        impl Drop for Guard {
            fn drop(&mut self) {
                COMPOSER.with(|c| {
                    c.borrow_mut().frames.pop();
                });
            }
        }

        COMPOSER.with(|c| {
            c.borrow_mut().frames.push(SlotFrame {
                slots: self.inner.slots.clone(),
                cursor: 0,
            })
        });
        let _guard = Guard;

        self.inner.renders.set(self.inner.renders.get() + 1);
        let scope = self.inner.scope.borrow().clone();
        scope.run(f)
    }

    pub fn render_count(&self) -> u64 {
        self.inner.renders.get()
    }

    /// Unmounts the instance: runs scope cleanups and forgets every slot.
    /// The next render starts from scratch.
    pub fn dispose(&self) {
        log::debug!(
            "disposing component '{}' after {} render(s)",
            self.inner.name,
            self.inner.renders.get()
        );
        let scope = std::mem::take(&mut *self.inner.scope.borrow_mut());
        scope.dispose();
        self.inner.slots.clear();
        self.inner.renders.set(0);
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

/// Number of component renders currently nested on this thread.
pub fn current_component_depth() -> usize {
    COMPOSER.with(|c| c.borrow().frames.len())
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let claimed = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        c.frames.last_mut().map(|frame| {
            let cursor = frame.cursor;
            frame.cursor += 1;
            (frame.slots.clone(), cursor)
        })
    });

    let Some((table, cursor)) = claimed else {
        log::warn!("remember called outside of a component render; value is not cached");
        return Rc::new(init());
    };

    {
        let slots = table.slots.borrow();
        if let Some(Some(existing)) = slots.get(cursor) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            // replace (else panics)
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
        }
    }

    // `init` may itself call `remember`, so no borrow is held across it.
    let rc: Rc<T> = Rc::new(init());
    let mut slots = table.slots.borrow_mut();
    if slots.len() <= cursor {
        slots.resize_with(cursor + 1, || None);
    }
    slots[cursor] = Some(Box::new(rc.clone()));
    rc
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let table = COMPOSER.with(|c| c.borrow().frames.last().map(|f| f.slots.clone()));

    let Some(table) = table else {
        log::warn!("remember_with_key('{key}') called outside of a component render; value is not cached");
        return Rc::new(init());
    };

    if let Some(existing) = table.keyed_slots.borrow().get(&key) {
        if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
            return rc.clone();
        }
        log::warn!(
            "remember_with_key: key '{}' reused with a different type; replacing.",
            key
        );
    }

    let rc: Rc<T> = Rc::new(init());
    table.keyed_slots.borrow_mut().insert(key, Box::new(rc.clone()));
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}
