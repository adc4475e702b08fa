use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tether_core::{Model, Store, local, with_local};

use crate::context::ContextFactory;
use crate::error::StoreError;
use crate::identifier::Identifier;

/// The context a store of model `M` is published through.
pub type StoreContext<M> = ContextFactory<Option<Store<M>>>;

struct Entry {
    model: TypeId,
    model_name: &'static str,
    context: Box<dyn Any>,
}

/// Identifier → context mapping. Entries are created on first lookup and
/// kept until [`StoreRegistry::clear`].
///
/// Handles are cheap clones of one shared table. Each thread gets a default
/// registry on first use; [`with_registry`] swaps in another one for a
/// subtree.
#[derive(Clone, Default)]
pub struct StoreRegistry {
    entries: Rc<RefCell<HashMap<Identifier, Entry>>>,
}

thread_local! {
    static DEFAULT_REGISTRY: StoreRegistry = StoreRegistry::default();
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// This thread's default registry.
    pub fn global() -> Self {
        DEFAULT_REGISTRY.with(StoreRegistry::clone)
    }

    /// The registry injected by the nearest [`with_registry`], else the
    /// thread default.
    pub fn current() -> Self {
        local::<StoreRegistry>().unwrap_or_else(Self::global)
    }

    /// Returns the context registered under `identifier`, creating it on
    /// the first call. Repeated calls hand out the same context.
    pub fn retrieve<M: Model>(&self, identifier: &Identifier) -> Result<StoreContext<M>, StoreError> {
        let mut entries = self.entries.borrow_mut();

        if let Some(entry) = entries.get(identifier) {
            return match entry.context.downcast_ref::<StoreContext<M>>() {
                Some(ctx) => Ok(ctx.clone()),
                None => {
                    log::warn!(
                        "store {identifier} requested as `{}` but registered as `{}`",
                        M::name(),
                        entry.model_name
                    );
                    Err(StoreError::ModelMismatch {
                        identifier: identifier.to_string(),
                        registered: entry.model_name,
                        requested: M::name(),
                    })
                }
            };
        }

        log::debug!("registering store {identifier} for model `{}`", M::name());
        let ctx = StoreContext::<M>::default();
        entries.insert(
            identifier.clone(),
            Entry {
                model: TypeId::of::<M>(),
                model_name: M::name(),
                context: Box::new(ctx.clone()),
            },
        );
        Ok(ctx)
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.entries.borrow().contains_key(identifier)
    }

    /// True if `identifier` is registered for model `M`.
    pub fn contains_model<M: Model>(&self, identifier: &Identifier) -> bool {
        self.entries
            .borrow()
            .get(identifier)
            .is_some_and(|e| e.model == TypeId::of::<M>())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Forgets every entry. Contexts handed out earlier keep working, but
    /// later lookups create fresh ones.
    pub fn clear(&self) {
        let n = {
            let mut entries = self.entries.borrow_mut();
            let n = entries.len();
            entries.clear();
            n
        };
        log::debug!("cleared {n} store(s)");
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.entries, &b.entries)
    }
}

impl fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        f.debug_map()
            .entries(entries.iter().map(|(k, e)| (k, e.model_name)))
            .finish()
    }
}

/// Runs `f` with `registry` as the current registry.
pub fn with_registry<R>(registry: StoreRegistry, f: impl FnOnce() -> R) -> R {
    with_local(registry, f)
}

/// [`StoreRegistry::retrieve`] on the current registry.
pub fn retrieve_store<M: Model>(identifier: impl Into<Identifier>) -> Result<StoreContext<M>, StoreError> {
    StoreRegistry::current().retrieve::<M>(&identifier.into())
}

/// Clears the current registry.
pub fn reset_stores() {
    StoreRegistry::current().clear();
}
