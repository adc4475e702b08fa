//! Component-side helpers over the registry.
//!
//! Every hook comes in two spellings: the bare one keys the store by the
//! model type, the `_with_id` one by an explicit [`Identifier`]. An explicit
//! `Identifier::None` is a key of its own, not "use the model type".

use tether_core::{
    Model, Snapshot, Store, current_component_depth, effect, empty_snapshot, remember,
};

use crate::context::Provider;
use crate::error::StoreError;
use crate::identifier::Identifier;
use crate::registry::{StoreContext, StoreRegistry};

fn context_for<M: Model>(identifier: Option<Identifier>) -> Result<StoreContext<M>, StoreError> {
    let identifier = identifier.unwrap_or_else(Identifier::model::<M>);
    StoreRegistry::current().retrieve::<M>(&identifier)
}

/// Publish capability for the default store of `M`.
pub fn use_provider<M: Model>() -> Result<Provider<Option<Store<M>>>, StoreError> {
    context_for::<M>(None).map(|ctx| ctx.provider())
}

pub fn use_provider_with_id<M: Model>(
    identifier: impl Into<Identifier>,
) -> Result<Provider<Option<Store<M>>>, StoreError> {
    context_for::<M>(Some(identifier.into())).map(|ctx| ctx.provider())
}

/// Creates one `Store<M>` from `{}` per component instance.
pub fn use_create_store<M: Model>() -> Result<Store<M>, StoreError> {
    use_create_store_from::<M>(empty_snapshot())
}

/// Creates one `Store<M>` from `snapshot` per component instance. Later
/// renders return the same store (or the same creation error) and ignore
/// `snapshot`.
pub fn use_create_store_from<M: Model>(snapshot: Snapshot) -> Result<Store<M>, StoreError> {
    let created = remember(move || {
        log::debug!("creating store for model `{}`", M::name());
        Store::<M>::create(&snapshot).map_err(StoreError::from)
    });
    (*created).clone()
}

/// The store of `M` published nearest to this call, if any.
pub fn use_store<M: Model>() -> Result<Option<Store<M>>, StoreError> {
    context_for::<M>(None).map(|ctx| ctx.read())
}

pub fn use_store_with_id<M: Model>(
    identifier: impl Into<Identifier>,
) -> Result<Option<Store<M>>, StoreError> {
    context_for::<M>(Some(identifier.into())).map(|ctx| ctx.read())
}

/// Applies `projection` to the state of the nearest published `M`.
pub fn use_store_map<M: Model, R>(
    projection: impl FnOnce(&M) -> R,
) -> Result<Option<R>, StoreError> {
    map_store(context_for::<M>(None)?, projection)
}

pub fn use_store_map_with_id<M: Model, R>(
    identifier: impl Into<Identifier>,
    projection: impl FnOnce(&M) -> R,
) -> Result<Option<R>, StoreError> {
    map_store(context_for::<M>(Some(identifier.into()))?, projection)
}

fn map_store<M: Model, R>(
    ctx: StoreContext<M>,
    projection: impl FnOnce(&M) -> R,
) -> Result<Option<R>, StoreError> {
    Ok(ctx.use_read(|store| store.map(|s| s.read(projection))))
}

/// Subscribes `callback` to `store` once per component instance. The
/// subscription ends when the component is disposed.
///
/// Outside a component render nothing would ever release the subscription,
/// so the call is skipped with a warning.
pub fn use_subscription<M: Model>(store: &Store<M>, callback: impl Fn(&M) + 'static) {
    if current_component_depth() == 0 {
        log::warn!(
            "use_subscription for model `{}` called outside a component render; ignored",
            M::name()
        );
        return;
    }
    let store = store.clone();
    remember(move || effect(move || store.subscribe(callback)));
}
