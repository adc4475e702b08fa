pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::ModelError;
pub use crate::locals::{Local, LocalId, composition_local_of, local, with_local};
pub use crate::model::{Model, Snapshot, Store, empty_snapshot};
pub use crate::runtime::{
    Component, remember, remember_state, remember_state_with_key, remember_with_key,
};
pub use crate::scope::{Scope, current_scope};
pub use crate::signal::{Signal, SubId, signal};
