use tether_core::ModelError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The identifier already names a store of another model type.
    #[error("identifier {identifier} is registered for model `{registered}`, not `{requested}`")]
    ModelMismatch {
        /// Display form of the identifier; `Identifier` itself is not `Send`.
        identifier: String,
        registered: &'static str,
        requested: &'static str,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}
