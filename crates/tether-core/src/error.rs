use std::sync::Arc;

/// Failures of the reactive model layer.
///
/// Cloneable so a memoized creation result can be handed out on every
/// render.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("snapshot does not fit model `{model}`: {source}")]
    InvalidSnapshot {
        model: &'static str,
        source: Arc<serde_json::Error>,
    },
    #[error("model `{model}` cannot be turned into a snapshot: {source}")]
    Serialize {
        model: &'static str,
        source: Arc<serde_json::Error>,
    },
}

impl ModelError {
    pub fn model(&self) -> &'static str {
        match self {
            ModelError::InvalidSnapshot { model, .. } | ModelError::Serialize { model, .. } => model,
        }
    }
}
