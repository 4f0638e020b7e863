use std::path::Path;

use crate::error::LoadError;
use crate::model::{load_model, Model};

/// Outcome of the one-time startup load.
///
/// Both variants are terminal: a failed load is never retried, and a loaded
/// model is never replaced. Front ends hold this behind an `Arc` and check
/// [`ModelState::model`] before offering prediction.
#[derive(Debug)]
pub enum ModelState {
    Loaded(Model),
    Failed(LoadError),
}

impl ModelState {
    /// Load the artifact at `path`, recording failure instead of returning it.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match load_model(path) {
            Ok(model) => {
                let summary = model.summary();
                tracing::info!(
                    path = %path.display(),
                    kind = summary.kind,
                    estimators = summary.estimators,
                    fingerprint = %summary.fingerprint,
                    "model loaded"
                );
                Self::Loaded(model)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "model unavailable");
                Self::Failed(e)
            }
        }
    }

    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Loaded(model) => Some(model),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&LoadError> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(e) => Some(e),
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl From<Result<Model, LoadError>> for ModelState {
    fn from(result: Result<Model, LoadError>) -> Self {
        match result {
            Ok(model) => Self::Loaded(model),
            Err(e) => Self::Failed(e),
        }
    }
}
