//! Prediction service over a pre-trained regression artifact.
//!
//! [`load_model`] reads and validates the artifact once; the resulting
//! [`Model`] is immutable and answers [`Model::predict`] for a typed
//! [`anipv_core::FeatureRow`]. [`ModelState`] records whether startup loading
//! succeeded so front ends can render a degraded state instead of failing.

pub mod artifact;
pub mod error;
pub mod forest;
pub mod linear;
pub mod model;
pub mod state;

pub use artifact::{EstimatorSpec, ModelArtifact, TreeSpec, FORMAT_VERSION};
pub use error::{LoadError, PredictionError};
pub use model::{load_model, Model, ModelSummary};
pub use state::ModelState;
