use std::io::ErrorKind;
use std::path::Path;

use anipv_core::{FeatureRow, FEATURE_COUNT, FEATURE_NAMES};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::artifact::{EstimatorSpec, ModelArtifact, FORMAT_VERSION};
use crate::error::{LoadError, PredictionError};
use crate::forest::RandomForest;
use crate::linear::LinearModel;

#[derive(Debug, Clone, PartialEq)]
enum Estimator {
    RandomForest(RandomForest),
    Linear(LinearModel),
}

/// Loaded, validated regression model. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    estimator: Estimator,
    fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub kind: &'static str,
    pub estimators: usize,
    pub nodes: usize,
    pub n_features: usize,
    /// Hex SHA-256 of the artifact bytes.
    pub fingerprint: String,
}

/// Read and validate the model artifact at `path`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist and
/// [`LoadError::Corrupt`] for any other read, parse or validation failure.
pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.display().to_string(),
        },
        _ => LoadError::Corrupt(format!("failed to read '{}': {e}", path.display())),
    })?;
    Model::from_json_slice(&bytes)
}

impl Model {
    /// Parse and validate an artifact from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Corrupt`] if the bytes are not a valid artifact.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)
            .map_err(|e| LoadError::Corrupt(format!("invalid model artifact: {e}")))?;
        let fingerprint = format!("{:x}", Sha256::digest(bytes));
        Self::from_artifact(&artifact, fingerprint)
    }

    /// Validate a parsed artifact against the feature schema.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Corrupt`] on a version, width, column-name or
    /// estimator validation mismatch.
    pub fn from_artifact(
        artifact: &ModelArtifact,
        fingerprint: String,
    ) -> Result<Self, LoadError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(LoadError::Corrupt(format!(
                "unsupported format_version {} (expected {FORMAT_VERSION})",
                artifact.format_version
            )));
        }
        if artifact.n_features != FEATURE_COUNT {
            return Err(LoadError::Corrupt(format!(
                "model expects {} features, schema has {FEATURE_COUNT}",
                artifact.n_features
            )));
        }
        if let Some(names) = &artifact.feature_names {
            check_feature_names(names)?;
        }

        let estimator = match &artifact.estimator {
            EstimatorSpec::RandomForest { trees } => {
                Estimator::RandomForest(RandomForest::from_specs(trees)?)
            }
            EstimatorSpec::Linear {
                coefficients,
                intercept,
            } => Estimator::Linear(LinearModel::new(coefficients, *intercept)?),
        };

        Ok(Self {
            estimator,
            fingerprint,
        })
    }

    /// Predict total views (in ten-thousands) for one row.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::NonFinite`] if evaluation yields NaN or an
    /// infinity.
    pub fn predict(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        let x = row.to_vector();
        let value = match &self.estimator {
            Estimator::RandomForest(forest) => forest.evaluate(&x),
            Estimator::Linear(linear) => linear.evaluate(&x),
        };
        if !value.is_finite() {
            return Err(PredictionError::NonFinite { value });
        }
        tracing::debug!(prediction = value, "model evaluated");
        Ok(value)
    }

    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[must_use]
    pub fn summary(&self) -> ModelSummary {
        let (kind, estimators, nodes) = match &self.estimator {
            Estimator::RandomForest(forest) => {
                ("random_forest", forest.tree_count(), forest.node_count())
            }
            Estimator::Linear(_) => ("linear", 1, 0),
        };
        ModelSummary {
            kind,
            estimators,
            nodes,
            n_features: FEATURE_COUNT,
            fingerprint: self.fingerprint.clone(),
        }
    }
}

fn check_feature_names(names: &[String]) -> Result<(), LoadError> {
    if names.len() != FEATURE_COUNT {
        return Err(LoadError::Corrupt(format!(
            "artifact lists {} feature names, schema has {FEATURE_COUNT}",
            names.len()
        )));
    }
    for (i, (got, want)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if got != want {
            return Err(LoadError::Corrupt(format!(
                "feature column {i} is '{got}', expected '{want}'"
            )));
        }
    }
    Ok(())
}
