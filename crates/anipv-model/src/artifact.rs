//! On-disk model artifact: a JSON document tagged by estimator `kind`.

use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub n_features: usize,
    /// Column names the model was fit with, if the exporter recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub estimator: EstimatorSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    RandomForest { trees: Vec<TreeSpec> },
    Linear { coefficients: Vec<f64>, intercept: f64 },
}

/// One regression tree in flattened parallel-array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`. Split nodes send a row
/// left when `x[feature[i]] <= threshold[i]`. Leaves predict `value[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl TreeSpec {
    /// Marker used in `children_left`/`children_right` for leaf nodes.
    pub const LEAF: i64 = -1;
}
