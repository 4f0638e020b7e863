//! Shared domain types for the anime total-view predictor.
//!
//! Owns the 15-column feature schema, the strongly-typed [`FeatureRow`] that
//! serializes into it, the loosely-typed [`FeatureInput`] front ends collect,
//! view-count formatting, and environment configuration.

pub mod app_config;
pub mod config;
pub mod features;
pub mod format;
pub mod schema;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_MODEL_PATH};
pub use features::{
    AirTime, AnimeType, EpisodeCount, FeatureInput, FeatureRow, Origin, TopicWeight,
    FEATURE_COUNT, FEATURE_NAMES, TOPIC_COUNT,
};
pub use format::{format_views, VIEW_UNIT};
pub use schema::{Choice, FeatureDomain, FeatureSpec, FEATURE_SPECS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// A raw input value that falls outside its feature's domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("{field} must be one of {allowed}, got {value}")]
    InvalidChoice {
        field: &'static str,
        value: i64,
        allowed: &'static str,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },
}

impl FeatureError {
    /// Name of the feature column the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidChoice { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Negative { field, .. } => field,
        }
    }
}
