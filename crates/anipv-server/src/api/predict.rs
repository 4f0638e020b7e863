//! JSON prediction endpoint.

use anipv_core::{format_views, FeatureInput, FeatureRow, VIEW_UNIT};
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{require_model, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct PredictionData {
    /// Predicted total views, in ten-thousands.
    pub prediction: f64,
    pub formatted: String,
    pub unit: &'static str,
}

/// POST /api/v1/predict: predict total views for one feature row.
pub(in crate::api) async fn predict(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<FeatureInput>, JsonRejection>,
) -> Result<Json<ApiResponse<PredictionData>>, ApiError> {
    let rid = &req_id.0;

    let model = require_model(&state, rid)?;
    let Json(body) =
        body.map_err(|rejection| ApiError::new(rid, "validation_error", rejection.body_text()))?;
    let row = FeatureRow::try_from(&body)
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;

    let prediction = model.predict(&row).map_err(|e| {
        tracing::warn!(request_id = %rid, error = %e, "prediction failed");
        ApiError::new(rid, "prediction_failed", e.to_string())
    })?;

    Ok(Json(ApiResponse {
        data: PredictionData {
            prediction,
            formatted: format_views(prediction),
            unit: VIEW_UNIT,
        },
        meta: ResponseMeta::new(req_id.0.clone()),
    }))
}
