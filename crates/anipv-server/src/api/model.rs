//! Read-only views of the feature schema and the loaded model.

use anipv_core::{FeatureSpec, FEATURE_SPECS};
use anipv_model::ModelSummary;
use axum::{extract::State, Extension, Json};

use crate::middleware::RequestId;

use super::{require_model, ApiError, ApiResponse, AppState, ResponseMeta};

/// GET /api/v1/schema: feature columns in model order.
pub(in crate::api) async fn get_schema(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<&'static [FeatureSpec]>> {
    Json(ApiResponse {
        data: &FEATURE_SPECS[..],
        meta: ResponseMeta::new(req_id.0),
    })
}

/// GET /api/v1/model: loaded model summary and artifact fingerprint.
pub(in crate::api) async fn get_model(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ModelSummary>>, ApiError> {
    let model = require_model(&state, &req_id.0)?;
    Ok(Json(ApiResponse {
        data: model.summary(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
