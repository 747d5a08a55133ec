// handlers/models/show.rs - GET /api/models/:id handler

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::Model;

/// GET /api/models/:id - fetch a single model by id.
pub async fn model_show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Model> {
    let model = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Model {} not found", id)))?;

    Ok(ApiResponse::success(model))
}
