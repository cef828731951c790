use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_record_id;
use super::{ApiError, ApiResponse, AppState, ConfirmQuery, WriteAcceptedDto};
use crate::catalog::Group;
use crate::domain::{DramaId, PartId};
use crate::forms::PartForm;
use crate::models::Part;
use crate::services::WriteOp;

const DELETE_PROMPT: &str = "Delete this part? This cannot be undone.";

/// GET /admin/parts
pub async fn list_parts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Part>>>, ApiError> {
    let parts = state.catalog().list_parts().await?;
    Ok(Json(ApiResponse::success(parts)))
}

/// GET /admin/parts/grouped
pub async fn grouped_parts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Group<DramaId, Part>>>>, ApiError> {
    let groups = state.catalog().grouped_parts().await?;
    Ok(Json(ApiResponse::success(groups)))
}

/// GET /admin/parts/{id}
pub async fn get_part(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Part>>, ApiError> {
    let id = PartId::new(validate_record_id(&id)?);
    let part = state.catalog().get_part(&id).await?;
    Ok(Json(ApiResponse::success(part)))
}

/// POST /admin/parts
pub async fn create_part(
    State(state): State<Arc<AppState>>,
    Json(form): Json<PartForm>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let fields = form.validate()?;
    let op = WriteOp::CreatePart {
        id: PartId::generate(),
        fields,
    };
    Ok(super::accept(&state, op))
}

/// PUT /admin/parts/{id}
pub async fn update_part(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<PartForm>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let id = PartId::new(validate_record_id(&id)?);
    let fields = form.validate()?;
    Ok(super::accept(&state, WriteOp::UpdatePart { id, fields }))
}

/// DELETE /admin/parts/{id}?confirm=true
pub async fn delete_part(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let id = PartId::new(validate_record_id(&id)?);
    if !confirm.confirm {
        return Err(ApiError::confirmation_required(DELETE_PROMPT));
    }
    Ok(super::accept(&state, WriteOp::DeletePart { id }))
}
