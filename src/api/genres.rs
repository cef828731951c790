use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_record_id;
use super::{ApiError, ApiResponse, AppState, ConfirmQuery, WriteAcceptedDto};
use crate::domain::GenreId;
use crate::forms::GenreForm;
use crate::models::Genre;
use crate::services::WriteOp;

const DELETE_PROMPT: &str =
    "Delete this genre? This cannot be undone. Dramas that use it keep the reference.";

/// GET /genres
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Genre>>>, ApiError> {
    let genres = state.catalog().list_genres().await?;
    Ok(Json(ApiResponse::success(genres)))
}

/// POST /admin/genres
pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    Json(form): Json<GenreForm>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let fields = form.validate()?;
    let op = WriteOp::CreateGenre {
        id: GenreId::generate(),
        fields,
    };
    Ok(super::accept(&state, op))
}

/// PUT /admin/genres/{id}
pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<GenreForm>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let id = GenreId::new(validate_record_id(&id)?);
    let fields = form.validate()?;
    Ok(super::accept(&state, WriteOp::UpdateGenre { id, fields }))
}

/// DELETE /admin/genres/{id}?confirm=true
pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let id = GenreId::new(validate_record_id(&id)?);
    if !confirm.confirm {
        return Err(ApiError::confirmation_required(DELETE_PROMPT));
    }
    Ok(super::accept(&state, WriteOp::DeleteGenre { id }))
}
