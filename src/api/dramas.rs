use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{normalize_search_query, validate_page, validate_record_id};
use super::{
    ApiError, ApiResponse, AppState, ConfirmQuery, DramaDetailDto, DramaDto, DramaPageDto,
    WriteAcceptedDto,
};
use crate::domain::{DramaId, GenreId};
use crate::forms::DramaForm;
use crate::services::{DramaOption, DramaQuery, WriteOp};

const DELETE_PROMPT: &str =
    "Delete this drama? This cannot be undone. Its parts are not deleted.";

#[derive(Debug, Default, Deserialize)]
pub struct DramaListQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub genre: Option<String>,
}

impl DramaListQuery {
    pub(crate) fn into_query(self) -> Result<DramaQuery, ApiError> {
        let genre = match self.genre.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(id) => Some(GenreId::new(validate_record_id(id)?)),
        };

        Ok(DramaQuery {
            query: normalize_search_query(self.q.as_deref()),
            page: validate_page(self.page)?,
            genre,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OptionsQuery {
    pub q: Option<String>,
}

/// GET /dramas
pub async fn list_dramas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DramaListQuery>,
) -> Result<Json<ApiResponse<DramaPageDto>>, ApiError> {
    let query = params.into_query()?;
    let page = state.catalog().search_dramas(&query).await?;
    Ok(Json(ApiResponse::success(DramaPageDto::new(page, query.query))))
}

/// GET /dramas/trending
pub async fn trending_dramas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<DramaDto>>>, ApiError> {
    let dramas = state.catalog().trending_dramas().await?;
    Ok(Json(ApiResponse::success(
        dramas.into_iter().map(DramaDto::from).collect(),
    )))
}

/// Drama with its genres and ordered parts, shared by the API and page routes.
pub(super) async fn load_drama_detail(
    state: &AppState,
    id: &str,
) -> Result<DramaDetailDto, ApiError> {
    let id = DramaId::new(validate_record_id(id)?);
    let detail = state.catalog().get_drama_detail(&id).await?;

    Ok(DramaDetailDto {
        drama: DramaDto::from(detail.drama),
        genres: detail.genres,
        parts: detail.parts,
    })
}

/// GET /dramas/{id}
pub async fn get_drama(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DramaDetailDto>>, ApiError> {
    let detail = load_drama_detail(&state, &id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/dramas
pub async fn admin_list_dramas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<DramaDto>>>, ApiError> {
    let dramas = state.catalog().list_dramas().await?;
    Ok(Json(ApiResponse::success(
        dramas.into_iter().map(DramaDto::from).collect(),
    )))
}

/// GET /admin/dramas/options?q=
pub async fn drama_options(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OptionsQuery>,
) -> Result<Json<ApiResponse<Vec<DramaOption>>>, ApiError> {
    let query = normalize_search_query(params.q.as_deref());
    let options = state.catalog().drama_options(&query).await?;
    Ok(Json(ApiResponse::success(options)))
}

/// POST /admin/dramas
pub async fn create_drama(
    State(state): State<Arc<AppState>>,
    Json(form): Json<DramaForm>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let fields = form.validate()?;
    let op = WriteOp::CreateDrama {
        id: DramaId::generate(),
        fields,
    };
    Ok(super::accept(&state, op))
}

/// PUT /admin/dramas/{id}
pub async fn update_drama(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<DramaForm>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let id = DramaId::new(validate_record_id(&id)?);
    let fields = form.validate()?;
    Ok(super::accept(&state, WriteOp::UpdateDrama { id, fields }))
}

/// DELETE /admin/dramas/{id}?confirm=true
pub async fn delete_drama(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(confirm): Query<ConfirmQuery>,
) -> Result<(StatusCode, Json<ApiResponse<WriteAcceptedDto>>), ApiError> {
    let id = DramaId::new(validate_record_id(&id)?);
    if !confirm.confirm {
        return Err(ApiError::confirmation_required(DELETE_PROMPT));
    }
    Ok(super::accept(&state, WriteOp::DeleteDrama { id }))
}
