use serde::{Deserialize, Serialize};

use crate::catalog::{ListingState, Page};
use crate::catalog::media::display_poster_url;
use crate::domain::{Collection, DramaId, GenreId, WriteKind};
use crate::forms::ValidationErrors;
use crate::models::{Drama, Genre, Part};
use crate::services::writes::WriteOp;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<ValidationErrors>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            field_errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            field_errors: None,
        }
    }

    pub fn field_errors(message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            field_errors: Some(errors),
        }
    }
}

/// Drama as shown to clients, with the poster host normalized for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaDto {
    pub id: DramaId,
    pub title: String,
    pub poster_url: String,
    pub synopsis: Option<String>,
    pub rating: Option<f64>,
    pub is_trending: bool,
    pub is_hot: bool,
    pub genre_ids: Vec<GenreId>,
    pub created_at: String,
}

impl From<Drama> for DramaDto {
    fn from(drama: Drama) -> Self {
        Self {
            poster_url: display_poster_url(&drama.poster_url),
            id: drama.id,
            title: drama.title,
            synopsis: drama.synopsis,
            rating: drama.rating,
            is_trending: drama.is_trending,
            is_hot: drama.is_hot,
            genre_ids: drama.genre_ids,
            created_at: drama.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaPageDto {
    #[serde(flatten)]
    pub page: Page<DramaDto>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    /// Targets for the pager buttons; `None` disables the button.
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl DramaPageDto {
    #[must_use]
    pub fn new(page: Page<Drama>, query: String) -> Self {
        let page = page.map(DramaDto::from);
        let current = ListingState::new(query.as_str(), page.page);

        let mut prev = current.clone();
        prev.prev_page();
        let mut next = current;
        next.next_page(page.total_pages);

        Self {
            empty_message: page.empty_state.map(|s| s.message()),
            prev_page: (prev.page() < page.page).then_some(prev.page()),
            next_page: (next.page() > page.page).then_some(next.page()),
            page,
            query,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DramaDetailDto {
    pub drama: DramaDto,
    pub genres: Vec<Genre>,
    pub parts: Vec<Part>,
}

/// Body of a `202 Accepted` write response. The write may still fail later;
/// that is reported on the event stream only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAcceptedDto {
    pub id: String,
    pub collection: Collection,
    pub kind: WriteKind,
    pub title: String,
    pub description: String,
}

impl From<&WriteOp> for WriteAcceptedDto {
    fn from(op: &WriteOp) -> Self {
        let (title, description) = op.dispatched_message();
        Self {
            id: op.id().to_string(),
            collection: op.collection(),
            kind: op.kind(),
            title,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub email: String,
    pub api_key: String,
}

/// `?confirm=true` guard for deletes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmQuery {
    pub confirm: bool,
}
