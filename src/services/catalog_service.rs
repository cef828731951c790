//! Read-side domain service for the drama catalog.
//!
//! Everything here reads; writes go through
//! [`WriteDispatcher`](crate::services::WriteDispatcher). Reads are eventually
//! consistent with dispatched writes: a read issued right after a dispatch may
//! or may not observe it.

use crate::catalog::{Group, Page};
use crate::domain::events::NotificationEvent;
use crate::domain::{DramaId, GenreId, PartId};
use crate::models::{Drama, Genre, Part};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Drama {0} not found")]
    DramaNotFound(DramaId),

    #[error("Genre {0} not found")]
    GenreNotFound(GenreId),

    #[error("Part {0} not found")]
    PartNotFound(PartId),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Public grid query: title search, 1-based page, optional genre narrowing.
#[derive(Debug, Clone, Default)]
pub struct DramaQuery {
    pub query: String,
    pub page: usize,
    pub genre: Option<GenreId>,
}

/// A drama with its resolved genres and parts in part-number order.
#[derive(Debug, Clone)]
pub struct DramaDetail {
    pub drama: Drama,
    /// Genre ids that no longer resolve are skipped.
    pub genres: Vec<Genre>,
    pub parts: Vec<Part>,
}

/// Entry of the searchable drama picker on the part form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DramaOption {
    pub id: DramaId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub dramas: u64,
    pub genres: u64,
    pub parts: u64,
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// All dramas in insertion order.
    async fn list_dramas(&self) -> Result<Vec<Drama>, CatalogError>;

    /// One page of the public grid.
    async fn search_dramas(&self, query: &DramaQuery) -> Result<Page<Drama>, CatalogError>;

    async fn trending_dramas(&self) -> Result<Vec<Drama>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::DramaNotFound`] if no drama has this id.
    async fn get_drama(&self, id: &DramaId) -> Result<Drama, CatalogError>;

    async fn get_drama_detail(&self, id: &DramaId) -> Result<DramaDetail, CatalogError>;

    async fn list_genres(&self) -> Result<Vec<Genre>, CatalogError>;

    async fn get_genre(&self, id: &GenreId) -> Result<Genre, CatalogError>;

    async fn list_parts(&self) -> Result<Vec<Part>, CatalogError>;

    async fn get_part(&self, id: &PartId) -> Result<Part, CatalogError>;

    /// Parts of one drama sorted by part number.
    async fn parts_for_drama(&self, id: &DramaId) -> Result<Vec<Part>, CatalogError>;

    /// Every part grouped under its drama, recomputed on each call.
    async fn grouped_parts(&self) -> Result<Vec<Group<DramaId, Part>>, CatalogError>;

    /// Dramas whose title contains `query`, for the part form picker.
    async fn drama_options(&self, query: &str) -> Result<Vec<DramaOption>, CatalogError>;

    async fn dashboard_counts(&self) -> Result<DashboardCounts, CatalogError>;

    /// Live change notifications for all collections.
    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent>;
}
