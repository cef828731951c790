//! `SeaORM` implementation of the `CatalogService` trait.

use crate::catalog::listing::{ListingState, filter_by_title};
use crate::catalog::{Group, Page, group_by_parent, sort_by_sequence};
use crate::config::Config;
use crate::db::Store;
use crate::domain::events::NotificationEvent;
use crate::domain::{DramaId, GenreId, PartId};
use crate::models::{Drama, Genre, Part};
use crate::services::catalog_service::{
    CatalogError, CatalogService, DashboardCounts, DramaDetail, DramaOption, DramaQuery,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

pub struct SeaOrmCatalogService {
    store: Store,
    config: Arc<RwLock<Config>>,
    event_bus: broadcast::Sender<NotificationEvent>,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(
        store: Store,
        config: Arc<RwLock<Config>>,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> Self {
        Self {
            store,
            config,
            event_bus,
        }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_dramas(&self) -> Result<Vec<Drama>, CatalogError> {
        Ok(self.store.list_dramas().await?)
    }

    async fn search_dramas(&self, query: &DramaQuery) -> Result<Page<Drama>, CatalogError> {
        let page_size = self.config.read().await.catalog.page_size;

        let mut dramas = self.store.list_dramas().await?;
        if let Some(genre) = &query.genre {
            dramas.retain(|d| d.has_genre(genre));
        }

        Ok(ListingState::new(query.query.as_str(), query.page).apply(dramas, page_size))
    }

    async fn trending_dramas(&self) -> Result<Vec<Drama>, CatalogError> {
        let limit = self.config.read().await.catalog.trending_limit;
        let limit = (limit > 0).then_some(limit as u64);
        Ok(self.store.list_trending_dramas(limit).await?)
    }

    async fn get_drama(&self, id: &DramaId) -> Result<Drama, CatalogError> {
        self.store
            .get_drama(id)
            .await?
            .ok_or_else(|| CatalogError::DramaNotFound(id.clone()))
    }

    async fn get_drama_detail(&self, id: &DramaId) -> Result<DramaDetail, CatalogError> {
        let drama = self.get_drama(id).await?;
        let parts = self.parts_for_drama(id).await?;

        let all_genres = self.store.list_genres().await?;
        let genres = drama
            .genre_ids
            .iter()
            .filter_map(|gid| all_genres.iter().find(|g| &g.id == gid).cloned())
            .collect();

        Ok(DramaDetail {
            drama,
            genres,
            parts,
        })
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, CatalogError> {
        Ok(self.store.list_genres().await?)
    }

    async fn get_genre(&self, id: &GenreId) -> Result<Genre, CatalogError> {
        self.store
            .get_genre(id)
            .await?
            .ok_or_else(|| CatalogError::GenreNotFound(id.clone()))
    }

    async fn list_parts(&self) -> Result<Vec<Part>, CatalogError> {
        Ok(self.store.list_parts().await?)
    }

    async fn get_part(&self, id: &PartId) -> Result<Part, CatalogError> {
        self.store
            .get_part(id)
            .await?
            .ok_or_else(|| CatalogError::PartNotFound(id.clone()))
    }

    async fn parts_for_drama(&self, id: &DramaId) -> Result<Vec<Part>, CatalogError> {
        let mut parts = self.store.list_parts_for_drama(id).await?;
        sort_by_sequence(&mut parts);
        Ok(parts)
    }

    async fn grouped_parts(&self) -> Result<Vec<Group<DramaId, Part>>, CatalogError> {
        let unknown_label = self.config.read().await.catalog.unknown_drama_label.clone();

        let (parts, titles) = tokio::try_join!(self.store.list_parts(), self.store.drama_titles())?;

        Ok(group_by_parent(parts, &titles, &unknown_label))
    }

    async fn drama_options(&self, query: &str) -> Result<Vec<DramaOption>, CatalogError> {
        let dramas = self.store.list_dramas().await?;
        Ok(filter_by_title(dramas, query)
            .into_iter()
            .map(|d| DramaOption {
                id: d.id,
                title: d.title,
            })
            .collect())
    }

    async fn dashboard_counts(&self) -> Result<DashboardCounts, CatalogError> {
        let (dramas, genres, parts) = tokio::try_join!(
            self.store.count_dramas(),
            self.store.count_genres(),
            self.store.count_parts()
        )?;

        Ok(DashboardCounts {
            dramas,
            genres,
            parts,
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.event_bus.subscribe()
    }
}
