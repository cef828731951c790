use crate::domain::{DramaId, GenreId};
use crate::entities::{dramas, prelude::*};
use crate::forms::DramaFields;
use crate::models::Drama;
use anyhow::{Context, Result};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;
use tracing::warn;

/// Repository for the `dramas` collection
pub struct DramaRepository {
    conn: DatabaseConnection,
}

impl DramaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: dramas::Model) -> Drama {
        let genre_ids = decode_genre_ids(&m.id, &m.genre_ids);
        Drama {
            id: DramaId::new(m.id),
            title: m.title,
            poster_url: m.poster_url,
            synopsis: m.synopsis,
            rating: m.rating,
            is_trending: m.is_trending,
            is_hot: m.is_hot,
            genre_ids,
            created_at: m.created_at,
        }
    }

    /// All dramas in insertion order.
    pub async fn list(&self) -> Result<Vec<Drama>> {
        let rows = Dramas::find()
            .order_by_asc(dramas::Column::CreatedAt)
            .order_by_asc(dramas::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list dramas")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Trending dramas in insertion order; `None` means no limit.
    pub async fn list_trending(&self, limit: Option<u64>) -> Result<Vec<Drama>> {
        let rows = Dramas::find()
            .filter(dramas::Column::IsTrending.eq(true))
            .order_by_asc(dramas::Column::CreatedAt)
            .order_by_asc(dramas::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list trending dramas")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: &DramaId) -> Result<Option<Drama>> {
        let row = Dramas::find_by_id(id.as_str())
            .one(&self.conn)
            .await
            .context("Failed to query drama by id")?;

        Ok(row.map(Self::map_model))
    }

    /// Id to title lookup used when labelling parts.
    pub async fn titles(&self) -> Result<HashMap<DramaId, String>> {
        let rows: Vec<(String, String)> = Dramas::find()
            .select_only()
            .column(dramas::Column::Id)
            .column(dramas::Column::Title)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to load drama titles")?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| (DramaId::new(id), title))
            .collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Dramas::find().count(&self.conn).await?)
    }

    pub async fn insert(&self, id: &DramaId, fields: &DramaFields, created_at: &str) -> Result<()> {
        let genre_ids = encode_genre_ids(fields.genre_ids.as_deref().unwrap_or_default())?;

        let active_model = dramas::ActiveModel {
            id: Set(id.to_string()),
            title: Set(fields.title.clone()),
            poster_url: Set(fields.poster_url.clone()),
            synopsis: Set(fields.synopsis.clone().flatten()),
            rating: Set(fields.rating.flatten()),
            is_trending: Set(fields.is_trending.unwrap_or(false)),
            is_hot: Set(fields.is_hot.unwrap_or(false)),
            genre_ids: Set(genre_ids),
            created_at: Set(created_at.to_string()),
        };

        Dramas::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert drama")?;
        Ok(())
    }

    /// Overwrites the submitted fields only: `None` keeps the stored value,
    /// `Some(None)` clears a nullable column. Returns the number of rows
    /// touched.
    pub async fn update(&self, id: &DramaId, fields: &DramaFields) -> Result<u64> {
        let genre_ids = match &fields.genre_ids {
            Some(ids) => Set(encode_genre_ids(ids)?),
            None => NotSet,
        };

        let active_model = dramas::ActiveModel {
            title: Set(fields.title.clone()),
            poster_url: Set(fields.poster_url.clone()),
            synopsis: fields.synopsis.clone().map_or(NotSet, Set),
            rating: fields.rating.map_or(NotSet, Set),
            is_trending: fields.is_trending.map_or(NotSet, Set),
            is_hot: fields.is_hot.map_or(NotSet, Set),
            genre_ids,
            ..Default::default()
        };

        let result = Dramas::update_many()
            .set(active_model)
            .filter(dramas::Column::Id.eq(id.as_str()))
            .exec(&self.conn)
            .await
            .context("Failed to update drama")?;

        Ok(result.rows_affected)
    }

    /// Removes the drama only. Parts referencing it are left in place.
    pub async fn delete(&self, id: &DramaId) -> Result<u64> {
        let result = Dramas::delete_by_id(id.as_str())
            .exec(&self.conn)
            .await
            .context("Failed to delete drama")?;

        Ok(result.rows_affected)
    }
}

fn encode_genre_ids(ids: &[GenreId]) -> Result<String> {
    serde_json::to_string(ids).context("Failed to encode genre ids")
}

fn decode_genre_ids(drama_id: &str, raw: &str) -> Vec<GenreId> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(drama_id, error = %e, "Ignoring malformed genre_ids column");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_ids_column_format() {
        let encoded = encode_genre_ids(&[GenreId::new("g1"), GenreId::new("g2")]).unwrap();
        assert_eq!(encoded, r#"["g1","g2"]"#);
        assert_eq!(decode_genre_ids("d", &encoded).len(), 2);
        assert!(decode_genre_ids("d", "not json").is_empty());
    }
}
