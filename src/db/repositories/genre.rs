use crate::domain::GenreId;
use crate::entities::{genres, prelude::*};
use crate::forms::GenreFields;
use crate::models::Genre;
use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// Repository for the `genres` collection
pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: genres::Model) -> Genre {
        Genre {
            id: GenreId::new(m.id),
            name: m.name,
            created_at: m.created_at,
        }
    }

    pub async fn list(&self) -> Result<Vec<Genre>> {
        let rows = Genres::find()
            .order_by_asc(genres::Column::CreatedAt)
            .order_by_asc(genres::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list genres")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: &GenreId) -> Result<Option<Genre>> {
        let row = Genres::find_by_id(id.as_str()).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Genres::find().count(&self.conn).await?)
    }

    pub async fn insert(&self, id: &GenreId, fields: &GenreFields, created_at: &str) -> Result<()> {
        let active_model = genres::ActiveModel {
            id: Set(id.to_string()),
            name: Set(fields.name.clone()),
            created_at: Set(created_at.to_string()),
        };

        Genres::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert genre")?;
        Ok(())
    }

    pub async fn update(&self, id: &GenreId, fields: &GenreFields) -> Result<u64> {
        let result = Genres::update_many()
            .col_expr(
                genres::Column::Name,
                sea_orm::sea_query::Expr::value(fields.name.clone()),
            )
            .filter(genres::Column::Id.eq(id.as_str()))
            .exec(&self.conn)
            .await
            .context("Failed to update genre")?;

        Ok(result.rows_affected)
    }

    /// Dramas listing this genre keep the dangling id.
    pub async fn delete(&self, id: &GenreId) -> Result<u64> {
        let result = Genres::delete_by_id(id.as_str())
            .exec(&self.conn)
            .await
            .context("Failed to delete genre")?;

        Ok(result.rows_affected)
    }
}
