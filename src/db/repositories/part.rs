use crate::domain::{DramaId, PartId};
use crate::entities::{parts, prelude::*};
use crate::forms::PartFields;
use crate::models::Part;
use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// Repository for the `parts` collection
pub struct PartRepository {
    conn: DatabaseConnection,
}

impl PartRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: parts::Model) -> Part {
        Part {
            id: PartId::new(m.id),
            drama_id: DramaId::new(m.drama_id),
            part_number: m.part_number,
            title: m.title,
            video_url: m.video_url,
            duration: m.duration,
            description: m.description,
            created_at: m.created_at,
        }
    }

    /// All parts in insertion order.
    pub async fn list(&self) -> Result<Vec<Part>> {
        let rows = Parts::find()
            .order_by_asc(parts::Column::CreatedAt)
            .order_by_asc(parts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list parts")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Parts of one drama in insertion order; callers sort by part number.
    pub async fn list_for_drama(&self, drama_id: &DramaId) -> Result<Vec<Part>> {
        let rows = Parts::find()
            .filter(parts::Column::DramaId.eq(drama_id.as_str()))
            .order_by_asc(parts::Column::CreatedAt)
            .order_by_asc(parts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list parts for drama")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: &PartId) -> Result<Option<Part>> {
        let row = Parts::find_by_id(id.as_str()).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Parts::find().count(&self.conn).await?)
    }

    pub async fn insert(&self, id: &PartId, fields: &PartFields, created_at: &str) -> Result<()> {
        let active_model = parts::ActiveModel {
            id: Set(id.to_string()),
            drama_id: Set(fields.drama_id.to_string()),
            part_number: Set(fields.part_number),
            title: Set(fields.title.clone()),
            video_url: Set(fields.video_url.clone()),
            duration: Set(fields.duration.clone()),
            description: Set(fields.description.clone()),
            created_at: Set(created_at.to_string()),
        };

        Parts::insert(active_model)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert part")?;
        Ok(())
    }

    pub async fn update(&self, id: &PartId, fields: &PartFields) -> Result<u64> {
        let active_model = parts::ActiveModel {
            drama_id: Set(fields.drama_id.to_string()),
            part_number: Set(fields.part_number),
            title: Set(fields.title.clone()),
            video_url: Set(fields.video_url.clone()),
            duration: Set(fields.duration.clone()),
            description: Set(fields.description.clone()),
            ..Default::default()
        };

        let result = Parts::update_many()
            .set(active_model)
            .filter(parts::Column::Id.eq(id.as_str()))
            .exec(&self.conn)
            .await
            .context("Failed to update part")?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: &PartId) -> Result<u64> {
        let result = Parts::delete_by_id(id.as_str())
            .exec(&self.conn)
            .await
            .context("Failed to delete part")?;

        Ok(result.rows_affected)
    }
}
