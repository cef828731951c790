use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning drama. No foreign key: orphans are allowed.
    #[sea_orm(indexed)]
    pub drama_id: String,

    pub part_number: i32,

    pub title: String,

    pub video_url: String,

    pub duration: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
