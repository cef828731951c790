use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dramas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    pub poster_url: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,

    pub rating: Option<f64>,

    #[sea_orm(default_value = false)]
    pub is_trending: bool,

    #[sea_orm(default_value = false)]
    pub is_hot: bool,

    /// JSON array of genre ids; never checked against `genres`.
    #[sea_orm(column_type = "Text", default_value = "[]")]
    pub genre_ids: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
