use crate::config::SecurityConfig;
use crate::domain::{DramaId, GenreId, PartId};
use crate::forms::{DramaFields, GenreFields, PartFields};
use crate::models::{Drama, Genre, Part};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

/// Current time as an RFC 3339 string with microsecond precision, used as
/// the insertion-order key of every collection.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn drama_repo(&self) -> repositories::drama::DramaRepository {
        repositories::drama::DramaRepository::new(self.conn.clone())
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    fn part_repo(&self) -> repositories::part::PartRepository {
        repositories::part::PartRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // Dramas

    pub async fn list_dramas(&self) -> Result<Vec<Drama>> {
        self.drama_repo().list().await
    }

    pub async fn list_trending_dramas(&self, limit: Option<u64>) -> Result<Vec<Drama>> {
        self.drama_repo().list_trending(limit).await
    }

    pub async fn get_drama(&self, id: &DramaId) -> Result<Option<Drama>> {
        self.drama_repo().get(id).await
    }

    pub async fn drama_titles(&self) -> Result<HashMap<DramaId, String>> {
        self.drama_repo().titles().await
    }

    pub async fn count_dramas(&self) -> Result<u64> {
        self.drama_repo().count().await
    }

    pub async fn insert_drama(
        &self,
        id: &DramaId,
        fields: &DramaFields,
        created_at: &str,
    ) -> Result<()> {
        self.drama_repo().insert(id, fields, created_at).await
    }

    pub async fn update_drama(&self, id: &DramaId, fields: &DramaFields) -> Result<u64> {
        self.drama_repo().update(id, fields).await
    }

    pub async fn delete_drama(&self, id: &DramaId) -> Result<u64> {
        self.drama_repo().delete(id).await
    }

    // Genres

    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.genre_repo().list().await
    }

    pub async fn get_genre(&self, id: &GenreId) -> Result<Option<Genre>> {
        self.genre_repo().get(id).await
    }

    pub async fn count_genres(&self) -> Result<u64> {
        self.genre_repo().count().await
    }

    pub async fn insert_genre(
        &self,
        id: &GenreId,
        fields: &GenreFields,
        created_at: &str,
    ) -> Result<()> {
        self.genre_repo().insert(id, fields, created_at).await
    }

    pub async fn update_genre(&self, id: &GenreId, fields: &GenreFields) -> Result<u64> {
        self.genre_repo().update(id, fields).await
    }

    pub async fn delete_genre(&self, id: &GenreId) -> Result<u64> {
        self.genre_repo().delete(id).await
    }

    // Parts

    pub async fn list_parts(&self) -> Result<Vec<Part>> {
        self.part_repo().list().await
    }

    pub async fn list_parts_for_drama(&self, drama_id: &DramaId) -> Result<Vec<Part>> {
        self.part_repo().list_for_drama(drama_id).await
    }

    pub async fn get_part(&self, id: &PartId) -> Result<Option<Part>> {
        self.part_repo().get(id).await
    }

    pub async fn count_parts(&self) -> Result<u64> {
        self.part_repo().count().await
    }

    pub async fn insert_part(&self, id: &PartId, fields: &PartFields, created_at: &str) -> Result<()> {
        self.part_repo().insert(id, fields, created_at).await
    }

    pub async fn update_part(&self, id: &PartId, fields: &PartFields) -> Result<u64> {
        self.part_repo().update(id, fields).await
    }

    pub async fn delete_part(&self, id: &PartId) -> Result<u64> {
        self.part_repo().delete(id).await
    }

    // Users

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(email, password, config).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn regenerate_api_key(&self, email: &str) -> Result<String> {
        self.user_repo().regenerate_api_key(email).await
    }
}
