use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileRow};

/// Profile persistence. Postgres in production; an in-memory map in tests.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError>;

    /// Inserts or replaces the profile, returning the stored row.
    async fn upsert(&self, user_id: Uuid, profile: &Profile) -> Result<ProfileRow, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        Ok(sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, data, updated_at FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert(&self, user_id: Uuid, profile: &Profile) -> Result<ProfileRow, AppError> {
        let data = serde_json::to_value(profile).map_err(anyhow::Error::from)?;
        Ok(sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (user_id, data, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
                SET data = EXCLUDED.data, updated_at = NOW()
            RETURNING user_id, data, updated_at
            "#,
        )
        .bind(user_id)
        .bind(data)
        .fetch_one(&self.pool)
        .await?)
    }
}
