//! Ban Store Implementation
//!
//! PostgreSQL implementation of the BanStore trait over the `bans` table.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::BanStore;
use crate::shared::error::AppError;

/// PostgreSQL ban graph.
#[derive(Clone)]
pub struct PgBanStore {
    pool: PgPool,
}

impl PgBanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BanStore for PgBanStore {
    async fn create(&self, banner_id: Uuid, banned_id: Uuid) -> Result<(), AppError> {
        if banner_id == banned_id {
            return Err(AppError::Invalid("You cannot ban yourself".into()));
        }

        sqlx::query(
            r#"
            INSERT INTO bans (user_id, banned_user_id, created_at)
            VALUES ($1, $2, now())
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(banner_id)
        .bind(banned_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, banner_id: Uuid, banned_id: Uuid) -> Result<(), AppError> {
        // Deleting an absent edge is a no-op
        sqlx::query(
            r#"
            DELETE FROM bans
            WHERE user_id = $1 AND banned_user_id = $2
            "#,
        )
        .bind(banner_id)
        .bind(banned_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_banned(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT banned_user_id FROM bans
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn list_banners(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id FROM bans
            WHERE banned_user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn bans_map(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, HashSet<Uuid>>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, Vec<Uuid>)>(
            r#"
            SELECT user_id, array_agg(banned_user_id) AS bans
            FROM bans WHERE user_id = ANY($1)
            GROUP BY user_id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, bans)| (id, bans.into_iter().collect()))
            .collect())
    }

    async fn banned_by_map(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, HashSet<Uuid>>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, Vec<Uuid>)>(
            r#"
            SELECT banned_user_id, array_agg(user_id) AS bans
            FROM bans WHERE banned_user_id = ANY($1)
            GROUP BY banned_user_id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, bans)| (id, bans.into_iter().collect()))
            .collect())
    }

    async fn either_direction(&self, a: Uuid, b: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bans
                WHERE (user_id = $1 AND banned_user_id = $2)
                   OR (user_id = $2 AND banned_user_id = $1)
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn related_users(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT coalesce(nullif(user_id, $1), banned_user_id) AS id
            FROM bans
            WHERE user_id = $1 OR banned_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
