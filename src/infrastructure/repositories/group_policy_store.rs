//! Group Policy Store Implementation
//!
//! PostgreSQL implementation of the GroupPolicyStore trait over the
//! `group_ban_overrides` and `group_admins` tables.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{GroupPolicyStore, OverrideMember};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct OverrideMemberRow {
    user_id: Uuid,
    is_admin: bool,
}

impl From<OverrideMemberRow> for OverrideMember {
    fn from(row: OverrideMemberRow) -> Self {
        Self {
            user_id: row.user_id,
            is_admin: row.is_admin,
        }
    }
}

/// PostgreSQL group ban-override policy.
#[derive(Clone)]
pub struct PgGroupPolicyStore {
    pool: PgPool,
}

impl PgGroupPolicyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupPolicyStore for PgGroupPolicyStore {
    async fn set_override(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        enabled: bool,
    ) -> Result<bool, AppError> {
        let changed = if enabled {
            sqlx::query_scalar::<_, bool>(
                r#"
                INSERT INTO group_ban_overrides (user_id, group_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                RETURNING true
                "#,
            )
            .bind(user_id)
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await?
        } else {
            sqlx::query_scalar::<_, bool>(
                r#"
                DELETE FROM group_ban_overrides
                WHERE (user_id, group_id) = ($1, $2)
                RETURNING true
                "#,
            )
            .bind(user_id)
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await?
        };

        Ok(changed.is_some())
    }

    async fn overrides_for(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT group_id FROM group_ban_overrides
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn overrides_in(
        &self,
        group_ids: &[Uuid],
        user_id: Uuid,
    ) -> Result<HashSet<Uuid>, AppError> {
        if group_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT group_id FROM group_ban_overrides
            WHERE user_id = $1 AND group_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn members_with_override(
        &self,
        group_ids: &[Uuid],
    ) -> Result<Vec<OverrideMember>, AppError> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, OverrideMemberRow>(
            r#"
            SELECT
                o.user_id,
                a.user_id IS NOT NULL AS is_admin
            FROM group_ban_overrides o
            LEFT JOIN group_admins a
                ON (a.group_id, a.user_id) = (o.group_id, o.user_id)
            WHERE o.group_id = ANY($1)
            "#,
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn admin_groups_of(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT group_id FROM group_admins
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
