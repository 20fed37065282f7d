//! Privacy Store Implementation
//!
//! PostgreSQL implementation of the PrivacyStore trait over the `users`,
//! `feeds`, and `feed_subscriptions` tables.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{GoneStatus, PrivacyFlags, PrivacyStore};
use crate::domain::value_objects::OpenList;
use crate::shared::error::AppError;

/// PostgreSQL privacy/feed state.
#[derive(Clone)]
pub struct PgPrivacyStore {
    pool: PgPool,
}

impl PgPrivacyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrivacyStore for PgPrivacyStore {
    async fn gone_status(&self, user_id: Uuid) -> Result<Option<GoneStatus>, AppError> {
        let status = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT gone_status FROM users WHERE uid = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.flatten().and_then(|s| GoneStatus::from_str(&s)))
    }

    async fn gone_statuses(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, GoneStatus>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT uid, gone_status FROM users
            WHERE uid = ANY($1) AND gone_status IS NOT NULL
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, s)| GoneStatus::from_str(&s).map(|g| (id, g)))
            .collect())
    }

    async fn privacy_flags(&self, user_id: Uuid) -> Result<PrivacyFlags, AppError> {
        let row = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT is_private, is_protected FROM users WHERE uid = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Can't find user"))?;

        Ok(PrivacyFlags {
            is_private: row.0,
            is_protected: row.1,
        })
    }

    async fn private_feed_members(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT s.user_id
            FROM feed_subscriptions s
            JOIN feeds f ON f.id = s.feed_id
            WHERE f.user_id = $1 AND f.name = 'Posts'
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn visible_private_feed_ids(
        &self,
        viewer_id: Uuid,
    ) -> Result<HashSet<i64>, AppError> {
        // The viewer's own feeds plus their subscriptions
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT f.id FROM feeds f WHERE f.user_id = $1
            UNION
            SELECT f.id FROM feeds f
            JOIN feed_subscriptions s ON s.feed_id = f.id
            WHERE s.user_id = $1
            "#,
        )
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn groups_of_feed_ids(&self, feed_ids: &[i64]) -> Result<Vec<Uuid>, AppError> {
        if feed_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT u.uid
            FROM users u
            JOIN feeds f ON f.user_id = u.uid AND f.name = 'Posts'
            WHERE u.type = 'group' AND f.id = ANY($1)
            "#,
        )
        .bind(feed_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn posts_feed_ids_of_groups(
        &self,
        group_ids: &[Uuid],
    ) -> Result<HashSet<i64>, AppError> {
        if group_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM feeds
            WHERE name = 'Posts' AND user_id = ANY($1)
            "#,
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    async fn feed_readers(&self, feed_ids: &[i64]) -> Result<OpenList<Uuid>, AppError> {
        if feed_ids.is_empty() {
            return Ok(OpenList::empty());
        }

        // Any non-private destination opens the post to the whole universe.
        // Openness is the feed's own flag: a public user's "Directs" feed is
        // still private and must resolve to its member set.
        let any_open = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM feeds f
                WHERE f.id = ANY($1) AND NOT f.is_private
            )
            "#,
        )
        .bind(feed_ids)
        .fetch_one(&self.pool)
        .await?;

        if any_open {
            return Ok(OpenList::everything());
        }

        let members = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT f.user_id FROM feeds f WHERE f.id = ANY($1)
            UNION
            SELECT s.user_id FROM feed_subscriptions s WHERE s.feed_id = ANY($1)
            "#,
        )
        .bind(feed_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(OpenList::finite(members))
    }

    async fn directs_feed_id(&self, user_id: Uuid) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM feeds
            WHERE user_id = $1 AND name = 'Directs'
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    async fn directs_read_at(&self, user_id: Uuid) -> Result<DateTime<Utc>, AppError> {
        let read_at = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            r#"
            SELECT directs_read_at FROM users WHERE uid = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        // Users who never opened their directs have everything unread
        Ok(read_at.flatten().unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
    }
}
