//! Content Store Implementation
//!
//! PostgreSQL implementation of the ContentStore trait over the `posts`,
//! `comments`, and `comment_likes` tables.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Comment, ContentStore, Like, Post};
use crate::domain::value_objects::HideType;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    uid: Uuid,
    user_id: Uuid,
    body: String,
    destination_feed_ids: Vec<i64>,
    is_private: bool,
    is_protected: bool,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.uid,
            author_id: row.user_id,
            body: row.body,
            destination_feed_ids: row.destination_feed_ids,
            is_private: row.is_private,
            is_protected: row.is_protected,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    uid: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    body: String,
    hide_type: i16,
    seq_number: i32,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.uid,
            post_id: row.post_id,
            author_id: row.user_id,
            body: row.body,
            hide_type: HideType::from_code(row.hide_type),
            seq_number: row.seq_number,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL content lookup.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT uid, user_id, body, destination_feed_ids,
                   is_private, is_protected, created_at
            FROM posts
            WHERE uid = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn posts_by_ids(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Post>, AppError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT uid, user_id, body, destination_feed_ids,
                   is_private, is_protected, created_at
            FROM posts
            WHERE uid = ANY($1)
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| (r.uid, r.into())).collect())
    }

    async fn comment_by_id(&self, comment_id: Uuid) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT uid, post_id, user_id, body, hide_type, seq_number, created_at
            FROM comments
            WHERE uid = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn comments_by_ids(&self, comment_ids: &[Uuid]) -> Result<Vec<Comment>, AppError> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT uid, post_id, user_id, body, hide_type, seq_number, created_at
            FROM comments
            WHERE uid = ANY($1)
            "#,
        )
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn comments_of_post(&self, post_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT uid, post_id, user_id, body, hide_type, seq_number, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY seq_number
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn comments_of_posts(
        &self,
        post_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Comment>>, AppError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT uid, post_id, user_id, body, hide_type, seq_number, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY post_id, seq_number
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut result: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in rows {
            result.entry(row.post_id).or_default().push(row.into());
        }

        Ok(result)
    }

    async fn likes_of_comments(
        &self,
        comment_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Like>>, AppError> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, Uuid, DateTime<Utc>)>(
            r#"
            SELECT comment_id, user_id, created_at
            FROM comment_likes
            WHERE comment_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut result: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for (comment_id, user_id, created_at) in rows {
            result.entry(comment_id).or_default().push(Like {
                item_id: comment_id,
                user_id,
                created_at,
            });
        }

        Ok(result)
    }

    async fn posts_in_feed(&self, feed_id: i64) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT uid, user_id, body, destination_feed_ids,
                   is_private, is_protected, created_at
            FROM posts
            WHERE destination_feed_ids && ARRAY[$1]::bigint[]
            ORDER BY created_at DESC
            "#,
        )
        .bind(feed_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
