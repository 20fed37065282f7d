//! Content lookup store trait.
//!
//! The exposed operations take post/comment ids, so the engine needs a
//! narrow port to locate the items themselves and their likes. Lookups are
//! batched for the same reason the ban maps are: resolving a feed page must
//! not fan out into per-item queries.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Comment, Like, Post};
use crate::shared::error::AppError;

/// Post/comment/like lookup port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, AppError>;

    /// Batched post lookup; absent ids are simply missing from the map.
    async fn posts_by_ids(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Post>, AppError>;

    async fn comment_by_id(&self, comment_id: Uuid) -> Result<Option<Comment>, AppError>;

    /// Batched comment lookup; absent ids are silently skipped.
    async fn comments_by_ids(&self, comment_ids: &[Uuid]) -> Result<Vec<Comment>, AppError>;

    /// Comments of one post, ordered by sequence number.
    async fn comments_of_post(&self, post_id: Uuid) -> Result<Vec<Comment>, AppError>;

    /// Batched comment listing over many posts, each list ordered by
    /// sequence number.
    async fn comments_of_posts(
        &self,
        post_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Comment>>, AppError>;

    /// Likes of the given comments, keyed by comment id.
    async fn likes_of_comments(
        &self,
        comment_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Like>>, AppError>;

    /// Posts published to the given feed.
    async fn posts_in_feed(&self, feed_id: i64) -> Result<Vec<Post>, AppError>;
}
