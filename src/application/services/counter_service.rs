//! Aggregate Counter Service
//!
//! Ban-aware counts over sets of items: comment-like totals with folding
//! deltas, per-comment like info for serializers, and the unread-directs
//! counter. One snapshot, one batched fetch round, one counting pass.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Comment, ContentStore, Post, PrivacyStore};
use crate::domain::services::{
    action_visible, comment_likes_summary, post_visible, CommentLikesEntry, CommentLikesSummary,
    ViewerContext,
};
use crate::shared::error::AppError;

use super::visibility_service::VisibilityService;

/// Per-comment like info, as serializers expose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikesInfo {
    pub likes: u32,
    pub has_own_like: bool,
}

/// Ban-aware aggregate counters.
pub struct CounterService {
    visibility: Arc<VisibilityService>,
    privacy: Arc<dyn PrivacyStore>,
    content: Arc<dyn ContentStore>,
}

impl CounterService {
    pub fn new(
        visibility: Arc<VisibilityService>,
        privacy: Arc<dyn PrivacyStore>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            visibility,
            privacy,
            content,
        }
    }

    /// Visible like count and own-like flag for each of the given comments.
    ///
    /// A like is counted only when both the comment and the liker pass the
    /// viewer's ban classification.
    #[tracing::instrument(skip(self, comment_ids), fields(comments = comment_ids.len()), level = "debug")]
    pub async fn comment_likes_info(
        &self,
        comment_ids: &[Uuid],
        viewer_id: Option<Uuid>,
    ) -> Result<HashMap<Uuid, LikesInfo>, AppError> {
        let (comments, likes, ctx) = tokio::try_join!(
            self.content.comments_by_ids(comment_ids),
            self.content.likes_of_comments(comment_ids),
            self.visibility.viewer_context(viewer_id),
        )?;

        let post_ids: Vec<Uuid> = comments
            .iter()
            .map(|c| c.post_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let posts = self.content.posts_by_ids(&post_ids).await?;

        let mut result = HashMap::with_capacity(comments.len());

        for comment in &comments {
            let Some(post) = posts.get(&comment.post_id) else {
                continue;
            };

            // Likes are reported only for truly visible comments
            if !action_visible(&ctx, post, comment.author_id) {
                result.insert(comment.id, LikesInfo::default());
                continue;
            }

            let visible_likers: Vec<Uuid> = likes
                .get(&comment.id)
                .map(|ls| {
                    ls.iter()
                        .filter(|l| action_visible(&ctx, post, l.user_id))
                        .map(|l| l.user_id)
                        .collect()
                })
                .unwrap_or_default();

            result.insert(
                comment.id,
                LikesInfo {
                    likes: visible_likers.len() as u32,
                    has_own_like: viewer_id
                        .is_some_and(|v| visible_likers.contains(&v)),
                },
            );
        }

        Ok(result)
    }

    /// Total visible likes across the given comments.
    pub async fn count_visible_likes(
        &self,
        comment_ids: &[Uuid],
        viewer_id: Option<Uuid>,
    ) -> Result<u32, AppError> {
        let info = self.comment_likes_info(comment_ids, viewer_id).await?;
        Ok(info.values().map(|i| i.likes).sum())
    }

    /// Comment-like totals and folding deltas for one post.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn post_comment_likes(
        &self,
        post_id: Uuid,
        viewer_id: Option<Uuid>,
        folding: bool,
    ) -> Result<CommentLikesSummary, AppError> {
        let post = self
            .content
            .post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find post"))?;

        let (comments, ctx, author_gone) = tokio::try_join!(
            self.content.comments_of_post(post_id),
            self.visibility.viewer_context(viewer_id),
            self.privacy.gone_status(post.author_id),
        )?;

        if !post_visible(&ctx, &post, author_gone) {
            return Err(AppError::forbidden("You cannot see this post"));
        }

        let comment_ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
        let likes = self.content.likes_of_comments(&comment_ids).await?;

        let entries: Vec<CommentLikesEntry> = comments
            .iter()
            .map(|comment| {
                let hidden = !action_visible(&ctx, &post, comment.author_id);
                let likers = if hidden {
                    Vec::new()
                } else {
                    likes
                        .get(&comment.id)
                        .map(|ls| {
                            ls.iter()
                                .filter(|l| action_visible(&ctx, &post, l.user_id))
                                .map(|l| l.user_id)
                                .collect()
                        })
                        .unwrap_or_default()
                };
                CommentLikesEntry { hidden, likers }
            })
            .collect();

        Ok(comment_likes_summary(&entries, viewer_id, folding))
    }

    /// Count unread direct posts: distinct visible direct posts created
    /// after the viewer's watermark by another user, or carrying a visible
    /// comment created after the watermark by another user.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn count_unread_directs(&self, viewer_id: Uuid) -> Result<u32, AppError> {
        let Some(directs_feed_id) = self.privacy.directs_feed_id(viewer_id).await? else {
            return Ok(0);
        };

        let (watermark, posts, ctx) = tokio::try_join!(
            self.privacy.directs_read_at(viewer_id),
            self.content.posts_in_feed(directs_feed_id),
            self.visibility.viewer_context(Some(viewer_id)),
        )?;

        let author_ids: Vec<Uuid> = posts
            .iter()
            .map(|p| p.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let gone_map = self.privacy.gone_statuses(&author_ids).await?;

        let visible_posts: Vec<&Post> = posts
            .iter()
            .filter(|p| post_visible(&ctx, p, gone_map.get(&p.author_id).copied()))
            .collect();

        let visible_post_ids: Vec<Uuid> = visible_posts.iter().map(|p| p.id).collect();
        let comments_map = self.content.comments_of_posts(&visible_post_ids).await?;

        let unread = visible_posts
            .iter()
            .filter(|post| {
                Self::is_unread(post, viewer_id, watermark, &ctx, comments_map.get(&post.id))
            })
            .count();

        Ok(unread as u32)
    }

    fn is_unread(
        post: &Post,
        viewer_id: Uuid,
        watermark: DateTime<Utc>,
        ctx: &ViewerContext,
        comments: Option<&Vec<Comment>>,
    ) -> bool {
        if post.author_id != viewer_id && post.created_at > watermark {
            return true;
        }

        comments.is_some_and(|comments| {
            comments.iter().any(|c| {
                c.author_id != viewer_id
                    && c.created_at > watermark
                    && action_visible(ctx, post, c.author_id)
            })
        })
    }
}
