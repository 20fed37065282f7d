//! Visibility Resolution Service
//!
//! Orchestrates a resolution: one round of batched port lookups builds the
//! viewer's snapshot, then the pure domain rules are evaluated against it.
//! The bulk operations never degrade to per-id queries.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{
    BanStore, CommentView, ContentStore, GroupPolicyStore, PrivacyStore,
};
use crate::domain::services::{classify_action, effective_hide_type, post_visible, ViewerContext};
use crate::domain::value_objects::{HideType, OpenList};
use crate::shared::error::AppError;

/// Options for [`VisibilityService::comment_access`].
#[derive(Debug, Clone, Default)]
pub struct AccessOptions {
    /// Fail with `Forbidden` instead of returning a placeholder view
    pub must_be_visible: bool,

    /// Strip `HiddenAuthorBanned` (and only that reason) before selection;
    /// ignored in strict mode
    pub unlock_banned_comments: bool,

    /// Hide types the viewer wants rendered as placeholders
    pub hide_comments_of_types: HashSet<HideType>,
}

impl AccessOptions {
    pub fn strict() -> Self {
        Self {
            must_be_visible: true,
            ..Self::default()
        }
    }
}

/// The visibility resolver.
///
/// Pure and synchronous over its snapshot: apart from the initial batched
/// fetches, no operation suspends, and resolving twice against unchanged
/// state yields identical results.
pub struct VisibilityService {
    bans: Arc<dyn BanStore>,
    groups: Arc<dyn GroupPolicyStore>,
    privacy: Arc<dyn PrivacyStore>,
    content: Arc<dyn ContentStore>,
}

impl VisibilityService {
    pub fn new(
        bans: Arc<dyn BanStore>,
        groups: Arc<dyn GroupPolicyStore>,
        privacy: Arc<dyn PrivacyStore>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            bans,
            groups,
            privacy,
            content,
        }
    }

    /// Build the viewer's resolution snapshot with a fixed number of
    /// concurrent batched lookups.
    ///
    /// All lookups must observe one consistent point in time; the store
    /// implementations carry that contract.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn viewer_context(&self, viewer_id: Option<Uuid>) -> Result<ViewerContext, AppError> {
        let Some(viewer) = viewer_id else {
            return Ok(ViewerContext::anonymous());
        };

        let (visible_private_feed_ids, override_groups, admin_groups, banned_by_viewer, viewer_banned_by) =
            tokio::try_join!(
                self.privacy.visible_private_feed_ids(viewer),
                self.groups.overrides_for(viewer),
                self.groups.admin_groups_of(viewer),
                self.bans.list_banned(viewer),
                self.bans.list_banners(viewer),
            )?;

        // Only an admin's override restores people who banned the viewer
        let admin_override_groups: Vec<Uuid> = override_groups
            .iter()
            .filter(|g| admin_groups.contains(g))
            .copied()
            .collect();
        let override_groups: Vec<Uuid> = override_groups.into_iter().collect();

        let (override_feed_ids, admin_override_feed_ids) = tokio::try_join!(
            self.privacy.posts_feed_ids_of_groups(&override_groups),
            self.privacy.posts_feed_ids_of_groups(&admin_override_groups),
        )?;

        Ok(ViewerContext {
            viewer_id: Some(viewer),
            visible_private_feed_ids,
            banned_by_viewer,
            viewer_banned_by,
            override_feed_ids,
            admin_override_feed_ids,
        })
    }

    /// Whether one post is visible to the viewer.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn is_post_visible(
        &self,
        post_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let post = self
            .content
            .post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find post"))?;

        let (ctx, author_gone) = tokio::try_join!(
            self.viewer_context(viewer_id),
            self.privacy.gone_status(post.author_id),
        )?;

        Ok(post_visible(&ctx, &post, author_gone))
    }

    /// Posts from `post_ids` visible to the viewer, input order preserved.
    #[tracing::instrument(skip(self, post_ids), fields(posts = post_ids.len()), level = "debug")]
    pub async fn select_visible_posts(
        &self,
        post_ids: &[Uuid],
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<Uuid>, AppError> {
        let (posts, ctx) = tokio::try_join!(
            self.content.posts_by_ids(post_ids),
            self.viewer_context(viewer_id),
        )?;

        let author_ids: Vec<Uuid> = posts
            .values()
            .map(|p| p.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let gone_map = self.privacy.gone_statuses(&author_ids).await?;

        Ok(post_ids
            .iter()
            .filter(|id| {
                posts
                    .get(id)
                    .is_some_and(|p| post_visible(&ctx, p, gone_map.get(&p.author_id).copied()))
            })
            .copied()
            .collect())
    }

    /// The exact set of users who could see a post with the given author
    /// and destination feeds, as an open list.
    ///
    /// Takes post properties instead of a post id so it can run after the
    /// post itself was deleted, with saved properties.
    #[tracing::instrument(skip(self, destination_feed_ids), level = "debug")]
    pub async fn audience_of(
        &self,
        author_id: Uuid,
        destination_feed_ids: &[i64],
    ) -> Result<OpenList<Uuid>, AppError> {
        if self.privacy.gone_status(author_id).await?.is_some() {
            return Ok(OpenList::empty());
        }

        let groups = self.privacy.groups_of_feed_ids(destination_feed_ids).await?;

        let (banned_by_author, author_banned_by, override_members, privacy_allowed) =
            tokio::try_join!(
                self.bans.list_banned(author_id),
                self.bans.list_banners(author_id),
                self.groups.members_with_override(&groups),
                self.privacy.feed_readers(destination_feed_ids),
            )?;

        let all_with_override: OpenList<Uuid> =
            override_members.iter().map(|m| m.user_id).collect();
        let admins_with_override: OpenList<Uuid> = override_members
            .iter()
            .filter(|m| m.is_admin)
            .map(|m| m.user_id)
            .collect();

        // Mirror of the boolean ban gates, as set operations
        let banned_out = OpenList::finite(author_banned_by)
            .difference(&all_with_override)
            .union(&OpenList::finite(banned_by_author).difference(&admins_with_override));

        Ok(privacy_allowed.difference(&banned_out))
    }

    /// The set of users who can see a comment with the given author on the
    /// given post: the post's audience minus the comment author's ban
    /// relations, with the post author carved out of the banned-by-author
    /// exclusion.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn audience_of_comment(
        &self,
        post_id: Uuid,
        comment_author: Uuid,
    ) -> Result<OpenList<Uuid>, AppError> {
        let post = self
            .content
            .post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find post"))?;

        let post_viewers = self
            .audience_of(post.author_id, &post.destination_feed_ids)
            .await?;

        let groups = self
            .privacy
            .groups_of_feed_ids(&post.destination_feed_ids)
            .await?;

        let (banned_by_author, author_banned_by, override_members) = tokio::try_join!(
            self.bans.list_banned(comment_author),
            self.bans.list_banners(comment_author),
            self.groups.members_with_override(&groups),
        )?;

        let all_with_override: OpenList<Uuid> =
            override_members.iter().map(|m| m.user_id).collect();
        let admins_with_override: OpenList<Uuid> = override_members
            .iter()
            .filter(|m| m.is_admin)
            .map(|m| m.user_id)
            .collect();

        let banned_out = OpenList::finite(author_banned_by)
            .difference(&all_with_override)
            .union(
                // The post author always sees comments on their own post
                &OpenList::finite(banned_by_author)
                    .difference(&admins_with_override.union(&OpenList::finite([post.author_id]))),
            );

        Ok(post_viewers.intersection(&banned_out.inverse()))
    }

    /// Hide-reason classification for one comment, in display-priority
    /// order. Empty means fully visible.
    pub async fn classify_comment(
        &self,
        comment_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<HideType>, AppError> {
        let comment = self
            .content
            .comment_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find comment"))?;
        let post = self
            .content
            .post_by_id(comment.post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find post"))?;
        let ctx = self.viewer_context(viewer_id).await?;

        Ok(classify_action(&ctx, &post, comment.author_id))
    }

    /// Locate a comment and resolve what the viewer may see of it.
    ///
    /// Post visibility applies first: a comment of an invisible post is
    /// itself invisible, reported as the post's failure. In strict mode any
    /// non-empty classification raises `Forbidden` naming the first reason;
    /// otherwise a placeholder view is returned.
    #[tracing::instrument(skip(self, options), level = "debug")]
    pub async fn comment_access(
        &self,
        comment_id: Uuid,
        viewer_id: Option<Uuid>,
        options: &AccessOptions,
    ) -> Result<CommentView, AppError> {
        let comment = self
            .content
            .comment_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find comment"))?;
        let post = self
            .content
            .post_by_id(comment.post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Can't find post"))?;

        let (ctx, author_gone) = tokio::try_join!(
            self.viewer_context(viewer_id),
            self.privacy.gone_status(post.author_id),
        )?;

        if !post_visible(&ctx, &post, author_gone) {
            return Err(AppError::forbidden("You cannot see this post"));
        }

        let reasons = classify_action(&ctx, &post, comment.author_id);

        if options.must_be_visible {
            if let Some(msg) = reasons.first().and_then(|r| r.forbidden_message()) {
                return Err(AppError::forbidden(msg));
            }

            if comment.hide_type.is_hidden() {
                return Err(AppError::forbidden("You don't have access to this comment"));
            }

            return Ok(CommentView::render(&comment, HideType::Visible));
        }

        let effective = effective_hide_type(
            &reasons,
            comment.hide_type,
            &options.hide_comments_of_types,
            options.unlock_banned_comments,
        );

        Ok(CommentView::render(&comment, effective))
    }
}
