//! Post visibility rules.
//!
//! The pure half of the resolver: given a [`ViewerContext`] snapshot (one
//! round of batched lookups, performed by the application layer) and a post,
//! decide visibility without any further suspension. Same snapshot, same
//! answer.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::entities::{GoneStatus, Post};

/// Read-only snapshot of everything the visibility rules need to know about
/// one viewer.
///
/// Built once per resolution from batched lookups that must observe a single
/// consistent point in time, then shared by every predicate evaluation in
/// that resolution.
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    /// `None` for anonymous viewers
    pub viewer_id: Option<Uuid>,

    /// Private feed ids the viewer may read, including their own
    pub visible_private_feed_ids: HashSet<i64>,

    /// Users the viewer has banned
    pub banned_by_viewer: HashSet<Uuid>,

    /// Users who banned the viewer
    pub viewer_banned_by: HashSet<Uuid>,

    /// "Posts" feeds of groups where the viewer holds a ban override
    pub override_feed_ids: HashSet<i64>,

    /// "Posts" feeds of groups where the viewer is an admin *and* holds a
    /// ban override
    pub admin_override_feed_ids: HashSet<i64>,
}

impl ViewerContext {
    /// Context of an anonymous viewer: no private feeds, no ban relations.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.viewer_id.is_none()
    }
}

/// Whether the post is visible to the context's viewer.
///
/// Gate order:
/// 1. Gone author: invisible to everybody, unconditionally.
/// 2. Privacy: private posts require the viewer to be the author or a
///    member of a destination private feed; protected posts require any
///    authenticated viewer.
/// 3. Bans (authenticated viewers only), both must hold:
///    a. the viewer banned the author: invisible unless the post lands in
///       a group feed where the viewer holds an override (membership
///       suffices);
///    b. the author banned the viewer: invisible unless the post lands in
///       a group feed where the viewer is an admin with an override.
///    The asymmetry is deliberate: opting out of ban-hiding lets you see
///    people you banned, but only an admin's opt-out restores people who
///    banned you.
pub fn post_visible(ctx: &ViewerContext, post: &Post, author_gone: Option<GoneStatus>) -> bool {
    if author_gone.is_some() {
        return false;
    }

    let Some(viewer) = ctx.viewer_id else {
        return !post.is_protected && !post.is_private;
    };

    if post.is_private
        && viewer != post.author_id
        && !post.is_in_any_feed(&ctx.visible_private_feed_ids)
    {
        return false;
    }

    if ctx.banned_by_viewer.contains(&post.author_id)
        && !post.is_in_any_feed(&ctx.override_feed_ids)
    {
        return false;
    }

    if ctx.viewer_banned_by.contains(&post.author_id)
        && !post.is_in_any_feed(&ctx.admin_override_feed_ids)
    {
        return false;
    }

    true
}
