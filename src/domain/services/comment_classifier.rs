//! Comment hide classification.
//!
//! Derives the ordered hide-reason list for an action (comment or like) on
//! a post, and selects the effective hide type a viewer ends up seeing.
//! The reason ordering and the `unlock` asymmetry are fixed policy
//! constants, not derived from any other signal.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::entities::Post;
use crate::domain::services::visibility_rules::ViewerContext;
use crate::domain::value_objects::HideType;

/// Classify an action (comment, like) by its author against the viewer.
///
/// Two independent conditions contribute, in fixed display-priority order:
///
/// - `HiddenAuthorBanned`: the viewer banned the action's author and the
///   post is not in a group feed where the viewer holds an override.
/// - `HiddenViewerBanned`: the action's author banned the viewer, the post
///   is not in a group feed where the viewer is an admin with an override,
///   and the post is not the viewer's own. You always see actions on your
///   own posts, even from users who banned you.
///
/// Anonymous viewers have no ban relations, so the list is always empty.
pub fn classify_action(ctx: &ViewerContext, post: &Post, action_author: Uuid) -> Vec<HideType> {
    let Some(viewer) = ctx.viewer_id else {
        return Vec::new();
    };

    let mut reasons = Vec::with_capacity(2);

    if ctx.banned_by_viewer.contains(&action_author)
        && !post.is_in_any_feed(&ctx.override_feed_ids)
    {
        // Always first, when present
        reasons.push(HideType::HiddenAuthorBanned);
    }

    if ctx.viewer_banned_by.contains(&action_author)
        && !post.is_in_any_feed(&ctx.admin_override_feed_ids)
        && post.author_id != viewer
    {
        reasons.push(HideType::HiddenViewerBanned);
    }

    reasons
}

/// True when the action contributes to what the viewer sees (no hide
/// reasons apply).
pub fn action_visible(ctx: &ViewerContext, post: &Post, action_author: Uuid) -> bool {
    classify_action(ctx, post, action_author).is_empty()
}

/// Select the effective hide type for non-strict access.
///
/// `unlock_banned_comments` strips `HiddenAuthorBanned`, and only that
/// reason, from the ban-derived list before selection; it can never unlock
/// `HiddenViewerBanned`. The viewer's `hide_comments_of_types` preference
/// applies to the comment's stored hide type on top of the derived reasons;
/// an empty preference set hides nothing of the viewer's own accord.
pub fn effective_hide_type(
    reasons: &[HideType],
    stored: HideType,
    hide_comments_of_types: &HashSet<HideType>,
    unlock_banned_comments: bool,
) -> HideType {
    let mut filtered = reasons
        .iter()
        .copied()
        .filter(|t| !(unlock_banned_comments && *t == HideType::HiddenAuthorBanned));

    if let Some(first) = filtered.next() {
        return first;
    }

    if stored.is_hidden() && hide_comments_of_types.contains(&stored) {
        return stored;
    }

    HideType::Visible
}
