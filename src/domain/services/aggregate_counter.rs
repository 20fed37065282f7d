//! Ban-aware aggregate counting.
//!
//! The pure half of the counters: given per-comment entries already
//! classified against the viewer's snapshot, produce the like totals and
//! the folding deltas in one pass. An item excluded by classification is
//! never counted.

use uuid::Uuid;

/// A post folds its comment list in the UI when it has more than this many
/// comments; the folded subset is the first and the last comment.
pub const FOLD_THRESHOLD: usize = 3;

/// One comment of a post, pre-classified for the viewer.
#[derive(Debug, Clone)]
pub struct CommentLikesEntry {
    /// Ban classification yielded a non-empty hide set
    pub hidden: bool,

    /// Likers of this comment that are themselves visible to the viewer
    pub likers: Vec<Uuid>,
}

/// Comment-like counts for one post, as serializers expose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentLikesSummary {
    /// Likes on visible comments
    pub comment_likes: u32,

    /// Of those, likes made by the viewer
    pub own_comment_likes: u32,

    /// Likes the comment folding hides
    pub omitted_comment_likes: u32,

    /// Of those, likes made by the viewer
    pub omitted_own_comment_likes: u32,
}

/// Compute the like totals and folding deltas over a post's ordered comment
/// list.
///
/// Folding positions are taken on the full ordered list (hidden comments
/// keep their slots); hidden comments contribute nothing to any count.
pub fn comment_likes_summary(
    entries: &[CommentLikesEntry],
    viewer_id: Option<Uuid>,
    folding: bool,
) -> CommentLikesSummary {
    let own_count = |likers: &[Uuid]| -> u32 {
        viewer_id.map_or(0, |v| likers.iter().filter(|&&l| l == v).count() as u32)
    };

    let mut summary = CommentLikesSummary::default();
    let folded = folding && entries.len() > FOLD_THRESHOLD;
    let last = entries.len().saturating_sub(1);

    for (idx, entry) in entries.iter().enumerate() {
        if entry.hidden {
            continue;
        }

        let likes = entry.likers.len() as u32;
        let own = own_count(&entry.likers);
        summary.comment_likes += likes;
        summary.own_comment_likes += own;

        // The folded view keeps the first and the last comment
        if folded && idx != 0 && idx != last {
            summary.omitted_comment_likes += likes;
            summary.omitted_own_comment_likes += own;
        }
    }

    summary
}
