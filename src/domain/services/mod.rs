//! # Domain Services
//!
//! Pure business logic evaluated against per-resolution snapshots. Nothing
//! here performs I/O; the application layer batches the port lookups into a
//! [`ViewerContext`](visibility_rules::ViewerContext) and calls in.

pub mod aggregate_counter;
pub mod comment_classifier;
pub mod visibility_rules;

pub use aggregate_counter::{
    comment_likes_summary, CommentLikesEntry, CommentLikesSummary, FOLD_THRESHOLD,
};
pub use comment_classifier::{action_visible, classify_action, effective_hide_type};
pub use visibility_rules::{post_visible, ViewerContext};
