//! Comment entity and viewer-facing comment rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::HideType;

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,

    pub post_id: Uuid,

    pub author_id: Uuid,

    pub body: String,

    /// Stored hide classification (persisted `hide_type` column)
    #[serde(default)]
    pub hide_type: HideType,

    /// 1-based position within the post's comment list
    pub seq_number: i32,

    pub created_at: DateTime<Utc>,
}

impl Default for Comment {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            post_id: Uuid::nil(),
            author_id: Uuid::nil(),
            body: String::new(),
            hide_type: HideType::Visible,
            seq_number: 1,
            created_at: Utc::now(),
        }
    }
}

/// A comment as rendered for one specific viewer.
///
/// `created_by` is nulled and the body replaced by the fixed placeholder
/// whenever the effective hide type is not `Visible`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub created_by: Option<Uuid>,
    pub body: String,
    pub hide_type: HideType,
    pub seq_number: i32,
}

impl CommentView {
    /// Render a comment with the given effective hide type.
    pub fn render(comment: &Comment, hide_type: HideType) -> Self {
        match hide_type.hidden_body() {
            None => Self {
                id: comment.id,
                post_id: comment.post_id,
                created_by: Some(comment.author_id),
                body: comment.body.clone(),
                hide_type,
                seq_number: comment.seq_number,
            },
            Some(placeholder) => Self {
                id: comment.id,
                post_id: comment.post_id,
                created_by: None,
                body: placeholder.to_string(),
                hide_type,
                seq_number: comment.seq_number,
            },
        }
    }
}
