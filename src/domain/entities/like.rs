//! Like entity, shared by post likes and comment likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A like on a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    /// The liked post or comment
    pub item_id: Uuid,

    /// Who liked it
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(item_id: Uuid, user_id: Uuid) -> Self {
        Self {
            item_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
