//! Post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post published to one or more destination feeds.
///
/// Privacy flags can change after creation (`goPrivate`/`goPublic`) and take
/// effect for all future resolutions; nothing in this engine re-evaluates
/// past deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,

    pub author_id: Uuid,

    pub body: String,

    /// Feeds this post was published to (`destination_feed_ids` int array)
    pub destination_feed_ids: Vec<i64>,

    /// Visible only to the destination feeds' members
    pub is_private: bool,

    /// Hidden from anonymous viewers
    pub is_protected: bool,

    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether the post lands in any of the given feeds.
    pub fn is_in_any_feed(&self, feed_ids: &std::collections::HashSet<i64>) -> bool {
        self.destination_feed_ids.iter().any(|id| feed_ids.contains(id))
    }
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            author_id: Uuid::nil(),
            body: String::new(),
            destination_feed_ids: Vec::new(),
            is_private: false,
            is_protected: false,
            created_at: Utc::now(),
        }
    }
}
