//! Feed entity.
//!
//! Feeds carry serial integer ids (the `feeds.id` column); posts reference
//! them through the `destination_feed_ids` array.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known named feeds every account owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedName {
    Posts,
    Directs,
    Comments,
    Likes,
}

impl FeedName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "Posts",
            Self::Directs => "Directs",
            Self::Comments => "Comments",
            Self::Likes => "Likes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Posts" => Some(Self::Posts),
            "Directs" => Some(Self::Directs),
            "Comments" => Some(Self::Comments),
            "Likes" => Some(Self::Likes),
            _ => None,
        }
    }
}

/// A named feed owned by a user or group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    /// Serial integer id
    pub id: i64,

    /// Owning user or group
    pub owner_id: Uuid,

    pub name: FeedName,

    /// Only members may read a private feed
    pub is_private: bool,
}
