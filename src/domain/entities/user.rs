//! User entity and privacy store trait.
//!
//! Maps to the `users` table. Groups are users with `kind = group`; they own
//! a "Posts" feed that group posts are published to.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::OpenList;
use crate::shared::error::AppError;

/// Terminal account states. A gone user's content is visible to nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoneStatus {
    Suspended,
    Deleted,
}

impl GoneStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "suspended" => Some(Self::Suspended),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suspended => "suspended",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for GoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account kind stored in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    User,
    Group,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

/// A user account (or group) in the social network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: Uuid,

    pub username: String,

    /// `user` or `group`
    #[serde(default)]
    pub kind: AccountKind,

    /// Posts default to private feeds only
    pub is_private: bool,

    /// Content hidden from anonymous viewers
    pub is_protected: bool,

    /// Terminal state, if any
    pub gone_status: Option<GoneStatus>,

    /// Watermark for unread direct counting
    pub directs_read_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_gone(&self) -> bool {
        self.gone_status.is_some()
    }

    pub fn is_group(&self) -> bool {
        self.kind == AccountKind::Group
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            username: String::new(),
            kind: AccountKind::User,
            is_private: false,
            is_protected: false,
            gone_status: None,
            directs_read_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Per-user privacy flags, fetched together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrivacyFlags {
    pub is_private: bool,
    pub is_protected: bool,
}

/// Privacy/feed state port.
///
/// All lookups for a single resolution must observe one consistent storage
/// snapshot; mixing ban state and feed state from different points in time
/// is a correctness bug, not an allowed relaxation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrivacyStore: Send + Sync {
    /// Terminal state of a user, `Ok(None)` for active accounts.
    async fn gone_status(&self, user_id: Uuid) -> Result<Option<GoneStatus>, AppError>;

    /// Batched form; only gone users appear in the result map.
    async fn gone_statuses(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, GoneStatus>, AppError>;

    async fn privacy_flags(&self, user_id: Uuid) -> Result<PrivacyFlags, AppError>;

    /// Members of the user's private feeds (subscribers allowed to read).
    async fn private_feed_members(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;

    /// Private feed ids the viewer can read, including the viewer's own.
    async fn visible_private_feed_ids(&self, viewer_id: Uuid) -> Result<HashSet<i64>, AppError>;

    /// Groups whose "Posts" feed is among the given feed ids.
    async fn groups_of_feed_ids(&self, feed_ids: &[i64]) -> Result<Vec<Uuid>, AppError>;

    /// "Posts" feed ids owned by the given groups.
    async fn posts_feed_ids_of_groups(
        &self,
        group_ids: &[Uuid],
    ) -> Result<HashSet<i64>, AppError>;

    /// Who can read the given destination feeds, privacy-wise: everything
    /// when any feed is non-private, else the union of member sets.
    async fn feed_readers(&self, feed_ids: &[i64]) -> Result<OpenList<Uuid>, AppError>;

    /// The user's "Directs" feed, if they have one.
    async fn directs_feed_id(&self, user_id: Uuid) -> Result<Option<i64>, AppError>;

    async fn directs_read_at(&self, user_id: Uuid) -> Result<DateTime<Utc>, AppError>;
}
