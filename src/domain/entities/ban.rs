//! Ban graph store trait.
//!
//! Bans are directed edges: `(banner_id, banned_id)`. Creating one never
//! implies the reverse edge, and the two directions gate visibility
//! differently (see the visibility rules).

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::error::AppError;

/// Ban graph port.
///
/// The batched map lookups exist so that resolving a whole feed page stays
/// at a fixed number of round trips; implementations must not degrade them
/// to per-id queries. Ban mutations are expected to be followed by
/// cache/audience invalidation for affected feeds, which is the storage
/// collaborator's responsibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BanStore: Send + Sync {
    /// Create a ban edge. Rejects self-bans with [`AppError::Invalid`];
    /// creating an existing edge is a no-op.
    async fn create(&self, banner_id: Uuid, banned_id: Uuid) -> Result<(), AppError>;

    /// Remove a ban edge. Removing an absent edge is a no-op.
    async fn delete(&self, banner_id: Uuid, banned_id: Uuid) -> Result<(), AppError>;

    /// Users banned by `user_id`.
    async fn list_banned(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;

    /// Users who banned `user_id`.
    async fn list_banners(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;

    /// Batched [`Self::list_banned`] over many subjects.
    async fn bans_map(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, HashSet<Uuid>>, AppError>;

    /// Batched [`Self::list_banners`] over many subjects.
    async fn banned_by_map(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, HashSet<Uuid>>, AppError>;

    /// True when a ban exists in either direction between `a` and `b`.
    async fn either_direction(&self, a: Uuid, b: Uuid) -> Result<bool, AppError>;

    /// Users related to `user_id` by a ban in either direction. Used to
    /// exclude mutually-related users from unrelated features.
    async fn related_users(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;
}
