//! Group ban-override policy store trait.
//!
//! A `GroupBanOverride` is a user's opt-in to see banned-related content
//! within one specific group. Overrides have no effect outside that group's
//! own "Posts" feed. Admin status is tracked separately because only an
//! admin's override can restore visibility of users who banned *them*.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A group member who opted out of ban enforcement in that group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideMember {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Group policy port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupPolicyStore: Send + Sync {
    /// Enable or disable a user's ban override in a group. Returns whether
    /// stored state actually changed (both directions are idempotent).
    async fn set_override(
        &self,
        user_id: Uuid,
        group_id: Uuid,
        enabled: bool,
    ) -> Result<bool, AppError>;

    /// Groups where the user holds an override.
    async fn overrides_for(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;

    /// Restricted form of [`Self::overrides_for`]: only within `group_ids`.
    async fn overrides_in(
        &self,
        group_ids: &[Uuid],
        user_id: Uuid,
    ) -> Result<HashSet<Uuid>, AppError>;

    /// All members holding an override in any of the given groups, with
    /// their admin status. Bulk form for audience computation over many
    /// groups at once.
    async fn members_with_override(
        &self,
        group_ids: &[Uuid],
    ) -> Result<Vec<OverrideMember>, AppError>;

    /// Groups administered by the user.
    async fn admin_groups_of(&self, user_id: Uuid) -> Result<HashSet<Uuid>, AppError>;
}
