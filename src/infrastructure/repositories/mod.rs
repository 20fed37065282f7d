//! Repository Implementations
//!
//! PostgreSQL implementations of the store traits defined in the domain
//! layer. Each store handles data access for one concern.
//!
//! - **PgBanStore** - user-to-user ban pairs
//! - **PgGroupPolicyStore** - per-group ban overrides and admin rosters
//! - **PgPrivacyStore** - account state, privacy flags, and feed audiences
//! - **PgContentStore** - posts, comments, and comment likes

pub mod ban_store;
pub mod content_store;
pub mod group_policy_store;
pub mod privacy_store;

pub use ban_store::PgBanStore;
pub use content_store::PgContentStore;
pub use group_policy_store::PgGroupPolicyStore;
pub use privacy_store::PgPrivacyStore;
