//! # Domain Entities
//!
//! Core entities of the visibility engine and the store traits (ports)
//! through which the storage collaborator supplies their state.
//!
//! ## Entities
//!
//! - **User**: account with privacy flags and terminal (`gone`) state;
//!   groups are users with `kind = group`
//! - **Feed**: named feed with a serial integer id
//! - **Post**: content published to destination feeds
//! - **Comment**: content attached to a post, with a stored hide type
//! - **Like**: a like on a post or comment
//!
//! Bans are directed edges keyed by `(banner_id, banned_id)` and live only
//! in storage; the engine consumes them as id sets through [`BanStore`].
//!
//! ## Ports
//!
//! Store traits are defined beside the entities they serve and implemented
//! in the infrastructure layer, following dependency inversion:
//! [`BanStore`], [`GroupPolicyStore`], [`PrivacyStore`], [`ContentStore`].

mod ban;
mod comment;
mod content;
mod feed;
mod group;
mod like;
mod post;
mod user;

pub use ban::BanStore;
pub use comment::{Comment, CommentView};
pub use content::ContentStore;
pub use feed::{Feed, FeedName};
pub use group::{GroupPolicyStore, OverrideMember};
pub use like::Like;
pub use post::Post;
pub use user::{AccountKind, GoneStatus, PrivacyFlags, PrivacyStore, User};

#[cfg(test)]
pub use ban::MockBanStore;
#[cfg(test)]
pub use content::MockContentStore;
#[cfg(test)]
pub use group::MockGroupPolicyStore;
#[cfg(test)]
pub use user::MockPrivacyStore;
