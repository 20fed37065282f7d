//! # Domain Value Objects
//!
//! Immutable value types used across the visibility rules:
//!
//! - **OpenList**: algebra over open sets of user ids, for audience math
//!   that must never enumerate the full user universe
//! - **HideType**: comment hide classification tags with their fixed
//!   placeholder bodies and denial messages

mod hide_type;
mod open_list;

pub use hide_type::HideType;
pub use open_list::{IdPredicate, OpenList};
