//! Shared Utilities
//!
//! Cross-cutting types used by every layer.

pub mod error;

pub use error::{AppError, ErrorBody};
