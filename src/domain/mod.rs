//! # Domain Layer
//!
//! The core rules of the visibility engine, independent of storage and
//! transport.
//!
//! ## Structure
//!
//! - **entities**: core entities (User, Post, Comment, ...) and the
//!   store traits the storage collaborator implements
//! - **value_objects**: immutable value types (OpenList, HideType)
//! - **services**: pure resolution logic over snapshots
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure concerns
//! - Store traits define the data access contracts (dependency inversion)
//! - Resolution functions are pure and total over their input snapshot

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
