//! # Visibility Engine Library
//!
//! This crate resolves who may see what in a social-network backend:
//! - Post and comment visibility under user-to-user bans
//! - Per-group ban overrides with asymmetric admin gates
//! - Private and protected feed audiences as closed set algebra
//! - Like counters and unread-direct counters filtered by visibility
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, set algebra, and pure visibility rules
//! - **Application Layer**: Viewer-context assembly and resolution services
//! - **Infrastructure Layer**: PostgreSQL store implementations
//!
//! ## Module Structure
//!
//! ```text
//! visibility_engine/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Resolution, counter, and fan-out services
//! +-- infrastructure/ Database store implementations
//! +-- shared/         Common utilities (errors)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Resolution services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;
