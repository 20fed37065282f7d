//! Application Services
//!
//! Async orchestration over the store ports: each resolution batches its
//! prerequisite lookups into a snapshot and evaluates the pure domain
//! rules against it.

pub mod counter_service;
pub mod fanout_service;
pub mod visibility_service;

pub use counter_service::{CounterService, LikesInfo};
pub use fanout_service::{AudienceFanout, EventPublisher, RealtimeEvent};
pub use visibility_service::{AccessOptions, VisibilityService};
