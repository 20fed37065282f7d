//! # Application Layer
//!
//! Services that wire the store ports to the pure domain rules. Controllers
//! and serializers (external) consume these; nothing here knows about
//! transports.

pub mod services;

pub use services::{
    AccessOptions, AudienceFanout, CounterService, EventPublisher, LikesInfo, RealtimeEvent,
    VisibilityService,
};
