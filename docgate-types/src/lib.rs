//! Core type definitions for DocGate.
//!
//! This crate defines the fundamental types shared by the licensing, access
//! link, and webhook crates:
//! - Resource, endpoint, and delivery identifiers (UUID v7)
//! - The injectable clock used everywhere the core reads time
//! - Domain event names for webhook subscriptions
//!
//! Domain-specific records (license records, tokens, deliveries) belong in
//! their respective crates, not here.

mod clock;
mod event;
mod ids;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::EventName;
pub use ids::{DeliveryId, EndpointId, ResourceId};
