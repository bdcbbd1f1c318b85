//! Signed webhook delivery for DocGate.
//!
//! This crate handles:
//! - HMAC-SHA256 payload signing and constant-time verification
//! - Endpoint registrations with per-endpoint secrets and event filters
//! - Delivery records with a full per-attempt audit trail
//! - Ordered delivery attempts with exponential backoff
//!
//! # Design Principles
//!
//! - **Sign the bytes you send**: the signature covers the exact
//!   transmitted payload, so any re-serialization on the way out would
//!   break verification at the receiver
//! - **HTTPS only**: plaintext destinations are refused before anything
//!   is signed or sent
//! - **Failure is an outcome**: a delivery that exhausts its retries comes
//!   back as a `Failed` record for the audit trail, not as an error
//!
//! # Wire Contract
//!
//! Every request carries three headers: `X-Webhook-Event` (event name),
//! `X-Webhook-Signature` (`sha256=<hex>`), and `X-Webhook-Timestamp`
//! (send time, seconds since epoch).

mod backoff;
mod delivery;
mod dispatcher;
mod endpoint;
mod error;
mod signer;
mod transport;

pub use backoff::RetryPolicy;
pub use delivery::{
    DeliveryAttempt, DeliveryRequest, DeliveryStatus, WebhookDelivery, HEADER_EVENT,
    HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
pub use dispatcher::WebhookDispatcher;
pub use endpoint::{EndpointSecret, WebhookEndpoint};
pub use error::{WebhookError, WebhookResult};
pub use signer::{sign, verify, SIGNATURE_PREFIX};
pub use transport::{TransportError, WebhookTransport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
