//! Error types for the webhook module.

use docgate_types::EventName;
use thiserror::Error;

/// Webhook precondition violations.
///
/// Delivery failure is deliberately absent: a delivery that exhausts its
/// retries comes back as a value with `DeliveryStatus::Failed`, not as an
/// error.
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    /// Destination URL is not HTTPS.
    #[error("webhook url must be https: {0}")]
    InsecureUrl(String),

    /// The endpoint is switched off.
    #[error("webhook endpoint is inactive")]
    InactiveEndpoint,

    /// The endpoint does not subscribe to the event.
    #[error("endpoint not subscribed to event: {0}")]
    NotSubscribed(EventName),
}

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;
