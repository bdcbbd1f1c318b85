//! Delivery records and the wire contract.

use docgate_types::{DeliveryId, EndpointId, EventName};
use serde::{Deserialize, Serialize};

/// Header carrying the event name.
pub const HEADER_EVENT: &str = "X-Webhook-Event";

/// Header carrying the payload signature (`sha256=<hex>`).
pub const HEADER_SIGNATURE: &str = "X-Webhook-Signature";

/// Header carrying the send time (seconds since epoch).
pub const HEADER_TIMESTAMP: &str = "X-Webhook-Timestamp";

/// Lifecycle of one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Attempts may still run.
    Pending,
    /// An attempt got through. Terminal.
    Delivered,
    /// Every permitted attempt failed. Terminal.
    Failed,
}

impl DeliveryStatus {
    /// Returns true once no further attempts will run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }
}

/// Audit record of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// 1-based attempt number.
    pub number: u32,
    /// When the attempt ran (seconds since epoch).
    pub at: i64,
    /// Transport error, or None on success.
    pub error: Option<String>,
}

/// One webhook delivery and its full attempt history.
///
/// `attempt` only ever increases, and the status moves from `Pending` to
/// at most one terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookDelivery {
    /// Delivery identity.
    pub id: DeliveryId,
    /// Destination endpoint.
    pub endpoint_id: EndpointId,
    /// Event that triggered the delivery.
    pub event: EventName,
    /// Exact payload bytes that were signed.
    pub payload: Vec<u8>,
    /// Signature sent with every attempt (`sha256=<hex>`).
    pub signature: String,
    /// Attempts made so far.
    pub attempt: u32,
    /// Current lifecycle state.
    pub status: DeliveryStatus,
    /// Per-attempt audit trail.
    pub attempts: Vec<DeliveryAttempt>,
}

impl WebhookDelivery {
    /// Creates a pending delivery with no attempts yet.
    #[must_use]
    pub fn new(
        endpoint_id: EndpointId,
        event: EventName,
        payload: Vec<u8>,
        signature: String,
    ) -> Self {
        Self {
            id: DeliveryId::new(),
            endpoint_id,
            event,
            payload,
            signature,
            attempt: 0,
            status: DeliveryStatus::Pending,
            attempts: Vec::new(),
        }
    }

    /// Appends one attempt outcome to the audit trail.
    pub(crate) fn record_attempt(&mut self, at: i64, error: Option<String>) {
        self.attempt += 1;
        self.attempts.push(DeliveryAttempt {
            number: self.attempt,
            at,
            error,
        });
    }

    /// Marks the delivery delivered. Terminal states never change.
    pub(crate) fn mark_delivered(&mut self) {
        if self.status == DeliveryStatus::Pending {
            self.status = DeliveryStatus::Delivered;
        }
    }

    /// Marks the delivery failed. Terminal states never change.
    pub(crate) fn mark_failed(&mut self) {
        if self.status == DeliveryStatus::Pending {
            self.status = DeliveryStatus::Failed;
        }
    }
}

/// What a transport actually sends: destination, headers, exact bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    /// Destination URL.
    pub url: String,
    /// Request headers in send order.
    pub headers: Vec<(String, String)>,
    /// Exact payload bytes (the same bytes the signature covers).
    pub payload: Vec<u8>,
}

impl DeliveryRequest {
    /// Returns a header value by name, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }
}
