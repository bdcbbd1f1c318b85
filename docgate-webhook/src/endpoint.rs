//! Webhook endpoint registrations.

use docgate_types::{EndpointId, EventName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A per-endpoint signing secret with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointSecret {
    bytes: Vec<u8>,
}

impl EndpointSecret {
    /// Creates a secret from raw bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the secret bytes for signing.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for EndpointSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

impl From<String> for EndpointSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl fmt::Debug for EndpointSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A registered webhook destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    /// Endpoint identity.
    pub id: EndpointId,
    /// Destination URL; only HTTPS destinations receive anything.
    pub url: String,
    /// Shared signing secret.
    pub secret: EndpointSecret,
    /// Events this endpoint subscribes to.
    pub events: BTreeSet<EventName>,
    /// Inactive endpoints receive nothing.
    pub active: bool,
}

impl WebhookEndpoint {
    /// Creates an active endpoint subscribed to the given events.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        secret: EndpointSecret,
        events: impl IntoIterator<Item = EventName>,
    ) -> Self {
        Self {
            id: EndpointId::new(),
            url: url.into(),
            secret,
            events: events.into_iter().collect(),
            active: true,
        }
    }

    /// Returns true if this endpoint subscribes to `event`.
    #[must_use]
    pub fn subscribes_to(&self, event: &EventName) -> bool {
        self.events.contains(event)
    }

    /// Returns true if the destination scheme is HTTPS (case-insensitive).
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.url
            .get(..8)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
    }
}
