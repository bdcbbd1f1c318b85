//! Domain event names.
//!
//! Webhook endpoints subscribe to events by name. The set of names is open:
//! the hosting application may emit anything, but the core product events
//! have well-known constructors so call sites don't scatter string literals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a domain event, e.g. `document.viewed`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    /// Creates an event name from an arbitrary string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// A protected document was viewed through the embed.
    #[must_use]
    pub fn document_viewed() -> Self {
        Self::new("document.viewed")
    }

    /// A protected document was downloaded.
    #[must_use]
    pub fn document_downloaded() -> Self {
        Self::new("document.downloaded")
    }

    /// An access link was redeemed.
    #[must_use]
    pub fn link_consumed() -> Self {
        Self::new("link.consumed")
    }

    /// A license is inside its grace period and will expire soon.
    #[must_use]
    pub fn license_expiring() -> Self {
        Self::new("license.expiring")
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EventName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
