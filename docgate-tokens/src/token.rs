//! Access-token records and opaque id generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use docgate_types::ResourceId;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes of entropy in a token id (256 bits).
pub const TOKEN_ID_BYTES: usize = 32;

/// An opaque, unguessable access-token identifier.
///
/// Ids are [`TOKEN_ID_BYTES`] of OS randomness, base64url-encoded without
/// padding (43 characters). They are never derived from the resource, the
/// clock, or anything else a caller could predict, and they carry no
/// embedded claims; everything about a token is looked up server-side.
///
/// The id is the capability, so `Debug` redacts it. Use
/// [`as_str`](Self::as_str) where the string form is deliberately needed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessTokenId(String);

impl AccessTokenId {
    /// Generates a fresh id from OS randomness.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_ID_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Wraps an id string presented by a client.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the URL-safe string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessTokenId").field(&"[REDACTED]").finish()
    }
}

/// A stored capability token granting bounded access to one document.
///
/// Both bounds always hold: a token is redeemable only while `now` is
/// strictly before `expires_at` and `use_count < max_uses`. The store is
/// the only writer of `use_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Opaque identifier (the capability).
    id: AccessTokenId,
    /// The document this token unlocks.
    resource_id: ResourceId,
    /// Issue timestamp (seconds since epoch).
    issued_at: i64,
    /// Expiry timestamp (seconds since epoch); redemption stops here.
    expires_at: i64,
    /// Redemption limit (at least 1).
    max_uses: u32,
    /// Redemptions so far; never exceeds `max_uses`.
    use_count: u32,
}

impl AccessToken {
    /// Creates a fresh token with a zero use count.
    #[must_use]
    pub fn new(
        id: AccessTokenId,
        resource_id: ResourceId,
        issued_at: i64,
        expires_at: i64,
        max_uses: u32,
    ) -> Self {
        Self {
            id,
            resource_id,
            issued_at,
            expires_at,
            max_uses,
            use_count: 0,
        }
    }

    /// Returns the opaque id.
    #[must_use]
    pub fn id(&self) -> &AccessTokenId {
        &self.id
    }

    /// Returns the document this token unlocks.
    #[must_use]
    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Returns the issue timestamp.
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Returns the expiry timestamp.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Returns the redemption limit.
    #[must_use]
    pub fn max_uses(&self) -> u32 {
        self.max_uses
    }

    /// Returns redemptions so far.
    #[must_use]
    pub fn use_count(&self) -> u32 {
        self.use_count
    }

    /// Returns true once `now` reaches the expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Returns true once every permitted use is redeemed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.use_count >= self.max_uses
    }

    /// Returns true if a redemption at `now` would succeed.
    #[must_use]
    pub fn is_consumable(&self, now: i64) -> bool {
        !self.is_expired(now) && !self.is_exhausted()
    }

    /// Returns how many redemptions remain, saturating at zero for
    /// records whose counters disagree.
    #[must_use]
    pub fn remaining_uses(&self) -> u32 {
        self.max_uses.saturating_sub(self.use_count)
    }

    /// Records one redemption. Store-internal; callers must have checked
    /// `is_consumable` under the same guard.
    pub(crate) fn record_use(&mut self) {
        self.use_count += 1;
    }
}
