//! Token persistence and the atomic consume primitive.

use crate::error::{TokenError, TokenResult};
use crate::token::{AccessToken, AccessTokenId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Token persistence.
///
/// `consume` is the contract's heart: lookup, expiry check, and the
/// conditional increment happen as one indivisible operation. Two racing
/// redemptions of a token with one use left must yield one success and one
/// `UsesExceeded`, never two successes.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Inserts a freshly issued token, replacing any record with the same
    /// id.
    async fn insert(&self, token: AccessToken) -> TokenResult<()>;

    /// Looks up a token by id without consuming it.
    async fn get(&self, id: &AccessTokenId) -> TokenResult<AccessToken>;

    /// Atomically redeems one use at `now` (seconds since epoch) and
    /// returns the post-increment record.
    ///
    /// A token past expiry reports `Expired` even when uses remain: expiry
    /// wins when both limits are crossed.
    async fn consume(&self, id: &AccessTokenId, now: i64) -> TokenResult<AccessToken>;
}

/// In-memory store backed by a single `RwLock`.
///
/// The whole consume runs under one write guard, the in-memory equivalent
/// of a conditional single-row update. Records are never deleted here;
/// expired and exhausted tokens are inert, and retention is the host's
/// concern.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<AccessTokenId, AccessToken>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tokens.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Returns true if no tokens are stored.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert(&self, token: AccessToken) -> TokenResult<()> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id().clone(), token);
        Ok(())
    }

    async fn get(&self, id: &AccessTokenId) -> TokenResult<AccessToken> {
        let tokens = self.tokens.read().await;
        tokens.get(id).cloned().ok_or(TokenError::NotFound)
    }

    async fn consume(&self, id: &AccessTokenId, now: i64) -> TokenResult<AccessToken> {
        let mut tokens = self.tokens.write().await;
        let token = tokens.get_mut(id).ok_or(TokenError::NotFound)?;

        if token.is_expired(now) {
            return Err(TokenError::Expired {
                expired_at: token.expires_at(),
            });
        }
        if token.is_exhausted() {
            return Err(TokenError::UsesExceeded {
                max_uses: token.max_uses(),
            });
        }

        token.record_use();
        Ok(token.clone())
    }
}
