//! Shared test helpers for token tests.

#![allow(dead_code)]

use async_trait::async_trait;
use docgate_license::{LicenseConfig, LicenseRecord, LicenseValidator};
use docgate_tokens::{
    AccessToken, AccessTokenId, MemoryTokenStore, TokenError, TokenPolicy, TokenResult,
    TokenService, TokenStore,
};
use docgate_types::ManualClock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub const NOW: i64 = 1_750_000_000;

/// Returns a full-tier license activated without expiry.
pub fn licensed() -> LicenseRecord {
    let mut record = LicenseRecord::for_key("DG-PRO-ABCDE-12345-FGHIJ-67890");
    record.activate(None);
    record
}

/// Returns a limited-tier license (grants no access links).
pub fn limited_license() -> LicenseRecord {
    let mut record = LicenseRecord::for_key("DG-LTD-ABCDE-12345-FGHIJ-67890");
    record.activate(None);
    record
}

/// Returns a service wired to the given store and clock with the default
/// policy.
pub fn service(store: Arc<dyn TokenStore>, clock: Arc<ManualClock>) -> TokenService {
    service_with_policy(store, clock, TokenPolicy::default())
}

/// Returns a service with an explicit policy.
pub fn service_with_policy(
    store: Arc<dyn TokenStore>,
    clock: Arc<ManualClock>,
    policy: TokenPolicy,
) -> TokenService {
    let validator = Arc::new(LicenseValidator::new(LicenseConfig::default()));
    TokenService::new(validator, store, clock, policy)
}

/// Store whose calls never complete. Exercises the service deadline.
pub struct SlowStore;

#[async_trait]
impl TokenStore for SlowStore {
    async fn insert(&self, _token: AccessToken) -> TokenResult<()> {
        std::future::pending().await
    }

    async fn get(&self, _id: &AccessTokenId) -> TokenResult<AccessToken> {
        std::future::pending().await
    }

    async fn consume(&self, _id: &AccessTokenId, _now: i64) -> TokenResult<AccessToken> {
        std::future::pending().await
    }
}

/// Store that fails the first `failures` consume calls before touching any
/// state, then behaves like a normal in-memory store.
pub struct FlakyStore {
    inner: MemoryTokenStore,
    failures_left: AtomicU32,
}

impl FlakyStore {
    pub fn new(failures: u32) -> Self {
        Self {
            inner: MemoryTokenStore::new(),
            failures_left: AtomicU32::new(failures),
        }
    }

    /// Seeds a token directly, bypassing the scripted failures.
    pub async fn seed(&self, token: AccessToken) {
        let _ = self.inner.insert(token).await;
    }
}

#[async_trait]
impl TokenStore for FlakyStore {
    async fn insert(&self, token: AccessToken) -> TokenResult<()> {
        self.inner.insert(token).await
    }

    async fn get(&self, id: &AccessTokenId) -> TokenResult<AccessToken> {
        self.inner.get(id).await
    }

    async fn consume(&self, id: &AccessTokenId, now: i64) -> TokenResult<AccessToken> {
        let tripped = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if tripped {
            return Err(TokenError::Store("connection reset".to_string()));
        }
        self.inner.consume(id, now).await
    }
}
