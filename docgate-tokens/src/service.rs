//! Stateless token issue/redeem service.

use crate::error::{TokenError, TokenResult};
use crate::store::TokenStore;
use crate::token::{AccessToken, AccessTokenId};
use docgate_license::{Feature, LicenseRecord, LicenseValidator};
use docgate_types::{Clock, ResourceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Issue-time defaults and store call bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenPolicy {
    /// Lifetime applied when a request does not specify one (24 hours).
    pub default_ttl_secs: u32,
    /// Use limit applied when a request does not specify one (single use).
    pub default_max_uses: u32,
    /// Upper bound on any single store call.
    pub store_timeout_ms: u64,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            default_ttl_secs: 86_400,
            default_max_uses: 1,
            store_timeout_ms: 5_000,
        }
    }
}

/// Parameters for issuing one access link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    /// The document the link will unlock.
    pub resource_id: ResourceId,
    /// Lifetime in seconds; policy default when omitted.
    pub ttl_secs: Option<u32>,
    /// Redemption limit; policy default when omitted.
    pub max_uses: Option<u32>,
}

impl IssueRequest {
    /// A request taking policy defaults for everything but the resource.
    #[must_use]
    pub fn for_resource(resource_id: ResourceId) -> Self {
        Self {
            resource_id,
            ttl_secs: None,
            max_uses: None,
        }
    }
}

/// What a successful redemption grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// The document the caller may now serve.
    pub resource_id: ResourceId,
    /// Redemption count after this use.
    pub use_count: u32,
    /// The token's expiry (seconds since epoch).
    pub expires_at: i64,
}

/// Issues and redeems access tokens.
///
/// Stateless across calls: every decision is a function of the license
/// record, the policy, the clock, and the store. Collaborators are
/// injected once at construction and the service is shared by handle.
pub struct TokenService {
    validator: Arc<LicenseValidator>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    policy: TokenPolicy,
}

impl TokenService {
    /// Creates a service over the given collaborators.
    #[must_use]
    pub fn new(
        validator: Arc<LicenseValidator>,
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            validator,
            store,
            clock,
            policy,
        }
    }

    /// Returns the policy in force.
    #[must_use]
    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Issues a fresh access token for a protected document.
    ///
    /// The license must grant `Feature::AccessLinks` at the current
    /// instant; the license check runs before anything else. Zero
    /// `ttl_secs` or `max_uses` are rejected before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns `FeatureDisabled`, `ZeroTtl`, `ZeroMaxUses`, or a store
    /// failure.
    pub async fn issue(
        &self,
        license: &LicenseRecord,
        request: IssueRequest,
    ) -> TokenResult<AccessToken> {
        let now = self.clock.now_unix();

        if !self
            .validator
            .is_feature_enabled(license, Feature::AccessLinks, now)
        {
            return Err(TokenError::FeatureDisabled {
                feature: Feature::AccessLinks,
            });
        }

        let ttl_secs = request.ttl_secs.unwrap_or(self.policy.default_ttl_secs);
        if ttl_secs == 0 {
            return Err(TokenError::ZeroTtl);
        }
        let max_uses = request.max_uses.unwrap_or(self.policy.default_max_uses);
        if max_uses == 0 {
            return Err(TokenError::ZeroMaxUses);
        }

        let token = AccessToken::new(
            AccessTokenId::generate(),
            request.resource_id,
            now,
            now + i64::from(ttl_secs),
            max_uses,
        );

        self.bounded(self.store.insert(token.clone())).await?;

        // Token ids are capabilities and stay out of the logs.
        debug!(
            resource_id = %token.resource_id(),
            ttl_secs,
            max_uses,
            "issued access token"
        );
        Ok(token)
    }

    /// Redeems one use of a token and returns what it grants.
    ///
    /// Atomicity is entirely the store's contract; the service holds no
    /// state that could disagree with it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Expired`, `UsesExceeded`, or a store failure.
    pub async fn validate_and_consume(&self, id: &AccessTokenId) -> TokenResult<TokenGrant> {
        let now = self.clock.now_unix();
        let token = self.bounded(self.store.consume(id, now)).await?;

        debug!(
            resource_id = %token.resource_id(),
            use_count = token.use_count(),
            "access token consumed"
        );

        Ok(TokenGrant {
            resource_id: token.resource_id(),
            use_count: token.use_count(),
            expires_at: token.expires_at(),
        })
    }

    /// Runs a store call under the configured deadline.
    ///
    /// Elapsing maps to `StoreTimeout`, a transient outcome distinct from
    /// every token-state denial.
    async fn bounded<T>(&self, call: impl Future<Output = TokenResult<T>>) -> TokenResult<T> {
        let limit = Duration::from_millis(self.policy.store_timeout_ms);
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_ms = self.policy.store_timeout_ms,
                    "token store call timed out"
                );
                Err(TokenError::StoreTimeout {
                    timeout_ms: self.policy.store_timeout_ms,
                })
            }
        }
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
