//! Error types for the token module.

use docgate_license::Feature;
use thiserror::Error;

/// Token-specific errors.
///
/// `NotFound`, `Expired`, and `UsesExceeded` are expected redemption
/// outcomes, not faults; hosts map them to denial responses. `StoreTimeout`
/// and `Store` are transient infrastructure failures.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token with the presented id.
    #[error("access token not found")]
    NotFound,

    /// Token is past its expiry.
    #[error("access token expired at {expired_at}")]
    Expired {
        /// Expiry timestamp (seconds since epoch).
        expired_at: i64,
    },

    /// Every permitted use has been redeemed.
    #[error("access token uses exceeded (max {max_uses})")]
    UsesExceeded {
        /// The token's use limit.
        max_uses: u32,
    },

    /// The license does not grant the required feature.
    #[error("license feature disabled: {feature}")]
    FeatureDisabled {
        /// The missing feature.
        feature: Feature,
    },

    /// Requested lifetime was zero seconds.
    #[error("token ttl must be at least one second")]
    ZeroTtl,

    /// Requested use limit was zero.
    #[error("token max uses must be at least one")]
    ZeroMaxUses,

    /// A store call exceeded its deadline.
    #[error("token store timed out after {timeout_ms} ms")]
    StoreTimeout {
        /// The configured bound in milliseconds.
        timeout_ms: u64,
    },

    /// Store-side failure.
    #[error("token store error: {0}")]
    Store(String),
}

impl TokenError {
    /// Returns true for transient infrastructure failures a caller may
    /// retry. A retry cannot double-consume: the store commits atomically
    /// or not at all.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreTimeout { .. } | Self::Store(_))
    }

    /// Returns true for expected redemption denials.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::Expired { .. }
                | Self::UsesExceeded { .. }
                | Self::FeatureDisabled { .. }
        )
    }
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;
