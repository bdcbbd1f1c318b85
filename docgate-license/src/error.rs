//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Key does not match the `DG-<TIER>-XXXXX-XXXXX-XXXXX-XXXXX` shape.
    #[error("invalid license key format: {0}")]
    InvalidKeyFormat(String),

    /// Key has the right shape but an unrecognized tier code.
    #[error("unknown license tier code: {0}")]
    UnknownTier(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
