//! License key parsing.
//!
//! License keys use the format: `DG-<TIER>-XXXXX-XXXXX-XXXXX-XXXXX`
//!
//! `<TIER>` is one of the tier codes (`PRO`, `LTD`, `DEV`) and each of the
//! four trailing groups is five characters from `A-Z0-9`. Input is trimmed
//! and uppercased before matching, so keys survive copy-paste mangling.
//!
//! Parsing is purely syntactic. A key that parses is *well-formed*, not
//! *entitled*: activation state, expiry, and the feature set live on the
//! [`LicenseRecord`](crate::LicenseRecord) and are judged by the evaluator.

use crate::error::{LicenseError, LicenseResult};
use crate::record::{Feature, FeatureSet};
use serde::{Deserialize, Serialize};

/// The license tier encoded in the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
    /// Full commercial tier (every premium feature).
    Full,
    /// Limited tier (fixed feature subset).
    Limited,
    /// Development tier (every feature, for integration work).
    Development,
}

impl LicenseTier {
    /// Returns the stable wire code used in key strings.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Full => "PRO",
            Self::Limited => "LTD",
            Self::Development => "DEV",
        }
    }

    /// Resolves a wire code back to a tier, or None if unrecognized.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PRO" => Some(Self::Full),
            "LTD" => Some(Self::Limited),
            "DEV" => Some(Self::Development),
            _ => None,
        }
    }

    /// Returns the feature set a fresh license of this tier grants.
    #[must_use]
    pub fn default_features(&self) -> FeatureSet {
        match self {
            Self::Full | Self::Development => FeatureSet::All,
            Self::Limited => FeatureSet::from_iter([Feature::SeoMetadata, Feature::Analytics]),
        }
    }
}

/// A syntactically valid license key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseKey {
    /// The normalized key string (trimmed, uppercased).
    raw: String,
    /// Tier decoded from the key.
    tier: LicenseTier,
}

impl LicenseKey {
    /// Parses a license key string.
    ///
    /// Input is trimmed and uppercased first. Matching is purely syntactic
    /// and never asserts trust.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not have the
    /// `DG-<TIER>-XXXXX-XXXXX-XXXXX-XXXXX` shape or names an unknown tier.
    pub fn parse(key: &str) -> LicenseResult<Self> {
        let key = key.trim().to_ascii_uppercase();

        let parts: Vec<&str> = key.split('-').collect();
        if parts.len() != 6 {
            return Err(LicenseError::InvalidKeyFormat(
                "key must have six dash-separated parts".to_string(),
            ));
        }

        if parts[0] != "DG" {
            return Err(LicenseError::InvalidKeyFormat(format!(
                "key must start with DG, got {}",
                parts[0]
            )));
        }

        let tier = LicenseTier::from_code(parts[1])
            .ok_or_else(|| LicenseError::UnknownTier(parts[1].to_string()))?;

        for group in &parts[2..] {
            if group.len() != 5 || !group.bytes().all(is_key_char) {
                return Err(LicenseError::InvalidKeyFormat(
                    "key groups must be five characters from A-Z0-9".to_string(),
                ));
            }
        }

        Ok(Self { raw: key, tier })
    }

    /// Returns the normalized key string.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the tier encoded in the key.
    #[must_use]
    pub fn tier(&self) -> LicenseTier {
        self.tier
    }
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}
