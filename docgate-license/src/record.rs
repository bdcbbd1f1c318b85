//! License records and feature sets.

use crate::key::LicenseKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A premium product feature gated by license state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Expiring, usage-limited access links to protected documents.
    AccessLinks,
    /// Signed webhook notifications for document events.
    Webhooks,
    /// View and download analytics.
    Analytics,
    /// Search-engine metadata on embedded documents.
    SeoMetadata,
    /// Custom viewer theming.
    CustomViewer,
}

impl Feature {
    /// Returns the stable snake_case name used on the wire and in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AccessLinks => "access_links",
            Self::Webhooks => "webhooks",
            Self::Analytics => "analytics",
            Self::SeoMetadata => "seo_metadata",
            Self::CustomViewer => "custom_viewer",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of features a license grants.
///
/// The wildcard is explicit: `All` grants every feature, including ones
/// added after the license was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureSet {
    /// Every current and future feature.
    All,
    /// Exactly the listed features.
    Only(BTreeSet<Feature>),
}

impl FeatureSet {
    /// Returns the set that grants nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::Only(BTreeSet::new())
    }

    /// Returns true if this set grants `feature`.
    #[must_use]
    pub fn contains(&self, feature: Feature) -> bool {
        match self {
            Self::All => true,
            Self::Only(features) => features.contains(&feature),
        }
    }

    /// Returns true if this set grants nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(features) if features.is_empty())
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::Only(iter.into_iter().collect())
    }
}

/// The persisted status of a license record.
///
/// `GracePeriod` and `Expired` are caches of time-derived state. Evaluation
/// always recomputes them from `expires_at`, so writing an observed status
/// back to the record never changes later evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    /// Activated and inside its validity window when last written.
    Valid,
    /// The key failed syntactic validation.
    Invalid,
    /// The key parsed but the license has not been activated.
    Inactive,
    /// Past expiry, inside the grace window when last written.
    GracePeriod,
    /// Past expiry and past the grace window when last written.
    Expired,
}

/// A stored license and everything evaluation needs to know about it.
///
/// Records are created and updated by administrative action (activation,
/// renewal, revocation). Evaluation never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// The key string as entered (normalized when parseable).
    key: String,
    /// Persisted status.
    status: LicenseStatus,
    /// Expiration timestamp (seconds since epoch), or None for perpetual.
    expires_at: Option<i64>,
    /// Features this license grants.
    features: FeatureSet,
}

impl LicenseRecord {
    /// Builds the record for an entered key string.
    ///
    /// A parseable key yields an `Inactive` record carrying the tier's
    /// default features; activation is a separate administrative step. An
    /// unparseable key yields an `Invalid` record with no features. Bad
    /// input never panics and never escapes as an error.
    #[must_use]
    pub fn for_key(raw: &str) -> Self {
        match LicenseKey::parse(raw) {
            Ok(key) => Self {
                features: key.tier().default_features(),
                key: key.raw().to_string(),
                status: LicenseStatus::Inactive,
                expires_at: None,
            },
            Err(_) => Self {
                key: raw.trim().to_string(),
                status: LicenseStatus::Invalid,
                expires_at: None,
                features: FeatureSet::empty(),
            },
        }
    }

    /// Marks the record active with an optional expiry. Administrative
    /// action; `None` means perpetual.
    pub fn activate(&mut self, expires_at: Option<i64>) {
        self.status = LicenseStatus::Valid;
        self.expires_at = expires_at;
    }

    /// Writes an observed status back to the record.
    ///
    /// Persisting `GracePeriod` or `Expired` is safe: evaluation recomputes
    /// time-derived status from `expires_at`.
    pub fn set_status(&mut self, status: LicenseStatus) {
        self.status = status;
    }

    /// Replaces the feature set. Administrative action.
    pub fn set_features(&mut self, features: FeatureSet) {
        self.features = features;
    }

    /// Returns the stored key string.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the persisted status.
    #[must_use]
    pub fn status(&self) -> LicenseStatus {
        self.status
    }

    /// Returns the expiration timestamp, or None for perpetual.
    #[must_use]
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Returns the granted feature set.
    #[must_use]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }
}
