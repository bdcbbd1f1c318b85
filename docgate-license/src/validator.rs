//! Pure license evaluation with grace-period arithmetic.

use crate::record::{Feature, LicenseRecord, LicenseStatus};
use docgate_types::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Grace period after expiry during which premium features keep working
/// (14 days).
pub const GRACE_PERIOD_DAYS: u32 = 14;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Evaluation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// Days of full functionality granted after `expires_at`.
    pub grace_days: u32,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            grace_days: GRACE_PERIOD_DAYS,
        }
    }
}

/// The status of a license as evaluated at a specific instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    /// License is active and inside its validity window.
    Valid,
    /// The key never validated.
    Invalid,
    /// The key parsed but was never activated.
    Inactive,
    /// License is past expiry but inside the grace window (full
    /// functionality).
    Grace {
        /// Days remaining in the grace window.
        days_remaining: u32,
    },
    /// License is past the grace window.
    Expired,
}

impl EffectiveStatus {
    /// Returns true if premium features are enabled (Valid or Grace).
    #[must_use]
    pub fn premium_enabled(&self) -> bool {
        matches!(self, Self::Valid | Self::Grace { .. })
    }
}

/// A pre-evaluation rewrite of the license record.
///
/// Transforms run in registration order on a copy of the record; the stored
/// record is never mutated. Hosts use these for overrides such as site-wide
/// kill switches or extended trials.
pub type RecordTransform = Box<dyn Fn(LicenseRecord) -> LicenseRecord + Send + Sync>;

/// Evaluates license records against an instant in time.
///
/// The validator is constructed once by the host and shared by handle; it
/// holds no per-call state. `evaluate` is a pure function of the record,
/// the instant, and the registered transforms.
pub struct LicenseValidator {
    config: LicenseConfig,
    clock: Arc<dyn Clock>,
    transforms: Vec<RecordTransform>,
}

impl LicenseValidator {
    /// Creates a validator reading time from the system clock.
    #[must_use]
    pub fn new(config: LicenseConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a validator with an injected clock.
    #[must_use]
    pub fn with_clock(config: LicenseConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            transforms: Vec::new(),
        }
    }

    /// Registers a pre-evaluation transform. Transforms apply in
    /// registration order before every evaluation.
    pub fn register_transform<F>(&mut self, transform: F)
    where
        F: Fn(LicenseRecord) -> LicenseRecord + Send + Sync + 'static,
    {
        self.transforms.push(Box::new(transform));
    }

    /// Returns the evaluation settings.
    #[must_use]
    pub fn config(&self) -> &LicenseConfig {
        &self.config
    }

    /// Evaluates a record at an explicit instant (seconds since epoch).
    ///
    /// `Invalid` and `Inactive` pass through untouched. Otherwise the
    /// time-derived status is recomputed from `expires_at`: no expiry means
    /// `Valid` forever; past expiry, days are counted in exact elapsed
    /// seconds with a ceiling, so one second past expiry is day one of
    /// grace.
    #[must_use]
    pub fn evaluate(&self, record: &LicenseRecord, now: i64) -> EffectiveStatus {
        let record = self.apply_transforms(record.clone());
        self.status_of(&record, now)
    }

    /// Evaluates a record at the injected clock's current time.
    #[must_use]
    pub fn current_status(&self, record: &LicenseRecord) -> EffectiveStatus {
        self.evaluate(record, self.clock.now_unix())
    }

    /// Returns true if the record grants `feature` at `now`.
    ///
    /// A feature is enabled when the effective status has premium enabled
    /// and the (transformed) feature set contains the feature.
    #[must_use]
    pub fn is_feature_enabled(&self, record: &LicenseRecord, feature: Feature, now: i64) -> bool {
        let record = self.apply_transforms(record.clone());
        self.status_of(&record, now).premium_enabled() && record.features().contains(feature)
    }

    fn apply_transforms(&self, mut record: LicenseRecord) -> LicenseRecord {
        for transform in &self.transforms {
            record = transform(record);
        }
        record
    }

    fn status_of(&self, record: &LicenseRecord, now: i64) -> EffectiveStatus {
        match record.status() {
            LicenseStatus::Invalid => EffectiveStatus::Invalid,
            LicenseStatus::Inactive => EffectiveStatus::Inactive,
            // Time-derived statuses are recomputed from expires_at.
            LicenseStatus::Valid | LicenseStatus::GracePeriod | LicenseStatus::Expired => {
                match record.expires_at() {
                    None => EffectiveStatus::Valid,
                    Some(expires_at) if now <= expires_at => EffectiveStatus::Valid,
                    Some(expires_at) => self.grace_or_expired(now - expires_at),
                }
            }
        }
    }

    fn grace_or_expired(&self, secs_past_expiry: i64) -> EffectiveStatus {
        // Ceiling day count: one second past expiry is already day 1.
        let days_since = (secs_past_expiry + SECS_PER_DAY - 1) / SECS_PER_DAY;
        let grace_days = i64::from(self.config.grace_days);
        if days_since <= grace_days {
            EffectiveStatus::Grace {
                days_remaining: (grace_days - days_since) as u32,
            }
        } else {
            EffectiveStatus::Expired
        }
    }
}

impl fmt::Debug for LicenseValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseValidator")
            .field("config", &self.config)
            .field("transforms", &self.transforms.len())
            .finish_non_exhaustive()
    }
}
