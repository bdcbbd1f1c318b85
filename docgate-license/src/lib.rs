//! License gating for DocGate.
//!
//! This crate handles:
//! - License key parsing (syntax only, no network)
//! - License records with tiered feature sets
//! - Pure status evaluation with grace-period arithmetic
//! - Typed pre-evaluation record transforms
//!
//! # Design Principles
//!
//! - **Syntax is not trust**: a well-formed key proves nothing; entitlement
//!   comes from the stored record and the evaluator
//! - **Pure evaluation**: status is a function of `(record, now)`, never of
//!   hidden globals; callers inject the clock
//! - **Fail closed**: malformed keys become `Invalid` records with no
//!   features instead of errors that escape the licensing boundary
//!
//! # License Key Format
//!
//! Keys are formatted as: `DG-<TIER>-XXXXX-XXXXX-XXXXX-XXXXX`
//! where `<TIER>` is `PRO`, `LTD`, or `DEV` and each `X` is a character
//! from `A-Z0-9`.

mod error;
mod key;
mod record;
mod validator;

pub use error::{LicenseError, LicenseResult};
pub use key::{LicenseKey, LicenseTier};
pub use record::{Feature, FeatureSet, LicenseRecord, LicenseStatus};
pub use validator::{
    EffectiveStatus, LicenseConfig, LicenseValidator, RecordTransform, GRACE_PERIOD_DAYS,
};
