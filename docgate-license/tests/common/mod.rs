//! Shared test helpers for license tests.

#![allow(dead_code)]

use docgate_license::LicenseRecord;

/// A well-formed full-tier key.
pub const FULL_KEY: &str = "DG-PRO-ABCDE-12345-FGHIJ-67890";

/// A well-formed limited-tier key.
pub const LIMITED_KEY: &str = "DG-LTD-ABCDE-12345-FGHIJ-67890";

/// A well-formed development-tier key.
pub const DEV_KEY: &str = "DG-DEV-ABCDE-12345-FGHIJ-67890";

/// Returns an activated full-tier record with the given expiry.
pub fn active_record(expires_at: Option<i64>) -> LicenseRecord {
    let mut record = LicenseRecord::for_key(FULL_KEY);
    record.activate(expires_at);
    record
}

/// Returns an activated limited-tier record with the given expiry.
pub fn active_limited_record(expires_at: Option<i64>) -> LicenseRecord {
    let mut record = LicenseRecord::for_key(LIMITED_KEY);
    record.activate(expires_at);
    record
}
