//! Expiring, usage-limited access links for DocGate.
//!
//! An access token is a capability: presenting the id *is* the
//! authorization. This crate handles:
//! - Opaque token ids from OS randomness (no embedded claims)
//! - Token records bounded by expiry and a use limit
//! - A store trait whose `consume` is a single atomic check-and-increment
//! - A stateless service that gates issuance on the license
//!
//! # Design Principles
//!
//! - **Unguessable over clever**: ids are 256 random bits; all meaning
//!   lives server-side in the store
//! - **The store owns atomicity**: two racing redemptions of a token with
//!   one use left must yield one success and one denial, with no state in
//!   the service to get out of sync
//! - **Denials are outcomes, not faults**: expired, exhausted, and unknown
//!   tokens are expected results a host maps to denial responses

mod error;
mod service;
mod store;
mod token;

pub use error::{TokenError, TokenResult};
pub use service::{IssueRequest, TokenGrant, TokenPolicy, TokenService};
pub use store::{MemoryTokenStore, TokenStore};
pub use token::{AccessToken, AccessTokenId, TOKEN_ID_BYTES};
