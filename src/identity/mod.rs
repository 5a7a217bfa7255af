//! Caller network identity (public IP and location).
//!
//! One lookup per refresh cycle; failures are captured as an
//! `IdentitySnapshot::Unavailable` value and never propagate.

mod fetch;
mod types;

pub use fetch::{parse_identity_response, refresh_identity, HttpIdentityFetcher, IdentityFetcher};
pub use types::{IdentityInfo, IdentitySnapshot};
