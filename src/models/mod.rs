//! Core data model shared by the probe, batch checker, metrics and scheduler.

mod check;
mod endpoint;
mod snapshot;

pub use check::{CheckResult, CheckStatus};
pub use endpoint::Endpoint;
pub use snapshot::StatusSnapshot;
