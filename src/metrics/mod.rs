//! Rolling metrics and cycle history.

mod aggregator;
mod history;

pub use aggregator::{Metrics, MetricsAggregator};
pub use history::{HistoryBuffer, HistoryEntry};
