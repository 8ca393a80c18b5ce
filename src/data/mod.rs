//! Tabular plant data and filter bookkeeping.

pub mod frame;
pub mod history;

// Re-exports for convenience
pub use frame::{Dataset, DatasetError, ReportingConditions};
pub use history::{DatasetTag, FilterHistory, FilterRecord, FilterSummary};
