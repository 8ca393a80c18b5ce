//! Capacity test evaluation: tolerance bands, pass/fail results,
//! uncertainty, and the orchestrating test type.

pub mod error;
pub mod evaluator;
pub mod tolerance;
pub mod uncertainty;

// Re-exports for convenience
pub use error::{CapacityError, Result};
pub use evaluator::{evaluate, CapacityTestResult};
pub use test::{CapacityTest, CapacityTestConfig, CoefficientRow, FitOptions, ResidualSummary};
pub use tolerance::{Tolerance, ToleranceFormatError, ToleranceSign};
pub use uncertainty::{append_reporting_row, regression_uncertainty};
