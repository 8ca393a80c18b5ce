//! Capacity test analytics for solar photovoltaic plants.
//!
//! Compares measured data from a plant's data acquisition system (das)
//! against simulated production data to decide whether the plant meets its
//! nameplate rating. Provides:
//! - ordinary least squares regression of power on irradiance, ambient
//!   temperature, and wind velocity
//! - residual-based outlier filtering with a per-dataset audit history
//! - pass/fail capacity evaluation at standard reporting conditions
//! - regression uncertainty at the reporting conditions

pub mod capacity;
pub mod data;
pub mod regression;

// Re-export commonly used types
pub use capacity::error::CapacityError;
pub use capacity::evaluator::CapacityTestResult;
pub use capacity::test::{CapacityTest, CapacityTestConfig, FitOptions, ResidualSummary};
pub use capacity::tolerance::{Tolerance, ToleranceFormatError, ToleranceSign};
pub use data::frame::{Dataset, DatasetError, ReportingConditions};
pub use data::history::{DatasetTag, FilterHistory, FilterRecord, FilterSummary};
pub use regression::formula::{Formula, FormulaError};
pub use regression::ols::{FitError, OlsModel};
