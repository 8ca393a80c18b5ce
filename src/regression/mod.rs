//! Regression formula parsing and ordinary least squares fitting.

pub mod formula;
pub mod ols;

// Re-exports for convenience
pub use formula::{Formula, FormulaError, Term, DEFAULT_FORMULA};
pub use ols::{FitError, OlsModel};
