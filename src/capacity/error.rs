//! Capacity test error types.

use thiserror::Error;

use crate::capacity::tolerance::ToleranceFormatError;
use crate::data::frame::DatasetError;
use crate::data::history::DatasetTag;
use crate::regression::ols::FitError;

/// Errors from capacity test operations.
#[derive(Debug, Error)]
pub enum CapacityError {
    /// The regression on one of the datasets failed.
    #[error("regression on {tag} data failed: {source}")]
    Fit {
        tag: DatasetTag,
        source: FitError,
    },

    /// The tolerance string could not be parsed.
    #[error(transparent)]
    Tolerance(#[from] ToleranceFormatError),

    /// A dataset operation failed.
    #[error(transparent)]
    Data(#[from] DatasetError),

    /// An operation needed a model that has not been fit yet.
    #[error("no fitted model for {0} data; run a fit first")]
    ModelNotFitted(DatasetTag),

    /// An operation needed reporting conditions that have not been set.
    #[error("reporting conditions have not been set")]
    MissingReportingConditions,

    /// An operation needed a tolerance that has not been set.
    #[error("tolerance has not been set")]
    MissingTolerance,

    /// The nameplate rating was zero or negative.
    #[error("nameplate rating must be positive, got {0}")]
    InvalidNameplate(f64),
}

impl CapacityError {
    /// Attach the offending dataset tag to a regression error.
    pub(crate) fn fit(tag: DatasetTag, source: FitError) -> Self {
        Self::Fit { tag, source }
    }
}

/// Result type for capacity test operations.
pub type Result<T> = std::result::Result<T, CapacityError>;
