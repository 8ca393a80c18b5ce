//! Filter step bookkeeping for the measured and simulated datasets.
//!
//! Every filter applied to a working copy appends a [`FilterRecord`] with the
//! method name, its arguments, and the row counts, so the path from raw data
//! to the regression inputs can be audited after the fact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two capacity test datasets a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetTag {
    /// Measured data from the plant's data acquisition system.
    Das,
    /// Simulated data from an energy production model.
    Sim,
}

impl DatasetTag {
    /// Short lowercase label used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetTag::Das => "das",
            DatasetTag::Sim => "sim",
        }
    }
}

impl fmt::Display for DatasetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied filter step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRecord {
    /// Dataset the filter was applied to.
    pub dataset: DatasetTag,
    /// Name of the filter method.
    pub method: String,
    /// Arguments the filter was called with.
    pub args: serde_json::Value,
    /// Rows left after the step.
    pub rows_remaining: usize,
    /// Rows removed by the step.
    pub rows_removed: usize,
}

/// Append-only, chronological filter history for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterHistory {
    records: Vec<FilterRecord>,
}

impl FilterHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a filter that left `rows_after` of `rows_before` rows.
    pub fn record(
        &mut self,
        dataset: DatasetTag,
        method: &str,
        args: serde_json::Value,
        rows_before: usize,
        rows_after: usize,
    ) {
        self.records.push(FilterRecord {
            dataset,
            method: method.to_string(),
            args,
            rows_remaining: rows_after,
            rows_removed: rows_before.saturating_sub(rows_after),
        });
    }

    /// Recorded steps in application order.
    pub fn records(&self) -> &[FilterRecord] {
        &self.records
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Merged view over the das and sim histories.
///
/// When both datasets have records the das records lead; a summary with no
/// records displays an informational message instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSummary {
    records: Vec<FilterRecord>,
}

impl FilterSummary {
    /// Merge the two histories, das records first.
    pub fn merge(das: &FilterHistory, sim: &FilterHistory) -> Self {
        let mut records = Vec::with_capacity(das.len() + sim.len());
        records.extend_from_slice(das.records());
        records.extend_from_slice(sim.records());
        Self { records }
    }

    /// Merged records.
    pub fn records(&self) -> &[FilterRecord] {
        &self.records
    }

    /// Number of merged records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when neither dataset has filter records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return writeln!(f, "No filters have been run.");
        }
        writeln!(
            f,
            "{:<8}{:<24}{:>10}{:>9}  args",
            "dataset", "method", "remaining", "removed"
        )?;
        for record in &self.records {
            writeln!(
                f,
                "{:<8}{:<24}{:>10}{:>9}  {}",
                record.dataset, record.method, record.rows_remaining, record.rows_removed,
                record.args
            )?;
        }
        Ok(())
    }
}
