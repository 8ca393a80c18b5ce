//! Time-indexed tabular data for capacity testing.
//!
//! A [`Dataset`] holds the measured or simulated plant data as named numeric
//! columns over a shared timestamp index. Filter operations shrink a working
//! copy row-by-row; the raw data is never touched. Columns are always
//! addressed by name — a dataset whose columns arrive in an unexpected order
//! fails with a named-column error instead of being silently reinterpreted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column name of the plant output, the regression response.
pub const POWER: &str = "power";
/// Column name of the plane-of-array irradiance.
pub const POA: &str = "poa";
/// Column name of the ambient temperature.
pub const T_AMB: &str = "t_amb";
/// Column name of the wind velocity.
pub const W_VEL: &str = "w_vel";

/// Dataset construction and mutation errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A column's length does not match the timestamp index.
    #[error("column '{name}' has {len} values, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    /// A column name was given twice.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A referenced column does not exist.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A row was pushed without a value for every column.
    #[error("no value supplied for column '{0}'")]
    MissingValue(String),

    /// A row mask's length does not match the row count.
    #[error("row mask has {len} entries, expected {expected}")]
    MaskLength { len: usize, expected: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Column {
    name: String,
    values: Vec<f64>,
}

/// Time-indexed table of named numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset from a timestamp index and named columns.
    ///
    /// Every column must have exactly one value per timestamp.
    pub fn from_columns(
        index: Vec<NaiveDateTime>,
        columns: Vec<(&str, Vec<f64>)>,
    ) -> Result<Self, DatasetError> {
        let expected = index.len();
        let mut built: Vec<Column> = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if built.iter().any(|c| c.name == name) {
                return Err(DatasetError::DuplicateColumn(name.to_string()));
            }
            if values.len() != expected {
                return Err(DatasetError::LengthMismatch {
                    name: name.to_string(),
                    len: values.len(),
                    expected,
                });
            }
            built.push(Column {
                name: name.to_string(),
                values,
            });
        }
        Ok(Self {
            index,
            columns: built,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The timestamp index.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Timestamp of the last row, if any.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.index.last().copied()
    }

    /// Values of the named column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Names of all columns, in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// True when the named column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Check that every named column exists, failing on the first that does not.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), DatasetError> {
        for name in names {
            if !self.has_column(name) {
                return Err(DatasetError::UnknownColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Keep only the rows where `keep` is true, returning the number removed.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<usize, DatasetError> {
        if keep.len() != self.len() {
            return Err(DatasetError::MaskLength {
                len: keep.len(),
                expected: self.len(),
            });
        }
        let before = self.len();
        self.index = self
            .index
            .iter()
            .zip(keep)
            .filter_map(|(ts, &k)| k.then_some(*ts))
            .collect();
        for column in &mut self.columns {
            column.values = column
                .values
                .iter()
                .zip(keep)
                .filter_map(|(v, &k)| k.then_some(*v))
                .collect();
        }
        Ok(before - self.len())
    }

    /// A copy of this dataset restricted to the named columns.
    pub fn select_columns(&self, names: &[&str]) -> Result<Self, DatasetError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let column = self
                .columns
                .iter()
                .find(|c| c.name == *name)
                .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))?;
            columns.push(column.clone());
        }
        Ok(Self {
            index: self.index.clone(),
            columns,
        })
    }

    /// Append one row. Every column must receive exactly one value by name.
    pub fn push_row(
        &mut self,
        timestamp: NaiveDateTime,
        values: &[(&str, f64)],
    ) -> Result<(), DatasetError> {
        for (name, _) in values {
            if !self.has_column(name) {
                return Err(DatasetError::UnknownColumn(name.to_string()));
            }
        }
        let mut row = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let (_, value) = values
                .iter()
                .find(|(name, _)| *name == column.name)
                .ok_or_else(|| DatasetError::MissingValue(column.name.clone()))?;
            row.push(*value);
        }
        self.index.push(timestamp);
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.values.push(value);
        }
        Ok(())
    }
}

/// The standard environmental point at which capacity is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportingConditions {
    /// Plane-of-array irradiance.
    pub poa: f64,
    /// Ambient temperature.
    pub t_amb: f64,
    /// Wind velocity.
    pub w_vel: f64,
}

impl ReportingConditions {
    /// Create a reporting-condition point.
    pub fn new(poa: f64, t_amb: f64, w_vel: f64) -> Self {
        Self { poa, t_amb, w_vel }
    }

    /// Look up a regression variable by column name.
    pub fn value(&self, name: &str) -> Option<f64> {
        match name {
            POA => Some(self.poa),
            T_AMB => Some(self.t_amb),
            W_VEL => Some(self.w_vel),
            _ => None,
        }
    }
}
