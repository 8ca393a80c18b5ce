//! Random standard uncertainty of the regression at the reporting conditions.
//!
//! The estimate is SEE·√leverage: the standard error of the regression
//! projected onto the reporting-condition operating point through the hat
//! matrix. The reporting point is appended to the measured data as one extra
//! observation (with the predicted actual output standing in for power), the
//! model is refit, and the leverage is read at that appended row — which is
//! why the point must go in last.

use crate::data::frame::{Dataset, ReportingConditions};
use crate::regression::formula::Formula;
use crate::regression::ols::{FitError, OlsModel};

/// A copy of `data` restricted to the formula's variables, with the
/// reporting conditions appended as a final observation whose response
/// value is `actual`.
pub fn append_reporting_row(
    data: &Dataset,
    formula: &Formula,
    rc: &ReportingConditions,
    actual: f64,
) -> Result<Dataset, FitError> {
    let variables = formula.variables();
    let mut augmented = data
        .select_columns(&variables)
        .map_err(|_| missing_variable(data, &variables))?;

    let mut row: Vec<(&str, f64)> = Vec::with_capacity(variables.len());
    for &name in &variables {
        let value = if name == formula.response() {
            actual
        } else {
            rc.value(name)
                .ok_or_else(|| FitError::MissingColumn(name.to_string()))?
        };
        row.push((name, value));
    }

    let timestamp = augmented.last_timestamp().unwrap_or_default();
    augmented
        .push_row(timestamp, &row)
        .map_err(|_| missing_variable(data, &variables))?;
    Ok(augmented)
}

fn missing_variable(data: &Dataset, variables: &[&str]) -> FitError {
    let name = variables
        .iter()
        .find(|v| !data.has_column(v))
        .copied()
        .unwrap_or_default();
    FitError::MissingColumn(name.to_string())
}

/// SEE·√leverage at the reporting conditions.
///
/// `see` is the standard error of the measured regression, √(MSE of the
/// residuals); `actual` is the measured model's prediction at `rc`.
pub fn regression_uncertainty(
    data: &Dataset,
    formula: &Formula,
    rc: &ReportingConditions,
    actual: f64,
    see: f64,
) -> Result<f64, FitError> {
    let augmented = append_reporting_row(data, formula, rc, actual)?;
    let model = OlsModel::fit(&augmented, formula)?;
    let leverage = model.leverage(augmented.len() - 1).unwrap_or(0.0);
    Ok(see * leverage.sqrt())
}
