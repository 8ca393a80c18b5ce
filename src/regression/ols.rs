//! Ordinary least squares fitting for capacity test regressions.
//!
//! The fitter solves the no-intercept normal equations β = (XᵀX)⁻¹Xᵀy over
//! a [`Dataset`] and keeps everything the capacity evaluation needs later:
//! coefficients, residuals, the residual mean square (`scale`), two-sided
//! Student-t p-values, and the design matrix for leverage queries. Fitting
//! is a pure function of the data and the formula.

use std::fmt;

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};
use thiserror::Error;

use crate::data::frame::{Dataset, ReportingConditions};
use crate::regression::formula::Formula;

/// Regression fitting errors.
#[derive(Debug, Error)]
pub enum FitError {
    /// A formula variable has no matching column.
    #[error("required column '{0}' is missing from the dataset")]
    MissingColumn(String),

    /// Fewer observations than free parameters.
    #[error("{rows} rows is not enough data to fit {params} parameters")]
    InsufficientData { rows: usize, params: usize },

    /// XᵀX is not invertible.
    #[error("design matrix is singular; regression terms are collinear")]
    Singular,
}

/// A fitted ordinary least squares model.
#[derive(Debug, Clone)]
pub struct OlsModel {
    formula: Formula,
    params: Vec<f64>,
    pvalues: Vec<f64>,
    residuals: Vec<f64>,
    scale: f64,
    nobs: usize,
    df_resid: usize,
    design: DMatrix<f64>,
    xtx_inv: DMatrix<f64>,
}

impl OlsModel {
    /// Fit `formula` to `data`.
    pub fn fit(data: &Dataset, formula: &Formula) -> Result<Self, FitError> {
        let n = data.len();
        let k = formula.terms().len();
        if n < k {
            return Err(FitError::InsufficientData { rows: n, params: k });
        }

        let response = data
            .column(formula.response())
            .ok_or_else(|| FitError::MissingColumn(formula.response().to_string()))?;

        let mut design = DMatrix::zeros(n, k);
        for (j, term) in formula.terms().iter().enumerate() {
            let mut columns = Vec::with_capacity(term.factors().len());
            for factor in term.factors() {
                let column = data
                    .column(factor)
                    .ok_or_else(|| FitError::MissingColumn(factor.clone()))?;
                columns.push(column);
            }
            for i in 0..n {
                design[(i, j)] = columns.iter().map(|c| c[i]).product();
            }
        }

        let y = DVector::from_column_slice(response);
        let xtx = design.transpose() * &design;
        let xtx_inv = xtx.try_inverse().ok_or(FitError::Singular)?;
        let params_vec: DVector<f64> = &xtx_inv * design.transpose() * &y;

        let fitted = &design * &params_vec;
        let residuals: Vec<f64> = y.iter().zip(fitted.iter()).map(|(o, p)| o - p).collect();
        let sse: f64 = residuals.iter().map(|r| r * r).sum();
        let df_resid = n - k;
        let scale = if df_resid > 0 {
            sse / df_resid as f64
        } else {
            0.0
        };

        let params: Vec<f64> = params_vec.iter().copied().collect();
        let pvalues = params
            .iter()
            .enumerate()
            .map(|(j, &param)| {
                let variance = scale * xtx_inv[(j, j)];
                let se = if variance > 0.0 { variance.sqrt() } else { 0.0 };
                two_sided_pvalue(param, se, df_resid)
            })
            .collect();

        Ok(Self {
            formula: formula.clone(),
            params,
            pvalues,
            residuals,
            scale,
            nobs: n,
            df_resid,
            design,
            xtx_inv,
        })
    }

    /// The formula this model was fit with.
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Fitted coefficients, in formula term order.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Two-sided p-values, in formula term order.
    pub fn pvalues(&self) -> &[f64] {
        &self.pvalues
    }

    /// Residuals in row order.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Residual mean square (SSE over residual degrees of freedom).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of observations the model was fit on.
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Residual degrees of freedom.
    pub fn df_resid(&self) -> usize {
        self.df_resid
    }

    /// Canonical term names, in coefficient order.
    pub fn term_names(&self) -> Vec<String> {
        self.formula.term_names()
    }

    /// Predict output at a reporting-condition point.
    ///
    /// Fails with a named-column error when the formula references a
    /// variable the point cannot supply.
    pub fn predict_point(&self, rc: &ReportingConditions) -> Result<f64, FitError> {
        let mut total = 0.0;
        for (term, param) in self.formula.terms().iter().zip(&self.params) {
            let mut value = 1.0;
            for factor in term.factors() {
                value *= rc
                    .value(factor)
                    .ok_or_else(|| FitError::MissingColumn(factor.clone()))?;
            }
            total += param * value;
        }
        Ok(total)
    }

    /// A working copy with every coefficient whose p-value exceeds `cutoff`
    /// set to zero. The fitted model itself is left untouched.
    pub fn pruned(&self, cutoff: f64) -> Self {
        let mut pruned = self.clone();
        for (param, pvalue) in pruned.params.iter_mut().zip(&self.pvalues) {
            if *pvalue > cutoff {
                *param = 0.0;
            }
        }
        pruned
    }

    /// Leverage (hat-matrix diagonal) of observation `row`, if it exists.
    pub fn leverage(&self, row: usize) -> Option<f64> {
        if row >= self.nobs {
            return None;
        }
        let x = self.design.row(row).clone_owned();
        Some((&x * &self.xtx_inv * x.transpose())[(0, 0)])
    }

    /// Row-keep mask: true where |residual| stays inside `sigma` standard
    /// deviations of the fit. An exact fit (scale 0) keeps every row.
    pub fn residual_keep_mask(&self, sigma: f64) -> Vec<bool> {
        let bound = sigma * self.scale.sqrt();
        if bound == 0.0 {
            return vec![true; self.nobs];
        }
        self.residuals.iter().map(|r| r.abs() < bound).collect()
    }
}

impl fmt::Display for OlsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ols: {} (n = {}, df = {}, scale = {:.6})",
            self.formula, self.nobs, self.df_resid, self.scale
        )?;
        writeln!(f, "  {:<16}{:>14}{:>12}", "term", "coef", "p-value")?;
        for ((name, param), pvalue) in self
            .term_names()
            .iter()
            .zip(&self.params)
            .zip(&self.pvalues)
        {
            writeln!(f, "  {:<16}{:>14.6}{:>12.4}", name, param, pvalue)?;
        }
        Ok(())
    }
}

/// Two-sided p-value of a coefficient against a Student-t with `df` degrees
/// of freedom. With no residual degrees of freedom nothing can be rejected;
/// a zero standard error makes any nonzero coefficient exact.
fn two_sided_pvalue(param: f64, se: f64, df: usize) -> f64 {
    if df == 0 {
        return 1.0;
    }
    if se == 0.0 {
        return if param == 0.0 { 1.0 } else { 0.0 };
    }
    let t = (param / se).abs();
    match StudentsT::new(0.0, 1.0, df as f64) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t)),
        Err(_) => 1.0,
    }
}
