//! Regression formula parsing.
//!
//! Formulas use the R-style `response ~ term + term` notation, where each
//! term is a product of column names (`poa*t_amb`). An `I(...)` wrapper
//! around a term is accepted and stripped, and a trailing `- 1` (or `+ 0`)
//! no-intercept marker is accepted. Models are always fit through the
//! origin; a constant term must be supplied as an explicit column.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The capacity test regression: power against irradiance, an irradiance
/// square term, and irradiance crossed with ambient temperature and wind.
pub const DEFAULT_FORMULA: &str = "power ~ poa + poa*poa + poa*t_amb + poa*w_vel - 1";

/// Formula parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    /// No '~' separating response and terms.
    #[error("formula must contain '~' between the response and its terms")]
    MissingSeparator,

    /// Nothing on the left of '~'.
    #[error("formula has no response variable")]
    EmptyResponse,

    /// Nothing usable on the right of '~'.
    #[error("formula has no terms")]
    NoTerms,

    /// A token that is not a column name, '*' product, or intercept marker.
    #[error("unexpected token '{0}' in formula")]
    BadToken(String),
}

/// One regression term: a product of column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    factors: Vec<String>,
}

impl Term {
    fn parse(piece: &str) -> Result<Self, FormulaError> {
        let mut inner = piece.trim();
        if let Some(stripped) = inner.strip_prefix("I(").and_then(|s| s.strip_suffix(')')) {
            inner = stripped.trim();
        }
        let mut factors = Vec::new();
        for factor in inner.split('*') {
            let factor = factor.trim();
            let valid = !factor.is_empty()
                && factor.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(FormulaError::BadToken(piece.trim().to_string()));
            }
            factors.push(factor.to_string());
        }
        Ok(Self { factors })
    }

    /// Column names multiplied together in this term.
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    /// Canonical term name, e.g. `poa*t_amb`.
    pub fn name(&self) -> String {
        self.factors.join("*")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A parsed regression formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    response: String,
    terms: Vec<Term>,
}

impl Formula {
    /// Parse a formula string.
    pub fn parse(formula: &str) -> Result<Self, FormulaError> {
        let (lhs, rhs) = formula
            .split_once('~')
            .ok_or(FormulaError::MissingSeparator)?;
        let response = lhs.trim();
        if response.is_empty() {
            return Err(FormulaError::EmptyResponse);
        }

        let mut terms = Vec::new();
        for piece in rhs.split('+') {
            let mut part = piece.trim();
            // the no-intercept marker may trail the final term: "poa*w_vel - 1"
            if let Some((head, tail)) = part.split_once('-') {
                if tail.trim() != "1" {
                    return Err(FormulaError::BadToken(part.to_string()));
                }
                part = head.trim();
            }
            if part.is_empty() || part == "0" {
                continue;
            }
            terms.push(Term::parse(part)?);
        }
        if terms.is_empty() {
            return Err(FormulaError::NoTerms);
        }

        Ok(Self {
            response: response.to_string(),
            terms,
        })
    }

    /// The response column name.
    pub fn response(&self) -> &str {
        &self.response
    }

    /// The regression terms, in formula order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Canonical term names, in formula order.
    pub fn term_names(&self) -> Vec<String> {
        self.terms.iter().map(Term::name).collect()
    }

    /// Every column the formula references, response first, deduplicated.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = vec![&self.response];
        for term in &self.terms {
            for factor in &term.factors {
                if !names.contains(&factor.as_str()) {
                    names.push(factor);
                }
            }
        }
        names
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self::parse(DEFAULT_FORMULA).expect("default formula parses")
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self
            .terms
            .iter()
            .map(Term::name)
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{} ~ {} - 1", self.response, terms)
    }
}
