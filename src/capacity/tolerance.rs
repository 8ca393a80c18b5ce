//! Capacity test tolerance specifications.
//!
//! A tolerance is written the way it appears in test contracts, e.g.
//! `"+/- 10"` or `"- 5"`: a sign and a percentage of the nameplate rating.
//! An unrecognized sign is a configuration mistake and is rejected at parse
//! time, never defaulted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToleranceFormatError {
    /// The sign was not '+', '-', '+/-', or '-/+'.
    #[error("tolerance sign must be '+', '-', '+/-', or '-/+', got '{0}'")]
    UnrecognizedSign(String),

    /// No percentage after the sign.
    #[error("tolerance is missing a percentage value")]
    MissingError,

    /// The percentage was not a number.
    #[error("tolerance percentage '{0}' is not a number")]
    InvalidError(String),
}

/// Which side(s) of the nameplate the passing band covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToleranceSign {
    /// Band above the nameplate only.
    Plus,
    /// Band below the nameplate only.
    Minus,
    /// Band on both sides ('+/-' or '-/+').
    Symmetric,
}

impl fmt::Display for ToleranceSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToleranceSign::Plus => "+",
            ToleranceSign::Minus => "-",
            ToleranceSign::Symmetric => "+/-",
        };
        f.write_str(s)
    }
}

/// The passing band around the nameplate rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Side(s) of the nameplate the band covers.
    pub sign: ToleranceSign,
    /// Band width as a percentage of the nameplate.
    pub error_pct: f64,
}

impl Tolerance {
    /// Lower and upper capacity bounds around `nameplate`.
    pub fn band(&self, nameplate: f64) -> (f64, f64) {
        let plus = nameplate * (1.0 + self.error_pct / 100.0);
        let minus = nameplate * (1.0 - self.error_pct / 100.0);
        match self.sign {
            ToleranceSign::Symmetric => (minus, plus),
            ToleranceSign::Plus => (nameplate, plus),
            ToleranceSign::Minus => (minus, nameplate),
        }
    }

    /// True when `capacity` falls inside the band: the lower bound is
    /// inclusive, the upper bound exclusive.
    pub fn contains(&self, nameplate: f64, capacity: f64) -> bool {
        let (lower, upper) = self.band(nameplate);
        lower <= capacity && capacity < upper
    }
}

impl FromStr for Tolerance {
    type Err = ToleranceFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let sign_str = parts
            .next()
            .ok_or_else(|| ToleranceFormatError::UnrecognizedSign(String::new()))?;
        let sign = match sign_str {
            "+" => ToleranceSign::Plus,
            "-" => ToleranceSign::Minus,
            "+/-" | "-/+" => ToleranceSign::Symmetric,
            other => return Err(ToleranceFormatError::UnrecognizedSign(other.to_string())),
        };
        let pct_str = parts.next().ok_or(ToleranceFormatError::MissingError)?;
        let error_pct: f64 = pct_str
            .parse()
            .map_err(|_| ToleranceFormatError::InvalidError(pct_str.to_string()))?;
        Ok(Self { sign, error_pct })
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sign, self.error_pct)
    }
}
