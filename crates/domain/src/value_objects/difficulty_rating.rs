//! Creature difficulty rating (CR/ND)
//!
//! Ratings are non-negative rationals in practice ("1/8", "1/4", "1/2", "1".."30").
//! They are stored as `f64`, which represents every catalogue value exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A non-negative, finite difficulty rating
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DifficultyRating(f64);

impl DifficultyRating {
    pub const ZERO: DifficultyRating = DifficultyRating(0.0);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidDifficultyRating(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Zero-rated creatures (commoners, swarms of rats) carry no budget weight
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for DifficultyRating {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DifficultyRating> for f64 {
    fn from(value: DifficultyRating) -> Self {
        value.0
    }
}

impl FromStr for DifficultyRating {
    type Err = DomainError;

    /// Accepts "2", "0.5" and fractional "1/4" forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidDifficultyRating(s.to_string());
        let trimmed = s.trim();
        let value = match trimmed.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.trim().parse().map_err(|_| invalid())?;
                let den: f64 = den.trim().parse().map_err(|_| invalid())?;
                if den == 0.0 {
                    return Err(invalid());
                }
                num / den
            }
            None => trimmed.parse().map_err(|_| invalid())?,
        };
        Self::new(value).map_err(|_| invalid())
    }
}

impl fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v == 0.125 => write!(f, "1/8"),
            v if v == 0.25 => write!(f, "1/4"),
            v if v == 0.5 => write!(f, "1/2"),
            v => write!(f, "{}", v),
        }
    }
}
