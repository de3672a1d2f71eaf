//! Validated field types for personal entries.
//!
//! The entry form is deliberately lenient: blank fields fall back to
//! placeholder values instead of rejecting the submission. Those fallbacks
//! live here next to the hard bounds that are still enforced.

use crate::domain::shared::errors::DomainError;
use chrono::{Datelike, Utc};

/// Personal rating in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(DomainError::ValidationError(
                "score must be between 0 and 100".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Blank score falls back to zero.
    pub fn parse_or_default(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self(0.0));
        }
        let value = trimmed.parse::<f64>().map_err(|_| {
            DomainError::ValidationError("score must be a number".to_string())
        })?;
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Actor birth year, 1900 up to the current year. Blank falls back to the
/// current year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYear(i32);

impl BirthYear {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        let current = Utc::now().year();
        if value < 1900 || value > current {
            return Err(DomainError::ValidationError(format!(
                "birth year must be between 1900 and {}",
                current
            )));
        }
        Ok(Self(value))
    }

    pub fn parse_or_default(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self(Utc::now().year()));
        }
        let value = trimmed.parse::<i32>().map_err(|_| {
            DomainError::ValidationError("birth year must be a whole number".to_string())
        })?;
        Self::new(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Blank movie title falls back to a placeholder.
pub fn title_or_placeholder(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Untitled movie".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Blank actor name falls back to a placeholder.
pub fn name_or_placeholder(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Unknown actor".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Production year of a movie: any non-negative year, blank falls back to the
/// current year.
pub fn production_year_or_default(raw: &str) -> Result<i32, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Utc::now().year());
    }
    let value = trimmed.parse::<i32>().map_err(|_| {
        DomainError::ValidationError("production year must be a whole number".to_string())
    })?;
    if value < 0 {
        return Err(DomainError::ValidationError(
            "production year must not be negative".to_string(),
        ));
    }
    Ok(value)
}
