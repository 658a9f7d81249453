use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A CSS-like length: absolute pixels or a percentage of a basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Resolve to pixels. `basis` is only consulted for percentages.
    pub fn resolve(&self, basis: f32) -> f32 {
        match self {
            Length::Px(px) => *px,
            Length::Percent(pct) => basis * pct / 100.0,
        }
    }

    pub const fn is_percent(&self) -> bool {
        matches!(self, Length::Percent(_))
    }
}

/// Errors produced when parsing a [`Length`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthError {
    #[error("length is empty")]
    Empty,

    #[error("invalid length '{0}'")]
    Invalid(String),

    #[error("length '{0}' must not be negative")]
    Negative(String),
}

impl FromStr for Length {
    type Err = LengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LengthError::Empty);
        }

        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(number) => (number, true),
            None => (trimmed.strip_suffix("px").unwrap_or(trimmed), false),
        };

        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| LengthError::Invalid(trimmed.to_string()))?;
        if !value.is_finite() {
            return Err(LengthError::Invalid(trimmed.to_string()));
        }
        if value < 0.0 {
            return Err(LengthError::Negative(trimmed.to_string()));
        }

        Ok(if percent {
            Length::Percent(value)
        } else {
            Length::Px(value)
        })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(value) => write!(f, "{value}px"),
            Length::Percent(value) => write!(f, "{value}%"),
        }
    }
}

/// Format a pixel value for an inline style.
pub fn px(value: f32) -> String {
    Length::Px(value).to_string()
}
