// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar construction.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`Numerical`](CalendarError::Numerical) | root finder, new-moon search |
//! | [`Inconsistency`](CalendarError::Inconsistency) | year builder |
//! | [`NotFound`](CalendarError::NotFound) | date mapper |
//! | [`InvalidConfig`](CalendarError::InvalidConfig) | [`CalendarConfig::validate`](crate::CalendarConfig::validate) |
//! | [`InvalidArgument`](CalendarError::InvalidArgument) | calendar façade |
//!
//! None of them is recoverable by retrying with the same inputs.

use thiserror::Error;

/// Classification of numerical failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericalErrorKind {
    /// An estimate or residual became NaN or infinite.
    NonFinite,
    /// The finite-difference slope vanished, so no Newton step exists.
    ZeroSlope,
    /// The iteration cap was reached with the residual still far off.
    NotConverged,
    /// A bounded search ran out of attempts without a qualifying root.
    SearchExhausted,
}

impl std::fmt::Display for NumericalErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NonFinite => "non-finite value",
            Self::ZeroSlope => "zero slope",
            Self::NotConverged => "residual above tolerance",
            Self::SearchExhausted => "search exhausted",
        };
        f.write_str(s)
    }
}

/// Error type for all fallible calendar operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    /// A numerical procedure failed.
    #[error("{operation} failed ({kind}) near JD {jd}")]
    Numerical {
        /// Name of the failing operation.
        operation: &'static str,
        /// Failure mode.
        kind: NumericalErrorKind,
        /// Julian Day (UT) where the procedure was seeded or stopped.
        jd: f64,
    },

    /// A built lunar year violates a structural invariant.
    #[error("inconsistent lunar year {year}: {message}")]
    Inconsistency {
        /// Anchor Gregorian year of the offending context.
        year: i32,
        /// What went wrong.
        message: String,
    },

    /// No lunar month contains the requested civil day.
    #[error("no lunar month contains JD {jd}")]
    NotFound {
        /// Julian Day (UT) of the query.
        jd: f64,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration `{field}`: {message}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// An argument is outside the accepted domain.
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        message: String,
    },
}

/// Convenience alias for `Result<T, CalendarError>`.
pub type CalendarResult<T> = Result<T, CalendarError>;

impl CalendarError {
    /// Creates a [`Numerical`](Self::Numerical) error.
    pub fn numerical(operation: &'static str, kind: NumericalErrorKind, jd: f64) -> Self {
        Self::Numerical {
            operation,
            kind,
            jd,
        }
    }

    /// Creates an [`Inconsistency`](Self::Inconsistency) error.
    pub fn inconsistency(year: i32, message: impl Into<String>) -> Self {
        Self::Inconsistency {
            year,
            message: message.into(),
        }
    }

    /// Creates an [`InvalidConfig`](Self::InvalidConfig) error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_numerical() {
        let e = CalendarError::numerical("true_new_moon", NumericalErrorKind::ZeroSlope, 2.5);
        assert_eq!(e.to_string(), "true_new_moon failed (zero slope) near JD 2.5");
    }

    #[test]
    fn error_search_exhausted() {
        let e = CalendarError::numerical(
            "prev_new_moon",
            NumericalErrorKind::SearchExhausted,
            2_460_000.5,
        );
        assert_eq!(
            e.to_string(),
            "prev_new_moon failed (search exhausted) near JD 2460000.5"
        );
    }

    #[test]
    fn error_not_converged() {
        let e = CalendarError::numerical(
            "solve_solar_longitude",
            NumericalErrorKind::NotConverged,
            2_460_000.5,
        );
        assert_eq!(
            e.to_string(),
            "solve_solar_longitude failed (residual above tolerance) near JD 2460000.5"
        );
    }

    #[test]
    fn error_inconsistency() {
        let e = CalendarError::inconsistency(2033, "2 months without a principal term");
        assert_eq!(
            e.to_string(),
            "inconsistent lunar year 2033: 2 months without a principal term"
        );
    }

    #[test]
    fn error_not_found() {
        let e = CalendarError::NotFound { jd: 2_451_545.0 };
        assert_eq!(e.to_string(), "no lunar month contains JD 2451545");
    }

    #[test]
    fn error_invalid_config() {
        let e = CalendarError::invalid_config("civil_offset_hours", "must be within ±14 h");
        assert_eq!(
            e.to_string(),
            "invalid configuration `civil_offset_hours`: must be within ±14 h"
        );
    }

    #[test]
    fn error_invalid_argument() {
        let e = CalendarError::invalid_argument("longitude_deg", "15 is not a principal term");
        assert_eq!(
            e.to_string(),
            "invalid argument `longitude_deg`: 15 is not a principal term"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
