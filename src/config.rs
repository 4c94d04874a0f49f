// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Configuration for calendar computations.

use crate::error::{CalendarError, CalendarResult};
use crate::solver::NewtonSolver;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UTC offset of China Standard Time, in hours.
pub const CHINA_STANDARD_OFFSET_HOURS: f64 = 8.0;

/// Largest civil offset accepted, in hours (UTC+14 is the easternmost zone).
pub const MAX_CIVIL_OFFSET_HOURS: f64 = 14.0;

/// How month boundaries are compared with solstices and principal terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MonthBoundary {
    /// Compare UT instants: the anchor month is the one whose new moon is at
    /// or before the solstice instant, and a principal term counts for the
    /// month whose `[start, end)` instants contain it.
    #[default]
    Instant,
    /// Compare civil days under the configured offset, as published
    /// calendars do: a new moon and a term on the same local date belong to
    /// the same month.
    CivilDay,
}

/// Configuration shared by every calendar operation.
///
/// # Example
///
/// ```
/// use lunisolar::{CalendarConfig, MonthBoundary};
///
/// let config = CalendarConfig::default()
///     .with_civil_offset_hours(8.0)
///     .with_month_boundary(MonthBoundary::CivilDay);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarConfig {
    /// Hours the civil clock runs ahead of UT; decides where days begin.
    civil_offset_hours: f64,
    month_boundary: MonthBoundary,
    /// Solver for solar-longitude crossings.
    solar_solver: NewtonSolver,
    /// Solver for Sun–Moon conjunctions.
    conjunction_solver: NewtonSolver,
}

impl CalendarConfig {
    /// Creates the default configuration.
    ///
    /// Defaults: UTC+8, [`MonthBoundary::Instant`], 12 solar iterations and 15
    /// conjunction iterations at a tolerance of 1e-7°.
    pub const fn new() -> Self {
        Self {
            civil_offset_hours: CHINA_STANDARD_OFFSET_HOURS,
            month_boundary: MonthBoundary::Instant,
            solar_solver: NewtonSolver::SOLAR,
            conjunction_solver: NewtonSolver::CONJUNCTION,
        }
    }

    /// Sets the civil UTC offset in hours.
    pub fn with_civil_offset_hours(mut self, hours: f64) -> Self {
        self.civil_offset_hours = hours;
        self
    }

    /// Sets the month boundary rule.
    pub fn with_month_boundary(mut self, boundary: MonthBoundary) -> Self {
        self.month_boundary = boundary;
        self
    }

    /// Sets the solver used for solar-longitude crossings.
    pub fn with_solar_solver(mut self, solver: NewtonSolver) -> Self {
        self.solar_solver = solver;
        self
    }

    /// Sets the solver used for conjunctions.
    pub fn with_conjunction_solver(mut self, solver: NewtonSolver) -> Self {
        self.conjunction_solver = solver;
        self
    }

    /// Returns the civil UTC offset in hours.
    pub fn civil_offset_hours(&self) -> f64 {
        self.civil_offset_hours
    }

    /// Returns the month boundary rule.
    pub fn month_boundary(&self) -> MonthBoundary {
        self.month_boundary
    }

    /// Returns the solar-longitude solver.
    pub fn solar_solver(&self) -> &NewtonSolver {
        &self.solar_solver
    }

    /// Returns the conjunction solver.
    pub fn conjunction_solver(&self) -> &NewtonSolver {
        &self.conjunction_solver
    }

    /// Validates this configuration.
    ///
    /// Rejects a non-finite offset or one beyond ±14 h, solvers with zero
    /// iterations, and non-finite or non-positive tolerances.
    pub fn validate(&self) -> CalendarResult<()> {
        if !self.civil_offset_hours.is_finite()
            || self.civil_offset_hours.abs() > MAX_CIVIL_OFFSET_HOURS
        {
            return Err(CalendarError::invalid_config(
                "civil_offset_hours",
                format!(
                    "must be within ±{MAX_CIVIL_OFFSET_HOURS} h, got {}",
                    self.civil_offset_hours
                ),
            ));
        }
        validate_solver("solar_solver", &self.solar_solver)?;
        validate_solver("conjunction_solver", &self.conjunction_solver)?;
        Ok(())
    }
}

fn validate_solver(field: &'static str, solver: &NewtonSolver) -> CalendarResult<()> {
    if solver.max_iterations == 0 {
        return Err(CalendarError::invalid_config(
            field,
            "max_iterations must be >= 1",
        ));
    }
    if !solver.tolerance_deg.is_finite() || solver.tolerance_deg <= 0.0 {
        return Err(CalendarError::invalid_config(
            field,
            format!(
                "tolerance must be finite and positive, got {}",
                solver.tolerance_deg
            ),
        ));
    }
    Ok(())
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::new()
    }
}
