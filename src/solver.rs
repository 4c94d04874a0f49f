// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Newton root finder for angular targets.
//!
//! Solves `angle(t) == target` for a longitude-like function of time.  The
//! residual is the shortest signed difference
//! `f(t) = angle_diff(angle(t), target)` and the slope is a forward
//! difference over one minute:
//!
//! ```text
//! t ← t − f(t) / ((f(t + 1 min) − f(t)) · 1440)
//! ```
//!
//! Iteration stops as soon as `|f| <= tolerance_deg`, after
//! `max_iterations` steps, or when the estimate or slope degenerates.  The
//! outcome is reported in [`Root::status`] instead of being silently
//! returned as a plain instant; [`Root::accept`] only lets an exhausted run
//! through when its residual is within [`NewtonSolver::ACCEPT_RESIDUAL_DEG`].

use crate::angle::angle_diff;
use crate::error::{CalendarError, CalendarResult, NumericalErrorKind};
use crate::{Time, TimeScale};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step of the forward-difference slope, one minute.
const SLOPE_STEP: Days = Days::new(1.0 / 1440.0);

/// How a [`NewtonSolver`] run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// `|residual| <= tolerance`.
    Converged,
    /// The iteration cap was reached with the residual still above tolerance.
    Exhausted,
    /// The iteration produced a non-finite value or a zero slope.
    Diverged(NumericalErrorKind),
}

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root<S: TimeScale> {
    /// Final estimate.
    pub instant: Time<S>,
    /// `angle_diff(angle(instant), target)` in degrees.
    pub residual: f64,
    /// Newton steps taken.
    pub iterations: u32,
    /// How the run ended.
    pub status: Convergence,
}

impl<S: TimeScale> Root<S> {
    /// `true` for [`Convergence::Converged`].
    #[inline]
    pub fn converged(&self) -> bool {
        self.status == Convergence::Converged
    }

    /// The instant of a usable run.
    ///
    /// A converged run is always usable.  An exhausted run is usable while
    /// `|residual|` stays within [`NewtonSolver::ACCEPT_RESIDUAL_DEG`];
    /// beyond that it fails with [`NumericalErrorKind::NotConverged`].  A
    /// diverged run fails with its own kind.
    pub fn accept(self, operation: &'static str) -> CalendarResult<Time<S>> {
        let kind = match self.status {
            Convergence::Converged => return Ok(self.instant),
            Convergence::Exhausted
                if self.residual.abs() <= NewtonSolver::ACCEPT_RESIDUAL_DEG =>
            {
                return Ok(self.instant)
            }
            Convergence::Exhausted => NumericalErrorKind::NotConverged,
            Convergence::Diverged(kind) => kind,
        };
        Err(CalendarError::numerical(
            operation,
            kind,
            self.instant.value(),
        ))
    }
}

/// Bounded Newton iteration with a tolerance stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewtonSolver {
    /// Upper bound on Newton steps.
    pub max_iterations: u32,
    /// Stop once `|residual|` is at most this many degrees.
    pub tolerance_deg: f64,
}

impl NewtonSolver {
    /// Default tolerance: under 10 ms of solar motion, under 1 ms of lunar.
    pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-7;

    /// Largest residual an exhausted run may keep and still be accepted:
    /// about 90 s of solar motion, 7 s of lunar.
    pub const ACCEPT_RESIDUAL_DEG: f64 = 1e-3;

    /// Settings used for solar-longitude crossings.
    pub const SOLAR: Self = Self::new(12, Self::DEFAULT_TOLERANCE_DEG);

    /// Settings used for Sun–Moon conjunctions.
    pub const CONJUNCTION: Self = Self::new(15, Self::DEFAULT_TOLERANCE_DEG);

    /// Solver with explicit limits; see [`CalendarConfig`](crate::CalendarConfig)
    /// for the ranges the calendar accepts.
    pub const fn new(max_iterations: u32, tolerance_deg: f64) -> Self {
        Self {
            max_iterations,
            tolerance_deg,
        }
    }

    /// Find `t` near `seed` with `angle(t) == target_deg`.
    ///
    /// `angle` must return degrees; it is evaluated on the same scale as the
    /// seed.
    pub fn solve<S, F>(&self, seed: Time<S>, target_deg: f64, angle: F) -> Root<S>
    where
        S: TimeScale,
        F: Fn(Time<S>) -> f64,
    {
        let residual = |t: Time<S>| angle_diff(angle(t), target_deg);

        let mut t = seed;
        let mut f = residual(t);
        let mut iterations = 0;

        loop {
            if !t.is_finite() || !f.is_finite() {
                let status = Convergence::Diverged(NumericalErrorKind::NonFinite);
                return self.finish(t, f, iterations, status);
            }
            if f.abs() <= self.tolerance_deg {
                return self.finish(t, f, iterations, Convergence::Converged);
            }
            if iterations >= self.max_iterations {
                return self.finish(t, f, iterations, Convergence::Exhausted);
            }

            // A slope lost in the rounding of `f` gives no usable step.
            let slope = residual(t + SLOPE_STEP) - f;
            if slope.abs() < f64::EPSILON * f.abs().max(1.0) {
                let status = Convergence::Diverged(NumericalErrorKind::ZeroSlope);
                return self.finish(t, f, iterations, status);
            }

            t -= Days::new(f / (slope * 1440.0));
            f = residual(t);
            iterations += 1;
            tracing::trace!(iteration = iterations, instant = %t, residual = f, "newton step");
        }
    }

    fn finish<S: TimeScale>(
        &self,
        instant: Time<S>,
        residual: f64,
        iterations: u32,
        status: Convergence,
    ) -> Root<S> {
        match status {
            Convergence::Converged => {
                tracing::debug!(%instant, residual, iterations, "root converged");
            }
            Convergence::Exhausted => {
                tracing::warn!(
                    %instant,
                    residual,
                    iterations,
                    tolerance = self.tolerance_deg,
                    "root search hit iteration cap"
                );
            }
            Convergence::Diverged(kind) => {
                tracing::warn!(%instant, residual, iterations, %kind, "root search diverged");
            }
        }
        Root {
            instant,
            residual,
            iterations,
            status,
        }
    }
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self::SOLAR
    }
}
