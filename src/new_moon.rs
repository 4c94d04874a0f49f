// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sun–Moon conjunctions.
//!
//! A new moon is a zero of the [elongation](crate::ephemeris::elongation).
//! The root is searched on the TT axis and reported in UT, so every
//! conjunction instant here is a `Time<UT>`.

use crate::ephemeris::elongation;
use crate::error::{CalendarError, CalendarResult, NumericalErrorKind};
use crate::solver::NewtonSolver;
use crate::{Time, TT, UT};
use qtty::Days;

/// Mean synodic month.
pub const SYNODIC_MONTH: Days = Days::new(29.530588853);

/// Attempts [`prev_new_moon`] and [`next_new_moon`] make before giving up.
pub const MAX_SEARCH_ATTEMPTS: u32 = 15;

/// Seed offset of [`next_new_moon`], in synodic months.
const NEXT_SEED_FRACTION: f64 = 0.8;

/// The conjunction the solver reaches from `seed`, normally the nearest one.
pub fn true_new_moon(seed: Time<UT>, solver: &NewtonSolver) -> CalendarResult<Time<UT>> {
    let root = solver.solve(seed.to::<TT>(), 0.0, elongation);
    Ok(root.accept("true_new_moon")?.to::<UT>())
}

/// Latest conjunction at or before `instant`.
pub fn prev_new_moon(instant: Time<UT>, solver: &NewtonSolver) -> CalendarResult<Time<UT>> {
    search_back(instant, |seed| true_new_moon(seed, solver))
}

/// Earliest conjunction at or after `instant`, searched from 0.8 synodic
/// months ahead.
pub fn next_new_moon(instant: Time<UT>, solver: &NewtonSolver) -> CalendarResult<Time<UT>> {
    search_forward(instant, |seed| true_new_moon(seed, solver))
}

/// Step `conjunction` seeds back one synodic month at a time until a result
/// lands at or before `instant`.
fn search_back<F>(instant: Time<UT>, mut conjunction: F) -> CalendarResult<Time<UT>>
where
    F: FnMut(Time<UT>) -> CalendarResult<Time<UT>>,
{
    let mut seed = instant;
    for _ in 0..MAX_SEARCH_ATTEMPTS {
        let new_moon = conjunction(seed)?;
        if new_moon <= instant {
            return Ok(new_moon);
        }
        seed -= SYNODIC_MONTH;
    }
    tracing::warn!(%instant, attempts = MAX_SEARCH_ATTEMPTS, "no new moon before instant");
    Err(CalendarError::numerical(
        "prev_new_moon",
        NumericalErrorKind::SearchExhausted,
        instant.value(),
    ))
}

/// Step `conjunction` seeds forward from 0.8 synodic months ahead until a
/// result lands at or after `instant`.
fn search_forward<F>(instant: Time<UT>, mut conjunction: F) -> CalendarResult<Time<UT>>
where
    F: FnMut(Time<UT>) -> CalendarResult<Time<UT>>,
{
    let mut seed = instant + Days::new(SYNODIC_MONTH.value() * NEXT_SEED_FRACTION);
    for _ in 0..MAX_SEARCH_ATTEMPTS {
        let new_moon = conjunction(seed)?;
        if new_moon >= instant {
            return Ok(new_moon);
        }
        seed += SYNODIC_MONTH;
    }
    tracing::warn!(%instant, attempts = MAX_SEARCH_ATTEMPTS, "no new moon after instant");
    Err(CalendarError::numerical(
        "next_new_moon",
        NumericalErrorKind::SearchExhausted,
        instant.value(),
    ))
}
