// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar year construction.
//!
//! A [`LunarYear`] covers the lunar months from the one holding the winter
//! solstice of its anchor year `Y` up to, not including, the one holding
//! the winter solstice of `Y + 1`.  That is 12 months, or 13 when a leap
//! month falls inside.
//!
//! ```text
//!  ws(Y)                                                    ws(Y+1)
//!    |                                                         |
//!  [ 11 )[ 12 )[ 1 )[ 2 )[ L2 )[ 3 ) ... [ 9 )[ 10 )[ next 11 ...
//!  ^ anchor month                                  ^ year end
//! ```
//!
//! Months are numbered cyclically from 11.  In a 13-month year the first
//! month without a principal solar term (after the anchor month) is the leap
//! month: it repeats the number of the month before it and the numbering
//! carries on from there.

use std::ops::Range;

use crate::config::{CalendarConfig, MonthBoundary};
use crate::error::{CalendarError, CalendarResult};
use crate::new_moon::{next_new_moon, prev_new_moon};
use crate::solar_term::{solve_solar_longitude, winter_solstice};
use crate::solver::NewtonSolver;
use crate::{Period, Time, UT};
use qtty::Days;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordinal of the month holding the winter solstice.
pub(crate) const ANCHOR_ORDINAL: u8 = 11;

/// Conjunctions closer than this to the year end are the year end.
const SNAP: Days = Days::new(1.0);

/// Seed offset of principal-term searches from the month start.
const TERM_SEED_OFFSET: Days = Days::new(15.0);

/// Hard cap on enumerated months; a valid year never exceeds 13.
const MAX_MONTHS: usize = 14;

/// One lunar month: from a new moon to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarMonth {
    /// `[new moon, next new moon)` in UT.
    pub span: Period<UT>,
    /// Month number, 1–12.
    pub ordinal: u8,
    /// Leap month: repeats the number of the month before it.
    pub is_leap: bool,
    /// Whether a solar longitude multiple of 30° falls in the month.
    pub has_principal_term: bool,
}

impl LunarMonth {
    /// Civil days `[first, first + length)` covered by the month.
    #[inline]
    pub fn civil_days(&self, offset_hours: f64) -> Range<i64> {
        self.span.start.local_day(offset_hours)..self.span.end.local_day(offset_hours)
    }

    /// Number of civil days, 29 or 30.
    #[inline]
    pub fn length_days(&self, offset_hours: f64) -> u32 {
        let days = self.civil_days(offset_hours);
        (days.end - days.start) as u32
    }
}

/// The months of one winter-solstice-to-winter-solstice span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarYear {
    anchor_year: i32,
    civil_offset_hours: f64,
    months: Vec<LunarMonth>,
    leap_index: Option<usize>,
}

impl LunarYear {
    /// Builds the lunar year anchored on the winter solstice of `year`.
    pub fn build(year: i32, config: &CalendarConfig) -> CalendarResult<Self> {
        config.validate()?;
        let builder = Builder::new(year, config);

        let start = builder.anchor_new_moon(year)?;
        let end = builder.anchor_new_moon(year + 1)?;
        let spans = builder.enumerate(start, end)?;

        let mut flags = Vec::with_capacity(spans.len());
        for span in &spans {
            flags.push(builder.has_principal_term(span)?);
        }
        let leap_index = select_leap(year, &flags, config.month_boundary())?;

        let mut months = Vec::with_capacity(spans.len());
        let mut ordinal = ANCHOR_ORDINAL - 1;
        for (i, (span, has_principal_term)) in spans.into_iter().zip(flags).enumerate() {
            let is_leap = leap_index == Some(i);
            if !is_leap {
                ordinal = ordinal % 12 + 1;
            }
            months.push(LunarMonth {
                span,
                ordinal,
                is_leap,
                has_principal_term,
            });
        }

        let lunar_year = Self {
            anchor_year: year,
            civil_offset_hours: config.civil_offset_hours(),
            months,
            leap_index,
        };
        tracing::debug!(
            year,
            months = lunar_year.months.len(),
            leap = ?lunar_year.leap_month().map(|m| m.ordinal),
            boundary = ?config.month_boundary(),
            "built lunar year"
        );
        Ok(lunar_year)
    }

    /// Gregorian year whose winter solstice opens this lunar year.
    pub fn anchor_year(&self) -> i32 {
        self.anchor_year
    }

    /// Civil offset used to count days in this year.
    pub fn civil_offset_hours(&self) -> f64 {
        self.civil_offset_hours
    }

    /// Months in chronological order; consecutive spans share boundaries.
    pub fn months(&self) -> &[LunarMonth] {
        &self.months
    }

    /// The leap month, if the year has 13 months.
    pub fn leap_month(&self) -> Option<&LunarMonth> {
        self.leap_index.map(|i| &self.months[i])
    }

    /// `true` for a 13-month year.
    pub fn is_leap_year(&self) -> bool {
        self.leap_index.is_some()
    }

    /// `[first new moon, year end)` in UT.
    pub fn span(&self) -> Period<UT> {
        let start = self.months[0].span.start;
        let end = self.months[self.months.len() - 1].span.end;
        Period::new(start, end)
    }

    /// Civil days covered by the year.
    pub fn civil_days(&self) -> Range<i64> {
        let span = self.span();
        span.start.local_day(self.civil_offset_hours)..span.end.local_day(self.civil_offset_hours)
    }

    /// The month whose civil days contain `local_day`.
    pub fn month_containing_day(&self, local_day: i64) -> Option<&LunarMonth> {
        self.months
            .iter()
            .find(|m| m.civil_days(self.civil_offset_hours).contains(&local_day))
    }

    /// Gregorian year a month of this lunar year is numbered in: the anchor
    /// year for months 11 and 12 before the new year, the next one after.
    pub fn year_of(&self, month: &LunarMonth) -> i32 {
        if month.ordinal >= ANCHOR_ORDINAL {
            self.anchor_year
        } else {
            self.anchor_year + 1
        }
    }
}

/// Construction state shared by the steps of [`LunarYear::build`].
struct Builder<'a> {
    year: i32,
    config: &'a CalendarConfig,
}

impl<'a> Builder<'a> {
    fn new(year: i32, config: &'a CalendarConfig) -> Self {
        Self { year, config }
    }

    fn solar(&self) -> &NewtonSolver {
        self.config.solar_solver()
    }

    fn conjunction(&self) -> &NewtonSolver {
        self.config.conjunction_solver()
    }

    fn local_day(&self, t: Time<UT>) -> i64 {
        t.local_day(self.config.civil_offset_hours())
    }

    /// New moon opening the month that holds the winter solstice of `year`.
    fn anchor_new_moon(&self, year: i32) -> CalendarResult<Time<UT>> {
        let solstice = winter_solstice(year, self.solar())?;
        let new_moon = prev_new_moon(solstice, self.conjunction())?;
        match self.config.month_boundary() {
            MonthBoundary::Instant => Ok(new_moon),
            MonthBoundary::CivilDay => {
                // A conjunction later on the solstice's civil day still opens
                // the solstice month.
                let next = next_new_moon(new_moon + Days::new(1.0), self.conjunction())?;
                if self.local_day(next) <= self.local_day(solstice) {
                    Ok(next)
                } else {
                    Ok(new_moon)
                }
            }
        }
    }

    /// Month spans from `start` up to `end`, the last one ending exactly at
    /// `end`.
    fn enumerate(&self, start: Time<UT>, end: Time<UT>) -> CalendarResult<Vec<Period<UT>>> {
        let mut spans = Vec::with_capacity(13);
        let mut current = start;
        while end - current > SNAP {
            if spans.len() == MAX_MONTHS {
                return Err(CalendarError::inconsistency(
                    self.year,
                    format!("more than {MAX_MONTHS} months before the year end"),
                ));
            }
            let mut next = next_new_moon(current + Days::new(1.0), self.conjunction())?;
            if (next - end).abs() < SNAP {
                next = end;
            }
            spans.push(Period::new(current, next));
            current = next;
        }

        if current != end {
            return Err(CalendarError::inconsistency(
                self.year,
                format!("month enumeration stopped at {current}, year ends at {end}"),
            ));
        }
        Ok(spans)
    }

    /// Whether any multiple of 30° of solar longitude is reached in `span`.
    fn has_principal_term(&self, span: &Period<UT>) -> CalendarResult<bool> {
        let seed = span.start + TERM_SEED_OFFSET;
        for k in 0..12 {
            let term = solve_solar_longitude(seed, 30.0 * k as f64, self.solar())?;
            let inside = match self.config.month_boundary() {
                MonthBoundary::Instant => span.contains(term),
                MonthBoundary::CivilDay => {
                    let days = self.local_day(span.start)..self.local_day(span.end);
                    days.contains(&self.local_day(term))
                }
            };
            if inside {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Index of the leap month of anchor year `year`, from one principal-term
/// flag per month.
///
/// Twelve months have no leap month.  Thirteen months need exactly one month
/// after the anchor without a principal term; under
/// [`MonthBoundary::CivilDay`] the first of several is taken.  Any other
/// month count is an inconsistency.
fn select_leap(
    year: i32,
    flags: &[bool],
    boundary: MonthBoundary,
) -> CalendarResult<Option<usize>> {
    match flags.len() {
        12 => return Ok(None),
        13 => {}
        n => {
            return Err(CalendarError::inconsistency(
                year,
                format!("{n} months between winter solstices"),
            ))
        }
    }
    // The anchor month holds the solstice and is never the leap month.
    let candidates: Vec<usize> = flags
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, has_term)| !**has_term)
        .map(|(i, _)| i)
        .collect();

    match (candidates.as_slice(), boundary) {
        ([], _) => Err(CalendarError::inconsistency(
            year,
            "13 months but every month has a principal term",
        )),
        ([only], _) => Ok(Some(*only)),
        ([first, ..], MonthBoundary::CivilDay) => {
            tracing::debug!(
                year,
                ?candidates,
                "several months without a principal term, taking the first"
            );
            Ok(Some(*first))
        }
        (_, MonthBoundary::Instant) => Err(CalendarError::inconsistency(
            year,
            format!(
                "{} months without a principal term: {candidates:?}",
                candidates.len()
            ),
        )),
    }
}
