// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gregorian → lunar date mapping.
//!
//! A civil date is located by its civil day index (see
//! [`Time::<UT>::local_day`]).  The lunar year built for the previous
//! Gregorian year covers everything up to the month holding this year's
//! winter solstice; later dates fall in the year built for the current one.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::CalendarConfig;
use crate::error::{CalendarError, CalendarResult};
use crate::year::LunarYear;
use crate::{Time, UT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A date in the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarDate {
    /// Gregorian year in which the lunar year began; months 11 and 12 keep
    /// the number of the year they started in.
    pub year: i32,
    /// Month number, 1–12.
    pub month: u8,
    /// Day of the month, 1–30.
    pub day: u8,
    /// `true` inside a leap month.
    pub is_leap: bool,
    /// 29 or 30.
    pub month_length: u8,
}

impl LunarDate {
    /// Locate civil day `local_day` within `year`.
    ///
    /// Returns `None` if no month of `year` contains it.
    pub fn in_year(year: &LunarYear, local_day: i64) -> Option<Self> {
        let offset = year.civil_offset_hours();
        let month = year.month_containing_day(local_day)?;
        let days = month.civil_days(offset);
        Some(Self {
            year: year.year_of(month),
            month: month.ordinal,
            day: (local_day - days.start + 1) as u8,
            is_leap: month.is_leap,
            month_length: (days.end - days.start) as u8,
        })
    }
}

impl fmt::Display for LunarDate {
    /// Numeric `YYYY-MM-DD`, with an `L` before a leap month: `2023-L02-11`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap { "L" } else { "" };
        write!(f, "{}-{}{:02}-{:02}", self.year, leap, self.month, self.day)
    }
}

/// Lunar date of a UTC instant.
///
/// Builds one or two [`LunarYear`]s; see
/// [`LunarCalendar::memoized`](crate::LunarCalendar::memoized) to reuse them
/// across queries.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use lunisolar::{solar_to_lunar, CalendarConfig};
///
/// let cny = Utc.with_ymd_and_hms(2023, 1, 22, 0, 0, 0).unwrap();
/// let date = solar_to_lunar(cny, &CalendarConfig::default()).unwrap();
/// assert_eq!((date.year, date.month, date.day), (2023, 1, 1));
/// ```
pub fn solar_to_lunar(date: DateTime<Utc>, config: &CalendarConfig) -> CalendarResult<LunarDate> {
    config.validate()?;
    locate(Time::<UT>::from_utc(date), config.civil_offset_hours(), |year| {
        LunarYear::build(year, config)
    })
}

/// Resolve `instant` against the lunar years `year_for` provides.
pub(crate) fn locate<Y, F>(
    instant: Time<UT>,
    offset_hours: f64,
    mut year_for: F,
) -> CalendarResult<LunarDate>
where
    Y: Borrow<LunarYear>,
    F: FnMut(i32) -> CalendarResult<Y>,
{
    if !instant.is_finite() {
        return Err(CalendarError::NotFound {
            jd: instant.value(),
        });
    }
    let day = instant.local_day(offset_hours);
    let gregorian_year = instant.calendar_year();

    for anchor in [gregorian_year - 1, gregorian_year] {
        let built = year_for(anchor)?;
        let year: &LunarYear = built.borrow();
        if year.civil_days().contains(&day) {
            if let Some(date) = LunarDate::in_year(year, day) {
                tracing::trace!(%instant, anchor, %date, "mapped date");
                return Ok(date);
            }
        }
    }
    Err(CalendarError::NotFound {
        jd: instant.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lunar(y: i32, m: u32, d: u32, h: u32) -> LunarDate {
        let date = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        solar_to_lunar(date, &CalendarConfig::default()).unwrap()
    }

    #[test]
    fn chinese_new_year_2023() {
        let d = lunar(2023, 1, 22, 0);
        assert_eq!(
            d,
            LunarDate {
                year: 2023,
                month: 1,
                day: 1,
                is_leap: false,
                month_length: 29,
            }
        );
    }

    #[test]
    fn evening_before_new_moon_is_first_day() {
        // 18:00 UT is already 22 January in UTC+8, before the 20:39 UT
        // conjunction.
        let d = lunar(2023, 1, 21, 18);
        assert_eq!((d.year, d.month, d.day), (2023, 1, 1));
    }

    #[test]
    fn december_dates_keep_anchor_year() {
        let d = lunar(2023, 12, 20, 0);
        assert_eq!((d.year, d.month, d.day, d.is_leap), (2023, 11, 8, false));
        let d = lunar(2023, 12, 31, 23);
        assert_eq!((d.year, d.month, d.day), (2023, 11, 20));
    }

    #[test]
    fn millennium() {
        let d = lunar(2000, 1, 1, 0);
        assert_eq!((d.year, d.month, d.day, d.month_length), (1999, 11, 25, 30));
    }

    #[test]
    fn display_marks_leap_months() {
        let d = LunarDate {
            year: 2023,
            month: 2,
            day: 11,
            is_leap: true,
            month_length: 29,
        };
        assert_eq!(d.to_string(), "2023-L02-11");
        let d = LunarDate { is_leap: false, ..d };
        assert_eq!(d.to_string(), "2023-02-11");
    }

    #[test]
    fn non_finite_instant_not_found() {
        let err = locate(Time::<UT>::new(f64::NAN), 8.0, |y| {
            LunarYear::build(y, &CalendarConfig::default())
        })
        .unwrap_err();
        assert!(matches!(err, CalendarError::NotFound { .. }));
    }

    #[test]
    fn invalid_offset_rejected() {
        let date = Utc.with_ymd_and_hms(2023, 1, 22, 0, 0, 0).unwrap();
        let config = CalendarConfig::default().with_civil_offset_hours(f64::NAN);
        assert!(matches!(
            solar_to_lunar(date, &config),
            Err(CalendarError::InvalidConfig { .. })
        ));
    }
}
