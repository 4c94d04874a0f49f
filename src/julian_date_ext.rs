// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-specific extensions of [`Time`].
//!
//! * `Time<TT>`: the J2000.0 epoch and Julian centuries, the argument of
//!   the solar and lunar series.
//! * `Time<UT>`: civil calendar helpers, namely the Gregorian year of an instant
//!   and the integer civil-day index under a fixed UTC offset.

use qtty::*;

use super::civil::{calendar_year, jdn_from_gregorian};
use super::instant::Time;
use super::scales::{TT, UT};

impl Time<TT> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0, the `T` of the ephemeris series.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        ((*self - Self::J2000) / Self::JULIAN_CENTURY)
            .simplify()
            .value()
    }
}

impl Time<UT> {
    /// 00:00 UT of a proleptic Gregorian date.
    #[inline]
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Self {
        Self::new(jdn_from_gregorian(year, month, day) as f64 - 0.5)
    }

    /// Gregorian calendar year (UTC) containing this instant.
    #[inline]
    pub fn calendar_year(&self) -> i32 {
        calendar_year(self.quantity())
    }

    /// Integer index of the civil day containing this instant, for a civil
    /// clock running `offset_hours` ahead of UT.
    ///
    /// `floor(jd + offset/24 + 0.5)`: the Julian Day Number of the local
    /// date.  Only differences between indices are meaningful to callers;
    /// consecutive local days differ by exactly one.
    #[inline]
    pub fn local_day(&self, offset_hours: f64) -> i64 {
        (self.value() + offset_hours / 24.0 + 0.5).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_centuries_since_j2000() {
        let t = Time::<TT>::J2000 + Days::new(36_525.0 * 0.25);
        assert!((t.julian_centuries() - 0.25).abs() < 1e-12);
        assert_eq!(Time::<TT>::J2000.julian_centuries(), 0.0);
    }

    #[test]
    fn from_gregorian_is_midnight() {
        let t = Time::<UT>::from_gregorian(2000, 1, 1);
        assert_eq!(t.value(), 2_451_544.5);
        assert_eq!(t.calendar_year(), 2000);
        assert_eq!((t - Days::new(1e-6)).calendar_year(), 1999);
    }

    #[test]
    fn local_day_at_utc_plus_eight() {
        // 2023-01-21T15:59 UT is 23:59 in UTC+8, 16:00 UT is the next day.
        let midnight = Time::<UT>::from_gregorian(2023, 1, 21);
        let before = midnight + Days::new(15.0 / 24.0 + 59.0 / 1440.0);
        let after = midnight + Days::new(16.0 / 24.0 + 1.0 / 86_400.0);
        assert_eq!(before.local_day(8.0), jdn_from_gregorian(2023, 1, 21));
        assert_eq!(after.local_day(8.0), jdn_from_gregorian(2023, 1, 22));
    }

    #[test]
    fn local_day_with_zero_offset_is_utc_date() {
        let t = Time::<UT>::from_gregorian(2024, 2, 10) + Days::new(0.75);
        assert_eq!(t.local_day(0.0), jdn_from_gregorian(2024, 2, 10));
    }

    #[test]
    fn local_day_advances_by_one_per_day() {
        let start = Time::<UT>::new(2_459_000.123_456);
        for i in 0..2_000 {
            let t = start + Days::new(i as f64 * 0.173);
            assert_eq!(
                (t + Days::new(1.0)).local_day(8.0),
                t.local_day(8.0) + 1,
                "at {t}"
            );
        }
    }
}
