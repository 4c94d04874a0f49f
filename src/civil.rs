// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar arithmetic on Julian Day Numbers.
//!
//! Integer algorithms (Fliegel & Van Flandern) so that the calendar year of
//! any finite Julian Day is available without going through chrono's
//! bounded `DateTime` range.

use qtty::Days;

/// Julian Day Number of a proleptic Gregorian date.
///
/// `year` is astronomical (1 BC is `0`).  Month and day are not range
/// checked; out-of-range values roll over like the underlying formula.
pub fn jdn_from_gregorian(year: i32, month: u32, day: u32) -> i64 {
    let (y, m, d) = (year as i64, month as i64, day as i64);
    // Truncating division is part of the formula: `a` is -1 for January and
    // February, 0 otherwise.
    let a = (m - 14) / 12;
    (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((y + 4900 + a) / 100)) / 4
        + d
        - 32075
}

/// Proleptic Gregorian `(year, month, day)` of a Julian Day Number.
pub fn gregorian_from_jdn(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year as i32, month as u32, day as u32)
}

/// Julian Day Number of the civil day containing `jd` (days start at 00:00).
#[inline]
pub fn jdn_of(jd: Days) -> i64 {
    (jd.value() + 0.5).floor() as i64
}

/// Gregorian calendar year containing the Julian Day `jd`.
#[inline]
pub fn calendar_year(jd: Days) -> i32 {
    gregorian_from_jdn(jdn_of(jd)).0
}

/// Julian Day of 1 January 00:00 of `year`.
#[inline]
pub fn jd_of_january_first(year: i32) -> Days {
    Days::new(jdn_from_gregorian(year, 1, 1) as f64 - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_day_number() {
        assert_eq!(jdn_from_gregorian(2000, 1, 1), 2_451_545);
        assert_eq!(gregorian_from_jdn(2_451_545), (2000, 1, 1));
    }

    #[test]
    fn unix_epoch_day_number() {
        assert_eq!(jdn_from_gregorian(1970, 1, 1), 2_440_588);
        assert_eq!(jd_of_january_first(1970), Days::new(2_440_587.5));
    }

    #[test]
    fn leap_day_roundtrip() {
        let jdn = jdn_from_gregorian(2024, 2, 29);
        assert_eq!(gregorian_from_jdn(jdn), (2024, 2, 29));
        assert_eq!(gregorian_from_jdn(jdn + 1), (2024, 3, 1));
        assert_eq!(jdn_from_gregorian(1900, 3, 1) - jdn_from_gregorian(1900, 2, 28), 1);
    }

    #[test]
    fn day_numbers_are_contiguous_over_a_century() {
        let start = jdn_from_gregorian(1950, 1, 1);
        let end = jdn_from_gregorian(2050, 1, 1);
        let mut previous = gregorian_from_jdn(start);
        for jdn in start + 1..end {
            let date = gregorian_from_jdn(jdn);
            assert_eq!(jdn_from_gregorian(date.0, date.1, date.2), jdn);
            assert!(date > previous);
            previous = date;
        }
    }

    #[test]
    fn calendar_year_switches_at_midnight() {
        let new_year = jd_of_january_first(2024);
        assert_eq!(calendar_year(new_year), 2024);
        assert_eq!(calendar_year(new_year - Days::new(1e-6)), 2023);
    }
}
