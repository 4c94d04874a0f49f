// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): the UT↔TT correction
//!
//! Piecewise polynomial model for **ΔT = TT − UT** as a function of the
//! decimal year.  The breakpoints follow the NASA eclipse-canon expressions
//! (Espenak & Meeus) from 1700 onwards, with a single long-term parabola
//! before that.  They must be reproduced bit for bit: new-moon instants, and
//! with them month boundaries near civil midnight, depend on them.
//!
//! | Range | Expression |
//! |-------|------------|
//! | y < 1700 | 120 + 80·((y − 2000)/100)² |
//! | 1700 ≤ y < 1800 | 8.83 + 0.1603 (y − 1700) |
//! | 1800 ≤ y < 1860 | 13.72 − 0.332447 (y − 1800) |
//! | 1860 ≤ y < 1900 | 7.62 + 0.5737 (y − 1860) |
//! | 1900 ≤ y < 1920 | −2.79 + 1.494119 (y − 1900) |
//! | 1920 ≤ y < 1941 | 21.20 + 0.84493 (y − 1920) |
//! | 1941 ≤ y < 1961 | 29.07 + 0.407 (y − 1950) |
//! | 1961 ≤ y < 1986 | 45.45 + 1.067 (y − 1975) |
//! | 1986 ≤ y < 2005 | quintic in t = y − 2000 |
//! | y ≥ 2005 | 62.92 + 0.32217 t + 0.005589 t² |
//!
//! ## Integration with Time Scales
//!
//! The correction is applied **automatically** by the [`UT`](super::UT)
//! marker: `Time::<UT>::to::<TT>()` adds ΔT at the decimal year of the UT
//! instant, `Time::<TT>::to::<UT>()` subtracts ΔT at the integer year of the
//! TT instant.
//!
//! ```rust
//! use lunisolar::{Time, TT, UT};
//!
//! let ut = Time::<UT>::new(2_460_310.5); // 2024-01-01T00:00 UT
//! let tt = ut.to::<TT>();
//! println!("ΔT = {}", ut.delta_t());
//! assert!(tt.value() > ut.value());
//! ```

use super::civil::{calendar_year, jd_of_january_first};
use super::instant::Time;
use super::scales::UT;
use qtty::{Days, Seconds};

// ------------------------------------------------------------------------------------
// ΔT sections by decimal year
// ------------------------------------------------------------------------------------

/// **Years < 1700**: long-term parabola centred on 2000.
#[inline]
fn delta_t_long_term(y: f64) -> f64 {
    let c = (y - 2000.0) / 100.0;
    120.0 + 80.0 * c * c
}

/// **Years 1700–1986**: linear segments.
#[inline]
fn delta_t_linear(y: f64) -> f64 {
    match y {
        y if y < 1800.0 => 8.83 + 0.1603 * (y - 1700.0),
        y if y < 1860.0 => 13.72 - 0.332447 * (y - 1800.0),
        y if y < 1900.0 => 7.62 + 0.5737 * (y - 1860.0),
        y if y < 1920.0 => -2.79 + 1.494119 * (y - 1900.0),
        y if y < 1941.0 => 21.20 + 0.84493 * (y - 1920.0),
        y if y < 1961.0 => 29.07 + 0.407 * (y - 1950.0),
        _ => 45.45 + 1.067 * (y - 1975.0),
    }
}

/// **Years 1986–2005**: quintic fit to observed values.
#[inline]
fn delta_t_modern(y: f64) -> f64 {
    let t = y - 2000.0;
    63.86 + 0.3345 * t - 0.060374 * t * t
        + 0.0017275 * t * t * t
        + 0.000651814 * t * t * t * t
        + 0.00002373599 * t * t * t * t * t
}

/// **Years ≥ 2005**: quadratic extrapolation.
#[inline]
fn delta_t_extrapolated(y: f64) -> f64 {
    let t = y - 2000.0;
    62.92 + 0.32217 * t + 0.005589 * t * t
}

/// Returns **ΔT** in seconds for a decimal year.
pub fn delta_t_seconds(decimal_year: f64) -> Seconds {
    let dt = match decimal_year {
        y if y < 1700.0 => delta_t_long_term(y),
        y if y < 1986.0 => delta_t_linear(y),
        y if y < 2005.0 => delta_t_modern(y),
        y => delta_t_extrapolated(y),
    };
    Seconds::new(dt)
}

/// Decimal year of a Julian Day on the UT axis.
///
/// The integer part is the Gregorian calendar year of the instant; the
/// fraction interpolates linearly between 1 January 00:00 of that year and
/// of the next, so leap years stretch over 366 days.
pub fn decimal_year(jd_ut: Days) -> f64 {
    let year = calendar_year(jd_ut);
    let start = jd_of_january_first(year);
    let end = jd_of_january_first(year + 1);
    year as f64 + (jd_ut - start).value() / (end - start).value()
}

// ── Time<UT> convenience method ───────────────────────────────────────────

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    ///
    /// This is the same correction `.to::<TT>()` applies.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds(decimal_year(self.quantity()))
    }

    /// Decimal year of this instant, as used for ΔT.
    #[inline]
    pub fn decimal_year(&self) -> f64 {
        decimal_year(self.quantity())
    }
}
