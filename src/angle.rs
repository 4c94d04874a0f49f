// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle helpers on plain `f64` degrees.
//!
//! | Function | Range | Used for |
//! |----------|-------|----------|
//! | [`norm360`] | [0, 360) | ecliptic longitudes |
//! | [`angle_diff`] | (−180, 180] | solver residuals |
//!
//! `%` on floats is a remainder, not a modulo: `-1.0 % 360.0` is `-1.0`.
//! [`norm360`] adds the period back for negative remainders.

/// Wrap an angle in degrees into `[0, 360)`.
///
/// ```
/// use lunisolar::angle::norm360;
///
/// assert_eq!(norm360(370.0), 10.0);
/// assert_eq!(norm360(-10.0), 350.0);
/// ```
#[inline]
pub fn norm360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-17 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Shortest signed difference `a − b` in degrees, in `(−180, 180]`.
///
/// Both inputs are normalised first, so any real angles are accepted.
/// Antisymmetric (`angle_diff(a, b) == -angle_diff(b, a)`) except when the
/// two directions are exactly opposite, where both orders give `180`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = norm360(a) - norm360(b);
    if d > 180.0 {
        d - 360.0
    } else if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}
