// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Truncated solar and lunar longitude series.
//!
//! Both series take their argument as Julian centuries from J2000.0 on the
//! **TT** axis, so the functions accept only [`Time<TT>`].  Results are
//! apparent-enough ecliptic longitudes in degrees, `[0, 360)`.
//!
//! | Body | Terms | Typical error |
//! |------|-------|---------------|
//! | Sun | mean longitude + equation of centre (2 terms) | ~0.01° |
//! | Moon | mean longitude + 5 periodic terms | ~0.1° |
//!
//! Nutation and aberration are not applied; solstices computed from these
//! series fall roughly a quarter of an hour before the published instants.

use crate::angle::{angle_diff, norm360};
use crate::{Time, TT};

/// Geometric ecliptic longitude of the Sun in degrees.
pub fn solar_longitude(t: Time<TT>) -> f64 {
    let c = t.julian_centuries();
    let l0 = 280.46646 + 36000.76983 * c;
    let m = (357.52911 + 35999.05029 * c).to_radians();
    let centre = (1.914602 - 0.004817 * c) * m.sin() + 0.019993 * (2.0 * m).sin();
    norm360(l0 + centre)
}

/// Ecliptic longitude of the Moon in degrees.
pub fn moon_longitude(t: Time<TT>) -> f64 {
    let c = t.julian_centuries();
    let lp = 218.3164477 + 481267.88123421 * c;
    let m = (134.9633964 + 477198.8675055 * c).to_radians();
    let d = (297.8501921 + 445267.1114034 * c).to_radians();
    let periodic = 6.289 * m.sin()
        + 1.274 * (2.0 * d - m).sin()
        + 0.658 * (2.0 * d).sin()
        + 0.214 * (2.0 * m).sin()
        + 0.11 * d.sin();
    norm360(lp + periodic)
}

/// Moon minus Sun longitude, `(−180, 180]`; zero at conjunction.
#[inline]
pub fn elongation(t: Time<TT>) -> f64 {
    angle_diff(moon_longitude(t), solar_longitude(t))
}
