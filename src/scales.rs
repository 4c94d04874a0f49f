// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The two time scales the calendar works on.
//!
//! | Marker | Scale | Carries |
//! |--------|-------|---------|
//! | [`UT`] | Universal Time | civil timestamps, month boundaries, day counting |
//! | [`TT`] | Terrestrial Time | arguments of the solar and lunar series |
//!
//! Julian Days on TT are the pivot: [`Time::to`] maps any scale into TT and
//! back out.

use super::civil::calendar_year;
use super::delta_t::{decimal_year, delta_t_seconds};
use super::instant::{Time, TimeScale};
use qtty::{Day, Days};

/// Terrestrial Time, the uniform axis of the ephemeris.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TT;

impl TimeScale for TT {
    const LABEL: &'static str = "TT";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time, read as UTC without leap seconds.
///
/// Going to TT adds ΔT at the decimal year of the UT instant.  Coming back
/// subtracts ΔT at the integer calendar year of the TT instant, so a round
/// trip drifts by the within-year change of ΔT (a fraction of a second).
/// New-moon instants depend on this exact pairing.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(jd_ut: Days) -> Days {
        let delta_t = delta_t_seconds(decimal_year(jd_ut));
        jd_ut + delta_t.to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let delta_t = delta_t_seconds(f64::from(calendar_year(jd_tt)));
        jd_tt - delta_t.to::<Day>()
    }
}

impl From<Time<UT>> for Time<TT> {
    #[inline]
    fn from(ut: Time<UT>) -> Self {
        ut.to::<TT>()
    }
}

impl From<Time<TT>> for Time<UT> {
    #[inline]
    fn from(tt: Time<TT>) -> Self {
        tt.to::<UT>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Second, Seconds};

    #[test]
    fn tt_is_identity_on_tt_axis() {
        let tt = Time::<TT>::new(2_460_000.25);
        assert_eq!(tt.to::<TT>(), tt);
    }

    #[test]
    fn ut_to_tt_applies_delta_t() {
        // 2000-01-01T12:00 UT, decimal year 2000.0014, t ≈ 0.0014
        let ut = Time::<UT>::new(2_451_545.0);
        let tt: Time<TT> = ut.to::<TT>();
        let offset = (tt.quantity() - ut.quantity()).to::<Second>();
        assert!(
            (offset - Seconds::new(63.86)).abs() < Seconds::new(0.01),
            "UT→TT offset = {offset}, expected ≈ 63.86 s"
        );
    }

    #[test]
    fn tt_to_ut_uses_integer_year() {
        // Mid-2024 on the TT axis: ΔT is evaluated at exactly 2024.0.
        let tt = Time::<TT>::new(2_460_492.5);
        let ut: Time<UT> = tt.to::<UT>();
        let offset = (tt.quantity() - ut.quantity()).to::<Second>();
        assert!((offset - delta_t_seconds(2024.0)).abs() < Seconds::new(1e-4));
    }

    #[test]
    fn ut_tt_roundtrip_is_not_exact_but_close() {
        let ut = Time::<UT>::new(2_460_492.5); // 2024-07-01
        let back: Time<UT> = ut.to::<TT>().to::<UT>();
        let drift = (back - ut).to::<Second>().abs();
        // ΔT(2024.5) − ΔT(2024.0) ≈ 0.29 s
        assert!(drift > Seconds::new(0.1), "drift = {drift}");
        assert!(drift < Seconds::new(1.0), "drift = {drift}");
    }

    #[test]
    fn from_into_between_scales() {
        let ut = Time::<UT>::new(2_451_545.0);
        let tt: Time<TT> = ut.into();
        let explicit = ut.to::<TT>();
        assert_eq!(tt, explicit);
        let back: Time<UT> = Time::from(tt);
        assert!((back - ut).abs() < Days::new(1e-6));
    }
}
