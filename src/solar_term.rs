// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar terms: instants at which the Sun reaches multiples of 15° of
//! ecliptic longitude.
//!
//! The twelve terms at multiples of 30° are the *principal terms* (中气)
//! that decide month numbering; the winter solstice (270°) anchors each
//! lunar year and Li Chun (315°) conventionally opens the stem-branch year.
//!
//! Searches run on the UT axis: the residual at a UT estimate is the solar
//! longitude at that estimate converted to TT.

use crate::ephemeris::solar_longitude;
use crate::error::CalendarResult;
use crate::solver::NewtonSolver;
use crate::{Time, TT, UT};
use qtty::Days;

/// Mean length of the tropical year.
pub const TROPICAL_YEAR: Days = Days::new(365.2422);

/// The 24 solar terms, in Gregorian-year order starting with Xiaohan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolarTerm {
    XiaoHan,
    DaHan,
    LiChun,
    YuShui,
    JingZhe,
    ChunFen,
    QingMing,
    GuYu,
    LiXia,
    XiaoMan,
    MangZhong,
    XiaZhi,
    XiaoShu,
    DaShu,
    LiQiu,
    ChuShu,
    BaiLu,
    QiuFen,
    HanLu,
    ShuangJiang,
    LiDong,
    XiaoXue,
    DaXue,
    DongZhi,
}

impl SolarTerm {
    /// All terms in the order they occur within a Gregorian year.
    pub const ALL: [SolarTerm; 24] = [
        Self::XiaoHan,
        Self::DaHan,
        Self::LiChun,
        Self::YuShui,
        Self::JingZhe,
        Self::ChunFen,
        Self::QingMing,
        Self::GuYu,
        Self::LiXia,
        Self::XiaoMan,
        Self::MangZhong,
        Self::XiaZhi,
        Self::XiaoShu,
        Self::DaShu,
        Self::LiQiu,
        Self::ChuShu,
        Self::BaiLu,
        Self::QiuFen,
        Self::HanLu,
        Self::ShuangJiang,
        Self::LiDong,
        Self::XiaoXue,
        Self::DaXue,
        Self::DongZhi,
    ];

    /// Position within [`SolarTerm::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Term by position in the Gregorian year, `None` past 23.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Principal term starting at `longitude_deg`, which must be one of
    /// 0°, 30°, …, 330°.
    pub fn principal(longitude_deg: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|term| term.is_principal() && term.longitude() == longitude_deg)
    }

    /// Solar longitude in degrees at which the term begins.
    #[inline]
    pub fn longitude(self) -> f64 {
        (285.0 + 15.0 * self.index() as f64) % 360.0
    }

    /// `true` for the twelve terms at multiples of 30°.
    #[inline]
    pub fn is_principal(self) -> bool {
        self.index() % 2 == 1
    }

    /// Seed for the term's instant in Gregorian `year`: its mean date
    /// counted from 6 January.
    fn mean_date(self, year: i32) -> Time<UT> {
        let offset = TROPICAL_YEAR.value() * self.index() as f64 / 24.0;
        Time::<UT>::from_gregorian(year, 1, 6) + Days::new(offset)
    }
}

/// UT instant near `seed` at which the Sun's longitude equals `target_deg`.
pub fn solve_solar_longitude(
    seed: Time<UT>,
    target_deg: f64,
    solver: &NewtonSolver,
) -> CalendarResult<Time<UT>> {
    solver
        .solve(seed, target_deg, |t| solar_longitude(t.to::<TT>()))
        .accept("solve_solar_longitude")
}

/// Instant of `term` in Gregorian `year`.
pub fn solar_term(year: i32, term: SolarTerm, solver: &NewtonSolver) -> CalendarResult<Time<UT>> {
    solve_solar_longitude(term.mean_date(year), term.longitude(), solver)
}

/// December solstice (270°) of `year`, seeded at 21 December 00:00 UTC.
pub fn winter_solstice(year: i32, solver: &NewtonSolver) -> CalendarResult<Time<UT>> {
    solve_solar_longitude(Time::<UT>::from_gregorian(year, 12, 21), 270.0, solver)
}

/// Li Chun (315°) of `year`, seeded at 4 February 00:00 UTC.
pub fn li_chun(year: i32, solver: &NewtonSolver) -> CalendarResult<Time<UT>> {
    solve_solar_longitude(Time::<UT>::from_gregorian(year, 2, 4), 315.0, solver)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVER: NewtonSolver = NewtonSolver::SOLAR;

    fn minutes_between(a: Time<UT>, b: Time<UT>) -> f64 {
        (a - b).abs().value() * 1440.0
    }

    #[test]
    fn term_longitudes() {
        assert_eq!(SolarTerm::XiaoHan.longitude(), 285.0);
        assert_eq!(SolarTerm::LiChun.longitude(), 315.0);
        assert_eq!(SolarTerm::ChunFen.longitude(), 0.0);
        assert_eq!(SolarTerm::XiaZhi.longitude(), 90.0);
        assert_eq!(SolarTerm::DongZhi.longitude(), 270.0);
    }

    #[test]
    fn principal_terms_are_multiples_of_thirty() {
        let principal: Vec<_> = SolarTerm::ALL.iter().filter(|t| t.is_principal()).collect();
        assert_eq!(principal.len(), 12);
        for term in principal {
            assert_eq!(term.longitude() % 30.0, 0.0, "{term:?}");
        }
        assert!(!SolarTerm::LiChun.is_principal());
    }

    #[test]
    fn principal_by_longitude() {
        assert_eq!(SolarTerm::principal(270.0), Some(SolarTerm::DongZhi));
        assert_eq!(SolarTerm::principal(0.0), Some(SolarTerm::ChunFen));
        assert_eq!(SolarTerm::principal(330.0), Some(SolarTerm::YuShui));
        assert_eq!(SolarTerm::principal(315.0), None);
        assert_eq!(SolarTerm::principal(360.0), None);
    }

    #[test]
    fn index_roundtrip() {
        for (i, term) in SolarTerm::ALL.iter().enumerate() {
            assert_eq!(term.index(), i);
            assert_eq!(SolarTerm::from_index(i), Some(*term));
        }
        assert_eq!(SolarTerm::from_index(24), None);
    }

    #[test]
    fn winter_solstice_2024() {
        // Published: 2024-12-21T09:21 UTC.  The truncated series run early.
        let published = Time::<UT>::from_gregorian(2024, 12, 21) + Days::new(9.35 / 24.0);
        let ws = winter_solstice(2024, &SOLVER).unwrap();
        assert!(minutes_between(ws, published) < 20.0, "got {ws}");
        let lon = solar_longitude(ws.to::<TT>());
        assert!((lon - 270.0).abs() < 1e-6);
    }

    #[test]
    fn li_chun_2024() {
        // Published: 2024-02-04T08:27 UTC.
        let published = Time::<UT>::from_gregorian(2024, 2, 4) + Days::new(8.45 / 24.0);
        let lc = li_chun(2024, &SOLVER).unwrap();
        assert!(minutes_between(lc, published) < 20.0, "got {lc}");
    }

    #[test]
    fn every_term_lands_in_its_year_and_in_order() {
        let mut previous: Option<Time<UT>> = None;
        for term in SolarTerm::ALL {
            let t = solar_term(2023, term, &SOLVER).unwrap();
            assert_eq!(t.calendar_year(), 2023, "{term:?} at {t}");
            if let Some(p) = previous {
                let gap = (t - p).value();
                assert!((14.0..16.5).contains(&gap), "{term:?}: gap {gap}");
            }
            previous = Some(t);
        }
    }

    #[test]
    fn dong_zhi_matches_winter_solstice() {
        let a = solar_term(2030, SolarTerm::DongZhi, &SOLVER).unwrap();
        let b = winter_solstice(2030, &SOLVER).unwrap();
        assert!(minutes_between(a, b) < 0.01);
    }
}
