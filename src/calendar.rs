// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar façade.
//!
//! [`LunarCalendar`] bundles a validated [`CalendarConfig`] with the
//! operations of the crate.  The memoising variant keeps every built
//! [`LunarYear`] behind an `Arc`, so repeated queries in the same year cost
//! a map lookup instead of a few hundred root solves.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::config::CalendarConfig;
use crate::date::{locate, LunarDate};
use crate::error::{CalendarError, CalendarResult};
use crate::solar_term::{self, SolarTerm};
use crate::year::LunarYear;
use crate::{Time, UT};

/// Gregorian → lunar conversion with a fixed configuration.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use lunisolar::{CalendarConfig, LunarCalendar};
///
/// let calendar = LunarCalendar::memoized(CalendarConfig::default()).unwrap();
/// let date = calendar
///     .solar_to_lunar(Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap())
///     .unwrap();
/// assert_eq!(date.to_string(), "2023-L02-11");
/// ```
#[derive(Debug)]
pub struct LunarCalendar {
    config: CalendarConfig,
    cache: Option<RwLock<HashMap<i32, Arc<LunarYear>>>>,
}

impl LunarCalendar {
    /// A calendar that builds lunar years afresh for every query.
    pub fn new(config: CalendarConfig) -> CalendarResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache: None,
        })
    }

    /// A calendar that keeps every lunar year it builds.
    pub fn memoized(config: CalendarConfig) -> CalendarResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache: Some(RwLock::new(HashMap::new())),
        })
    }

    /// The validated configuration every query uses.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Number of cached lunar years; always 0 without memoisation.
    pub fn cached_years(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| {
            cache.read().unwrap_or_else(PoisonError::into_inner).len()
        })
    }

    /// Lunar year anchored on the winter solstice of `year`.
    pub fn lunar_year(&self, year: i32) -> CalendarResult<Arc<LunarYear>> {
        let Some(cache) = &self.cache else {
            return LunarYear::build(year, &self.config).map(Arc::new);
        };

        if let Some(hit) = cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&year)
        {
            return Ok(Arc::clone(hit));
        }

        // Built outside the lock; a concurrent builder of the same year
        // produces an identical value, so either insert wins.
        let built = Arc::new(LunarYear::build(year, &self.config)?);
        let mut map = cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(map.entry(year).or_insert(built)))
    }

    /// Lunar date of a UTC instant.
    pub fn solar_to_lunar(&self, date: DateTime<Utc>) -> CalendarResult<LunarDate> {
        self.lunar_date(Time::<UT>::from_utc(date))
    }

    /// Lunar date of a UT instant.
    pub fn lunar_date(&self, instant: Time<UT>) -> CalendarResult<LunarDate> {
        locate(instant, self.config.civil_offset_hours(), |year| {
            self.lunar_year(year)
        })
    }

    /// December solstice of `year`.
    pub fn winter_solstice(&self, year: i32) -> CalendarResult<Time<UT>> {
        solar_term::winter_solstice(year, self.config.solar_solver())
    }

    /// Li Chun (solar longitude 315°) of `year`.
    pub fn li_chun(&self, year: i32) -> CalendarResult<Time<UT>> {
        solar_term::li_chun(year, self.config.solar_solver())
    }

    /// Instant of `term` in Gregorian `year`.
    pub fn solar_term(&self, year: i32, term: SolarTerm) -> CalendarResult<Time<UT>> {
        solar_term::solar_term(year, term, self.config.solar_solver())
    }

    /// Principal term at `longitude_deg` (a multiple of 30°) in `year`.
    pub fn principal_term(&self, year: i32, longitude_deg: f64) -> CalendarResult<Time<UT>> {
        let term = SolarTerm::principal(longitude_deg).ok_or_else(|| {
            CalendarError::invalid_argument(
                "longitude_deg",
                format!("{longitude_deg} is not a multiple of 30° in [0, 360)"),
            )
        })?;
        self.solar_term(year, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonthBoundary;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn calendar_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<LunarCalendar>();
        assert_impl::<LunarYear>();
        assert_impl::<LunarDate>();
    }

    #[test]
    fn memoized_matches_fresh() {
        let fresh = LunarCalendar::new(CalendarConfig::default()).unwrap();
        let memo = LunarCalendar::memoized(CalendarConfig::default()).unwrap();
        for date in [utc(2023, 1, 22), utc(2023, 4, 1), utc(2023, 12, 20), utc(2024, 2, 10)] {
            assert_eq!(
                fresh.solar_to_lunar(date).unwrap(),
                memo.solar_to_lunar(date).unwrap()
            );
        }
        assert_eq!(fresh.cached_years(), 0);
        assert!(memo.cached_years() >= 2);
    }

    #[test]
    fn memoized_returns_shared_year() {
        let memo = LunarCalendar::memoized(CalendarConfig::default()).unwrap();
        let a = memo.lunar_year(2022).unwrap();
        let b = memo.lunar_year(2022).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(memo.cached_years(), 1);
    }

    #[test]
    fn memoized_is_usable_across_threads() {
        let memo = Arc::new(LunarCalendar::memoized(CalendarConfig::default()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let memo = Arc::clone(&memo);
                std::thread::spawn(move || memo.solar_to_lunar(utc(2023, 1 + i, 15)).unwrap())
            })
            .collect();
        for handle in handles {
            let date = handle.join().unwrap();
            assert!(date.year == 2022 || date.year == 2023);
        }
        assert!(memo.cached_years() <= 2);
    }

    #[test]
    fn civil_day_calendar_2025() {
        let calendar = LunarCalendar::new(
            CalendarConfig::default().with_month_boundary(MonthBoundary::CivilDay),
        )
        .unwrap();
        let date = calendar.solar_to_lunar(utc(2025, 8, 1)).unwrap();
        assert_eq!(date.to_string(), "2025-L06-08");
    }

    #[test]
    fn invalid_config_rejected_up_front() {
        let config = CalendarConfig::default().with_civil_offset_hours(-20.0);
        assert!(LunarCalendar::new(config).is_err());
        assert!(LunarCalendar::memoized(config).is_err());
    }

    #[test]
    fn solar_term_accessors() {
        let calendar = LunarCalendar::new(CalendarConfig::default()).unwrap();
        let ws = calendar.winter_solstice(2024).unwrap();
        let dz = calendar.principal_term(2024, 270.0).unwrap();
        assert!((ws - dz).abs().value() < 1e-6);
        let lc = calendar.li_chun(2024).unwrap();
        let term = calendar.solar_term(2024, SolarTerm::LiChun).unwrap();
        assert!((lc - term).abs().value() < 1e-6);
    }

    #[test]
    fn principal_term_rejects_minor_longitudes() {
        let calendar = LunarCalendar::new(CalendarConfig::default()).unwrap();
        for lon in [315.0, 17.0, 360.0, -30.0, f64::NAN] {
            assert!(matches!(
                calendar.principal_term(2024, lon),
                Err(CalendarError::InvalidArgument { .. })
            ));
        }
    }
}
