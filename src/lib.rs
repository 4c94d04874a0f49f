// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Chinese lunisolar calendar from first principles.
//!
//! Dates are derived from true solar longitude and true new moons computed
//! with short analytic series; no month tables are embedded.
//!
//! # Core types
//!
//! - [`Time<S>`]: generic instant parameterised by a [`TimeScale`] marker.
//! - [`Period<S>`]: half-open `[start, end)` interval of instants.
//! - [`LunarYear`]: the 12 or 13 months between two winter solstices.
//! - [`LunarMonth`]: span, number and leap flag of one month.
//! - [`LunarDate`]: year, month, day, leap flag and month length.
//! - [`LunarCalendar`]: validated configuration plus optional memoisation.
//! - [`CalendarConfig`]: civil offset, month boundary rule, solver settings.
//! - [`CalendarError`]: every failure mode of the crate.
//!
//! # Time scales
//!
//! | Marker | Scale | Used for |
//! |--------|-------|----------|
//! | [`UT`] | Universal Time | civil timestamps, month boundaries |
//! | [`TT`] | Terrestrial Time | ephemeris arguments |
//!
//! # ΔT (Delta T)
//!
//! The difference **ΔT = TT − UT** is applied automatically by the [`UT`]
//! time scale.  The raw value (in seconds) is available via
//! [`Time::<UT>::delta_t()`](Time::delta_t).
//!
//! # Pipeline
//!
//! | Module | Role |
//! |--------|------|
//! | [`ephemeris`] | solar and lunar longitude at a TT instant |
//! | [`solver`] | Newton iteration on angular targets |
//! | [`new_moon`] | conjunction before / after an instant |
//! | [`solar_term`] | winter solstice, Li Chun, the 24 terms |
//! | [`LunarYear::build`] | months, numbering, leap month |
//! | [`solar_to_lunar`] | Gregorian instant → [`LunarDate`] |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use lunisolar::{solar_to_lunar, CalendarConfig};
//!
//! let date = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
//! let lunar = solar_to_lunar(date, &CalendarConfig::default()).unwrap();
//! assert_eq!(lunar.to_string(), "2024-01-01");
//! ```

pub mod angle;
mod calendar;
mod civil;
mod config;
mod date;
mod delta_t;
pub mod ephemeris;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
pub mod new_moon;
mod period;
pub(crate) mod scales;
pub mod solar_term;
pub mod solver;
mod year;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::LunarCalendar;
pub use config::{
    CalendarConfig, MonthBoundary, CHINA_STANDARD_OFFSET_HOURS, MAX_CIVIL_OFFSET_HOURS,
};
pub use date::{solar_to_lunar, LunarDate};
pub use delta_t::delta_t_seconds;
pub use error::{CalendarError, CalendarResult, NumericalErrorKind};
pub use instant::{Time, TimeScale};
pub use period::{Interval, Period, UtcPeriod};
pub use scales::{TT, UT};
pub use solar_term::SolarTerm;
pub use solver::{Convergence, NewtonSolver, Root};
pub use year::{LunarMonth, LunarYear};

/// Universal Time instant.
///
/// This is a type alias for [`Time<UT>`].
pub type UniversalTime = Time<UT>;

/// Terrestrial Time instant.
///
/// This is a type alias for [`Time<TT>`].
pub type TerrestrialTime = Time<TT>;
