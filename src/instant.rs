// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-tagged Julian Day instants.
//!
//! [`Time<S>`] is a Julian Day in [`Days`] whose scale is the marker `S`.
//! Civil timestamps live on [`UT`](crate::UT), the solar and lunar series
//! expect [`TT`](crate::TT); since the two are distinct types, ΔT can only
//! be skipped by writing `Time::new(t.value())` on purpose.
//!
//! Methods tied to one scale sit in `impl Time<UT>` / `impl Time<TT>`
//! blocks next to the code that needs them (`julian_date_ext`, `delta_t`).

use chrono::{DateTime, Utc};
use qtty::{Day, Days, Second, Seconds};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Julian Day of 1970-01-01T00:00:00Z.
pub(crate) const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

/// A time scale, identified by a zero-sized marker type.
///
/// Every scale maps its Julian Days to and from the Julian Day in TT.  The
/// two maps need not be exact inverses: [`UT`](crate::UT) evaluates ΔT at
/// the decimal year going in and at the integer year coming out.
pub trait TimeScale: Copy + Clone + fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Short name printed before the Julian Day.
    const LABEL: &'static str;

    /// Julian Day on this scale → Julian Day in TT.
    fn to_jd_tt(value: Days) -> Days;

    /// Julian Day in TT → Julian Day on this scale.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

/// An instant on time scale `S`, stored as a Julian Day.
///
/// Same size as an `f64`; ordering and equality compare Julian Days on the
/// same scale only.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    jd: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Instant at Julian Day `value` on scale `S`.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self::from_days(Days::new(value))
    }

    /// Instant at Julian Day `jd` on scale `S`.
    #[inline]
    pub const fn from_days(jd: Days) -> Self {
        Self {
            jd,
            _scale: PhantomData,
        }
    }

    /// Julian Day as a quantity.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.jd
    }

    /// Julian Day as a bare number.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.jd.value()
    }

    /// `false` for NaN and infinite Julian Days.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value().is_finite()
    }

    /// The same instant on scale `T`, routed through JD(TT).
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::from_days(T::from_jd_tt(S::to_jd_tt(self.jd)))
    }

    /// UTC timestamp of this instant.
    ///
    /// UT is read as UTC; leap seconds are ignored.  `None` for non-finite
    /// instants and for those beyond chrono's range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let jd_ut = self.to::<crate::UT>().quantity();
        if !jd_ut.value().is_finite() {
            return None;
        }
        let since_epoch = (jd_ut - UNIX_EPOCH_JD).to::<Second>().value();
        let secs = since_epoch.floor();
        let nanos = ((since_epoch - secs) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::<Utc>::from_timestamp(secs as i64, nanos)
    }

    /// Instant of a UTC timestamp.
    ///
    /// The Julian Day on UT is `unix_seconds / 86 400 + 2 440 587.5`; other
    /// scales convert from there.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let whole = Seconds::new(datetime.timestamp() as f64);
        let fraction = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd_ut = UNIX_EPOCH_JD + (whole + fraction).to::<Day>();
        Time::<crate::UT>::from_days(jd_ut).to::<S>()
    }
}

impl<S: TimeScale> fmt::Display for Time<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", S::LABEL, self.jd)
    }
}

// Serialised as the bare Julian Day; the scale is carried by the type.
#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Self::new)
    }
}

// ── Arithmetic: instants shift by Days, and differ by Days ───────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(mut self, shift: Days) -> Self {
        self += shift;
        self
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(mut self, shift: Days) -> Self {
        self -= shift;
        self
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, shift: Days) {
        self.jd = self.jd + shift;
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, shift: Days) {
        self.jd = self.jd - shift;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, earlier: Self) -> Days {
        self.jd - earlier.jd
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.jd
    }
}
