// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open spans between two instants.
//!
//! A lunar month runs from its new moon up to, not including, the next one;
//! [`Period<UT>`] is that span.  The generic [`Interval<T>`] also carries the
//! UTC rendering of a span, [`UtcPeriod`].

use super::{Time, TimeScale};
use chrono::{DateTime, Utc};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// `[start, end)` over any ordered instant type.
///
/// # Examples
///
/// ```
/// use lunisolar::{Period, Time, UT};
/// use qtty::Days;
///
/// let month = Period::new(Time::<UT>::new(2_459_966.0), Time::<UT>::new(2_459_995.5));
/// assert_eq!(month.duration(), Days::new(29.5));
/// assert!(month.contains(month.start));
/// assert!(!month.contains(month.end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    /// First instant inside the span.
    pub start: T,
    /// First instant after the span.
    pub end: T,
}

/// Span on time scale `S`.
pub type Period<S> = Interval<Time<S>>;

/// Span as UTC timestamps.
pub type UtcPeriod = Interval<DateTime<Utc>>;

impl<T: Copy + PartialOrd> Interval<T> {
    /// `[start, end)`; not checked for `start <= end`.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `start <= instant < end`; a shared boundary belongs to the later span.
    #[inline]
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl<S: TimeScale> Period<S> {
    /// `end - start`.
    #[inline]
    pub fn duration(&self) -> Days {
        self.end - self.start
    }

    /// Both ends as UTC, or `None` when either is not representable.
    pub fn to_utc(&self) -> Option<UtcPeriod> {
        let start = self.start.to_utc()?;
        let end = self.end.to_utc()?;
        Some(Interval { start, end })
    }
}

// Serialised as `{ "start_jd": .., "end_jd": .. }` on the period's own scale.
#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Interval<Time<S>> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut s = serializer.serialize_struct("Period", 2)?;
        s.serialize_field("start_jd", &self.start.value())?;
        s.serialize_field("end_jd", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Interval<Time<S>> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start_jd: f64,
            end_jd: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Interval::new(
            Time::<S>::new(raw.start_jd),
            Time::<S>::new(raw.end_jd),
        ))
    }
}
