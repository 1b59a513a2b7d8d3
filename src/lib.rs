#[macro_use]
mod macros;
mod api;
mod catalog;
pub mod engine;
mod error;

pub use api::{Context, Options, Persist, Tracker, ZoneView};
pub use catalog::{CATALOG, CatalogZone, lookup};
pub use engine::{TimeOption, TimeOptions};
pub use error::{DecodeError, NoOpError};

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Minutes in one (fixed, DST-free) day. All time-of-day arithmetic wraps here.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

// --- Offsets and times of day ------------------------------------------------

/// A fixed UTC delta in hours. Fractional values are allowed (`5.5` for IST).
///
/// No range is enforced: `TimeOffset::new(1000.0)` is accepted and yields a
/// meaningless but consistent local time, because every use goes through
/// modulo-1440 arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TimeOffset(f64);

impl TimeOffset {
    pub const UTC: TimeOffset = TimeOffset(0.0);

    pub const fn new(hours: f64) -> Self {
        TimeOffset(hours)
    }

    pub fn hours(self) -> f64 {
        self.0
    }

    /// Offset in whole minutes. Non-finite offsets saturate (NaN becomes 0).
    pub fn minutes(self) -> i64 {
        (self.0 * 60.0).round() as i64
    }

    /// Offset in minutes reduced into `[0, 1440)`, for time-of-day arithmetic.
    ///
    /// The reduction happens before the integer cast, so huge offsets stay
    /// congruent to themselves instead of saturating. NaN and infinities become 0.
    pub fn day_minutes(self) -> i64 {
        let reduced = (self.0 * 60.0).round().rem_euclid(MINUTES_PER_DAY as f64);
        if reduced.is_finite() { reduced as i64 % MINUTES_PER_DAY } else { 0 }
    }
}

impl From<f64> for TimeOffset {
    fn from(hours: f64) -> Self {
        TimeOffset(hours)
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.minutes();
        let sign = if minutes < 0 { '-' } else { '+' };
        let abs = minutes.unsigned_abs();
        write!(f, "UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

/// An hour/minute pair as produced by a slider or a selected option.
///
/// Not normalized: `24:00` is a valid value (slider position 96) and the
/// synchronization engine wraps it into the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub const fn new(hour: u32, minute: u32) -> Self {
        TimeOfDay { hour, minute }
    }

    /// Minutes since midnight, without wrapping.
    pub fn minutes(self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        TimeOfDay { hour: time.hour(), minute: time.minute() }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// The shared instant every tracked entry is derived from, as UTC
/// minutes-of-day in `[0, 1440)`.
///
/// Only the time of day matters; the calendar date is deliberately dropped so
/// two entries may show the same clock time on different days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor(u32);

impl Anchor {
    /// Wrap any minute count into the day.
    pub fn from_minutes(minutes: i64) -> Self {
        Anchor(minutes.rem_euclid(MINUTES_PER_DAY) as u32)
    }

    /// Anchor for a UTC reference time, truncated to the minute.
    pub fn at(reference: NaiveDateTime) -> Self {
        Anchor::from_minutes(minutes_of_day(reference.time()))
    }

    pub fn minutes(self) -> i64 {
        self.0 as i64
    }

    /// Wall-clock time in a zone with `offset`.
    pub fn local_time(self, offset: TimeOffset) -> NaiveTime {
        wall_clock(self.minutes() + offset.day_minutes())
    }
}

/// Wall-clock time for a minute count, wrapped into the day.
pub fn wall_clock(minutes: i64) -> NaiveTime {
    let seconds = minutes.rem_euclid(MINUTES_PER_DAY) * 60;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0).unwrap_or_default()
}

/// Minutes since midnight of `time`, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

// --- Zones -------------------------------------------------------------------

/// Anything that carries a zone identity: a name and a fixed offset.
///
/// The codec and the ordering operations only need these two fields, so they
/// work on persisted specs and live entries alike.
pub trait Zone {
    fn name(&self) -> &str;
    fn offset(&self) -> TimeOffset;
}

/// The persisted half of an entry: `{name, offset}` as it appears in a link.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ZoneSpec {
    pub name: String,
    #[serde(deserialize_with = "engine::codec::offset_or_nan")]
    pub offset: TimeOffset,
}

impl ZoneSpec {
    pub fn new(name: impl Into<String>, offset: impl Into<TimeOffset>) -> Self {
        ZoneSpec { name: name.into(), offset: offset.into() }
    }
}

impl Zone for ZoneSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn offset(&self) -> TimeOffset {
        self.offset
    }
}

/// One tracked timezone.
///
/// `instant` is always `anchor + offset` for the anchor shared by the whole
/// tracked set; it is stored per entry so a projection never has to know the
/// anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TimezoneEntry {
    pub name: String,
    pub offset: TimeOffset,
    pub instant: NaiveTime,
}

impl TimezoneEntry {
    /// Create an entry showing `anchor` in the zone's local time.
    pub fn new(name: impl Into<String>, offset: impl Into<TimeOffset>, anchor: Anchor) -> Self {
        let offset = offset.into();
        TimezoneEntry { name: name.into(), offset, instant: anchor.local_time(offset) }
    }

    /// Same zone, re-derived from another anchor.
    pub fn at(&self, anchor: Anchor) -> Self {
        TimezoneEntry { name: self.name.clone(), offset: self.offset, instant: anchor.local_time(self.offset) }
    }

    /// The UTC anchor this entry's instant implies.
    pub fn anchor(&self) -> Anchor {
        Anchor::from_minutes(minutes_of_day(self.instant) - self.offset.day_minutes())
    }

    /// Slider position of the local time, in `[0, 96)`. Always derived, never stored.
    pub fn slider_position(&self) -> u32 {
        engine::time_of_day_to_position(TimeOfDay::from(self.instant))
    }

    pub fn spec(&self) -> ZoneSpec {
        ZoneSpec { name: self.name.clone(), offset: self.offset }
    }
}

impl Zone for TimezoneEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn offset(&self) -> TimeOffset {
        self.offset
    }
}
