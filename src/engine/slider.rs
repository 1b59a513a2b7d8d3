//! Slider quantization and time-of-day strings.
//!
//! The slider track covers one day in 15-minute steps:
//!
//! ```text
//! position:  0      4      8    ...    48    ...    92     96
//! time:    00:00  01:00  02:00       12:00        23:00  24:00
//! ```
//!
//! Position 96 exists so the track can be dragged all the way to the end; the
//! synchronization engine wraps it back to midnight.

use crate::{MINUTES_PER_DAY, TimeOfDay, TimeOffset, TimezoneEntry, wall_clock};
use std::collections::HashMap;

pub const STEP_MINUTES: u32 = 15;
pub const MAX_POSITION: u32 = 96;
/// Distinct times of day on the track (`MAX_POSITION` aliases 0).
pub const POSITIONS: u32 = MAX_POSITION;

/// Time of day for a slider position. Positions past 96 are not clamped.
pub fn position_to_time_of_day(position: u32) -> TimeOfDay {
    let total = position as u64 * STEP_MINUTES as u64;
    TimeOfDay { hour: (total / 60) as u32, minute: (total % 60) as u32 }
}

/// Slider position for a time of day, rounding down to the 15-minute step.
pub fn time_of_day_to_position(time: TimeOfDay) -> u32 {
    (time.minutes() / STEP_MINUTES as i64) as u32
}

/// UTC-relative slider position implied by a local time in a zone.
pub fn utc_position(local: TimeOfDay, offset: TimeOffset) -> u32 {
    let utc = ((local.minutes() - offset.day_minutes()) % MINUTES_PER_DAY + MINUTES_PER_DAY) % MINUTES_PER_DAY;
    (utc / STEP_MINUTES as i64) as u32
}

/// Format `minutes` (UTC minutes of day) shifted by `offset` as `HH:MM AM|PM`.
///
/// Negative inputs land on the previous day instead of producing negative
/// minutes.
///
/// ```
/// use zonesync::TimeOffset;
/// use zonesync::engine::format_time_of_day;
///
/// assert_eq!(format_time_of_day(0, TimeOffset::new(-5.0)), "07:00 PM");
/// assert_eq!(format_time_of_day(60, TimeOffset::new(5.5)), "06:30 AM");
/// ```
pub fn format_time_of_day(minutes: i64, offset: TimeOffset) -> String {
    let total = (minutes % MINUTES_PER_DAY + offset.day_minutes() + MINUTES_PER_DAY) % MINUTES_PER_DAY;
    wall_clock(total).format("%I:%M %p").to_string()
}

/// Parse a label produced by [`format_time_of_day`] back into a 24-hour time.
///
/// Accepts `H:MM AM` or `HH:MM PM`, any case. Returns `None` for anything else.
pub fn parse_time_label(label: &str) -> Option<TimeOfDay> {
    let caps = regex!(r"^\s*(\d{1,2}):(\d{2})\s*([AaPp][Mm])\s*$").captures(label)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let pm = caps[3].eq_ignore_ascii_case("pm");
    Some(TimeOfDay { hour: hour % 12 + if pm { 12 } else { 0 }, minute })
}

/// Tick labels under the slider track, every three hours, both ends included.
pub fn slider_labels() -> Vec<String> {
    (0..=MINUTES_PER_DAY).step_by(180).map(|m| format_time_of_day(m, TimeOffset::UTC)).collect()
}

// --- Option list -----------------------------------------------------------

/// One entry of a zone's selectable time list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOption {
    /// Canonical `HH:MM AM|PM` label in the zone's local time.
    pub label: String,
    /// The same time as a 24-hour local time of day.
    pub local: TimeOfDay,
    /// Slider position in UTC that selecting this option implies.
    pub utc_position: u32,
}

/// Lazy sequence of the 96 quantized times of day for one zone.
///
/// Restart it by cloning before iterating, or by calling [`time_options`] again.
#[derive(Debug, Clone)]
pub struct TimeOptions {
    offset: TimeOffset,
    next: u32,
}

/// All selectable times for a zone with `offset`, ordered by UTC position.
pub fn time_options(offset: TimeOffset) -> TimeOptions {
    TimeOptions { offset, next: 0 }
}

impl TimeOptions {
    pub fn offset(&self) -> TimeOffset {
        self.offset
    }
}

impl Iterator for TimeOptions {
    type Item = TimeOption;

    fn next(&mut self) -> Option<TimeOption> {
        if self.next >= POSITIONS {
            return None;
        }
        let utc_position = self.next;
        self.next += 1;

        let utc_minutes = (utc_position * STEP_MINUTES) as i64;
        let local = (utc_minutes + self.offset.day_minutes()) % MINUTES_PER_DAY;
        Some(TimeOption {
            label: format_time_of_day(utc_minutes, self.offset),
            local: TimeOfDay { hour: (local / 60) as u32, minute: (local % 60) as u32 },
            utc_position,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = POSITIONS.saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TimeOptions {}

// --- Cache -----------------------------------------------------------------

/// Slider positions keyed by entry name.
///
/// Only a memo of [`TimezoneEntry::slider_position`]; it must be invalidated
/// whenever the tracked set changes.
#[derive(Debug, Default, Clone)]
pub struct SliderCache {
    positions: HashMap<String, u32>,
}

impl SliderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached position for `entry`, computing it on a miss.
    pub fn position(&mut self, entry: &TimezoneEntry) -> u32 {
        *self.positions.entry(entry.name.clone()).or_insert_with(|| entry.slider_position())
    }

    pub fn invalidate(&mut self) {
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Anchor;

    #[test]
    fn format_matches_twelve_hour_clock() {
        assert_eq!(format_time_of_day(0, TimeOffset::UTC), "12:00 AM");
        assert_eq!(format_time_of_day(720, TimeOffset::UTC), "12:00 PM");
        assert_eq!(format_time_of_day(0, TimeOffset::new(-5.0)), "07:00 PM");
        assert_eq!(format_time_of_day(60, TimeOffset::new(5.5)), "06:30 AM");
        assert_eq!(format_time_of_day(13 * 60 + 45, TimeOffset::UTC), "01:45 PM");
    }

    #[test]
    fn format_wraps_large_inputs() {
        assert_eq!(format_time_of_day(1440 * 3 + 90, TimeOffset::UTC), "01:30 AM");
        assert_eq!(format_time_of_day(-90, TimeOffset::UTC), "10:30 PM");
        assert_eq!(format_time_of_day(0, TimeOffset::new(-30.0)), "06:00 PM");
    }

    #[test]
    fn positions_map_to_quarter_hours() {
        assert_eq!(position_to_time_of_day(0), TimeOfDay::new(0, 0));
        assert_eq!(position_to_time_of_day(40), TimeOfDay::new(10, 0));
        assert_eq!(position_to_time_of_day(58), TimeOfDay::new(14, 30));
        assert_eq!(position_to_time_of_day(96), TimeOfDay::new(24, 0));
    }

    #[test]
    fn time_to_position_rounds_down() {
        assert_eq!(time_of_day_to_position(TimeOfDay::new(10, 14)), 40);
        assert_eq!(time_of_day_to_position(TimeOfDay::new(10, 15)), 41);
        assert_eq!(time_of_day_to_position(TimeOfDay::new(23, 59)), 95);
    }

    #[test]
    fn round_trip_loses_at_most_fourteen_minutes() {
        for hour in 0..24 {
            for minute in 0..60 {
                let t = TimeOfDay::new(hour, minute);
                let back = position_to_time_of_day(time_of_day_to_position(t));
                let lost = t.minutes() - back.minutes();
                assert!((0..=14).contains(&lost), "{t} came back as {back}");
            }
        }
    }

    #[test]
    fn labels_parse_back() {
        assert_eq!(parse_time_label("12:00 AM"), Some(TimeOfDay::new(0, 0)));
        assert_eq!(parse_time_label("12:15 PM"), Some(TimeOfDay::new(12, 15)));
        assert_eq!(parse_time_label("07:00 PM"), Some(TimeOfDay::new(19, 0)));
        assert_eq!(parse_time_label("6:30 am"), Some(TimeOfDay::new(6, 30)));
        assert_eq!(parse_time_label("18:00"), None);
        assert_eq!(parse_time_label("noon"), None);
    }

    #[test]
    fn utc_position_shifts_by_offset() {
        assert_eq!(utc_position(TimeOfDay::new(15, 30), TimeOffset::new(5.5)), 40);
        assert_eq!(utc_position(TimeOfDay::new(1, 0), TimeOffset::new(3.0)), 88);
        assert_eq!(utc_position(TimeOfDay::new(1, 0), TimeOffset::new(-5.0)), 24);
    }

    #[test]
    fn huge_offsets_keep_options_consistent() {
        let offset = TimeOffset::new(-1e300);
        for option in time_options(offset) {
            assert_eq!(utc_position(option.local, offset), option.utc_position);
            assert_eq!(parse_time_label(&option.label), Some(option.local));
        }
    }

    #[test]
    fn options_cover_the_day_in_order() {
        let options: Vec<_> = time_options(TimeOffset::new(5.5)).collect();
        assert_eq!(options.len(), 96);
        assert_eq!(options[0].label, "05:30 AM");
        assert_eq!(options[0].local, TimeOfDay::new(5, 30));
        assert_eq!(options[95].label, "05:15 AM");
        assert!(options.iter().enumerate().all(|(i, o)| o.utc_position == i as u32));
    }

    #[test]
    fn options_are_restartable_and_exact_size() {
        let mut options = time_options(TimeOffset::new(-8.0));
        let fresh = options.clone();
        assert_eq!(options.len(), 96);
        options.next();
        assert_eq!(options.len(), 95);
        assert_eq!(fresh.count(), 96);
    }

    #[test]
    fn selecting_an_option_implies_its_utc_position() {
        let offset = TimeOffset::new(-3.5);
        for option in time_options(offset) {
            let local = parse_time_label(&option.label).unwrap();
            assert_eq!(local, option.local);
            assert_eq!(utc_position(local, offset), option.utc_position);
        }
    }

    #[test]
    fn slider_labels_every_three_hours() {
        let labels = slider_labels();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels.first().map(String::as_str), Some("12:00 AM"));
        assert_eq!(labels[1], "03:00 AM");
        assert_eq!(labels[4], "12:00 PM");
        assert_eq!(labels.last().map(String::as_str), Some("12:00 AM"));
    }

    #[test]
    fn cache_memoizes_until_invalidated() {
        let mut cache = SliderCache::new();
        let entry = TimezoneEntry::new("UTC", 0.0, Anchor::from_minutes(600));
        assert_eq!(cache.position(&entry), 40);

        let moved = entry.at(Anchor::from_minutes(0));
        assert_eq!(cache.position(&moved), 40);
        cache.invalidate();
        assert!(cache.is_empty());
        assert_eq!(cache.position(&moved), 0);
    }
}
