//! Re-deriving every entry after one of them is edited.
//!
//! ```text
//! edited entry (local 10:00, offset +0)  ──▶ anchor = 10:00 - 0:00 = 10:00 UTC
//!                                                │
//!        every entry: instant = anchor + offset ◀┘
//!        UTC 10:00 │ IST 15:30 │ EST 05:00
//! ```

use super::slider::position_to_time_of_day;
use crate::{Anchor, MINUTES_PER_DAY, NoOpError, TimeOfDay, TimezoneEntry, minutes_of_day};

/// Set `edited`'s local time to `time` and move every other entry with it.
///
/// `time` is interpreted in the edited entry's own offset and may lie outside
/// the day (`24:00`, or beyond); it wraps. The first entry named `edited` is
/// the one that sets the anchor. Fails only when no such entry exists.
pub fn apply_time_edit(
    entries: &[TimezoneEntry],
    edited: &str,
    time: TimeOfDay,
) -> Result<Vec<TimezoneEntry>, NoOpError> {
    let target = entries.iter().find(|e| e.name == edited).ok_or_else(|| NoOpError::UnknownName(edited.to_string()))?;
    let anchor = Anchor::from_minutes(time.minutes() - target.offset.day_minutes());
    Ok(synchronize(entries, anchor))
}

/// [`apply_time_edit`] driven by a slider position on the edited entry.
pub fn apply_slider(entries: &[TimezoneEntry], edited: &str, position: u32) -> Result<Vec<TimezoneEntry>, NoOpError> {
    apply_time_edit(entries, edited, position_to_time_of_day(position))
}

/// Re-derive all entries from one shared anchor, keeping order and names.
pub fn synchronize(entries: &[TimezoneEntry], anchor: Anchor) -> Vec<TimezoneEntry> {
    entries.iter().map(|e| e.at(anchor)).collect()
}

/// True when every entry implies the same UTC anchor (mod 24h).
pub fn is_synchronized(entries: &[TimezoneEntry]) -> bool {
    let mut anchors = entries
        .iter()
        .map(|e| (minutes_of_day(e.instant) - e.offset.day_minutes()).rem_euclid(MINUTES_PER_DAY));
    match anchors.next() {
        Some(first) => anchors.all(|a| a == first),
        None => true,
    }
}
