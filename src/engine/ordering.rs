//! List edits on the tracked set.
//!
//! None of these touch an entry's `instant`; only `add` creates one, derived
//! from the anchor it is given. Identity is the entry name.

use crate::{Anchor, NoOpError, TimeOffset, TimezoneEntry, Zone};

/// Append a zone showing `anchor`. An empty name is a no-op.
///
/// Duplicate names are accepted; lookups by name then find the first one.
pub fn add(
    entries: &[TimezoneEntry],
    name: &str,
    offset: TimeOffset,
    anchor: Anchor,
) -> Result<Vec<TimezoneEntry>, NoOpError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NoOpError::EmptyName);
    }
    let mut out = entries.to_vec();
    out.push(TimezoneEntry::new(name, offset, anchor));
    Ok(out)
}

/// Drop the first zone named `name`.
pub fn remove<Z: Zone + Clone>(zones: &[Z], name: &str) -> Result<Vec<Z>, NoOpError> {
    let idx = zones.iter().position(|z| z.name() == name).ok_or_else(|| NoOpError::UnknownName(name.to_string()))?;
    let mut out = zones.to_vec();
    out.remove(idx);
    Ok(out)
}

/// Move the zone at `from` to `to`, shifting the ones in between.
///
/// `to` is the index in the resulting list, as a drag-and-drop destination.
pub fn reorder<Z: Zone + Clone>(zones: &[Z], from: usize, to: usize) -> Result<Vec<Z>, NoOpError> {
    let len = zones.len();
    for index in [from, to] {
        if index >= len {
            return Err(NoOpError::IndexOutOfRange { index, len });
        }
    }
    let mut out = zones.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Ok(out)
}

pub fn reverse<Z: Zone + Clone>(zones: &[Z]) -> Vec<Z> {
    zones.iter().rev().cloned().collect()
}
