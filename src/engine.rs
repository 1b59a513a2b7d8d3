//! Synchronization engine.
//!
//! Every user action on the tracked set is a pure function from the old list
//! of entries to a new one. The engine is split into focused submodules under
//! `src/engine/`; this file only wires them together and re-exports the
//! operations.
//!
//! ## How the parts work together
//!
//! ```text
//! link ── decode ──▶ [ZoneSpec] ── restore(now) ──▶ [TimezoneEntry]
//!                    (codec.rs)                          │
//!                                                        │ user action
//!                                                        v
//!       apply_time_edit (sync.rs)  or  add / remove / reorder / reverse
//!                                                          (ordering.rs)
//!                                                        │
//!                                                        v
//!                                  [TimezoneEntry] ── encode ──▶ link
//!                                         │           (codec.rs)
//!                                         v
//!                    slider positions / labels / options (slider.rs)
//! ```
//!
//! The only invariant is synchronization: all entries show the same instant.
//! `apply_time_edit` re-derives every entry from one anchor, and the ordering
//! operations never touch `instant` (except `add`, which derives the new entry
//! from the current real-time anchor).
//!
//! ## Responsibilities by module
//!
//! - `sync.rs`: anchor recovery and re-derivation after an edit.
//! - `slider.rs`: 15-minute quantization, 12-hour formatting, the option list,
//!   and the per-name slider cache.
//! - `codec.rs`: JSON encoding of `{name, offset}` pairs and query-parameter
//!   plumbing with replace semantics.
//! - `ordering.rs`: add, remove, reorder, reverse.
//!
//! ## Input policy
//!
//! Offsets and times are never validated. Out-of-range values are folded into
//! the day with modulo arithmetic, so garbage in gives a consistent but
//! meaningless time out. The calendar day is not tracked either.

#[path = "engine/codec.rs"]
pub(crate) mod codec;
#[path = "engine/ordering.rs"]
mod ordering;
#[path = "engine/slider.rs"]
mod slider;
#[path = "engine/sync.rs"]
mod sync;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use codec::{DEFAULT_PARAM, decode, encode, read_param, restore, write_param};
pub use ordering::{add, remove, reorder, reverse};
pub use slider::{
    MAX_POSITION, POSITIONS, STEP_MINUTES, SliderCache, TimeOption, TimeOptions, format_time_of_day, parse_time_label,
    position_to_time_of_day, slider_labels, time_of_day_to_position, time_options, utc_position,
};
pub use sync::{apply_slider, apply_time_edit, is_synchronized, synchronize};
