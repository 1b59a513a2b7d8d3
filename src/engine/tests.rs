use crate::engine::{self, apply_slider, apply_time_edit, decode, encode, is_synchronized, reorder, restore};
use crate::{Anchor, MINUTES_PER_DAY, TimeOfDay, TimeOffset, TimezoneEntry, ZoneSpec, minutes_of_day};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn entry(name: &str, hours: f64, anchor: Anchor) -> TimezoneEntry {
    TimezoneEntry::new(name, hours, anchor)
}

fn hhmm(e: &TimezoneEntry) -> String {
    e.instant.format("%H:%M").to_string()
}

#[test]
fn utc_slider_moves_ist_the_same_day() {
    let anchor = Anchor::from_minutes(9 * 60);
    let entries = vec![entry("UTC", 0.0, anchor), entry("IST", 5.5, anchor)];

    let out = apply_slider(&entries, "UTC", 40).unwrap();

    assert_eq!(hhmm(&out[0]), "10:00");
    assert_eq!(hhmm(&out[1]), "15:30");
    assert_eq!(engine::format_time_of_day(out[0].anchor().minutes(), out[1].offset), "03:30 PM");
}

#[test]
fn remove_ist_preserves_order() {
    let anchor = Anchor::from_minutes(0);
    let entries = vec![entry("UTC", 0.0, anchor), entry("IST", 5.5, anchor), entry("JST", 9.0, anchor)];

    let out = engine::remove(&entries, "IST").unwrap();

    let pairs: Vec<_> = out.iter().map(TimezoneEntry::spec).collect();
    assert_eq!(pairs, vec![ZoneSpec::new("UTC", 0.0), ZoneSpec::new("JST", 9.0)]);
    assert_eq!(out[1], entries[2]);
}

#[test]
fn invalid_json_decodes_to_nothing() {
    let restored = decode("not valid json").map(|specs| restore(specs, Anchor::from_minutes(0))).unwrap_or_default();
    assert!(restored.is_empty());
}

#[test]
fn ordering_ops_keep_entries_synchronized() {
    let anchor = Anchor::from_minutes(17 * 60 + 15);
    let entries = vec![entry("PST", -8.0, anchor), entry("CET", 1.0, anchor), entry("AEST", 10.0, anchor)];
    let edited = apply_time_edit(&entries, "CET", TimeOfDay::new(8, 45)).unwrap();

    assert!(is_synchronized(&engine::reverse(&edited)));
    assert!(is_synchronized(&reorder(&edited, 2, 0).unwrap()));
    assert!(is_synchronized(&engine::remove(&edited, "PST").unwrap()));
}

#[test]
fn add_uses_the_real_time_anchor_not_the_edited_one() {
    let now = Anchor::from_minutes(12 * 60);
    let entries = vec![entry("UTC", 0.0, now)];
    let edited = apply_time_edit(&entries, "UTC", TimeOfDay::new(3, 0)).unwrap();

    let out = engine::add(&edited, "MSK", TimeOffset::new(3.0), now).unwrap();

    assert_eq!(hhmm(&out[0]), "03:00");
    assert_eq!(hhmm(&out[1]), "15:00");
}

#[test]
fn link_with_an_absurd_offset_still_synchronizes() {
    let specs = decode(r#"[{"name":"UTC","offset":0},{"name":"X","offset":1e300}]"#).unwrap();
    let entries = restore(specs, Anchor::from_minutes(9 * 60));
    assert!(is_synchronized(&entries));

    let out = apply_time_edit(&entries, "UTC", TimeOfDay::new(1, 40)).unwrap();

    assert_eq!(hhmm(&out[0]), "01:40");
    assert_eq!(out[1].anchor(), out[0].anchor());
    assert!(is_synchronized(&out));

    let back = apply_time_edit(&out, "X", TimeOfDay::from(out[1].instant)).unwrap();
    assert_eq!(back, out);
}

fn offset() -> impl Strategy<Value = f64> {
    // Quarter hours across and beyond the conventional range, plus arbitrary
    // magnitudes a hand-edited link could carry.
    prop_oneof![
        3 => (-96i32..=96).prop_map(|q| q as f64 / 4.0),
        1 => -1.0e300f64..1.0e300,
    ]
}

fn zone_specs() -> impl Strategy<Value = Vec<ZoneSpec>> {
    prop::collection::vec(offset(), 0..8).prop_map(|offsets| {
        offsets.into_iter().enumerate().map(|(i, hours)| ZoneSpec::new(format!("Z{i}"), hours)).collect()
    })
}

proptest! {
    #[test]
    fn edit_restores_the_shared_anchor(
        specs in zone_specs(),
        start in 0i64..MINUTES_PER_DAY,
        pick in any::<prop::sample::Index>(),
        hour in 0u32..30,
        minute in 0u32..60,
    ) {
        prop_assume!(!specs.is_empty());
        let entries = restore(specs, Anchor::from_minutes(start));
        let edited = entries[pick.index(entries.len())].name.clone();

        let out = apply_time_edit(&entries, &edited, TimeOfDay::new(hour, minute)).unwrap();

        prop_assert_eq!(out.len(), entries.len());
        let anchor = |e: &TimezoneEntry| {
            (minutes_of_day(e.instant) - e.offset.day_minutes()).rem_euclid(MINUTES_PER_DAY)
        };
        for a in &out {
            for b in &out {
                prop_assert_eq!(anchor(a), anchor(b));
            }
        }
    }

    #[test]
    fn every_position_round_trips(p in 0u32..=96) {
        prop_assert_eq!(engine::time_of_day_to_position(engine::position_to_time_of_day(p)), p);
    }

    #[test]
    fn codec_round_trips_names_and_offsets(specs in zone_specs()) {
        prop_assert_eq!(decode(&encode(&specs)).unwrap(), specs);
    }

    #[test]
    fn codec_round_trips_arbitrary_offsets(hours in -1.0e6f64..1.0e6, name in "[A-Za-z /_+-]{1,12}") {
        let specs = vec![ZoneSpec::new(name, hours)];
        prop_assert_eq!(decode(&encode(&specs)).unwrap(), specs);
    }

    #[test]
    fn reorder_is_a_permutation(
        specs in zone_specs(),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!specs.is_empty());
        let (from, to) = (from.index(specs.len()), to.index(specs.len()));

        let out = reorder(&specs, from, to).unwrap();

        prop_assert_eq!(out.len(), specs.len());
        prop_assert_eq!(&out[to], &specs[from]);
        let mut sorted_in: Vec<_> = specs.iter().map(|s| s.name.clone()).collect();
        let mut sorted_out: Vec<_> = out.iter().map(|s| s.name.clone()).collect();
        sorted_in.sort();
        sorted_out.sort();
        prop_assert_eq!(sorted_in, sorted_out);
    }
}
