//! Link persistence.
//!
//! The tracked set is stored as one query parameter whose value is a JSON array
//! of `{name, offset}` objects:
//!
//! ```text
//! ?timezones=[{"name":"UTC","offset":0},{"name":"IST","offset":5.5}]
//!            (percent-encoded in the actual link)
//! ```
//!
//! Instants and slider positions are never written. A restored link always
//! shows "now" in each zone.

use crate::{Anchor, DecodeError, TimeOffset, TimezoneEntry, Zone, ZoneSpec};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use url::Url;

/// Query parameter holding the tracked set.
pub const DEFAULT_PARAM: &str = "timezones";

/// Serialize the ordered `{name, offset}` pairs of `zones` to JSON.
///
/// Whole-hour offsets are written without a fraction (`0`, not `0.0`).
/// Non-finite offsets have no JSON form and are written as `null`.
pub fn encode<Z: Zone>(zones: &[Z]) -> String {
    let items = zones
        .iter()
        .map(|z| {
            let mut obj = Map::new();
            obj.insert("name".to_string(), Value::String(z.name().to_string()));
            obj.insert("offset".to_string(), offset_value(z.offset()));
            Value::Object(obj)
        })
        .collect();
    Value::Array(items).to_string()
}

fn offset_value(offset: TimeOffset) -> Value {
    let hours = offset.hours();
    if hours.fract() == 0.0 && hours.abs() < i64::MAX as f64 {
        Value::Number(Number::from(hours as i64))
    } else {
        Number::from_f64(hours).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Parse a persisted value back into `{name, offset}` pairs, in order.
///
/// Unknown fields (links from older versions carried `id` and `time`) are
/// ignored.
pub fn decode(value: &str) -> Result<Vec<ZoneSpec>, DecodeError> {
    Ok(serde_json::from_str(value)?)
}

pub(crate) fn offset_or_nan<'de, D>(deserializer: D) -> Result<TimeOffset, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TimeOffset::new(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN)))
}

/// Turn decoded specs into live entries showing `anchor` (normally "now").
pub fn restore(specs: Vec<ZoneSpec>, anchor: Anchor) -> Vec<TimezoneEntry> {
    specs.into_iter().map(|s| TimezoneEntry::new(s.name, s.offset, anchor)).collect()
}

// --- Query parameter plumbing ----------------------------------------------

/// Decoded value of `param` in `url`, if present.
pub fn read_param(url: &Url, param: &str) -> Option<String> {
    url.query_pairs().find(|(k, _)| k == param).map(|(_, v)| v.into_owned())
}

/// Set `param` to `value` in place.
///
/// The first occurrence is replaced where it stands, later duplicates are
/// dropped, and other parameters keep their order. Appends when absent.
pub fn write_param(url: &mut Url, param: &str, value: &str) {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (k, v) in url.query_pairs() {
        if k == param {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }
    if !replaced {
        pairs.push((param.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}
