use crate::engine::{self, SliderCache, TimeOptions};
use crate::{Anchor, NoOpError, TimeOfDay, TimeOffset, TimezoneEntry, catalog};
use chrono::{NaiveDateTime, Utc};
use url::Url;

/// Session context.
///
/// Holds the clock used whenever an operation needs "now": restoring a link
/// and adding a zone.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Fixed UTC reference time. `None` reads the system clock on every use.
    pub reference_time: Option<NaiveDateTime>,
}

impl Context {
    /// A context pinned to `reference_time` (UTC), for deterministic runs.
    pub fn at(reference_time: NaiveDateTime) -> Self {
        Self { reference_time: Some(reference_time) }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.reference_time.unwrap_or_else(|| Utc::now().naive_utc())
    }

    /// The real-time anchor: current UTC minutes of day.
    pub fn anchor(&self) -> Anchor {
        Anchor::at(self.now())
    }
}

/// Options that affect persistence.
#[derive(Debug, Clone)]
pub struct Options {
    /// Query parameter carrying the tracked set.
    pub param: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { param: engine::DEFAULT_PARAM.to_string() }
    }
}

/// Where the encoded tracked set goes after each mutation.
///
/// Implementations must replace the previous value rather than add to a
/// history.
pub trait Persist {
    fn persist(&mut self, param: &str, encoded: &str);
}

impl Persist for Url {
    fn persist(&mut self, param: &str, encoded: &str) {
        engine::write_param(self, param, encoded);
    }
}

/// Keeps only the latest encoded value.
impl Persist for String {
    fn persist(&mut self, _param: &str, encoded: &str) {
        self.clear();
        self.push_str(encoded);
    }
}

/// What a renderer needs for one tracked zone.
#[derive(Debug, Clone)]
pub struct ZoneView {
    pub name: String,
    pub offset: TimeOffset,
    /// 12-hour display time, `HH:MM AM|PM`.
    pub display: String,
    /// 24-hour time with seconds, `HH:MM:SS`.
    pub current_time: String,
    /// Slider position on this zone's track, `[0, 96)`.
    ///
    /// Memoized by name: two tracked zones with the same name but different
    /// offsets both report the first one's position until the next mutation.
    pub slider_position: u32,
    pub options: TimeOptions,
}

/// The tracked set plus its persisted form, updated together.
///
/// Every mutating method computes the new list with a pure engine operation,
/// then invalidates the slider cache and persists the encoded list. Operations
/// with nothing to act on return `false` and leave both untouched.
#[derive(Debug)]
pub struct Tracker<P: Persist = Url> {
    context: Context,
    options: Options,
    entries: Vec<TimezoneEntry>,
    cache: SliderCache,
    sink: P,
}

impl<P: Persist> Tracker<P> {
    /// An empty tracked set.
    pub fn new(context: Context, options: Options, sink: P) -> Self {
        Self { context, options, entries: Vec::new(), cache: SliderCache::new(), sink }
    }

    /// A tracked set restored from an encoded value, showing "now".
    ///
    /// `None` and malformed state both start empty; nothing is persisted.
    pub fn restore(context: Context, options: Options, sink: P, encoded: Option<&str>) -> Self {
        let mut tracker = Self::new(context, options, sink);
        let Some(encoded) = encoded else {
            return tracker;
        };
        match engine::decode(encoded) {
            Ok(specs) => {
                tracker.entries = engine::restore(specs, tracker.context.anchor());
                log::debug!("restored {} timezones", tracker.entries.len());
            }
            Err(err) => log::warn!("starting with no timezones: {err}"),
        }
        tracker
    }

    pub fn entries(&self) -> &[TimezoneEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn into_sink(self) -> P {
        self.sink
    }

    /// Encoded form of the current list.
    pub fn encoded(&self) -> String {
        engine::encode(&self.entries)
    }

    // --- Mutations ---------------------------------------------------------

    pub fn add(&mut self, name: &str, offset: TimeOffset) -> bool {
        let anchor = self.context.anchor();
        let result = engine::add(&self.entries, name, offset, anchor);
        self.commit("add", result)
    }

    /// Add a zone from the static catalog by name.
    pub fn add_from_catalog(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return self.commit("add", Err(NoOpError::EmptyName));
        }
        match catalog::lookup(name) {
            Some(zone) => self.add(zone.name, zone.offset),
            None => self.commit("add", Err(NoOpError::NotInCatalog(name.to_string()))),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let result = engine::remove(&self.entries, name);
        self.commit("remove", result)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let result = engine::reorder(&self.entries, from, to);
        self.commit("reorder", result)
    }

    pub fn reverse(&mut self) -> bool {
        let result = Ok(engine::reverse(&self.entries));
        self.commit("reverse", result)
    }

    /// Set `name`'s local time and synchronize every other zone.
    pub fn edit(&mut self, name: &str, time: TimeOfDay) -> bool {
        let result = engine::apply_time_edit(&self.entries, name, time);
        self.commit("edit", result)
    }

    /// Slider moved on `name`'s track.
    pub fn set_position(&mut self, name: &str, position: u32) -> bool {
        let result = engine::apply_slider(&self.entries, name, position);
        self.commit("slide", result)
    }

    /// One of `name`'s time options (an `HH:MM AM|PM` label) was selected.
    pub fn select_time(&mut self, name: &str, label: &str) -> bool {
        let result = engine::parse_time_label(label)
            .ok_or_else(|| NoOpError::UnknownTime(label.to_string()))
            .and_then(|time| engine::apply_time_edit(&self.entries, name, time));
        self.commit("select", result)
    }

    fn commit(&mut self, action: &str, result: Result<Vec<TimezoneEntry>, NoOpError>) -> bool {
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.cache.invalidate();
                let encoded = engine::encode(&self.entries);
                self.sink.persist(&self.options.param, &encoded);
                log::debug!("{action}: persisted {} timezones", self.entries.len());
                true
            }
            Err(err) => {
                log::debug!("{action} ignored: {err}");
                false
            }
        }
    }

    // --- Projection --------------------------------------------------------

    /// Cached slider position of the first zone named `name`.
    pub fn slider_position(&mut self, name: &str) -> Option<u32> {
        let entry = self.entries.iter().find(|e| e.name == name)?;
        Some(self.cache.position(entry))
    }

    /// Per-zone render projection, in tracked order.
    pub fn views(&mut self) -> Vec<ZoneView> {
        let cache = &mut self.cache;
        self.entries
            .iter()
            .map(|entry| ZoneView {
                name: entry.name.clone(),
                offset: entry.offset,
                display: engine::format_time_of_day(entry.anchor().minutes(), entry.offset),
                current_time: entry.instant.format("%H:%M:%S").to_string(),
                slider_position: cache.position(entry),
                options: engine::time_options(entry.offset),
            })
            .collect()
    }
}

impl Tracker<Url> {
    /// Restore from a shareable link. A link without the parameter starts empty.
    pub fn from_link(context: Context, options: Options, link: Url) -> Self {
        let encoded = engine::read_param(&link, &options.param);
        Self::restore(context, options, link, encoded.as_deref())
    }

    /// The current shareable link.
    pub fn link(&self) -> &str {
        self.sink.as_str()
    }
}
