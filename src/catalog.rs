use crate::TimeOffset;

/// A selectable timezone: the display name and its fixed offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogZone {
    pub name: &'static str,
    pub offset: TimeOffset,
}

const fn zone(name: &'static str, hours: f64) -> CatalogZone {
    CatalogZone { name, offset: TimeOffset::new(hours) }
}

// Standard-time offsets only; DST is not modelled.
pub const CATALOG: &[CatalogZone] = &[
    zone("UTC", 0.0),
    zone("IST", 5.5), // India Standard Time
    zone("EST", -5.0),
    zone("PST", -8.0),
    zone("CET", 1.0),
    zone("EET", 2.0),
    zone("JST", 9.0),
    zone("AEST", 10.0),
    zone("AKST", -9.0),
    zone("MSK", 3.0),
];

/// Find a catalog zone by name, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static CatalogZone> {
    let name = name.trim();
    CATALOG.iter().find(|z| z.name.eq_ignore_ascii_case(name))
}
