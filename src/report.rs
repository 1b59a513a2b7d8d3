use zonesync::engine::{MAX_POSITION, slider_labels};
use zonesync::{CATALOG, ZoneView};

mod ansi {
    #[derive(Debug, Clone, Copy)]
    pub enum Color {
        Green = 32,
        Yellow = 33,
        Blue = 34,
        Cyan = 36,
        Gray = 90,
    }

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn sgr(&self, code: u8, s: &str) -> String {
            if self.enabled { format!("\x1b[{code}m{s}\x1b[0m") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: Color) -> String {
            self.sgr(color as u8, s.as_ref())
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.sgr(1, s.as_ref())
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.sgr(2, s.as_ref())
        }
    }
}

use ansi::Color;

const TRACK_WIDTH: usize = 48;

pub fn print_tracker(link: &str, views: &[ZoneView], color: bool) {
    let palette = ansi::Palette::new(color);
    let title = format!("⏱  Tracking {} timezones", views.len());
    println!("\n{}", palette.bold(palette.paint(title, Color::Cyan)));

    println!("\n{}", palette.paint("━━━ Zones ━━━", Color::Gray));
    if views.is_empty() {
        println!("{}", palette.dim("  No timezones tracked"));
        println!("\n{}", palette.dim("  Tip: `zonesync catalog` lists the zones you can add"));
    } else {
        print_zones(views, &palette);
    }

    println!("\n{}", palette.paint("━━━ Link ━━━", Color::Gray));
    println!("  {}", palette.paint(link, Color::Green));
    println!();
}

fn print_zones(views: &[ZoneView], palette: &ansi::Palette) {
    let labels = slider_labels();
    for (idx, view) in views.iter().enumerate() {
        println!(
            "  {} {} {} {} {}",
            palette.paint(format!("[{}]", idx), Color::Gray),
            palette.bold(palette.paint(&view.name, Color::Blue)),
            palette.dim(view.offset.to_string()),
            palette.dim("│"),
            palette.bold(palette.paint(&view.display, Color::Green)),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("current:"),
            palette.paint(&view.current_time, Color::Cyan),
            palette.dim("│ slider:"),
            palette.paint(format!("{}/{}", view.slider_position, MAX_POSITION), Color::Yellow),
        );
        println!("      {}", palette.paint(track(view.slider_position), Color::Yellow));
    }
    let first = labels.first().map(String::as_str).unwrap_or("");
    let last = labels.last().map(String::as_str).unwrap_or("");
    println!("      {}", palette.dim(format!("{first} … {last}")));
}

fn track(position: u32) -> String {
    let marker = (position as usize * TRACK_WIDTH / MAX_POSITION as usize).min(TRACK_WIDTH);
    let mut s: String = "─".repeat(marker);
    s.push('●');
    s.push_str(&"─".repeat(TRACK_WIDTH - marker));
    s
}

pub fn print_options(view: &ZoneView, color: bool) {
    let palette = ansi::Palette::new(color);
    let title = format!("⏱  Times for {} ({})", view.name, view.offset);
    println!("\n{}", palette.bold(palette.paint(title, Color::Cyan)));
    for option in view.options.clone() {
        let marker = if option.label == view.display { "▸" } else { " " };
        println!(
            "  {} {}  {}",
            palette.paint(marker, Color::Green),
            palette.paint(&option.label, Color::Blue),
            palette.dim(format!("utc slot {}", option.utc_position)),
        );
    }
    println!();
}

pub fn print_catalog(color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.paint("━━━ Catalog ━━━", Color::Gray));
    for zone in CATALOG {
        println!("  {:<6} {}", palette.paint(zone.name, Color::Blue), palette.dim(zone.offset.to_string()));
    }
    println!();
}
