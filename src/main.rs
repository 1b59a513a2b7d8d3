mod report;

use chrono::{NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use url::Url;
use zonesync::{Context, Options, TimeOffset, Tracker};

const DEFAULT_LINK: &str = "http://localhost/";

/// Track one instant across several timezones, stored in a shareable link.
///
/// Every mutating command prints the new link; pass it back with `--url` to
/// continue from there.
#[derive(Debug, Parser)]
#[command(name = "zonesync", version, about)]
struct Cli {
    /// Link carrying the tracked timezones.
    #[arg(long, short = 'u', default_value = DEFAULT_LINK)]
    url: String,

    /// Query parameter holding the tracked timezones.
    #[arg(long, default_value = zonesync::engine::DEFAULT_PARAM)]
    param: String,

    /// Reference time in UTC: YYYY-MM-DDTHH:MM:SS or a phrase like "tomorrow 9am".
    /// Default: now.
    #[arg(long, short = 'r')]
    reference: Option<String>,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tracked timezones (default).
    Show,
    /// List the timezones that can be added by name.
    Catalog,
    /// List the selectable times for one tracked timezone.
    Options { name: String },
    /// Add a timezone from the catalog, or any name with --offset.
    Add {
        name: String,
        /// UTC offset in hours; skips the catalog lookup.
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },
    /// Remove a tracked timezone by name.
    Remove { name: String },
    /// Move the timezone at FROM to position TO.
    Move { from: usize, to: usize },
    /// Reverse the order of the tracked timezones.
    Reverse,
    /// Move a timezone's slider (0-96, 15-minute steps).
    Set { name: String, position: u32 },
    /// Select a time such as "07:30 PM" for a timezone.
    Select { name: String, time: String },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let context = match cli.reference.as_deref().map(parse_reference).transpose() {
        Ok(reference) => Context { reference_time: reference },
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let link = match Url::parse(&cli.url) {
        Ok(link) => link,
        Err(err) => {
            eprintln!("error: invalid --url '{}': {err}", cli.url);
            std::process::exit(2);
        }
    };
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let mut tracker = Tracker::from_link(context, Options { param: cli.param }, link);

    let changed = match cli.command.unwrap_or(Command::Show) {
        Command::Show => true,
        Command::Catalog => {
            report::print_catalog(color);
            return;
        }
        Command::Options { name } => {
            match tracker.views().into_iter().find(|v| v.name == name) {
                Some(view) => report::print_options(&view, color),
                None => {
                    eprintln!("error: no tracked timezone named '{name}'");
                    std::process::exit(1);
                }
            }
            return;
        }
        Command::Add { name, offset: Some(hours) } => tracker.add(&name, TimeOffset::new(hours)),
        Command::Add { name, offset: None } => tracker.add_from_catalog(&name),
        Command::Remove { name } => tracker.remove(&name),
        Command::Move { from, to } => tracker.reorder(from, to),
        Command::Reverse => tracker.reverse(),
        Command::Set { name, position } => tracker.set_position(&name, position),
        Command::Select { name, time } => tracker.select_time(&name, &time),
    };

    if !changed {
        eprintln!("note: nothing changed");
    }
    let views = tracker.views();
    report::print_tracker(tracker.link(), &views, color);
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    chrono_english::parse_date_string(value, Utc::now(), chrono_english::Dialect::Us)
        .map(|dt| dt.naive_utc())
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS or a date phrase)"))
}
