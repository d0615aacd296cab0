use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gtfs_feed::{write_export, Feed};
use timetable_edit::restrictions::OverrideDocument;
use timetable_edit::session::EditSession;

/// Compiles a transit feed and its pickup/drop-off override rules into an
/// export-ready set of tables.
#[derive(Parser)]
struct Args {
    /// Directory holding the feed tables (stops.txt, trips.txt, ...)
    #[clap(long)]
    feed_dir: PathBuf,
    /// JSON document with per-(trip, stop) override rules
    #[clap(long)]
    overrides: Option<PathBuf>,
    /// Keep only the trips matching this filter expression
    #[clap(long)]
    filter: Option<String>,
    /// Print the stop patterns implied by the trips table and exit
    #[clap(long)]
    print_patterns: bool,
    /// Directory the export tables are written to
    #[clap(long)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let feed = Feed::from_path(&args.feed_dir)
        .with_context(|| format!("reading feed from {}", args.feed_dir.display()))?;
    feed.log_stats();
    let mut session = EditSession::new(feed);

    if let Some(path) = &args.overrides {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading overrides from {}", path.display()))?;
        let document: OverrideDocument =
            serde_json::from_str(&text).context("parsing override document")?;
        let outcome = session.merge_overrides(document);
        info!(
            "merged {} override rules, skipped {}",
            outcome.merged, outcome.skipped
        );
    }

    if let Some(expr) = &args.filter {
        let keep: Vec<String> = session
            .filter_trips(expr)
            .into_iter()
            .map(|trip| trip.id.clone())
            .collect();
        let all: Vec<String> = session.feed.trips.keys().cloned().collect();
        for trip_id in all {
            if !keep.contains(&trip_id) {
                session.delete_trip(&trip_id);
            }
        }
        info!("filter kept {} trips", keep.len());
    }

    if args.print_patterns {
        for pattern in session.patterns() {
            println!(
                "{}: {}",
                pattern.stops.join(" > "),
                pattern.trip_ids.join(", ")
            );
        }
        return Ok(());
    }

    let compiled = session.compile();
    info!(
        "compiled {} trips and {} stop time rows",
        compiled.trips.len(),
        compiled.stop_times.len()
    );
    write_export(
        &args.output_dir,
        &compiled.trips,
        &compiled.stop_times,
        &session.feed,
    )
    .with_context(|| format!("writing export to {}", args.output_dir.display()))?;
    Ok(())
}
