//! Implementation of the 'measure' subcommand.
//!
//! Measures the main titles of UHD discs (and, with
//! `--measure-all-playlists`, every long enough playlist) unless a
//! measurement exists already. With `--copy` the whole disc measurement is
//! copied to the main titles as well.

use std::time::Instant;

use log::debug;

use madmeasurer_core::JsonDiscProvider;
use madmeasurer_core::measurement::MadMeasureHdr;
use madmeasurer_core::processing::{MeasurementSummary, process_measurements, process_targets};

use super::{discover_targets, event_dispatcher, finish_batch};
use crate::cli::MeasureArgs;
use crate::error::CliResult;
use crate::terminal;

pub fn run_measure(args: MeasureArgs) -> CliResult<()> {
    let started = Instant::now();
    let config = args
        .search
        .config_builder()
        .measure(true)
        .copy(args.copy)
        .force(args.force)
        .measure_all_playlists(args.measure_all_playlists)
        .max_duration_minutes(args.max_duration)
        .mad_measure_path(args.mad_measure_path)
        .dry_run(args.dry_run)
        .build();
    config.validate()?;

    let runner = MadMeasureHdr::locate(config.mad_measure_path.as_deref(), config.dry_run);
    debug!("Using {}", runner.executable().display());

    let targets = discover_targets(&args.search)?;
    let events = event_dispatcher();
    let mut totals = MeasurementSummary::default();

    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, _| {
            let disc_summary = process_measurements(disc, hints, &config, &runner, &events)?;
            totals.measured += disc_summary.measured;
            totals.failed += disc_summary.failed;
            totals.copied += disc_summary.copied;
            Ok(())
        },
    );

    terminal::print_status("Measured", &totals.measured.to_string(), false);
    if totals.failed > 0 {
        terminal::print_status("Failed", &totals.failed.to_string(), true);
    }
    if config.copy {
        terminal::print_status("Copied", &totals.copied.to_string(), false);
    }
    finish_batch(summary, started)
}
