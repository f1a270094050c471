//! Implementation of the 'copy' subcommand.
//!
//! Copies `BDMV/index.bdmv.measurements` to `<playlist>.measurements` for
//! every main title, leaving existing files alone unless `--force` is given.

use std::time::Instant;

use madmeasurer_core::JsonDiscProvider;
use madmeasurer_core::measurement::MadMeasureHdr;
use madmeasurer_core::processing::{process_measurements, process_targets};

use super::{discover_targets, event_dispatcher, finish_batch};
use crate::cli::CopyArgs;
use crate::error::CliResult;
use crate::terminal;

pub fn run_copy(args: CopyArgs) -> CliResult<()> {
    let started = Instant::now();
    let config = args
        .search
        .config_builder()
        .copy(true)
        .force(args.force)
        .dry_run(args.dry_run)
        .build();
    config.validate()?;

    // Measuring is off, the runner is never called.
    let runner = MadMeasureHdr::locate(None, true);
    let targets = discover_targets(&args.search)?;
    let events = event_dispatcher();
    let mut copied = 0;

    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, _| {
            copied += process_measurements(disc, hints, &config, &runner, &events)?.copied;
            Ok(())
        },
    );

    terminal::print_status("Copied", &copied.to_string(), false);
    finish_batch(summary, started)
}
