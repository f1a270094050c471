//! Implementation of the 'analyse' subcommand.
//!
//! Runs every main title algorithm on each disc and writes one CSV row per
//! disc to `<report dir>/main_report.csv`, echoing the rows to stdout.

use std::time::Instant;

use madmeasurer_core::JsonDiscProvider;
use madmeasurer_core::processing::process_targets;
use madmeasurer_core::reporting::{self, ComparisonReport};
use madmeasurer_core::title_finder::{Algorithm, compare_algorithms};

use super::{discover_targets, event_dispatcher, finish_batch};
use crate::cli::AnalyseArgs;
use crate::config::DEFAULT_REPORT_FILE;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal;

pub fn run_analyse(args: AnalyseArgs) -> CliResult<()> {
    let started = Instant::now();
    // Every algorithm runs, so disc files are needed whatever was selected.
    let config = args
        .search
        .config_builder()
        .algorithms(Algorithm::COMPARISON.to_vec())
        .build();
    config.validate()?;

    let targets = discover_targets(&args.search)?;
    let mut report = ComparisonReport::create(&args.report_dir, DEFAULT_REPORT_FILE)
        .cli_with_context(|| format!("Unable to create report in {}", args.report_dir.display()))?;
    terminal::print_output(&reporting::header());

    let events = event_dispatcher();
    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, _| {
            let comparison = compare_algorithms(disc, hints, &events);
            let row = report.append(&comparison)?;
            terminal::print_output(&row);
            Ok(())
        },
    );

    let path = report.finish()?;
    terminal::print_success(&format!("Report written to {}", path.display()));
    finish_batch(summary, started)
}
