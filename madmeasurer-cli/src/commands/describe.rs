//! Implementation of the 'describe' subcommand.

use std::time::Instant;

use madmeasurer_core::JsonDiscProvider;
use madmeasurer_core::describe::describe_disc;
use madmeasurer_core::processing::process_targets;

use super::{discover_targets, event_dispatcher, finish_batch};
use crate::cli::DescribeArgs;
use crate::error::CliResult;
use crate::terminal;

/// Writes `disc.describe.json` at the root of every disc found.
pub fn run_describe(args: DescribeArgs) -> CliResult<()> {
    let started = Instant::now();
    let config = args
        .search
        .config_builder()
        .describe(true)
        .force(args.force)
        .build();
    config.validate()?;

    let targets = discover_targets(&args.search)?;
    let events = event_dispatcher();

    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, _| {
            if let Some(path) = describe_disc(disc, hints, config.force, &events)? {
                terminal::print_output(&path.display().to_string());
            }
            Ok(())
        },
    );
    finish_batch(summary, started)
}
