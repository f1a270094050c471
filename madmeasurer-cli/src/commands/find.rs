//! Implementation of the 'find' subcommand.
//!
//! Prints one line per main title: the playlist path for BDMV folders,
//! `<image>,<playlist>` for ISO images, or only the playlist name with
//! `--silent`.

use std::time::Instant;

use madmeasurer_core::JsonDiscProvider;
use madmeasurer_core::processing::{find_main_titles, process_targets};

use super::{discover_targets, event_dispatcher, finish_batch};
use crate::cli::FindArgs;
use crate::error::CliResult;
use crate::terminal;

pub fn run_find(args: FindArgs) -> CliResult<()> {
    let started = Instant::now();
    let config = args.search.config_builder().include_hd(args.include_hd).build();
    config.validate()?;

    let targets = discover_targets(&args.search)?;
    let events = event_dispatcher();

    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, target| {
            let listing = find_main_titles(disc, hints, &config, &events);
            for line in listing.lines(target.is_bdmv, args.silent) {
                terminal::print_output(&line);
            }
            Ok(())
        },
    );
    finish_batch(summary, started)
}
