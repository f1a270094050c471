//! Command implementations for the CLI.
//!
//! Each submodule implements one subcommand on top of the batch driver in
//! `madmeasurer_core::processing`. The helpers here cover what every command
//! shares: finding discs, wiring up event handlers and judging the outcome.

pub mod analyse;
pub mod copy;
pub mod describe;
pub mod find;
pub mod measure;

use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use madmeasurer_core::discovery::{DiscTarget, find_disc_targets};
use madmeasurer_core::{BatchSummary, CoreError, EventDispatcher, format_duration};

use crate::cli::SearchArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::{self, TerminalEventHandler};

/// Finds the discs below every search path.
///
/// A path without discs is only a warning; finding nothing at all is an error.
pub fn discover_targets(search: &SearchArgs) -> CliResult<Vec<DiscTarget>> {
    let mut targets = Vec::new();
    for path in &search.paths {
        match find_disc_targets(path, search.depth(), search.kind()) {
            Ok(found) => targets.extend(found),
            Err(CoreError::NoFilesFound) => warn!("No discs found in {}", path.display()),
            Err(e) => {
                return Err(e).cli_with_context(|| format!("Unable to search {}", path.display()));
            }
        }
    }
    targets.sort();
    targets.dedup();
    if targets.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    info!("Found {} disc(s)", targets.len());
    Ok(targets)
}

/// Events go to the logger, measurement tool output to the terminal.
pub fn event_dispatcher() -> EventDispatcher {
    EventDispatcher::logging().with_handler(Arc::new(TerminalEventHandler::new()))
}

/// Reports the batch outcome; any failed disc makes the command fail.
pub fn finish_batch(summary: BatchSummary, started: Instant) -> CliResult<()> {
    info!(
        "Processed {} disc(s), skipped {}, failed {} in {}",
        summary.processed,
        summary.skipped,
        summary.failed,
        format_duration(started.elapsed().as_secs_f64())
    );
    if summary.is_success() {
        Ok(())
    } else {
        terminal::print_status("Failed discs", &summary.failed.to_string(), true);
        Err(CoreError::OperationFailed(format!(
            "{} of {} disc(s) failed",
            summary.failed,
            summary.processed + summary.skipped + summary.failed
        )))
    }
}
