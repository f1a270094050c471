// ============================================================================
// madmeasurer-core/src/measurement/mod.rs
// ============================================================================
//
// MEASUREMENT POLICY: When to Measure and When to Copy
//
// madVR reads HDR measurements from sidecar files next to the media:
//
//   <media>.measurements              complete measurement
//   <media>.measurements.incomplete   measurement in progress or aborted
//
// A disc measured as a whole leaves BDMV/index.bdmv.measurements behind,
// which can be copied to each main title playlist instead of measuring the
// playlist again.
//
// The functions here only decide and copy. Running the measurement tool
// lives in the invoker submodule.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::events::{CopySkipReason, Event, EventDispatcher, MeasureReason};
use crate::utils::append_to_path;

pub mod invoker;

pub use invoker::{MadMeasureHdr, MeasureOutcome, MeasurementRunner, ProgressDecoder};

pub const MEASUREMENTS_SUFFIX: &str = ".measurements";
pub const INCOMPLETE_SUFFIX: &str = ".measurements.incomplete";

/// `<target>.measurements`
pub fn measurement_path(target: &Path) -> PathBuf {
    append_to_path(target, MEASUREMENTS_SUFFIX)
}

/// `<target>.measurements.incomplete`
pub fn incomplete_path(target: &Path) -> PathBuf {
    append_to_path(target, INCOMPLETE_SUFFIX)
}

/// Measurement file left by measuring the whole disc.
pub fn index_measurement_path(root: &Path) -> PathBuf {
    root.join("BDMV").join(format!("index.bdmv{MEASUREMENTS_SUFFIX}"))
}

/// Playlist file of a title on a disc root.
pub fn playlist_path(root: &Path, playlist: &str) -> PathBuf {
    root.join("BDMV").join("PLAYLIST").join(playlist)
}

/// Whether `target` has to be measured.
///
/// True on a first run (neither a complete nor an incomplete measurement
/// exists) or when a measurement exists and `force` is set.
pub fn needs_measurement(target: &Path, force: bool, events: &EventDispatcher) -> bool {
    let complete = measurement_path(target);
    let measured = complete.exists() || incomplete_path(target).exists();

    if !measured {
        events.emit(Event::MeasurementRequired {
            target: complete,
            reason: MeasureReason::FirstRun,
        });
        true
    } else if force {
        events.emit(Event::MeasurementRequired {
            target: complete,
            reason: MeasureReason::Forced,
        });
        true
    } else {
        events.emit(Event::MeasurementSkipped { target: complete });
        false
    }
}

/// Copies a measurement file, returning whether a copy was performed.
///
/// Nothing happens when `source` is missing, or when `dest` exists and
/// `force` is unset. With `dry_run` the copy is only announced. I/O errors
/// are returned to the caller.
pub fn copy_measurement(
    source: &Path,
    dest: &Path,
    force: bool,
    dry_run: bool,
    events: &EventDispatcher,
) -> CoreResult<bool> {
    if !source.exists() {
        events.emit(Event::CopySkipped {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: CopySkipReason::SourceMissing,
        });
        return Ok(false);
    }

    let overwrite = dest.exists();
    if overwrite && !force {
        events.emit(Event::CopySkipped {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: CopySkipReason::DestinationExists,
        });
        return Ok(false);
    }

    if dry_run {
        events.emit(Event::CopyDryRun {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        return Ok(false);
    }

    events.emit(Event::CopyStarted {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
        overwrite,
    });
    fs::copy(source, dest)?;
    events.emit(Event::CopyCompleted {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
    });
    Ok(true)
}
