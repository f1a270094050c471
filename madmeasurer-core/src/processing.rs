// ============================================================================
// madmeasurer-core/src/processing.rs
// ============================================================================
//
// BATCH PROCESSING: Driving the Engine over Many Discs
//
// Discs are processed strictly one after another. For each disc the driver:
//
// 1. opens it through the DiscProvider (a failure skips the disc)
// 2. acquires a MountGuard if disc files are needed
// 3. loads the disc.inf hints from the disc root
// 4. hands disc and hints to the per-disc operation
// 5. releases the mount when the guard goes out of scope
//
// Per-disc failures are counted and reported, the batch always continues.
// The per-disc operations of the tool (listing main titles, measuring and
// copying) live here as well.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::CoreConfig;
use crate::disc::{AuxHints, DiscProvider, DiscSource, OpenOptions, Title};
use crate::discovery::DiscTarget;
use crate::error::CoreResult;
use crate::events::{Event, EventDispatcher};
use crate::measurement::{
    MeasurementRunner, copy_measurement, index_measurement_path, measurement_path,
    needs_measurement, playlist_path,
};
use crate::mount::MountGuard;
use crate::title_finder::resolve_main_titles;
use crate::uhd::is_any_uhd;

/// Discs between two progress messages.
const PROGRESS_INTERVAL: usize = 10;

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    /// Discs that could not be opened.
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runs `per_disc` for every target, one disc at a time.
pub fn process_targets<P, F>(
    provider: &P,
    targets: &[DiscTarget],
    config: &CoreConfig,
    events: &EventDispatcher,
    mut per_disc: F,
) -> BatchSummary
where
    P: DiscProvider,
    F: FnMut(&P::Disc, &AuxHints, &DiscTarget) -> CoreResult<()>,
{
    let options = OpenOptions::from(config);
    let needs_mount = config.requires_mount();
    let mut summary = BatchSummary::default();

    for target in targets {
        let done = summary.processed + summary.failed;
        if done > 0 && done % PROGRESS_INTERVAL == 0 {
            warn!("Processed {} BDs", done);
        }

        info!("Opening {}", target.path.display());
        let disc = match provider.open(&target.path, &options) {
            Ok(disc) => disc,
            Err(e) => {
                events.emit(Event::DiscSkipped {
                    disc: target.path.clone(),
                    reason: e.to_string(),
                });
                summary.skipped += 1;
                continue;
            }
        };

        let guard = MountGuard::acquire(&target.path, needs_mount);
        let hints = AuxHints::load(guard.root());
        match per_disc(&disc, &hints, target) {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                events.emit(Event::DiscFailed {
                    disc: target.path.clone(),
                    reason: e.to_string(),
                });
                summary.failed += 1;
            }
        }
        drop(guard);
        info!("Closing {}", target.path.display());
    }

    let total = summary.processed + summary.failed;
    warn!(
        "Completed search, processed {} BD{}",
        total,
        if total == 1 { "" } else { "s" }
    );
    summary
}

/// Main titles of one disc, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainTitleListing {
    pub disc: PathBuf,
    pub playlists: Vec<String>,
}

impl MainTitleListing {
    /// One output line per main title: the absolute playlist path for a
    /// folder disc, `<image>,<playlist>` for an image, the bare playlist name
    /// when `silent`.
    pub fn lines(&self, is_bdmv: bool, silent: bool) -> Vec<String> {
        self.playlists
            .iter()
            .map(|playlist| {
                if silent {
                    playlist.clone()
                } else if is_bdmv {
                    playlist_path(&absolute(&self.disc), playlist)
                        .display()
                        .to_string()
                } else {
                    format!("{},{}", absolute(&self.disc).display(), playlist)
                }
            })
            .collect()
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Resolves the main titles with the configured algorithms. Non UHD discs
/// yield an empty listing unless `include_hd` is set.
pub fn find_main_titles<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    config: &CoreConfig,
    events: &EventDispatcher,
) -> MainTitleListing {
    let candidates = resolve_main_titles(disc, hints, &config.algorithms, events);
    let playlists = if candidates.is_empty() {
        events.emit(Event::NoMainTitles {
            disc: disc.path().to_path_buf(),
        });
        Vec::new()
    } else if is_any_uhd(candidates.titles(), disc.path(), events) || config.include_hd {
        candidates.titles().map(|t| t.playlist.clone()).collect()
    } else {
        events.emit(Event::NonUhdDisc {
            disc: disc.path().to_path_buf(),
        });
        Vec::new()
    };
    MainTitleListing {
        disc: disc.path().to_path_buf(),
        playlists,
    }
}

/// What process_measurements did to one disc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasurementSummary {
    /// Titles handed to the runner that completed (or were dry runs).
    pub measured: usize,
    /// Titles whose measurement failed or could not start.
    pub failed: usize,
    pub copied: usize,
}

/// Whether a title falls within the measure-all-playlists duration bounds.
fn within_duration_bounds(title: &Title, config: &CoreConfig) -> bool {
    let minutes = title.duration_minutes();
    minutes >= u64::from(config.min_duration_minutes)
        && config
            .max_duration_minutes
            .is_none_or(|max| minutes < u64::from(max))
}

/// Measures and/or copies measurement files for one disc, as configured.
///
/// # Errors
///
/// Copy failures are returned; measurement failures are only reported
/// through events and counted in the summary.
pub fn process_measurements<D, R>(
    disc: &D,
    hints: &AuxHints,
    config: &CoreConfig,
    runner: &R,
    events: &EventDispatcher,
) -> CoreResult<MeasurementSummary>
where
    D: DiscSource + ?Sized,
    R: MeasurementRunner + ?Sized,
{
    let mut summary = MeasurementSummary::default();
    let candidates = resolve_main_titles(disc, hints, &config.algorithms, events);
    if candidates.is_empty() {
        events.emit(Event::NoMainTitles {
            disc: disc.path().to_path_buf(),
        });
        return Ok(summary);
    }

    let Some(root) = hints.root() else {
        if config.measure || config.copy {
            events.emit(Event::DiscFilesUnavailable {
                disc: disc.path().to_path_buf(),
            });
        }
        return Ok(summary);
    };

    if config.measure {
        let is_uhd = is_any_uhd(candidates.titles(), disc.path(), events);
        for title in disc.titles() {
            if !is_uhd {
                events.emit(Event::NonUhdSkipped {
                    disc: disc.path().to_path_buf(),
                    playlist: title.playlist.clone(),
                });
                continue;
            }

            let reason = if candidates.contains(title.index) {
                Some("main title".to_string())
            } else if config.measure_all_playlists && within_duration_bounds(&title, config) {
                Some(format!("length is {}", title.duration_fancy()))
            } else {
                None
            };
            let Some(reason) = reason else {
                events.emit(Event::NoMeasurementRequired {
                    disc: disc.path().to_path_buf(),
                    playlist: title.playlist.clone(),
                });
                continue;
            };

            events.emit(Event::MeasurementCandidate {
                disc: disc.path().to_path_buf(),
                playlist: title.playlist.clone(),
                reason,
            });
            let target = playlist_path(root, &title.playlist);
            if needs_measurement(&target, config.force, events) {
                if runner.measure(&target, events).is_success() {
                    summary.measured += 1;
                } else {
                    summary.failed += 1;
                }
            }
        }
    }

    if config.copy {
        let source = index_measurement_path(root);
        for title in candidates.titles() {
            let dest = measurement_path(&playlist_path(root, &title.playlist));
            if copy_measurement(&source, &dest, config.force, config.dry_run, events)? {
                summary.copied += 1;
            }
        }
    }

    Ok(summary)
}
