// ============================================================================
// madmeasurer-core/src/events/mod.rs
// ============================================================================
//
// EVENTS: Structured Diagnostics from the Engine
//
// Engine components never write to a global logger. Every component receives
// an EventDispatcher and emits Event values through it; the handlers attached
// by the caller decide where they end up (the log facade, the terminal, a
// test recorder).
//
// Each event carries its own severity via Event::level(), so a handler that
// forwards to the log crate keeps the distinction between e.g. "skipped,
// already measured" (info) and "skipped, not UHD" (debug).

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::Level;

use crate::disc::TitleIndex;
use crate::title_finder::Algorithm;
use crate::uhd::MetadataGap;

pub mod log_handler;
pub mod recording;

pub use log_handler::LogEventHandler;
pub use recording::RecordingHandler;

/// Why a measurement was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureReason {
    /// No measurement file (complete or incomplete) exists yet.
    FirstRun,
    /// A measurement file exists but force is set.
    Forced,
}

/// Why a measurement file copy did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopySkipReason {
    SourceMissing,
    DestinationExists,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // ---- UHD classification ----
    UhdUndetermined {
        disc: PathBuf,
        playlist: String,
        gap: MetadataGap,
    },

    // ---- Main title algorithms ----
    MainTitleInitialised {
        algorithm: Algorithm,
        playlist: String,
    },
    MainTitleUpdated {
        algorithm: Algorithm,
        from: String,
        to: String,
        reason: String,
    },
    MainTitleKept {
        algorithm: Algorithm,
        kept: String,
        discarded: String,
    },
    MainTitleNotFound {
        algorithm: Algorithm,
        disc: PathBuf,
    },
    MainTitleUnavailable {
        algorithm: Algorithm,
        disc: PathBuf,
        index: TitleIndex,
    },
    CandidatesRestricted {
        algorithm: Algorithm,
        playlists: Vec<String>,
    },
    PlaylistSizeUnavailable {
        playlist: String,
    },

    // ---- Measurement decisions ----
    NoMainTitles {
        disc: PathBuf,
    },
    NonUhdDisc {
        disc: PathBuf,
    },
    NonUhdSkipped {
        disc: PathBuf,
        playlist: String,
    },
    MeasurementCandidate {
        disc: PathBuf,
        playlist: String,
        reason: String,
    },
    NoMeasurementRequired {
        disc: PathBuf,
        playlist: String,
    },
    MeasurementRequired {
        target: PathBuf,
        reason: MeasureReason,
    },
    MeasurementSkipped {
        target: PathBuf,
    },

    // ---- Measurement tool ----
    MeasurementStarted {
        command: String,
    },
    MeasurementDryRun {
        command: String,
    },
    MeasurementProgress {
        line: String,
    },
    MeasurementOutputUnreadable {
        command: String,
        stream: &'static str,
        reason: String,
    },
    MeasurementCompleted {
        command: String,
    },
    MeasurementFailed {
        command: String,
        reason: String,
    },

    // ---- Measurement file copies ----
    CopySkipped {
        source: PathBuf,
        dest: PathBuf,
        reason: CopySkipReason,
    },
    CopyStarted {
        source: PathBuf,
        dest: PathBuf,
        overwrite: bool,
    },
    CopyCompleted {
        source: PathBuf,
        dest: PathBuf,
    },
    CopyDryRun {
        source: PathBuf,
        dest: PathBuf,
    },

    // ---- Disc level ----
    DiscFilesUnavailable {
        disc: PathBuf,
    },
    DiscSkipped {
        disc: PathBuf,
        reason: String,
    },
    DiscFailed {
        disc: PathBuf,
        reason: String,
    },
    DescriptionWritten {
        path: PathBuf,
    },
    DescriptionExists {
        path: PathBuf,
    },
}

impl Event {
    /// Severity used when the event is forwarded to a logger.
    pub fn level(&self) -> Level {
        match self {
            Event::UhdUndetermined { .. }
            | Event::MainTitleNotFound { .. }
            | Event::MeasurementFailed { .. }
            | Event::DiscSkipped { .. }
            | Event::DiscFailed { .. } => Level::Error,

            Event::PlaylistSizeUnavailable { .. }
            | Event::MainTitleUnavailable { .. }
            | Event::NoMainTitles { .. }
            | Event::MeasurementOutputUnreadable { .. }
            | Event::MeasurementDryRun { .. }
            | Event::MeasurementCompleted { .. }
            | Event::CopyStarted { .. }
            | Event::CopyCompleted { .. }
            | Event::CopyDryRun { .. }
            | Event::DiscFilesUnavailable { .. } => Level::Warn,

            Event::MeasurementRequired { reason, .. } => match reason {
                MeasureReason::Forced => Level::Warn,
                MeasureReason::FirstRun => Level::Info,
            },

            Event::MainTitleUpdated { .. }
            | Event::NonUhdDisc { .. }
            | Event::MeasurementSkipped { .. }
            | Event::MeasurementStarted { .. }
            | Event::MeasurementProgress { .. }
            | Event::CopySkipped { .. }
            | Event::DescriptionWritten { .. }
            | Event::DescriptionExists { .. } => Level::Info,

            Event::MainTitleInitialised { .. }
            | Event::MainTitleKept { .. }
            | Event::CandidatesRestricted { .. }
            | Event::NonUhdSkipped { .. }
            | Event::MeasurementCandidate { .. }
            | Event::NoMeasurementRequired { .. } => Level::Debug,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::UhdUndetermined { disc, playlist, gap } => write!(
                f,
                "Unable to determine if {} - {} is a UHD; {}",
                disc.display(),
                playlist,
                gap
            ),
            Event::MainTitleInitialised { algorithm, playlist } => {
                write!(f, "[{algorithm}] Initialising main title search with {playlist}")
            }
            Event::MainTitleUpdated { algorithm, from, to, reason } => {
                write!(f, "[{algorithm}] Updating main title from {from} to {to} : {reason}")
            }
            Event::MainTitleKept { algorithm, kept, discarded } => {
                write!(f, "[{algorithm}] Main title remains {kept}, discarding {discarded}")
            }
            Event::MainTitleNotFound { algorithm, disc } => {
                write!(f, "[{algorithm}] No main title found in {}", disc.display())
            }
            Event::MainTitleUnavailable { algorithm, disc, index } => write!(
                f,
                "[{algorithm}] Picked title {index} which {} does not expose",
                disc.display()
            ),
            Event::CandidatesRestricted { algorithm, playlists } => write!(
                f,
                "[{algorithm}] Candidates restricted to playlists {}",
                playlists.join(",")
            ),
            Event::PlaylistSizeUnavailable { playlist } => {
                write!(f, "Unable to read size of playlist {playlist}, assuming 0")
            }
            Event::NoMainTitles { disc } => {
                write!(f, "No algorithm found a main title in {}", disc.display())
            }
            Event::NonUhdDisc { disc } => write!(f, "Ignoring non UHD BD - {}", disc.display()),
            Event::NonUhdSkipped { disc, playlist } => {
                write!(f, "Ignoring non uhd title {} - {}", disc.display(), playlist)
            }
            Event::MeasurementCandidate { disc, playlist, reason } => write!(
                f,
                "Measurement candidate {} - {} : {}",
                disc.display(),
                playlist,
                reason
            ),
            Event::NoMeasurementRequired { disc, playlist } => {
                write!(f, "No measurement required for {} - {}", disc.display(), playlist)
            }
            Event::MeasurementRequired { target, reason } => match reason {
                MeasureReason::FirstRun => write!(
                    f,
                    "Measuring : {} has no measurements",
                    target.display()
                ),
                MeasureReason::Forced => write!(
                    f,
                    "Remeasuring : {} has measurements, force is true",
                    target.display()
                ),
            },
            Event::MeasurementSkipped { target } => write!(
                f,
                "Ignoring : {} has measurements, force is false",
                target.display()
            ),
            Event::MeasurementStarted { command } => write!(f, "Triggering : {command}"),
            Event::MeasurementDryRun { command } => write!(f, "DRY RUN! Triggering : {command}"),
            Event::MeasurementProgress { line } => write!(f, "{line}"),
            Event::MeasurementOutputUnreadable { command, stream, reason } => {
                write!(f, "Error reading {stream} of {command}: {reason}")
            }
            Event::MeasurementCompleted { command } => write!(f, "Completed OK {command}"),
            Event::MeasurementFailed { command, reason } => {
                write!(f, "FAILED {command} : {reason}")
            }
            Event::CopySkipped { source, dest, reason } => match reason {
                CopySkipReason::SourceMissing => {
                    write!(f, "Ignoring : {}, does not exist", source.display())
                }
                CopySkipReason::DestinationExists => {
                    write!(f, "Ignoring : {} exists and force=false", dest.display())
                }
            },
            Event::CopyStarted { source, dest, overwrite } => {
                if *overwrite {
                    write!(
                        f,
                        "Overwriting : {} with {} as force=true",
                        dest.display(),
                        source.display()
                    )
                } else {
                    write!(f, "Copying {} to {}", source.display(), dest.display())
                }
            }
            Event::CopyCompleted { source, dest } => {
                write!(f, "Copied {} to {}", source.display(), dest.display())
            }
            Event::CopyDryRun { source, dest } => {
                write!(f, "DRY RUN! Copying {} to {}", source.display(), dest.display())
            }
            Event::DiscFilesUnavailable { disc } => write!(
                f,
                "Disc content of {} is not accessible, skipping file operations",
                disc.display()
            ),
            Event::DiscSkipped { disc, reason } => {
                write!(f, "Skipping {} : {}", disc.display(), reason)
            }
            Event::DiscFailed { disc, reason } => {
                write!(f, "Failed to process {} : {}", disc.display(), reason)
            }
            Event::DescriptionWritten { path } => write!(f, "Wrote {}", path.display()),
            Event::DescriptionExists { path } => {
                write!(f, "Ignoring : {} exists and force=false", path.display())
            }
        }
    }
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

/// Fans events out to every attached handler.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// A dispatcher that forwards everything to the log facade.
    pub fn logging() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_handler(Arc::new(LogEventHandler));
        dispatcher
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.add_handler(handler);
        self
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
