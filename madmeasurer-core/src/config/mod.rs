//! Configuration structures and constants for the madmeasurer-core library.
//!
//! This module holds every switch that changes what the engine does with a
//! disc: which main title algorithms run, which titles are considered, and
//! whether measurements are taken, copied or only described.

mod builder;

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

use crate::error::{CoreError, CoreResult};
use crate::title_finder::Algorithm;

// Default constants

/// Titles shorter than this many minutes are not exposed when a disc is opened.
pub const DEFAULT_MIN_DURATION_MINUTES: u32 = 30;

/// Main title algorithms used when none are selected explicitly.
pub const DEFAULT_ALGORITHMS: &[Algorithm] = &[Algorithm::Libbluray];

/// Main configuration structure for the madmeasurer-core library.
///
/// It is typically created by the consumer of the library (e.g.
/// madmeasurer-cli) and passed to the batch driver in [`crate::processing`].
///
/// # Examples
///
/// ```rust
/// use madmeasurer_core::config::CoreConfigBuilder;
/// use madmeasurer_core::title_finder::Algorithm;
///
/// let config = CoreConfigBuilder::new()
///     .algorithms(vec![Algorithm::Libbluray, Algorithm::JRiver])
///     .min_duration_minutes(45)
///     .measure(true)
///     .measure_all_playlists(true)
///     .max_duration_minutes(Some(240))
///     .build();
///
/// assert!(config.validate().is_ok());
/// assert!(config.requires_mount());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Main title algorithms, run in this order
    pub algorithms: Vec<Algorithm>,

    /// Minimum title duration in minutes; shorter titles are invisible
    pub min_duration_minutes: u32,

    /// Exclusive upper bound for measure-all-playlists, in minutes
    pub max_duration_minutes: Option<u32>,

    /// List main titles of non UHD discs too
    pub include_hd: bool,

    /// Re-measure and overwrite existing measurement files
    pub force: bool,

    /// Run the measurement tool on the selected titles
    pub measure: bool,

    /// Copy index.bdmv.measurements to each main title
    pub copy: bool,

    /// Measure every UHD title within the duration bounds, not just the main titles
    pub measure_all_playlists: bool,

    /// Announce measurements and copies without performing them
    pub dry_run: bool,

    /// Write a disc description document for each disc
    pub describe: bool,

    /// Directory holding madMeasureHDR.exe
    pub mad_measure_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            algorithms: DEFAULT_ALGORITHMS.to_vec(),
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: None,
            include_hd: false,
            force: false,
            measure: false,
            copy: false,
            measure_all_playlists: false,
            dry_run: false,
            describe: false,
            mad_measure_path: None,
        }
    }
}

impl CoreConfig {
    /// Checks the configuration before any disc is touched.
    pub fn validate(&self) -> CoreResult<()> {
        if self.algorithms.is_empty() {
            return Err(CoreError::Config(
                "at least one main title algorithm must be enabled".to_string(),
            ));
        }
        if self.measure_all_playlists {
            if let Some(max) = self.max_duration_minutes {
                if max <= self.min_duration_minutes {
                    return Err(CoreError::Config(format!(
                        "max duration ({max} minutes) must be greater than min duration ({} minutes)",
                        self.min_duration_minutes
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether the disc content has to be reachable on the filesystem.
    pub fn requires_mount(&self) -> bool {
        self.measure
            || self.copy
            || self.describe
            || self.algorithms.iter().any(Algorithm::needs_disc_files)
    }
}
