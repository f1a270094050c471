// ============================================================================
// madmeasurer-core/src/disc/json.rs
// ============================================================================
//
// JSON DISC PROVIDER: Disc Metadata from Description Documents
//
// The binary disc structures are read by an external disc reader which dumps
// the title/clip/stream hierarchy as a JSON description document. This module
// loads those documents and exposes them through the DiscSource trait.
//
// LOCATION:
// - BDMV folder: <disc root>/disc.json, else <disc root>/disc.describe.json
// - ISO image:   <image path>.json (e.g. Movie.iso.json)
//
// The schema is shared with the describe command, which writes
// disc.describe.json, so a described folder can be loaded again.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::memory::MemoryDisc;
use super::provider::{DiscProvider, OpenOptions};
use super::{TICKS_PER_SECOND, Title, is_image_path};
use crate::error::{CoreResult, disc_open_error};

/// File name of the description document inside a BDMV folder.
pub const DESCRIPTION_FILE: &str = "disc.json";

/// File name the describe command writes inside a BDMV folder.
pub const DESCRIBE_FILE: &str = "disc.describe.json";

/// Serialized form of a whole disc.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscDescription {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title_count: usize,

    /// Playlist the disc reader considers the main title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_playlist: Option<String>,

    /// Playlist chosen by each main title algorithm, keyed by algorithm name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub main_titles: BTreeMap<String, Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    #[serde(default)]
    pub titles: Vec<Title>,
}

impl DiscDescription {
    /// Builds the disc exposed for `path`, dropping titles shorter than the
    /// minimum duration.
    pub fn into_disc(self, path: &Path, options: &OpenOptions) -> CoreResult<MemoryDisc> {
        let min_ticks = options.min_duration.as_secs().saturating_mul(TICKS_PER_SECOND);
        let total = self.titles.len();
        let titles: Vec<Title> = self
            .titles
            .into_iter()
            .filter(|t| t.duration_ticks >= min_ticks)
            .collect();

        if titles.is_empty() {
            return Err(disc_open_error(
                path,
                format!(
                    "none of {} titles meet the minimum duration of {} minutes",
                    total,
                    options.min_duration.as_secs() / 60
                ),
            ));
        }
        debug!(
            "{}: {} of {} titles meet the minimum duration",
            path.display(),
            titles.len(),
            total
        );

        let main_title = self
            .main_playlist
            .as_deref()
            .and_then(|main| titles.iter().position(|t| t.playlist == main));

        Ok(MemoryDisc::new(path, titles).with_main_title(main_title))
    }
}

/// Opens discs from their JSON description documents.
#[derive(Debug, Clone, Default)]
pub struct JsonDiscProvider;

impl JsonDiscProvider {
    pub fn new() -> Self {
        Self
    }

    /// Location of the description document for a disc folder or image.
    ///
    /// A folder without `disc.json` falls back to its `disc.describe.json`.
    pub fn description_path(disc_path: &Path) -> PathBuf {
        if is_image_path(disc_path) {
            let mut name = OsString::from(disc_path.as_os_str());
            name.push(".json");
            PathBuf::from(name)
        } else {
            let primary = disc_path.join(DESCRIPTION_FILE);
            let described = disc_path.join(DESCRIBE_FILE);
            if !primary.exists() && described.is_file() {
                described
            } else {
                primary
            }
        }
    }

    /// Reads and parses a description document.
    pub fn load_description(disc_path: &Path) -> CoreResult<DiscDescription> {
        let description_path = Self::description_path(disc_path);
        let content = fs::read_to_string(&description_path).map_err(|e| {
            disc_open_error(
                disc_path,
                format!("unable to read {}: {}", description_path.display(), e),
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            disc_open_error(
                disc_path,
                format!("invalid description {}: {}", description_path.display(), e),
            )
        })
    }
}

impl DiscProvider for JsonDiscProvider {
    type Disc = MemoryDisc;

    fn open(&self, path: &Path, options: &OpenOptions) -> CoreResult<MemoryDisc> {
        debug!("Opening {}", path.display());
        Self::load_description(path)?.into_disc(path, options)
    }
}
