// ============================================================================
// madmeasurer-core/src/disc/provider.rs
// ============================================================================
//
// DISC PROVIDER: Boundary to the Disc Metadata Reader
//
// The engine never parses disc structures itself. Instead it consumes the two
// traits below: a DiscProvider opens a disc and yields a DiscSource, and the
// DiscSource answers title queries for as long as it is held.
//
// A DiscSource is exclusively owned by whoever is processing the disc; it is
// not shared between consumers.

use std::path::Path;
use std::time::Duration;

use super::{Title, TitleIndex};
use crate::config::CoreConfig;
use crate::error::CoreResult;

/// Options applied when opening a disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Titles shorter than this are not exposed by the opened disc.
    pub min_duration: Duration,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            min_duration: Duration::from_secs(
                u64::from(crate::config::DEFAULT_MIN_DURATION_MINUTES) * 60,
            ),
        }
    }
}

impl From<&CoreConfig> for OpenOptions {
    fn from(config: &CoreConfig) -> Self {
        Self {
            min_duration: Duration::from_secs(u64::from(config.min_duration_minutes) * 60),
        }
    }
}

/// An opened disc.
pub trait DiscSource {
    /// Path the disc was opened from (folder or image).
    fn path(&self) -> &Path;

    /// Number of titles exposed after duration filtering.
    fn title_count(&self) -> usize;

    /// Fetches the title at `index`, `None` when out of range.
    fn title(&self, index: TitleIndex) -> Option<Title>;

    /// The reader's own notion of the main title, if it has one.
    fn main_title_index(&self) -> Option<TitleIndex>;

    /// All titles in index order.
    fn titles(&self) -> Vec<Title> {
        (0..self.title_count())
            .filter_map(|index| self.title(index))
            .collect()
    }
}

/// Something that can open discs.
pub trait DiscProvider {
    type Disc: DiscSource;

    fn open(&self, path: &Path, options: &OpenOptions) -> CoreResult<Self::Disc>;
}
