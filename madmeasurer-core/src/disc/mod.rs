//! Disc metadata model and access.
//!
//! The types in this module mirror the title/clip/stream hierarchy exposed by
//! a Blu-ray disc reader. They are plain read-only values: a [`DiscSource`]
//! hands out a fresh [`Title`] for every query and nothing in this crate ever
//! mutates disc metadata.

pub mod hints;
pub mod json;
pub mod memory;
pub mod provider;

pub use hints::AuxHints;
pub use json::{DiscDescription, JsonDiscProvider};
pub use memory::MemoryDisc;
pub use provider::{DiscProvider, DiscSource, OpenOptions};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Zero based position of a title on an opened disc.
pub type TitleIndex = usize;

/// Blu-ray timestamps run on a 90 kHz clock.
pub const TICKS_PER_SECOND: u64 = 90_000;

pub const TICKS_PER_MILLI: u64 = TICKS_PER_SECOND / 1000;

/// Whether a disc path names an image file rather than a BDMV folder.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("iso"))
}

/// A playable title, backed by a single playlist file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Index on the opened disc, assigned by the provider.
    #[serde(rename = "idx", default)]
    pub index: TitleIndex,

    /// Playlist file name, e.g. `00800.mpls`.
    pub playlist: String,

    /// Duration in 90 kHz ticks.
    #[serde(rename = "duration_raw")]
    pub duration_ticks: u64,

    #[serde(default)]
    pub chapter_count: u32,

    #[serde(default)]
    pub angle_count: u32,

    #[serde(default)]
    pub chapters: Vec<Chapter>,

    /// Clips in playback order, `None` when the reader could not fetch a clip.
    #[serde(default)]
    pub clips: Vec<Option<Clip>>,
}

impl Title {
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn clip(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index).and_then(Option::as_ref)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ticks / TICKS_PER_MILLI)
    }

    /// Whole seconds of playback, truncated.
    pub fn duration_seconds(&self) -> u64 {
        self.duration_ticks / TICKS_PER_SECOND
    }

    /// Whole minutes of playback, truncated.
    pub fn duration_minutes(&self) -> u64 {
        self.duration_seconds() / 60
    }

    /// Duration split into hours, minutes and seconds.
    pub fn duration_hms(&self) -> (u64, u64, u64) {
        let secs = self.duration_seconds();
        (secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    /// Duration formatted as `H:MM:SS.mmm`.
    pub fn duration_fancy(&self) -> String {
        crate::utils::format_ticks(self.duration_ticks)
    }

    /// Largest primary audio stream count found in any single clip.
    pub fn max_audio_count(&self) -> usize {
        self.clips
            .iter()
            .flatten()
            .map(Clip::audio_count)
            .max()
            .unwrap_or(0)
    }
}

/// A chapter mark within a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "start_raw")]
    pub start_ticks: u64,
    #[serde(rename = "end_raw")]
    pub end_ticks: u64,
}

impl Chapter {
    pub fn duration_ticks(&self) -> u64 {
        self.end_ticks.saturating_sub(self.start_ticks)
    }
}

/// A clip referenced by a title, with its primary streams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(rename = "video_primary", default)]
    pub video: Vec<Option<VideoStream>>,
    #[serde(rename = "audio_primary", default)]
    pub audio: Vec<AudioStream>,
    #[serde(default)]
    pub subtitles: Vec<SubtitleStream>,
}

impl Clip {
    pub fn video_count(&self) -> usize {
        self.video.len()
    }

    pub fn video(&self, index: usize) -> Option<&VideoStream> {
        self.video.get(index).and_then(Option::as_ref)
    }

    pub fn audio_count(&self) -> usize {
        self.audio.len()
    }

    pub fn subtitle_count(&self) -> usize {
        self.subtitles.len()
    }
}

/// A primary video stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStream {
    /// Resolution tag such as `2160p` or `1080i`.
    pub format: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub coding_type: String,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub aspect: String,
}

impl VideoStream {
    /// Numeric resolution with the trailing scan classifier removed (`1080p` -> 1080).
    pub fn resolution(&self) -> Option<u32> {
        let mut chars = self.format.chars();
        chars.next_back()?;
        chars.as_str().parse().ok()
    }
}

/// A primary audio stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStream {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub coding_type: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub rate: String,
}

/// A subtitle stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleStream {
    #[serde(default)]
    pub language: String,
}
