//! UHD classification.
//!
//! A title counts as UHD when the first primary video stream of its first
//! clip carries the `2160p` resolution tag. Missing clip or stream metadata
//! makes the answer unknown; callers treat that as "not UHD".

use std::fmt;
use std::path::Path;

use crate::disc::Title;
use crate::events::{Event, EventDispatcher};

/// Resolution tag of a UHD primary video stream.
pub const UHD_FORMAT: &str = "2160p";

/// The piece of title metadata that was missing when classifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataGap {
    NoClips,
    ClipUnavailable,
    NoVideo,
    VideoUnavailable,
}

impl fmt::Display for MetadataGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MetadataGap::NoClips => "main title has no clips",
            MetadataGap::ClipUnavailable => "main title clip 0 is unavailable",
            MetadataGap::NoVideo => "main title clip 0 has no videos",
            MetadataGap::VideoUnavailable => "main title clip 0 video 0 is unavailable",
        };
        f.write_str(msg)
    }
}

/// Classifies a title without side effects.
pub fn inspect(title: &Title) -> Result<bool, MetadataGap> {
    if title.clip_count() == 0 {
        return Err(MetadataGap::NoClips);
    }
    let clip = title.clip(0).ok_or(MetadataGap::ClipUnavailable)?;
    if clip.video_count() == 0 {
        return Err(MetadataGap::NoVideo);
    }
    let video = clip.video(0).ok_or(MetadataGap::VideoUnavailable)?;
    Ok(video.format == UHD_FORMAT)
}

/// Whether the title is UHD. A metadata gap is reported once and yields false.
pub fn is_uhd(title: &Title, disc_path: &Path, events: &EventDispatcher) -> bool {
    match inspect(title) {
        Ok(uhd) => uhd,
        Err(gap) => {
            events.emit(Event::UhdUndetermined {
                disc: disc_path.to_path_buf(),
                playlist: title.playlist.clone(),
                gap,
            });
            false
        }
    }
}

/// Whether any of the titles is UHD. Every title is inspected, so each
/// metadata gap gets reported even after a UHD title was seen.
pub fn is_any_uhd<'a>(
    titles: impl IntoIterator<Item = &'a Title>,
    disc_path: &Path,
    events: &EventDispatcher,
) -> bool {
    titles
        .into_iter()
        .fold(false, |any, title| is_uhd(title, disc_path, events) | any)
}
