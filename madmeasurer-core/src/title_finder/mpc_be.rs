//! MPC-BE's main title selection (HdmvClipInfo).
//!
//! Titles are scanned in order and a title replaces the current main title
//! when any of the following holds:
//!
//! 1. it is longer and its video resolution is at least as high;
//! 2. it is exactly as long and its playlist file is larger;
//! 3. it is shorter but longer than half the current duration, and its video
//!    resolution is higher.

use super::Algorithm;
use crate::disc::{AuxHints, DiscSource, Title, TitleIndex};
use crate::events::{Event, EventDispatcher};

/// Highest resolution over every primary video stream of every clip.
/// Tags that do not parse count as 0.
pub fn max_video_resolution(title: &Title) -> u32 {
    title
        .clips
        .iter()
        .flatten()
        .flat_map(|clip| clip.video.iter().flatten())
        .map(|video| video.resolution().unwrap_or(0))
        .max()
        .unwrap_or(0)
}

struct Best {
    index: TitleIndex,
    playlist: String,
    duration_ticks: u64,
    duration_fancy: String,
    video_res: u32,
    playlist_size: u64,
}

impl Best {
    fn is_replaced_by(&self, duration_ticks: u64, video_res: u32, playlist_size: u64) -> bool {
        (duration_ticks > self.duration_ticks && video_res >= self.video_res)
            || (duration_ticks == self.duration_ticks && playlist_size > self.playlist_size)
            || (duration_ticks < self.duration_ticks
                && duration_ticks > self.duration_ticks / 2
                && video_res > self.video_res)
    }
}

fn playlist_size(hints: &AuxHints, playlist: &str, events: &EventDispatcher) -> u64 {
    hints.playlist_size(playlist).unwrap_or_else(|| {
        events.emit(Event::PlaylistSizeUnavailable {
            playlist: playlist.to_string(),
        });
        0
    })
}

pub fn find_main_title<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    events: &EventDispatcher,
) -> Option<TitleIndex> {
    // The scan starts from an all zero baseline, so the first title with a
    // non zero duration is always taken.
    let mut best = Best {
        index: 0,
        playlist: String::new(),
        duration_ticks: 0,
        duration_fancy: String::new(),
        video_res: 0,
        playlist_size: 0,
    };
    let mut found = false;

    for title in disc.titles() {
        let video_res = max_video_resolution(&title);
        let size = playlist_size(hints, &title.playlist, events);
        if !best.is_replaced_by(title.duration_ticks, video_res, size) {
            continue;
        }

        if found {
            events.emit(Event::MainTitleUpdated {
                algorithm: Algorithm::MpcBe,
                from: best.playlist.clone(),
                to: title.playlist.clone(),
                reason: format!(
                    "duration {} -> {}, video_res {} -> {}, file_size {} -> {}",
                    best.duration_fancy,
                    title.duration_fancy(),
                    best.video_res,
                    video_res,
                    best.playlist_size,
                    size
                ),
            });
        } else {
            events.emit(Event::MainTitleInitialised {
                algorithm: Algorithm::MpcBe,
                playlist: title.playlist.clone(),
            });
        }

        best = Best {
            index: title.index,
            duration_fancy: title.duration_fancy(),
            playlist: title.playlist,
            duration_ticks: title.duration_ticks,
            video_res,
            playlist_size: size,
        };
        found = true;
    }

    found.then_some(best.index)
}
