//! Longest title wins, as LAVSplitter's BD demuxer does it.
//!
//! Only a strictly longer title replaces the current one, so ties go to the
//! earliest title and zero length titles are never picked.

use super::Algorithm;
use crate::disc::{DiscSource, TitleIndex};
use crate::events::{Event, EventDispatcher};

pub fn find_main_title<D: DiscSource + ?Sized>(
    disc: &D,
    events: &EventDispatcher,
) -> Option<TitleIndex> {
    let mut main: Option<(TitleIndex, u64, String)> = None;
    for title in disc.titles() {
        let longest = main.as_ref().map_or(0, |(_, ticks, _)| *ticks);
        if title.duration_ticks <= longest {
            continue;
        }
        match &main {
            Some((_, _, playlist)) => events.emit(Event::MainTitleUpdated {
                algorithm: Algorithm::Duration,
                from: playlist.clone(),
                to: title.playlist.clone(),
                reason: format!(
                    "duration was {} is {}",
                    crate::utils::format_ticks(longest),
                    title.duration_fancy()
                ),
            }),
            None => events.emit(Event::MainTitleInitialised {
                algorithm: Algorithm::Duration,
                playlist: title.playlist.clone(),
            }),
        }
        main = Some((title.index, title.duration_ticks, title.playlist));
    }
    main.map(|(index, _, _)| index)
}
