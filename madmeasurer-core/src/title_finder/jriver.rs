//! JRiver's main title selection.
//!
//! Candidates are the playlists named by `disc.inf` when the disc has one,
//! otherwise every title within 90% of the longest title. Candidates are
//! grouped by their audio track count and the group with the most audio
//! tracks wins. Within that group the plain variant takes the first title,
//! the extended variant the longest one.
//!
//! The legacy variant compares candidates pairwise instead; see
//! [`find_main_title_legacy`].

use super::{Algorithm, DurationResolution};
use crate::disc::{AuxHints, DiscSource, Title, TitleIndex};
use crate::events::{Event, EventDispatcher};

/// `duration` is at least 90% of `reference`.
fn within_tenth(duration: u64, reference: u64) -> bool {
    10 * u128::from(duration) >= 9 * u128::from(reference)
}

/// Titles whose playlist is listed in `disc.inf`, or `None` when the disc
/// declares no list or none of the listed playlists is exposed.
fn declared_candidates(
    titles: &[Title],
    hints: &AuxHints,
    algorithm: Algorithm,
    events: &EventDispatcher,
) -> Option<Vec<Title>> {
    let declared = hints.playlists()?;
    let matching: Vec<Title> = titles
        .iter()
        .filter(|t| declared.iter().any(|p| *p == t.playlist))
        .cloned()
        .collect();
    if matching.is_empty() {
        return None;
    }
    events.emit(Event::CandidatesRestricted {
        algorithm,
        playlists: matching.iter().map(|t| t.playlist.clone()).collect(),
    });
    Some(matching)
}

/// Grouped JRiver selection; `extended` picks the longest title of the
/// winning group rather than the first.
pub fn find_main_title<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    extended: bool,
    events: &EventDispatcher,
) -> Option<TitleIndex> {
    let algorithm = if extended {
        Algorithm::JRiverExtended
    } else {
        Algorithm::JRiver
    };
    let titles = disc.titles();
    let candidates = declared_candidates(&titles, hints, algorithm, events).unwrap_or_else(|| {
        let longest = titles.iter().map(|t| t.duration_ticks).max().unwrap_or(0);
        titles
            .iter()
            .filter(|t| within_tenth(t.duration_ticks, longest))
            .cloned()
            .collect()
    });

    let most_audio = candidates.iter().map(Title::max_audio_count).max()?;
    let mut group = candidates
        .iter()
        .filter(|t| t.max_audio_count() == most_audio);

    let chosen = if extended {
        // max_by would keep the last of equally long titles.
        group.fold(None::<&Title>, |best, t| match best {
            Some(b) if t.duration_ticks <= b.duration_ticks => Some(b),
            _ => Some(t),
        })
    } else {
        group.next()
    }?;

    events.emit(Event::MainTitleInitialised {
        algorithm,
        playlist: chosen.playlist.clone(),
    });
    Some(chosen.index)
}

/// Pairwise JRiver selection.
///
/// Each candidate is compared with the current main title:
///
/// 1. if it is within 10% of the main title's duration, more audio tracks
///    win outright and fewer lose outright;
/// 2. otherwise, or on equal audio tracks, the longer title wins at the
///    given duration resolution;
/// 3. on equal durations the audio track count decides again;
/// 4. finally a playlist name that sorts *before* the main title's wins. This
///    inverted tie-break is how JRiver behaves and is kept as is.
pub fn find_main_title_legacy<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    resolution: DurationResolution,
    events: &EventDispatcher,
) -> Option<TitleIndex> {
    let algorithm = Algorithm::JRiverLegacy(resolution);
    let titles = disc.titles();
    let candidates = declared_candidates(&titles, hints, algorithm, events).unwrap_or(titles);

    let mut main: Option<&Title> = None;
    let mut main_audio: i64 = 0;

    for title in &candidates {
        let Some(current) = main else {
            events.emit(Event::MainTitleInitialised {
                algorithm,
                playlist: title.playlist.clone(),
            });
            main = Some(title);
            main_audio = title.max_audio_count() as i64;
            continue;
        };

        let audio = title.max_audio_count() as i64;
        let mut reason = "";
        let mut cmp: i64 = 0;
        if within_tenth(title.duration_ticks, current.duration_ticks) {
            cmp = audio - main_audio;
        }

        if cmp == 0 {
            cmp = resolution.measure(title) as i64 - resolution.measure(current) as i64;
            if cmp == 0 {
                cmp = audio - main_audio;
                if cmp == 0 {
                    if title.playlist < current.playlist {
                        cmp = 1;
                        reason = "playlist name order";
                    }
                } else {
                    reason = "audio stream count";
                }
            } else {
                reason = "duration";
            }
        } else if cmp > 0 {
            reason = "audio stream count, duration within 10%";
        }

        if cmp > 0 {
            events.emit(Event::MainTitleUpdated {
                algorithm,
                from: current.playlist.clone(),
                to: title.playlist.clone(),
                reason: reason.to_string(),
            });
            main = Some(title);
            main_audio = audio;
        } else {
            events.emit(Event::MainTitleKept {
                algorithm,
                kept: current.playlist.clone(),
                discarded: title.playlist.clone(),
            });
        }
    }

    main.map(|t| t.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{AudioStream, Clip, MemoryDisc, TICKS_PER_SECOND};
    use std::path::PathBuf;

    fn title(playlist: &str, seconds: u64, audio: usize) -> Title {
        Title {
            index: 0,
            playlist: playlist.to_string(),
            duration_ticks: seconds * TICKS_PER_SECOND,
            chapter_count: 0,
            angle_count: 1,
            chapters: Vec::new(),
            clips: vec![Some(Clip {
                audio: vec![AudioStream::default(); audio],
                ..Default::default()
            })],
        }
    }

    fn run(disc: &MemoryDisc, hints: &AuxHints, extended: bool) -> Option<TitleIndex> {
        find_main_title(disc, hints, extended, &EventDispatcher::new())
    }

    fn legacy(disc: &MemoryDisc, resolution: DurationResolution) -> Option<TitleIndex> {
        find_main_title_legacy(disc, &AuxHints::none(), resolution, &EventDispatcher::new())
    }

    #[test]
    fn test_within_tenth_handles_full_range() {
        assert!(within_tenth(u64::MAX, u64::MAX));
        assert!(within_tenth(90, 100));
        assert!(!within_tenth(89, 100));
        assert!(!within_tenth(1, u64::MAX));
    }

    #[test]
    fn test_highest_audio_group_wins() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![
                title("00001.mpls", 6000, 2),
                title("00002.mpls", 5800, 3),
                title("00003.mpls", 6000, 3),
            ],
        );
        assert_eq!(run(&disc, &AuxHints::none(), false), Some(1));
        assert_eq!(run(&disc, &AuxHints::none(), true), Some(2));
    }

    #[test]
    fn test_extended_ties_go_to_earliest() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00001.mpls", 6000, 3), title("00002.mpls", 6000, 3)],
        );
        assert_eq!(run(&disc, &AuxHints::none(), true), Some(0));
    }

    #[test]
    fn test_short_titles_are_not_candidates() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00001.mpls", 6000, 2), title("00002.mpls", 5000, 8)],
        );
        assert_eq!(run(&disc, &AuxHints::none(), false), Some(0));
    }

    #[test]
    fn test_disc_inf_restricts_candidates() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00001.mpls", 6000, 8), title("00800.mpls", 2000, 2)],
        );
        let hints = AuxHints::new(
            Some(PathBuf::from("/bd")),
            Some(vec!["00800.mpls".to_string()]),
        );
        assert_eq!(run(&disc, &hints, false), Some(1));
        assert_eq!(
            find_main_title_legacy(
                &disc,
                &hints,
                DurationResolution::Seconds,
                &EventDispatcher::new()
            ),
            Some(1)
        );
    }

    #[test]
    fn test_unmatched_disc_inf_falls_back() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00001.mpls", 6000, 8), title("00800.mpls", 2000, 2)],
        );
        let hints = AuxHints::new(None, Some(vec!["00999.mpls".to_string()]));
        assert_eq!(run(&disc, &hints, false), Some(0));
    }

    #[test]
    fn test_legacy_more_audio_within_window_wins() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00001.mpls", 6000, 2), title("00002.mpls", 5500, 4)],
        );
        assert_eq!(legacy(&disc, DurationResolution::Seconds), Some(1));
    }

    #[test]
    fn test_legacy_more_audio_outside_window_loses() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00001.mpls", 6000, 2), title("00002.mpls", 3000, 6)],
        );
        assert_eq!(legacy(&disc, DurationResolution::Seconds), Some(0));
    }

    #[test]
    fn test_legacy_smaller_playlist_wins_final_tie_break() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00800.mpls", 6000, 2), title("00100.mpls", 6000, 2)],
        );
        assert_eq!(legacy(&disc, DurationResolution::Seconds), Some(1));
    }

    #[test]
    fn test_legacy_minute_resolution_ignores_seconds() {
        let disc = MemoryDisc::new(
            "/bd",
            vec![title("00100.mpls", 6000, 2), title("00800.mpls", 6030, 2)],
        );
        assert_eq!(legacy(&disc, DurationResolution::Seconds), Some(1));
        assert_eq!(legacy(&disc, DurationResolution::Minutes), Some(0));
    }

    #[test]
    fn test_empty_disc() {
        let disc = MemoryDisc::new("/bd", Vec::new());
        assert_eq!(run(&disc, &AuxHints::none(), false), None);
        assert_eq!(legacy(&disc, DurationResolution::Ticks), None);
    }
}
