// ============================================================================
// madmeasurer-core/src/title_finder/mod.rs
// ============================================================================
//
// MAIN TITLE RESOLUTION: Competing Heuristics and their Aggregation
//
// A Blu-ray carries many playlists and the "main title" is whichever one a
// player would start for the feature. Players disagree on how to find it, so
// several heuristics are offered side by side:
//
// - libbluray:  the disc reader's own answer
// - duration:   longest title wins (LAVSplitter)
// - mpc-be:     duration, video resolution and playlist size (MPC-BE)
// - jriver:     audio track count groups over long titles (JRiver)
// - jriver-legacy: the older pairwise JRiver comparison
//
// Every heuristic is a pure function of the disc plus its auxiliary hints and
// answers with a title index or None. None is always reported, never mapped
// to title 0.
//
// resolve_main_titles() runs the configured algorithms and collapses their
// answers into a CandidateSet. compare_algorithms() runs all of them for the
// analysis report.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::disc::{AuxHints, DiscSource, Title, TitleIndex};
use crate::error::CoreError;
use crate::events::{Event, EventDispatcher};

pub mod duration;
pub mod jriver;
pub mod libbluray;
pub mod mpc_be;

/// Precision used by the legacy JRiver comparison when comparing durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationResolution {
    Ticks,
    Seconds,
    Minutes,
}

impl DurationResolution {
    /// The title duration truncated to this resolution.
    pub fn measure(self, title: &Title) -> u64 {
        match self {
            DurationResolution::Ticks => title.duration_ticks,
            DurationResolution::Seconds => title.duration_seconds(),
            DurationResolution::Minutes => title.duration_minutes(),
        }
    }
}

/// A main title heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Libbluray,
    Duration,
    MpcBe,
    JRiver,
    JRiverExtended,
    JRiverLegacy(DurationResolution),
}

impl Algorithm {
    /// Algorithms run by the comparison report, in report column order.
    pub const COMPARISON: [Algorithm; 6] = [
        Algorithm::Duration,
        Algorithm::MpcBe,
        Algorithm::Libbluray,
        Algorithm::JRiverLegacy(DurationResolution::Seconds),
        Algorithm::JRiver,
        Algorithm::JRiverExtended,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Libbluray => "libbluray",
            Algorithm::Duration => "duration",
            Algorithm::MpcBe => "mpc-be",
            Algorithm::JRiver => "jriver",
            Algorithm::JRiverExtended => "jriver-extended",
            Algorithm::JRiverLegacy(DurationResolution::Seconds) => "jriver-legacy",
            Algorithm::JRiverLegacy(DurationResolution::Minutes) => "jriver-legacy-minutes",
            Algorithm::JRiverLegacy(DurationResolution::Ticks) => "jriver-legacy-ticks",
        }
    }

    /// Whether the algorithm reads files from the disc (playlist sizes or
    /// `disc.inf`), i.e. whether an image has to be mounted for it.
    pub fn needs_disc_files(&self) -> bool {
        !matches!(self, Algorithm::Libbluray | Algorithm::Duration)
    }

    /// Runs the heuristic. A `None` answer is reported as `MainTitleNotFound`.
    pub fn find_main_title<D: DiscSource + ?Sized>(
        &self,
        disc: &D,
        hints: &AuxHints,
        events: &EventDispatcher,
    ) -> Option<TitleIndex> {
        let found = match self {
            Algorithm::Libbluray => libbluray::find_main_title(disc),
            Algorithm::Duration => duration::find_main_title(disc, events),
            Algorithm::MpcBe => mpc_be::find_main_title(disc, hints, events),
            Algorithm::JRiver => jriver::find_main_title(disc, hints, false, events),
            Algorithm::JRiverExtended => jriver::find_main_title(disc, hints, true, events),
            Algorithm::JRiverLegacy(resolution) => {
                jriver::find_main_title_legacy(disc, hints, *resolution, events)
            }
        };
        if found.is_none() {
            events.emit(Event::MainTitleNotFound {
                algorithm: *self,
                disc: disc.path().to_path_buf(),
            });
        }
        found
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let algorithm = match s.trim().to_ascii_lowercase().as_str() {
            "libbluray" => Algorithm::Libbluray,
            "duration" => Algorithm::Duration,
            "mpc-be" | "mpcbe" => Algorithm::MpcBe,
            "jriver" => Algorithm::JRiver,
            "jriver-extended" => Algorithm::JRiverExtended,
            "jriver-legacy" => Algorithm::JRiverLegacy(DurationResolution::Seconds),
            "jriver-legacy-minutes" => Algorithm::JRiverLegacy(DurationResolution::Minutes),
            "jriver-legacy-ticks" => Algorithm::JRiverLegacy(DurationResolution::Ticks),
            other => {
                return Err(CoreError::Config(format!(
                    "unknown main title algorithm '{other}'"
                )));
            }
        };
        Ok(algorithm)
    }
}

/// A main title together with the algorithms that picked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: Title,
    pub algorithms: Vec<Algorithm>,
}

/// Main titles in the order they were first nominated, unique by title index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    entries: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a nomination. A title nominated again only gains the algorithm.
    pub fn insert(&mut self, title: Title, algorithm: Algorithm) {
        match self.entries.iter_mut().find(|c| c.title.index == title.index) {
            Some(existing) => {
                if !existing.algorithms.contains(&algorithm) {
                    existing.algorithms.push(algorithm);
                }
            }
            None => self.entries.push(Candidate {
                title,
                algorithms: vec![algorithm],
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: TitleIndex) -> bool {
        self.entries.iter().any(|c| c.title.index == index)
    }

    pub fn get(&self, index: TitleIndex) -> Option<&Candidate> {
        self.entries.iter().find(|c| c.title.index == index)
    }

    pub fn indices(&self) -> Vec<TitleIndex> {
        self.entries.iter().map(|c| c.title.index).collect()
    }

    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.entries.iter().map(|c| &c.title)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Runs the given algorithms in order and collects their main titles.
pub fn resolve_main_titles<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    algorithms: &[Algorithm],
    events: &EventDispatcher,
) -> CandidateSet {
    let mut candidates = CandidateSet::new();
    for algorithm in algorithms {
        let Some(index) = algorithm.find_main_title(disc, hints, events) else {
            continue;
        };
        match disc.title(index) {
            Some(title) => candidates.insert(title, *algorithm),
            None => events.emit(Event::MainTitleUnavailable {
                algorithm: *algorithm,
                disc: disc.path().to_path_buf(),
                index,
            }),
        }
    }
    candidates
}

/// The answer of every algorithm for one disc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmComparison {
    pub disc: PathBuf,
    pub results: Vec<(Algorithm, Option<String>)>,
}

impl AlgorithmComparison {
    /// Playlist picked by `algorithm`, if it ran and found one.
    pub fn playlist(&self, algorithm: Algorithm) -> Option<&str> {
        self.results
            .iter()
            .find(|(a, _)| *a == algorithm)
            .and_then(|(_, playlist)| playlist.as_deref())
    }

    /// Number of distinct playlists among the algorithms that found one.
    pub fn distinct_count(&self) -> usize {
        self.results
            .iter()
            .filter_map(|(_, playlist)| playlist.as_deref())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn disc(&self) -> &Path {
        &self.disc
    }
}

/// Runs every algorithm in [`Algorithm::COMPARISON`], regardless of configuration.
pub fn compare_algorithms<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    events: &EventDispatcher,
) -> AlgorithmComparison {
    let results = Algorithm::COMPARISON
        .iter()
        .map(|algorithm| {
            let playlist = algorithm
                .find_main_title(disc, hints, events)
                .and_then(|index| disc.title(index))
                .map(|title| title.playlist);
            (*algorithm, playlist)
        })
        .collect();
    AlgorithmComparison {
        disc: disc.path().to_path_buf(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{MemoryDisc, TICKS_PER_SECOND};
    use crate::events::RecordingHandler;
    use std::sync::Arc;

    fn title(playlist: &str, minutes: u64) -> Title {
        Title {
            index: 0,
            playlist: playlist.to_string(),
            duration_ticks: minutes * 60 * TICKS_PER_SECOND,
            chapter_count: 0,
            angle_count: 1,
            chapters: Vec::new(),
            clips: Vec::new(),
        }
    }

    #[test]
    fn test_names_round_trip_through_from_str() {
        for algorithm in Algorithm::COMPARISON
            .iter()
            .chain(&[
                Algorithm::JRiverLegacy(DurationResolution::Minutes),
                Algorithm::JRiverLegacy(DurationResolution::Ticks),
            ])
        {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), *algorithm);
        }
        assert!("vlc".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_duplicate_nominations_collapse() {
        let disc = MemoryDisc::new("/bd", vec![title("00001.mpls", 40), title("00800.mpls", 120)])
            .with_main_title(Some(1));
        let events = EventDispatcher::new();
        let candidates = resolve_main_titles(
            &disc,
            &AuxHints::none(),
            &[Algorithm::Libbluray, Algorithm::Duration],
            &events,
        );
        assert_eq!(candidates.indices(), vec![1]);
        assert_eq!(
            candidates.get(1).unwrap().algorithms,
            vec![Algorithm::Libbluray, Algorithm::Duration]
        );
    }

    #[test]
    fn test_not_found_is_reported_not_defaulted() {
        let disc = MemoryDisc::new("/bd", vec![title("00001.mpls", 40)]);
        let recorder = Arc::new(RecordingHandler::new());
        let events = EventDispatcher::new().with_handler(recorder.clone());

        let candidates =
            resolve_main_titles(&disc, &AuxHints::none(), &[Algorithm::Libbluray], &events);

        assert!(candidates.is_empty());
        assert_eq!(
            recorder.count(|e| matches!(e, Event::MainTitleNotFound { .. })),
            1
        );
    }

    /// Claims a main title it cannot hand out.
    struct DanglingMainTitle;

    impl DiscSource for DanglingMainTitle {
        fn path(&self) -> &Path {
            Path::new("/bd")
        }

        fn title_count(&self) -> usize {
            0
        }

        fn title(&self, _index: TitleIndex) -> Option<Title> {
            None
        }

        fn main_title_index(&self) -> Option<TitleIndex> {
            Some(4)
        }
    }

    #[test]
    fn test_unexposed_pick_is_reported_as_event() {
        let recorder = Arc::new(RecordingHandler::new());
        let events = EventDispatcher::new().with_handler(recorder.clone());
        let candidates = resolve_main_titles(
            &DanglingMainTitle,
            &AuxHints::none(),
            &[Algorithm::Libbluray],
            &events,
        );
        assert!(candidates.is_empty());
        assert_eq!(
            recorder.events(),
            vec![Event::MainTitleUnavailable {
                algorithm: Algorithm::Libbluray,
                disc: PathBuf::from("/bd"),
                index: 4,
            }]
        );
    }

    #[test]
    fn test_comparison_counts_distinct_playlists() {
        let disc = MemoryDisc::new("/bd", vec![title("00001.mpls", 40), title("00800.mpls", 120)])
            .with_main_title(Some(0));
        let comparison = compare_algorithms(&disc, &AuxHints::none(), &EventDispatcher::new());
        assert_eq!(comparison.results.len(), Algorithm::COMPARISON.len());
        assert_eq!(comparison.playlist(Algorithm::Libbluray), Some("00001.mpls"));
        assert_eq!(comparison.playlist(Algorithm::Duration), Some("00800.mpls"));
        assert_eq!(comparison.distinct_count(), 2);
    }
}
