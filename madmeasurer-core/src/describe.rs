//! Disc description documents.
//!
//! `describe_disc` dumps everything the engine knows about a disc (every
//! title with its chapters, clips and streams, plus the main title chosen by
//! each algorithm) as pretty printed JSON next to the disc content. The
//! document uses the [`DiscDescription`] schema, so it can be loaded again by
//! [`crate::disc::JsonDiscProvider`].

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::disc::{AuxHints, DiscDescription, DiscSource};
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};
use crate::title_finder::compare_algorithms;

pub use crate::disc::json::DESCRIBE_FILE;

/// Builds the description of an opened disc.
pub fn build_description<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    events: &EventDispatcher,
) -> DiscDescription {
    let comparison = compare_algorithms(disc, hints, events);
    DiscDescription {
        name: disc.path().display().to_string(),
        title_count: disc.title_count(),
        main_playlist: disc
            .main_title_index()
            .and_then(|index| disc.title(index))
            .map(|title| title.playlist),
        main_titles: comparison
            .results
            .into_iter()
            .map(|(algorithm, playlist)| (algorithm.name().to_string(), playlist))
            .collect(),
        generated_at: Some(chrono::Local::now().to_rfc3339()),
        titles: disc.titles(),
    }
}

/// Writes `<root>/disc.describe.json` unless it exists and `force` is unset.
///
/// Returns the written path, or `None` when nothing was written.
pub fn describe_disc<D: DiscSource + ?Sized>(
    disc: &D,
    hints: &AuxHints,
    force: bool,
    events: &EventDispatcher,
) -> CoreResult<Option<PathBuf>> {
    let Some(root) = hints.root() else {
        events.emit(Event::DiscFilesUnavailable {
            disc: disc.path().to_path_buf(),
        });
        return Ok(None);
    };

    let path = root.join(DESCRIBE_FILE);
    if path.exists() && !force {
        events.emit(Event::DescriptionExists { path });
        return Ok(None);
    }

    let description = build_description(disc, hints, events);
    let json = serde_json::to_string_pretty(&description).map_err(|source| {
        CoreError::DescriptionSerialize {
            path: disc.path().to_path_buf(),
            source,
        }
    })?;
    debug!("{}", json);
    fs::write(&path, json)?;
    events.emit(Event::DescriptionWritten { path: path.clone() });
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::{
        DiscProvider, JsonDiscProvider, MemoryDisc, OpenOptions, TICKS_PER_SECOND, Title,
    };

    fn disc(root: &std::path::Path) -> MemoryDisc {
        let titles = vec![
            Title {
                index: 0,
                playlist: "00001.mpls".to_string(),
                duration_ticks: 40 * 60 * TICKS_PER_SECOND,
                chapter_count: 0,
                angle_count: 1,
                chapters: Vec::new(),
                clips: Vec::new(),
            },
            Title {
                index: 1,
                playlist: "00800.mpls".to_string(),
                duration_ticks: 120 * 60 * TICKS_PER_SECOND,
                chapter_count: 0,
                angle_count: 1,
                chapters: Vec::new(),
                clips: Vec::new(),
            },
        ];
        MemoryDisc::new(root, titles).with_main_title(Some(1))
    }

    #[test]
    fn test_description_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let hints = AuxHints::new(Some(dir.path().to_path_buf()), None);
        let events = EventDispatcher::new();

        let path = describe_disc(&disc(dir.path()), &hints, false, &events)
            .unwrap()
            .unwrap();

        let written: DiscDescription =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.title_count, 2);
        assert_eq!(written.main_playlist.as_deref(), Some("00800.mpls"));
        assert_eq!(
            written.main_titles.get("duration"),
            Some(&Some("00800.mpls".to_string()))
        );
        assert!(written.generated_at.is_some());
    }

    #[test]
    fn test_described_folder_opens_again() {
        let dir = tempfile::tempdir().unwrap();
        let hints = AuxHints::new(Some(dir.path().to_path_buf()), None);
        let original = disc(dir.path());
        describe_disc(&original, &hints, false, &EventDispatcher::new()).unwrap();

        let options = OpenOptions {
            min_duration: std::time::Duration::ZERO,
        };
        let reopened = JsonDiscProvider::new().open(dir.path(), &options).unwrap();
        assert_eq!(reopened.titles(), original.titles());
        assert_eq!(reopened.main_title_index(), Some(1));
    }

    #[test]
    fn test_existing_description_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DESCRIBE_FILE), "{}").unwrap();
        let hints = AuxHints::new(Some(dir.path().to_path_buf()), None);
        let events = EventDispatcher::new();

        assert_eq!(describe_disc(&disc(dir.path()), &hints, false, &events).unwrap(), None);
        assert!(describe_disc(&disc(dir.path()), &hints, true, &events)
            .unwrap()
            .is_some());
    }
}
