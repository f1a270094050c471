// madmeasurer-core/tests/measurement_tests.rs
//
// Measurement necessity, copying and the per-disc measurement flow against
// temporary disc folders.

use madmeasurer_core::config::{CoreConfig, CoreConfigBuilder};
use madmeasurer_core::disc::{AuxHints, Clip, MemoryDisc, TICKS_PER_SECOND, Title, VideoStream};
use madmeasurer_core::error::CoreError;
use madmeasurer_core::events::{Event, EventDispatcher, MeasureReason, RecordingHandler};
use madmeasurer_core::measurement::{
    MeasureOutcome, MeasurementRunner, copy_measurement, index_measurement_path,
    measurement_path, needs_measurement, playlist_path,
};
use madmeasurer_core::processing::process_measurements;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

struct FakeRunner {
    targets: RefCell<Vec<PathBuf>>,
    outcome: MeasureOutcome,
}

impl FakeRunner {
    fn new(outcome: MeasureOutcome) -> Self {
        Self {
            targets: RefCell::new(Vec::new()),
            outcome,
        }
    }

    fn measured(&self) -> Vec<String> {
        self.targets
            .borrow()
            .iter()
            .map(|t| t.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }
}

impl MeasurementRunner for FakeRunner {
    fn measure(&self, target: &Path, _events: &EventDispatcher) -> MeasureOutcome {
        self.targets.borrow_mut().push(target.to_path_buf());
        self.outcome
    }
}

fn title(playlist: &str, minutes: u64, format: &str) -> Title {
    Title {
        index: 0,
        playlist: playlist.to_string(),
        duration_ticks: minutes * 60 * TICKS_PER_SECOND,
        chapter_count: 0,
        angle_count: 1,
        chapters: Vec::new(),
        clips: vec![Some(Clip {
            video: vec![Some(VideoStream {
                format: format.to_string(),
                ..Default::default()
            })],
            ..Default::default()
        })],
    }
}

fn disc_root(dir: &Path) -> PathBuf {
    let root = dir.join("Movie");
    fs::create_dir_all(root.join("BDMV").join("PLAYLIST")).unwrap();
    root
}

fn uhd_disc(root: &Path) -> MemoryDisc {
    MemoryDisc::new(
        root,
        vec![
            title("00800.mpls", 120, "2160p"),
            title("00801.mpls", 90, "2160p"),
            title("00802.mpls", 200, "2160p"),
        ],
    )
    .with_main_title(Some(0))
}

fn recorder() -> (Arc<RecordingHandler>, EventDispatcher) {
    let recorder = Arc::new(RecordingHandler::new());
    let events = EventDispatcher::new().with_handler(recorder.clone());
    (recorder, events)
}

#[test]
fn test_needs_measurement_policy() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let target = dir.path().join("00800.mpls");
    let (recorder, events) = recorder();

    assert!(needs_measurement(&target, false, &events));
    fs::write(measurement_path(&target), b"m")?;
    assert!(!needs_measurement(&target, false, &events));
    assert!(needs_measurement(&target, true, &events));

    let events = recorder.events();
    assert!(matches!(
        events[0],
        Event::MeasurementRequired { reason: MeasureReason::FirstRun, .. }
    ));
    assert!(matches!(events[1], Event::MeasurementSkipped { .. }));
    assert!(matches!(
        events[2],
        Event::MeasurementRequired { reason: MeasureReason::Forced, .. }
    ));

    dir.close()?;
    Ok(())
}

#[test]
fn test_copy_measurement_policy() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("index.bdmv.measurements");
    let dest = dir.path().join("00800.mpls.measurements");
    let (_, events) = recorder();

    assert!(!copy_measurement(&source, &dest, false, false, &events)?);
    assert!(!dest.exists());

    fs::write(&source, b"measured")?;
    assert!(!copy_measurement(&source, &dest, false, true, &events)?);
    assert!(!dest.exists());

    assert!(copy_measurement(&source, &dest, false, false, &events)?);
    assert_eq!(fs::read(&dest)?, b"measured");

    fs::write(&source, b"remeasured")?;
    assert!(!copy_measurement(&source, &dest, false, false, &events)?);
    assert_eq!(fs::read(&dest)?, b"measured");

    assert!(copy_measurement(&source, &dest, true, false, &events)?);
    assert_eq!(fs::read(&dest)?, b"remeasured");

    dir.close()?;
    Ok(())
}

#[test]
fn test_copy_failure_propagates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("index.bdmv.measurements");
    fs::write(&source, b"measured")?;
    let dest = dir.path().join("missing").join("00800.mpls.measurements");
    let (_, events) = recorder();

    let result = copy_measurement(&source, &dest, false, false, &events);
    assert!(matches!(result, Err(CoreError::Io(_))));

    dir.close()?;
    Ok(())
}

#[test]
fn test_measures_main_and_bounded_titles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = disc_root(dir.path());
    let disc = uhd_disc(&root);
    let hints = AuxHints::new(Some(root.clone()), None);
    let config = CoreConfigBuilder::new()
        .measure(true)
        .measure_all_playlists(true)
        .max_duration_minutes(Some(180))
        .build();
    config.validate()?;
    let runner = FakeRunner::new(MeasureOutcome::Completed);
    let (_, events) = recorder();

    let summary = process_measurements(&disc, &hints, &config, &runner, &events)?;

    assert_eq!(runner.measured(), vec!["00800.mpls", "00801.mpls"]);
    assert_eq!(summary.measured, 2);
    assert_eq!(summary.failed, 0);

    dir.close()?;
    Ok(())
}

#[test]
fn test_existing_measurements_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = disc_root(dir.path());
    fs::write(measurement_path(&playlist_path(&root, "00800.mpls")), b"m")?;
    let disc = uhd_disc(&root);
    let hints = AuxHints::new(Some(root.clone()), None);
    let config = CoreConfigBuilder::new().measure(true).build();
    let runner = FakeRunner::new(MeasureOutcome::Completed);
    let (_, events) = recorder();

    let summary = process_measurements(&disc, &hints, &config, &runner, &events)?;
    assert!(runner.measured().is_empty());
    assert_eq!(summary.measured, 0);

    let forced = CoreConfig {
        force: true,
        ..config
    };
    process_measurements(&disc, &hints, &forced, &runner, &events)?;
    assert_eq!(runner.measured(), vec!["00800.mpls"]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_failed_measurement_is_counted_not_raised() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = disc_root(dir.path());
    let disc = uhd_disc(&root);
    let hints = AuxHints::new(Some(root.clone()), None);
    let config = CoreConfigBuilder::new().measure(true).build();
    let runner = FakeRunner::new(MeasureOutcome::Failed(Some(1)));
    let (_, events) = recorder();

    let summary = process_measurements(&disc, &hints, &config, &runner, &events)?;
    assert_eq!(summary.failed, 1);

    dir.close()?;
    Ok(())
}

#[test]
fn test_non_uhd_disc_is_not_measured() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = disc_root(dir.path());
    let disc = MemoryDisc::new(
        &root,
        vec![title("00800.mpls", 120, "1080p"), title("00801.mpls", 90, "1080p")],
    )
    .with_main_title(Some(0));
    let hints = AuxHints::new(Some(root.clone()), None);
    let config = CoreConfigBuilder::new().measure(true).build();
    let runner = FakeRunner::new(MeasureOutcome::Completed);
    let (recorder, events) = recorder();

    process_measurements(&disc, &hints, &config, &runner, &events)?;

    assert!(runner.measured().is_empty());
    assert_eq!(
        recorder.count(|e| matches!(e, Event::NonUhdSkipped { .. })),
        2
    );
    let skipped_level = recorder
        .events()
        .iter()
        .find(|e| matches!(e, Event::NonUhdSkipped { .. }))
        .map(Event::level);
    assert_eq!(skipped_level, Some(log::Level::Debug));

    dir.close()?;
    Ok(())
}

#[test]
fn test_disc_without_main_title_is_not_reported_as_non_uhd() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = disc_root(dir.path());
    // The default algorithm relies on the reader's main title, which is absent.
    let disc = MemoryDisc::new(&root, vec![title("00800.mpls", 120, "2160p")]);
    let hints = AuxHints::new(Some(root.clone()), None);
    let config = CoreConfigBuilder::new().measure(true).copy(true).build();
    let runner = FakeRunner::new(MeasureOutcome::Completed);
    let (recorder, events) = recorder();

    let summary = process_measurements(&disc, &hints, &config, &runner, &events)?;

    assert_eq!(summary.measured + summary.failed + summary.copied, 0);
    assert!(runner.measured().is_empty());
    assert_eq!(recorder.count(|e| matches!(e, Event::NoMainTitles { .. })), 1);
    assert_eq!(
        recorder.count(|e| matches!(e, Event::NonUhdSkipped { .. } | Event::NonUhdDisc { .. })),
        0
    );

    dir.close()?;
    Ok(())
}

#[test]
fn test_copy_to_main_titles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = disc_root(dir.path());
    fs::write(index_measurement_path(&root), b"index")?;
    let disc = uhd_disc(&root);
    let hints = AuxHints::new(Some(root.clone()), None);
    let config = CoreConfigBuilder::new().copy(true).build();
    let runner = FakeRunner::new(MeasureOutcome::Completed);
    let (_, events) = recorder();

    let summary = process_measurements(&disc, &hints, &config, &runner, &events)?;
    assert_eq!(summary.copied, 1);
    assert_eq!(
        fs::read(measurement_path(&playlist_path(&root, "00800.mpls")))?,
        b"index"
    );
    assert!(runner.measured().is_empty());

    let again = process_measurements(&disc, &hints, &config, &runner, &events)?;
    assert_eq!(again.copied, 0);

    dir.close()?;
    Ok(())
}

#[test]
fn test_without_disc_files_nothing_happens() -> Result<(), Box<dyn std::error::Error>> {
    let disc = uhd_disc(Path::new("/discs/Movie.iso"));
    let config = CoreConfigBuilder::new().measure(true).copy(true).build();
    let runner = FakeRunner::new(MeasureOutcome::Completed);
    let (recorder, events) = recorder();

    let summary = process_measurements(&disc, &AuxHints::none(), &config, &runner, &events)?;

    assert_eq!(summary.measured + summary.copied, 0);
    assert!(runner.measured().is_empty());
    assert_eq!(
        recorder.count(|e| matches!(e, Event::DiscFilesUnavailable { .. })),
        1
    );
    Ok(())
}
