// madmeasurer-core/tests/processing_tests.rs
//
// Batch driver behaviour with the JSON disc provider.

use madmeasurer_core::config::CoreConfigBuilder;
use madmeasurer_core::disc::JsonDiscProvider;
use madmeasurer_core::discovery::{SearchDepth, TargetKind, find_disc_targets};
use madmeasurer_core::error::CoreError;
use madmeasurer_core::events::{Event, EventDispatcher, RecordingHandler};
use madmeasurer_core::processing::{find_main_titles, process_targets};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const MINUTE: u64 = 60 * 90_000;

fn write_disc(root: &Path, titles: serde_json::Value, main: &str) -> std::io::Result<()> {
    fs::create_dir_all(root.join("BDMV").join("PLAYLIST"))?;
    fs::write(root.join("BDMV").join("index.bdmv"), b"INDX")?;
    let description = json!({
        "name": root.file_name().unwrap().to_string_lossy(),
        "main_playlist": main,
        "titles": titles,
    });
    fs::write(root.join("disc.json"), serde_json::to_string_pretty(&description)?)
}

fn uhd_title(playlist: &str, minutes: u64) -> serde_json::Value {
    json!({
        "playlist": playlist,
        "duration_raw": minutes * MINUTE,
        "clips": [{"video_primary": [{"format": "2160p"}], "audio_primary": [{}]}]
    })
}

#[test]
fn test_batch_isolates_disc_failures() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_disc(
        &dir.path().join("Good"),
        json!([uhd_title("00001.mpls", 40), uhd_title("00800.mpls", 120)]),
        "00800.mpls",
    )?;
    write_disc(
        &dir.path().join("Short"),
        json!([uhd_title("00001.mpls", 5)]),
        "00001.mpls",
    )?;
    // A disc folder without a description cannot be opened.
    fs::create_dir_all(dir.path().join("Unknown").join("BDMV"))?;
    fs::write(dir.path().join("Unknown").join("BDMV").join("index.bdmv"), b"INDX")?;

    let targets = find_disc_targets(dir.path(), SearchDepth::Exact(1), TargetKind::Bdmv)?;
    assert_eq!(targets.len(), 3);

    let config = CoreConfigBuilder::new().build();
    let recorder = Arc::new(RecordingHandler::new());
    let events = EventDispatcher::new().with_handler(recorder.clone());
    let mut lines = Vec::new();

    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, target| {
            lines.extend(find_main_titles(disc, hints, &config, &events).lines(target.is_bdmv, true));
            Ok(())
        },
    );

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.is_success());
    assert_eq!(lines, vec!["00800.mpls"]);
    assert_eq!(
        recorder.count(|e| matches!(e, Event::DiscSkipped { .. })),
        2
    );

    dir.close()?;
    Ok(())
}

#[test]
fn test_per_disc_errors_are_counted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["A", "B"] {
        write_disc(
            &dir.path().join(name),
            json!([uhd_title("00800.mpls", 120)]),
            "00800.mpls",
        )?;
    }
    let targets = find_disc_targets(dir.path(), SearchDepth::Unlimited, TargetKind::Bdmv)?;
    let config = CoreConfigBuilder::new().build();
    let recorder = Arc::new(RecordingHandler::new());
    let events = EventDispatcher::new().with_handler(recorder.clone());

    let mut seen = 0;
    let summary = process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |_, _, _| {
            seen += 1;
            if seen == 1 {
                Err(CoreError::OperationFailed("boom".to_string()))
            } else {
                Ok(())
            }
        },
    );

    assert_eq!(seen, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    assert!(!summary.is_success());
    assert_eq!(
        recorder.count(|e| matches!(e, Event::DiscFailed { .. })),
        1
    );

    dir.close()?;
    Ok(())
}

#[test]
fn test_hints_are_loaded_from_disc_root() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path().join("Obfuscated");
    write_disc(
        &root,
        json!([uhd_title("00001.mpls", 150), uhd_title("00042.mpls", 100)]),
        "00001.mpls",
    )?;
    fs::write(root.join("disc.inf"), "playlists=42\n")?;
    let targets = find_disc_targets(&root.join("BDMV").join("index.bdmv"), SearchDepth::Unlimited, TargetKind::Bdmv)?;
    let config = CoreConfigBuilder::new()
        .algorithms(vec![madmeasurer_core::Algorithm::JRiver])
        .build();
    let events = EventDispatcher::new();
    let mut lines = Vec::new();

    process_targets(
        &JsonDiscProvider::new(),
        &targets,
        &config,
        &events,
        |disc, hints, target| {
            lines.extend(find_main_titles(disc, hints, &config, &events).lines(target.is_bdmv, true));
            Ok(())
        },
    );

    assert_eq!(lines, vec!["00042.mpls"]);

    dir.close()?;
    Ok(())
}
