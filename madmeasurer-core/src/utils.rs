//! Utility functions for formatting durations and paths.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::disc::TICKS_PER_MILLI;

/// Formats 90 kHz ticks as `H:MM:SS.mmm` (e.g. 648_045_000 -> "2:00:00.500").
#[must_use]
pub fn format_ticks(ticks: u64) -> String {
    let millis = ticks / TICKS_PER_MILLI;
    let total_seconds = millis / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours}:{minutes:02}:{secs:02}.{:03}", millis % 1000)
}

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Appends a suffix to the full file name (`a.mpls` + `.measurements`).
#[must_use]
pub fn append_to_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
