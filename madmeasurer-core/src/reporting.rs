//! CSV report comparing the main title algorithms.
//!
//! One row per disc: the disc path, the playlist picked by each algorithm in
//! [`Algorithm::COMPARISON`] order (empty when it found nothing) and the
//! number of distinct playlists among them.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::title_finder::{Algorithm, AlgorithmComparison};

/// Column heading of an algorithm in the report.
pub fn column_label(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Duration => "Duration",
        Algorithm::MpcBe => "MPC-BE",
        other => other.name(),
    }
}

/// `BD,Duration,MPC-BE,libbluray,jriver-legacy,jriver,jriver-extended,Count`
pub fn header() -> String {
    let columns: Vec<&str> = Algorithm::COMPARISON
        .iter()
        .map(|a| column_label(*a))
        .collect();
    format!("BD,{},Count", columns.join(","))
}

pub fn format_row(comparison: &AlgorithmComparison) -> String {
    let cells: Vec<&str> = Algorithm::COMPARISON
        .iter()
        .map(|a| comparison.playlist(*a).unwrap_or(""))
        .collect();
    format!(
        "\"{}\",{},{}",
        comparison.disc().display(),
        cells.join(","),
        comparison.distinct_count()
    )
}

/// A report file being written.
pub struct ComparisonReport {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ComparisonReport {
    /// Creates `<dir>/<file_name>`, replacing an existing report, and writes
    /// the header.
    pub fn create(dir: &Path, file_name: &str) -> CoreResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "{}", header())?;
        Ok(Self { path, writer })
    }

    /// Appends a row, returning it for display.
    pub fn append(&mut self, comparison: &AlgorithmComparison) -> CoreResult<String> {
        let row = format_row(comparison);
        writeln!(self.writer, "{row}")?;
        Ok(row)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes the report to disk.
    pub fn finish(mut self) -> CoreResult<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
