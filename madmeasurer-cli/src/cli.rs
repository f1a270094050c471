// ============================================================================
// madmeasurer-cli/src/cli.rs
// ============================================================================
//
// COMMAND LINE: Argument Definitions
//
// Every subcommand searches the same way, so the search options live in
// SearchArgs and are flattened into each subcommand's arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use madmeasurer_core::config::{CoreConfigBuilder, DEFAULT_MIN_DURATION_MINUTES};
use madmeasurer_core::discovery::{SearchDepth, TargetKind};
use madmeasurer_core::title_finder::{Algorithm, DurationResolution};

use crate::config::{DEFAULT_REPORT_DIR, MAD_MEASURE_HDR_ENV};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "madmeasurer: Blu-ray main title finder and madMeasureHDR helper",
    long_about = "Locates the main title of BDMV folders and ISO images, measures them with madMeasureHDR and manages the resulting measurement files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging: -v warnings, -vv info, -vvv debug (RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the main title of each disc
    Find(FindArgs),
    /// Measures the main titles of UHD discs with madMeasureHDR
    Measure(MeasureArgs),
    /// Copies BDMV/index.bdmv.measurements to each main title
    Copy(CopyArgs),
    /// Runs every main title algorithm and writes a comparison report
    Analyse(AnalyseArgs),
    /// Writes a JSON description of each disc next to its content
    Describe(DescribeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// BDMV folders, index.bdmv files, ISO images or directories to search
    #[arg(value_name = "PATHS", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Search at exactly this folder depth, e.g. 2 finds <path>/*/*/BDMV/index.bdmv
    #[arg(short = 'd', long, value_name = "DEPTH", conflicts_with = "max_depth")]
    pub exact_depth: Option<usize>,

    /// Search at most this many folders deep
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Search for ISO images instead of BDMV folders
    #[arg(short = 'i', long)]
    pub iso: bool,

    /// Minimum playlist duration in minutes for main titles and measurement candidates
    #[arg(long, value_name = "MINUTES", default_value_t = DEFAULT_MIN_DURATION_MINUTES)]
    pub min_duration: u32,

    // --- Main Title Algorithms ---
    /// Find main titles with the libbluray algorithm (on by default)
    #[arg(long, overrides_with = "no_main_by_libbluray")]
    pub main_by_libbluray: bool,

    /// Disable the libbluray algorithm
    #[arg(long, overrides_with = "main_by_libbluray")]
    pub no_main_by_libbluray: bool,

    /// Find main titles by playlist duration only
    #[arg(long)]
    pub main_by_duration: bool,

    /// Find main titles with the MPC-BE algorithm
    #[arg(long)]
    pub main_by_mpc_be: bool,

    /// Find main titles with the JRiver algorithm
    #[arg(long)]
    pub main_by_jriver: bool,

    /// Find main titles with the JRiver algorithm, preferring the longest title
    #[arg(long)]
    pub main_by_jriver_extended: bool,

    /// Find main titles with the pairwise JRiver comparison
    #[arg(long)]
    pub main_by_jriver_legacy: bool,

    /// Find main titles with the pairwise JRiver comparison at minute resolution
    #[arg(long)]
    pub main_by_jriver_minute_resolution: bool,
}

impl SearchArgs {
    pub fn depth(&self) -> SearchDepth {
        match (self.exact_depth, self.max_depth) {
            (Some(depth), _) => SearchDepth::Exact(depth),
            (None, Some(depth)) => SearchDepth::Max(depth),
            (None, None) => SearchDepth::Unlimited,
        }
    }

    pub fn kind(&self) -> TargetKind {
        if self.iso {
            TargetKind::Iso
        } else {
            TargetKind::Bdmv
        }
    }

    /// Selected algorithms, in the order their main titles are reported.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        [
            (self.main_by_duration, Algorithm::Duration),
            (self.main_by_mpc_be, Algorithm::MpcBe),
            (!self.no_main_by_libbluray, Algorithm::Libbluray),
            (self.main_by_jriver, Algorithm::JRiver),
            (self.main_by_jriver_extended, Algorithm::JRiverExtended),
            (
                self.main_by_jriver_legacy,
                Algorithm::JRiverLegacy(DurationResolution::Seconds),
            ),
            (
                self.main_by_jriver_minute_resolution,
                Algorithm::JRiverLegacy(DurationResolution::Minutes),
            ),
        ]
        .into_iter()
        .filter_map(|(enabled, algorithm)| enabled.then_some(algorithm))
        .collect()
    }

    /// Core configuration shared by every command.
    pub fn config_builder(&self) -> CoreConfigBuilder {
        CoreConfigBuilder::new()
            .algorithms(self.algorithms())
            .min_duration_minutes(self.min_duration)
    }
}

#[derive(Args, Debug)]
pub struct FindArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Also list main titles of non UHD discs
    #[arg(long)]
    pub include_hd: bool,

    /// Print the playlist name only
    #[arg(short, long)]
    pub silent: bool,
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Measure again even if a measurement file exists
    #[arg(short, long)]
    pub force: bool,

    /// Also copy index.bdmv.measurements to the main titles
    #[arg(short, long)]
    pub copy: bool,

    /// Also measure every playlist longer than --min-duration
    #[arg(long)]
    pub measure_all_playlists: bool,

    /// With --measure-all-playlists, only measure playlists shorter than this
    #[arg(long, value_name = "MINUTES")]
    pub max_duration: Option<u32>,

    /// Folder containing madMeasureHDR.exe
    #[arg(long, value_name = "DIR", env = MAD_MEASURE_HDR_ENV, value_parser = parse_tool_dir)]
    pub mad_measure_path: Option<PathBuf>,

    /// Announce what would be done without running or copying anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct CopyArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Overwrite existing measurement files
    #[arg(short, long)]
    pub force: bool,

    /// Announce the copies without performing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct AnalyseArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Directory the CSV report is written to
    #[arg(long, value_name = "DIR", default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Replace an existing description
    #[arg(short, long)]
    pub force: bool,
}

/// Accepts the tool folder with or without surrounding double quotes.
fn parse_tool_dir(value: &str) -> Result<PathBuf, String> {
    let trimmed = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    if trimmed.is_empty() {
        return Err("path must not be empty".to_string());
    }
    Ok(PathBuf::from(trimmed))
}
