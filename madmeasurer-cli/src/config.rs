// madmeasurer-cli/src/config.rs
//
// Defaults used only by the command line front end.

/// Directory the analyse command writes its report to.
pub const DEFAULT_REPORT_DIR: &str = "report";

pub const DEFAULT_REPORT_FILE: &str = "main_report.csv";

/// Environment variable naming the folder that holds madMeasureHDR.exe.
pub const MAD_MEASURE_HDR_ENV: &str = "MAD_MEASURE_HDR_PATH";
