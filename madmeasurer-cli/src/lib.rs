// madmeasurer-cli/src/lib.rs
//
// Library portion of the madmeasurer CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{AnalyseArgs, Cli, Commands, CopyArgs, DescribeArgs, FindArgs, MeasureArgs, SearchArgs};
pub use commands::analyse::run_analyse;
pub use commands::copy::run_copy;
pub use commands::describe::run_describe;
pub use commands::find::run_find;
pub use commands::measure::run_measure;
