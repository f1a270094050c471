// ============================================================================
// madmeasurer-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Configuration
//
// The level comes from the number of -v flags:
// - none: errors only
// - -v:   warnings (measurements triggered, files copied)
// - -vv:  info (per-title decisions)
// - -vvv: debug (algorithm internals)
//
// RUST_LOG, when set, overrides the -v level. Records are written to stderr
// as "<timestamp> - <message>" so stdout stays free for program output.

use log::LevelFilter;
use std::io::Write;

/// Maps the -v count to a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Installs the global logger. Calling it twice keeps the first logger.
pub fn init(verbosity: u8) {
    let result = env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbosity))
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{} - {}", get_timestamp(), record.args()))
        .try_init();
    if result.is_ok() {
        log::debug!("Logger initialised at {}", log::max_level());
    }
}

/// Returns the current local time as "YYYY-MM-DD HH:MM:SS,mmm".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Error);
        assert_eq!(level_for_verbosity(1), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(2), LevelFilter::Info);
        assert_eq!(level_for_verbosity(3), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Debug);
    }

    #[test]
    fn test_timestamp_shape() {
        let timestamp = get_timestamp();
        assert_eq!(timestamp.len(), 23);
        assert_eq!(&timestamp[19..20], ",");
    }
}
