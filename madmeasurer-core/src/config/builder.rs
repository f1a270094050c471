// ============================================================================
// madmeasurer-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig, starting from the defaults in
// config/mod.rs. The builder does not validate; call CoreConfig::validate()
// on the result before processing.

use std::path::PathBuf;

use super::CoreConfig;
use crate::title_finder::Algorithm;

/// Builder for creating CoreConfig instances.
///
/// ```rust
/// use madmeasurer_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .copy(true)
///     .force(true)
///     .build();
/// assert!(config.copy && config.force);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the main title algorithms, run in the given order.
    pub fn algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.config.algorithms = algorithms;
        self
    }

    /// Adds a main title algorithm unless it is already configured.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        if !self.config.algorithms.contains(&algorithm) {
            self.config.algorithms.push(algorithm);
        }
        self
    }

    /// Sets the minimum title duration in minutes.
    pub fn min_duration_minutes(mut self, minutes: u32) -> Self {
        self.config.min_duration_minutes = minutes;
        self
    }

    /// Sets the exclusive upper bound used when measuring all playlists.
    pub fn max_duration_minutes(mut self, minutes: Option<u32>) -> Self {
        self.config.max_duration_minutes = minutes;
        self
    }

    pub fn include_hd(mut self, include: bool) -> Self {
        self.config.include_hd = include;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.config.force = force;
        self
    }

    pub fn measure(mut self, measure: bool) -> Self {
        self.config.measure = measure;
        self
    }

    pub fn copy(mut self, copy: bool) -> Self {
        self.config.copy = copy;
        self
    }

    pub fn measure_all_playlists(mut self, all: bool) -> Self {
        self.config.measure_all_playlists = all;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    pub fn describe(mut self, describe: bool) -> Self {
        self.config.describe = describe;
        self
    }

    /// Sets the directory holding the measurement tool.
    pub fn mad_measure_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.mad_measure_path = path;
        self
    }

    /// Builds the CoreConfig instance.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_is_not_added_twice() {
        let config = CoreConfigBuilder::new()
            .algorithm(Algorithm::Libbluray)
            .algorithm(Algorithm::MpcBe)
            .algorithm(Algorithm::MpcBe)
            .build();
        assert_eq!(config.algorithms, vec![Algorithm::Libbluray, Algorithm::MpcBe]);
    }
}
