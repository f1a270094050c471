//! Core library for finding the main title of Blu-ray discs and managing
//! madVR HDR measurements for it.
//!
//! This crate provides disc discovery, several competing main title
//! heuristics, UHD classification, the measurement and copy policy for
//! `.measurements` sidecar files, and invocation of madMeasureHDR.
//!
//! Disc metadata is consumed through the [`disc::DiscProvider`] boundary; the
//! bundled [`disc::JsonDiscProvider`] reads disc description documents.
//! Diagnostics are emitted as [`events::Event`]s through an injected
//! [`events::EventDispatcher`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use madmeasurer_core::config::CoreConfigBuilder;
//! use madmeasurer_core::discovery::{SearchDepth, TargetKind, find_disc_targets};
//! use madmeasurer_core::events::EventDispatcher;
//! use madmeasurer_core::processing::{find_main_titles, process_targets};
//! use madmeasurer_core::JsonDiscProvider;
//! use std::path::Path;
//!
//! let config = CoreConfigBuilder::new().include_hd(true).build();
//! config.validate().unwrap();
//!
//! let events = EventDispatcher::logging();
//! let targets = find_disc_targets(Path::new("/discs"), SearchDepth::Max(1), TargetKind::Bdmv).unwrap();
//!
//! let summary = process_targets(&JsonDiscProvider::new(), &targets, &config, &events, |disc, hints, target| {
//!     for line in find_main_titles(disc, hints, &config, &events).lines(target.is_bdmv, false) {
//!         println!("{line}");
//!     }
//!     Ok(())
//! });
//! assert!(summary.is_success());
//! ```

pub mod config;
pub mod describe;
pub mod disc;
pub mod discovery;
pub mod error;
pub mod events;
pub mod measurement;
pub mod mount;
pub mod processing;
pub mod reporting;
pub mod title_finder;
pub mod uhd;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use disc::{AuxHints, DiscProvider, DiscSource, JsonDiscProvider, MemoryDisc, Title};
pub use discovery::{DiscTarget, SearchDepth, TargetKind, find_disc_targets};
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler, LogEventHandler};
pub use measurement::{MadMeasureHdr, MeasureOutcome, MeasurementRunner};
pub use processing::{BatchSummary, process_targets};
pub use title_finder::{Algorithm, DurationResolution, resolve_main_titles};
pub use utils::{format_duration, format_ticks};
