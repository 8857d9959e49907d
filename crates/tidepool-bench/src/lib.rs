//! # tidepool-bench
//!
//! Benchmark suite for the Tidepool simulation.
//!
//! Provides 3 scripted pool scenarios, metric collection,
//! and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Cue, CueAction, Scenario, ScenarioKind};
