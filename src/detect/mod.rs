//! Transit-dip detection.
//!
//! Responsibilities:
//!
//! - flux statistics (mean, population standard deviation)
//! - windowed outlier scan for localized brightness drops (parallel)
//! - consolidation of flagged dips into at most one candidate
//!
//! This is a deliberately crude heuristic: deterministic and explainable, not a
//! statistically rigorous transit search. Candidates it reports are hints for a
//! human to look at, nothing more.

pub mod dips;
pub mod stats;

pub use dips::*;
pub use stats::*;
