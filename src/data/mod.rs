//! Synthetic data sources.
//!
//! - `sample`: seeded synthetic light curves with injected box transits

pub mod sample;

pub use sample::*;
