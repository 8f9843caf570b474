//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the raw upload handed to the ingestor (`RawUpload`)
//! - the cleaned numeric light curve (`NumericSeries`)
//! - analysis outputs (`Candidate`, `Summary`, `AnalysisResult`)
//! - the observing mission label (`Mission`)

pub mod types;

pub use types::*;
