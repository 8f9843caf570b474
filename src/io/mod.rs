//! Input/output helpers.
//!
//! - CSV upload ingest + validation (`ingest`)
//! - report exports (JSON) and light-curve exports (CSV) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
