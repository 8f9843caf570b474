//! `transit-scan` library crate.
//!
//! Ingests an uploaded light curve (CSV of time and flux), validates and
//! normalizes it, and scans it for brightness dips that might be transits.
//!
//! The binary (`transit`) is a thin wrapper around this library so that:
//!
//! - the core pipeline is testable without spawning processes
//! - other front-ends (e.g. an HTTP upload handler) can call
//!   [`app::pipeline::run_analysis`] directly with bytes and a filename

pub mod app;
pub mod cli;
pub mod data;
pub mod detect;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
