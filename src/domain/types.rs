//! Shared domain types.
//!
//! Output types are plain serializable values so the calling layer can hand them
//! straight to `serde_json` without any reshaping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum number of rows needed to attempt the dip scan.
pub const MIN_ROWS: usize = 20;

/// Soft cap on rows; anything beyond is ignored.
pub const MAX_ROWS: usize = 20_000;

/// Largest accepted upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Uploaded file content as received from the caller.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl RawUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
        }
    }
}

/// A cleaned light curve: paired time and flux samples.
///
/// Invariant: `time.len() == flux.len()`. The ingestor additionally guarantees
/// `MIN_ROWS <= len <= MAX_ROWS`. Time is not required to be increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    time: Vec<f64>,
    flux: Vec<f64>,
}

impl NumericSeries {
    /// Build a series from two equal-length sequences.
    ///
    /// Returns `None` when the lengths differ.
    pub fn new(time: Vec<f64>, flux: Vec<f64>) -> Option<Self> {
        if time.len() != flux.len() {
            return None;
        }
        Some(Self { time, flux })
    }

    /// Build a series from `(time, flux)` pairs. Lengths agree by construction.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (time, flux) = pairs.into_iter().unzip();
        Self { time, flux }
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn len(&self) -> usize {
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }
}

/// A single putative periodic-dip event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Time of the first consolidated dip.
    pub epoch: f64,
    /// Mean spacing between consolidated dips (`1.0` when degenerate).
    pub period: f64,
    /// Drop below the mean flux, floored at `0.0001`.
    pub depth: f64,
    /// `depth / (std_flux + 1e-6)`.
    pub snr: f64,
    /// `period * 0.1`, or `0.05` when the period is not positive.
    pub duration: f64,
}

/// Flux statistics for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub n_points: usize,
    pub mean_flux: f64,
    pub std_flux: f64,
    pub model_version: String,
}

/// One `(t, flux)` pair for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCurvePoint {
    pub t: f64,
    pub flux: f64,
}

/// Final value of an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub candidates: Vec<Candidate>,
    pub light_curve: Vec<LightCurvePoint>,
}

/// Observing mission the light curve came from.
///
/// Only echoed back to the caller; the analysis does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mission {
    Kepler,
    K2,
    Tess,
}

impl Mission {
    pub const ALL: [Mission; 3] = [Mission::Kepler, Mission::K2, Mission::Tess];

    pub fn as_str(self) -> &'static str {
        match self {
            Mission::Kepler => "kepler",
            Mission::K2 => "k2",
            Mission::Tess => "tess",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Mission::Kepler => "Kepler",
            Mission::K2 => "K2",
            Mission::Tess => "TESS",
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mission::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| "Unsupported mission. Use kepler | k2 | tess".to_string())
    }
}
