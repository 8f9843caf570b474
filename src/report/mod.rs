//! Result assembly and the caller-facing report envelope.
//!
//! `assemble` is the pure combination step of the pipeline: statistics from the
//! dip scan, the candidate list unchanged, and the light curve zipped into
//! `(t, flux)` points. `envelope` wraps that result with request metadata.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::DipAnalysis;
use crate::domain::{AnalysisResult, Candidate, LightCurvePoint, Mission, NumericSeries, Summary};
use crate::io::ingest::IngestedData;

pub mod format;

pub use format::*;

/// Combine the series and scan output into the final result value.
pub fn assemble(series: &NumericSeries, scan: &DipAnalysis, model_version: &str) -> AnalysisResult {
    let light_curve = series
        .time()
        .iter()
        .zip(series.flux())
        .map(|(&t, &flux)| LightCurvePoint { t, flux })
        .collect();

    AnalysisResult {
        summary: Summary {
            n_points: series.len(),
            mean_flux: scan.mean_flux,
            std_flux: scan.std_flux,
            model_version: model_version.to_string(),
        },
        candidates: scan.candidates.clone(),
        light_curve,
    }
}

/// Request metadata reported alongside the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Rows used for analysis.
    pub rows: usize,
    /// Normalized column names found in the upload.
    pub columns: Vec<String>,
    /// RFC 3339 UTC timestamp.
    pub processed_at: String,
    pub model_version: String,
}

/// Full response for one upload: the analysis result plus what was asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub mission: Mission,
    pub file_name: String,
    pub meta: ReportMeta,
    pub summary: Summary,
    pub candidates: Vec<Candidate>,
    pub light_curve: Vec<LightCurvePoint>,
}

/// Wrap a result with request metadata, stamped with the current time.
pub fn envelope(
    mission: Mission,
    file_name: &str,
    ingest: &IngestedData,
    result: AnalysisResult,
) -> PredictionReport {
    let processed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    PredictionReport {
        mission,
        file_name: file_name.to_string(),
        meta: ReportMeta {
            rows: ingest.row_count,
            columns: ingest.columns.clone(),
            processed_at,
            model_version: result.summary.model_version.clone(),
        },
        summary: result.summary,
        candidates: result.candidates,
        light_curve: result.light_curve,
    }
}
