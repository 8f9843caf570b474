//! Shared analysis pipeline.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! upload -> ingest/validate -> dip scan -> assemble -> report envelope
//!
//! Front-ends (the CLI here, or an HTTP handler elsewhere) only read bytes and
//! present the output.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::domain::{MAX_UPLOAD_BYTES, Mission, RawUpload};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, ingest};
use crate::models::{Inference, TransitModel};
use crate::report::{PredictionReport, envelope};

/// All computed outputs of a single analysis.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub inference: Inference,
    pub report: PredictionReport,
}

/// Execute the full pipeline on an in-memory upload.
///
/// Validation failures come back as client errors (exit code 2); the scan and
/// assembly stages cannot fail on a validated series.
pub fn run_analysis(upload: RawUpload, mission: Mission, model: &TransitModel) -> Result<RunOutput, AppError> {
    let file_name = upload.filename.clone();
    let size = upload.bytes.len();

    // 1) Validate and normalize.
    let ingest = ingest(upload)?;

    // 2) Scan for dips and assemble the result.
    let inference = model.infer(&ingest.series);

    // 3) Wrap with request metadata.
    let report = envelope(mission, &file_name, &ingest, inference.result.clone());

    info!(
        file = %file_name,
        bytes = size,
        mission = mission.as_str(),
        rows = ingest.row_count,
        candidates = report.candidates.len(),
        "upload analyzed"
    );

    Ok(RunOutput {
        ingest,
        inference,
        report,
    })
}

/// Read a file from disk as an upload.
///
/// At most `MAX_UPLOAD_BYTES + 1` bytes are read, which is enough for the
/// ingestor to reject oversized files without loading them.
pub fn read_upload(path: &Path) -> Result<RawUpload, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;

    let mut bytes = Vec::new();
    file.take(MAX_UPLOAD_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(RawUpload::new(bytes, filename))
}
