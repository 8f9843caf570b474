//! Export analysis outputs.
//!
//! - the full report envelope as pretty JSON
//! - the light curve as CSV, with flagged dips marked, for spreadsheets or
//!   downstream scripts

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use crate::domain::LightCurvePoint;
use crate::error::AppError;
use crate::report::PredictionReport;

/// Write the report envelope as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &PredictionReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

/// Write `t,flux,dip` rows; `dip` is `1` for flagged samples.
pub fn write_light_curve_csv(path: &Path, points: &[LightCurvePoint], dips: &[usize]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["t", "flux", "dip"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let dips: HashSet<usize> = dips.iter().copied().collect();
    for (i, p) in points.iter().enumerate() {
        let flag = if dips.contains(&i) { "1" } else { "0" };
        writer
            .write_record([p.t.to_string(), p.flux.to_string(), flag.to_string()])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
