//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the detection code stays clean and testable
//! - output changes are localized (golden tests below)

use crate::detect::DipAnalysis;
use crate::domain::Candidate;
use crate::io::ingest::IngestedData;
use crate::report::PredictionReport;

/// Printed under every summary. The scan is a heuristic and must say so.
pub const HEURISTIC_NOTE: &str = "Note: candidates come from a simple windowed-outlier heuristic \
(2σ below the local mean), not a transit fit. Treat them as hints, not detections.";

/// Format the full run summary (input accounting + flux stats + candidates).
pub fn format_run_summary(report: &PredictionReport, ingest: &IngestedData, scan: &DipAnalysis) -> String {
    let mut out = String::new();

    out.push_str("=== transit - light curve dip scan ===\n");
    out.push_str(&format!("File: {}\n", report.file_name));
    out.push_str(&format!("Mission: {}\n", report.mission.display_name()));
    out.push_str(&format!("Model: {}\n", report.summary.model_version));
    out.push_str(&format!(
        "Columns: time=`{}` flux=`{}` (of {})\n",
        ingest.time_column,
        ingest.flux_column,
        ingest.columns.join(", ")
    ));

    let mut rows = format!(
        "Rows: read={} | used={} | dropped={}",
        ingest.rows_read, ingest.row_count, ingest.rows_dropped
    );
    if ingest.truncated {
        rows.push_str(" | truncated to row cap");
    }
    out.push_str(&rows);
    out.push('\n');

    out.push_str(&format!(
        "Flux: n={} | mean={:.6} | std={:.6}\n",
        report.summary.n_points, report.summary.mean_flux, report.summary.std_flux
    ));
    out.push_str(&format!(
        "Scan: window=±{} samples | dips flagged={}\n",
        scan.window,
        scan.dips.len()
    ));

    out.push_str("\nCandidates:\n");
    out.push_str(&format_candidates(&report.candidates));
    out.push('\n');
    out.push_str(HEURISTIC_NOTE);
    out.push('\n');

    out
}

/// Format the candidate table (or a placeholder line when empty).
pub fn format_candidates(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "(none)\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<3} {:>12} {:>12} {:>10} {:>9} {:>10}\n",
        "#", "epoch", "period", "depth", "snr", "duration"
    ));
    out.push_str(&format!(
        "{:-<3} {:-<12} {:-<12} {:-<10} {:-<9} {:-<10}\n",
        "", "", "", "", "", ""
    ));
    for (i, c) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "{:<3} {:>12.5} {:>12.5} {:>10.6} {:>9.2} {:>10.5}\n",
            i + 1,
            c.epoch,
            c.period,
            c.depth,
            c.snr,
            c.duration
        ));
    }
    out
}
