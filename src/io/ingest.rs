//! CSV ingest and normalization.
//!
//! This module is responsible for turning an uploaded light-curve file into a
//! clean `(time, flux)` series that is safe to scan.
//!
//! Design goals:
//! - **Strict validation** with one typed error per failure (`IngestError`)
//! - **Explicit coercion**: every cell becomes `Option<f64>`, and dropping
//!   incomplete rows is its own stage
//! - **Bounded work**: byte and row limits are checked before any heavy lifting
//! - **Separation of concerns**: no detection logic here

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{MAX_ROWS, MAX_UPLOAD_BYTES, MIN_ROWS, NumericSeries, RawUpload};
use crate::error::IngestError;

/// Accepted (normalized) names for the time column, in reporting order.
pub const TIME_ALIASES: [&str; 4] = ["time", "t", "bjd", "jd"];

/// Accepted (normalized) names for the flux column, in reporting order.
pub const FLUX_ALIASES: [&str; 5] = ["flux", "f", "pdcsap_flux", "sap_flux", "normalized_flux"];

/// Ingest output: the cleaned series plus bookkeeping for reports.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub series: NumericSeries,
    /// Rows that survived cleaning (`== series.len()`).
    pub row_count: usize,
    /// Every normalized column name, in file order.
    pub columns: Vec<String>,
    pub time_column: String,
    pub flux_column: String,
    /// Data rows parsed from the file, before the soft cap.
    pub rows_read: usize,
    /// Whether rows beyond `MAX_ROWS` were ignored.
    pub truncated: bool,
    /// Rows removed because the time or flux cell was missing/non-numeric.
    pub rows_dropped: usize,
}

/// Validate and normalize an upload into a numeric light curve.
pub fn ingest(upload: RawUpload) -> Result<IngestedData, IngestError> {
    let RawUpload { bytes, filename } = upload;

    if !filename.to_lowercase().ends_with(".csv") {
        return Err(IngestError::InvalidExtension { filename });
    }
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(IngestError::FileTooLarge {
            size: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let (headers, mut rows) = parse_table(text)?;
    let rows_read = rows.len();

    if rows.is_empty() {
        return Err(IngestError::NoRows);
    }
    if rows.len() < MIN_ROWS {
        return Err(IngestError::TooFewRows {
            found: rows.len(),
            min: MIN_ROWS,
        });
    }
    let truncated = rows.len() > MAX_ROWS;
    if truncated {
        warn!(rows = rows.len(), cap = MAX_ROWS, "row cap exceeded; keeping the first rows only");
        rows.truncate(MAX_ROWS);
    }

    let columns: Vec<String> = headers.iter().map(normalize_header_name).collect();

    let (time_idx, flux_idx) = match (
        resolve_column(&columns, &TIME_ALIASES),
        resolve_column(&columns, &FLUX_ALIASES),
    ) {
        (Some(t), Some(f)) => (t, f),
        _ => {
            return Err(IngestError::MissingColumns {
                time_aliases: TIME_ALIASES.join(","),
                flux_aliases: FLUX_ALIASES.join(","),
            });
        }
    };

    let time_cells = coerce_column(&rows, time_idx);
    let flux_cells = coerce_column(&rows, flux_idx);

    for (cells, idx) in [(&time_cells, time_idx), (&flux_cells, flux_idx)] {
        if cells.iter().all(Option::is_none) {
            return Err(IngestError::NonNumericColumn {
                column: columns[idx].clone(),
            });
        }
    }

    let series = drop_incomplete_rows(&time_cells, &flux_cells);
    let row_count = series.len();
    let rows_dropped = rows.len() - row_count;
    debug!(
        rows_read,
        rows_kept = row_count,
        rows_dropped,
        time_column = %columns[time_idx],
        flux_column = %columns[flux_idx],
        "ingested light curve"
    );

    if row_count < MIN_ROWS {
        return Err(IngestError::InsufficientValidRows {
            valid: row_count,
            min: MIN_ROWS,
        });
    }

    Ok(IngestedData {
        series,
        row_count,
        time_column: columns[time_idx].clone(),
        flux_column: columns[flux_idx].clone(),
        columns,
        rows_read,
        truncated,
        rows_dropped,
    })
}

/// Read the header row and every data row.
///
/// Short rows are allowed (missing cells become missing values); rows with
/// more fields than the header are a parse error.
fn parse_table(text: &str) -> Result<(StringRecord, Vec<StringRecord>), IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::ParseError(e.to_string()))?
        .clone();

    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(IngestError::ParseError("No columns to parse from file".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::ParseError(e.to_string()))?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(IngestError::ParseError(format!(
                "Expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            )));
        }
        rows.push(record);
    }

    Ok((headers, rows))
}

/// Trim, lowercase, and replace spaces with underscores.
pub fn normalize_header_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Index of the first column whose normalized name is one of `aliases`.
pub fn resolve_column(columns: &[String], aliases: &[&str]) -> Option<usize> {
    columns.iter().position(|c| aliases.contains(&c.as_str()))
}

/// Parse one cell. Blank, non-numeric and non-finite cells are missing.
pub fn parse_cell(cell: Option<&str>) -> Option<f64> {
    let s = cell?.trim();
    if s.is_empty() {
        return None;
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn coerce_column(rows: &[StringRecord], idx: usize) -> Vec<Option<f64>> {
    rows.iter().map(|r| parse_cell(r.get(idx))).collect()
}

/// Keep only rows where both cells parsed.
pub fn drop_incomplete_rows(time: &[Option<f64>], flux: &[Option<f64>]) -> NumericSeries {
    NumericSeries::from_pairs(time.iter().zip(flux).filter_map(|(t, f)| Some(((*t)?, (*f)?))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_upload(header: &str, rows: usize) -> RawUpload {
        let mut text = format!("{header}\n");
        for i in 0..rows {
            text.push_str(&format!("{},{}\n", i as f64 * 0.02, 1.0 + (i % 3) as f64 * 0.001));
        }
        RawUpload::new(text.into_bytes(), "lc.csv")
    }

    #[test]
    fn accepts_minimal_valid_file() {
        let data = ingest(csv_upload("time,flux", 20)).unwrap();
        assert_eq!(data.row_count, 20);
        assert_eq!(data.series.len(), 20);
        assert_eq!(data.columns, vec!["time", "flux"]);
        assert!(!data.truncated);
        assert_eq!(data.rows_dropped, 0);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let mut upload = csv_upload("time,flux", 20);
        upload.filename = "LC.CSV".to_string();
        assert!(ingest(upload).is_ok());

        let mut upload = csv_upload("time,flux", 20);
        upload.filename = "lc.txt".to_string();
        assert!(matches!(ingest(upload), Err(IngestError::InvalidExtension { .. })));
    }

    #[test]
    fn rejects_empty_bytes() {
        let upload = RawUpload::new(Vec::new(), "lc.csv");
        assert_eq!(ingest(upload).unwrap_err(), IngestError::EmptyFile);
    }

    #[test]
    fn rejects_oversized_upload_before_parsing() {
        // Not valid CSV at all: the size check must fire first.
        let upload = RawUpload::new(vec![b'"'; MAX_UPLOAD_BYTES + 1], "big.csv");
        assert_eq!(
            ingest(upload).unwrap_err(),
            IngestError::FileTooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES
            }
        );
    }

    #[test]
    fn exactly_five_mib_is_allowed_through_size_check() {
        let mut text = String::from("time,flux\n");
        let mut i = 0usize;
        while text.len() < MAX_UPLOAD_BYTES - 32 {
            text.push_str(&format!("{i},1.0\n"));
            i += 1;
        }
        while text.len() < MAX_UPLOAD_BYTES {
            text.push(' ');
        }
        let upload = RawUpload::new(text.into_bytes(), "lc.csv");
        let data = ingest(upload).unwrap();
        assert!(data.truncated);
        assert_eq!(data.row_count, MAX_ROWS);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let upload = RawUpload::new(b"time,flux\n".to_vec(), "lc.csv");
        assert_eq!(ingest(upload).unwrap_err(), IngestError::NoRows);
    }

    #[test]
    fn bom_only_file_is_a_parse_error() {
        let upload = RawUpload::new("\u{feff}".as_bytes().to_vec(), "lc.csv");
        assert!(matches!(ingest(upload), Err(IngestError::ParseError(_))));
    }

    #[test]
    fn fifteen_rows_is_too_few() {
        assert_eq!(
            ingest(csv_upload("time,flux", 15)).unwrap_err(),
            IngestError::TooFewRows { found: 15, min: MIN_ROWS }
        );
    }

    #[test]
    fn rows_beyond_cap_are_ignored() {
        let data = ingest(csv_upload("time,flux", MAX_ROWS + 7)).unwrap();
        assert!(data.truncated);
        assert_eq!(data.rows_read, MAX_ROWS + 7);
        assert_eq!(data.row_count, MAX_ROWS);
        // First rows are kept.
        assert_eq!(data.series.time()[0], 0.0);
    }

    #[test]
    fn column_resolution_ignores_case_and_whitespace() {
        let data = ingest(csv_upload(" BJD ,PDCSAP_FLUX", 20)).unwrap();
        assert_eq!(data.time_column, "bjd");
        assert_eq!(data.flux_column, "pdcsap_flux");
    }

    #[test]
    fn internal_spaces_become_underscores() {
        assert_eq!(normalize_header_name("  Normalized Flux "), "normalized_flux");
        let data = ingest(csv_upload("Time,Normalized Flux", 20)).unwrap();
        assert_eq!(data.flux_column, "normalized_flux");
    }

    #[test]
    fn first_matching_alias_wins() {
        let mut text = String::from("sap_flux,jd,flux,time\n");
        for i in 0..20 {
            text.push_str(&format!("{},{},9.0,99.0\n", 1.0 + i as f64 * 0.01, i));
        }
        let data = ingest(RawUpload::new(text.into_bytes(), "lc.csv")).unwrap();
        assert_eq!(data.time_column, "jd");
        assert_eq!(data.flux_column, "sap_flux");
        assert_eq!(data.series.flux()[0], 1.0);
    }

    #[test]
    fn unknown_headers_are_missing_columns() {
        let err = ingest(csv_upload("a,b", 20)).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumns { .. }));
        let msg = err.to_string();
        assert!(msg.contains("time,t,bjd,jd"));
        assert!(msg.contains("flux,f,pdcsap_flux,sap_flux,normalized_flux"));
    }

    #[test]
    fn entirely_non_numeric_flux_column() {
        let mut text = String::from("time,flux\n");
        for i in 0..25 {
            text.push_str(&format!("{i},n/a\n"));
        }
        let err = ingest(RawUpload::new(text.into_bytes(), "lc.csv")).unwrap_err();
        assert_eq!(err, IngestError::NonNumericColumn { column: "flux".to_string() });
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let mut text = String::from("time,flux,quality\n");
        for i in 0..24 {
            let flux = if i % 6 == 0 { "".to_string() } else { "1.0".to_string() };
            text.push_str(&format!("{i},{flux},0\n"));
        }
        let data = ingest(RawUpload::new(text.into_bytes(), "lc.csv")).unwrap();
        assert_eq!(data.rows_dropped, 4);
        assert_eq!(data.row_count, 20);
        assert_eq!(data.columns, vec!["time", "flux", "quality"]);
        assert!(!data.series.time().contains(&0.0));
    }

    #[test]
    fn too_many_dropped_rows_is_insufficient() {
        let mut text = String::from("time,flux\n");
        for i in 0..22 {
            let time = if i < 5 { "bad".to_string() } else { i.to_string() };
            text.push_str(&format!("{time},1.0\n"));
        }
        let err = ingest(RawUpload::new(text.into_bytes(), "lc.csv")).unwrap_err();
        assert_eq!(err, IngestError::InsufficientValidRows { valid: 17, min: MIN_ROWS });
    }

    #[test]
    fn short_rows_count_as_missing_values() {
        let mut text = String::from("time,flux\n");
        for i in 0..21 {
            text.push_str(&format!("{i},1.0\n"));
        }
        text.push_str("21\n");
        let data = ingest(RawUpload::new(text.into_bytes(), "lc.csv")).unwrap();
        assert_eq!(data.rows_read, 22);
        assert_eq!(data.rows_dropped, 1);
    }

    #[test]
    fn long_rows_are_parse_errors() {
        let mut text = String::from("time,flux\n");
        for i in 0..20 {
            text.push_str(&format!("{i},1.0\n"));
        }
        text.push_str("20,1.0,extra\n");
        let err = ingest(RawUpload::new(text.into_bytes(), "lc.csv")).unwrap_err();
        assert!(matches!(err, IngestError::ParseError(_)));
    }

    #[test]
    fn bom_and_invalid_utf8_are_tolerated() {
        let mut bytes = "\u{feff}time,flux,note\n".as_bytes().to_vec();
        for i in 0..20 {
            bytes.extend_from_slice(format!("{i},1.0,").as_bytes());
            bytes.push(0xff);
            bytes.push(b'\n');
        }
        let data = ingest(RawUpload::new(bytes, "lc.csv")).unwrap();
        assert_eq!(data.time_column, "time");
        assert_eq!(data.row_count, 20);
    }

    #[test]
    fn parse_cell_is_explicit_about_missing_values() {
        assert_eq!(parse_cell(Some(" 1.5 ")), Some(1.5));
        assert_eq!(parse_cell(Some("1e-3")), Some(1e-3));
        assert_eq!(parse_cell(Some("")), None);
        assert_eq!(parse_cell(Some("abc")), None);
        assert_eq!(parse_cell(Some("NaN")), None);
        assert_eq!(parse_cell(Some("inf")), None);
        assert_eq!(parse_cell(None), None);
    }

    #[test]
    fn drop_stage_keeps_pairs_in_order() {
        let time = [Some(0.0), None, Some(2.0), Some(3.0)];
        let flux = [Some(1.0), Some(1.0), None, Some(0.9)];
        let s = drop_incomplete_rows(&time, &flux);
        assert_eq!(s.time(), &[0.0, 3.0]);
        assert_eq!(s.flux(), &[1.0, 0.9]);
    }

    #[test]
    fn drop_stage_tolerates_column_length_mismatch() {
        let time = [Some(0.0), Some(1.0), Some(2.0)];
        let flux = [Some(1.0), Some(0.9)];
        let s = drop_incomplete_rows(&time, &flux);
        assert_eq!(s.len(), 2);
        assert_eq!(s.time().len(), s.flux().len());
    }
}
