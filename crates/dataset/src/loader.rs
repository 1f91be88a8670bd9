//! JSONL ingestion: one JSON value per line, bad lines skipped

use std::path::Path;

use catalog::{normalize, ProblemRecord};
use serde_json::Value;
use tracing::{info, warn};

use crate::{DatasetError, Result};

#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    pub records: Vec<ProblemRecord>,
    /// Lines that were not valid JSON.
    pub parse_errors: usize,
}

/// A file read from disk and normalized, not yet installed in a store.
#[derive(Clone, Debug)]
pub struct UploadedDataset {
    pub file_name: String,
    /// Hex BLAKE3 of the raw file bytes.
    pub fingerprint: String,
    pub report: LoadReport,
}

/// Parse and normalize each line independently.
///
/// Blank lines are ignored. A line that fails to parse is counted and
/// skipped; fallback ids stay dense over the accepted records.
pub fn load_lines<'a, I>(lines: I) -> LoadReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = LoadReport::default();

    for (i, line) in lines.into_iter().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(line_no, "skipping line: invalid JSON: {e}");
                report.parse_errors += 1;
                continue;
            }
        };

        let fallback_index = report.records.len();
        report.records.push(normalize(&raw, fallback_index));
    }

    report
}

pub fn load_text(text: &str) -> LoadReport {
    load_lines(text.lines())
}

/// Advisory check for `.jsonl` / `.json`; content decides parseability.
pub fn has_dataset_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jsonl") || e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Read and normalize a dataset file.
///
/// Failing to read the file (or non-UTF-8 content) is the only error; it
/// happens before anything is produced, so callers commit nothing.
pub fn read_dataset_file(path: &Path) -> Result<UploadedDataset> {
    let io_err = |source: std::io::Error| DatasetError::Io { path: path.to_path_buf(), source };

    let bytes = std::fs::read(path).map_err(io_err)?;
    let fingerprint = hex::encode(blake3::hash(&bytes).as_bytes());
    let text = String::from_utf8(bytes)
        .map_err(|e| io_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    if !has_dataset_extension(path) {
        warn!(path = %path.display(), "dataset does not end in .jsonl or .json, parsing anyway");
    }

    let report = load_text(&text);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!(
        file = %file_name,
        records = report.records.len(),
        skipped = report.parse_errors,
        fingerprint = %fingerprint,
        "dataset parsed"
    );

    Ok(UploadedDataset { file_name, fingerprint, report })
}
