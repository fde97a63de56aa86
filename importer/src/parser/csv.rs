//! CSV exports of workbook sheets.
//!
//! Operators often export sheets from Excel with whatever encoding and
//! separator their locale uses, so both are auto-detected. Cells that look
//! numeric become JSON numbers, the same way a spreadsheet would store them.

use serde_json::{json, Value};
use std::path::Path;

use crate::error::{SheetError, SheetResult};

/// Candidate separators, in tie-break order.
const SEPARATORS: [char; 4] = [';', ',', '\t', '|'];

/// Lines inspected when guessing the separator.
const DELIMITER_SAMPLE_LINES: usize = 10;

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the given encoding label, lossy for anything unknown.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let text = match encoding {
        "iso-8859-1" | "windows-1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };
    text.trim_start_matches('\u{feff}').to_string()
}

/// Pick the separator that appears most often in the first lines.
///
/// Title rows above the header usually have no separators at all, so the
/// count runs over several lines rather than the first one only.
pub fn detect_delimiter(content: &str) -> char {
    let sample: Vec<&str> = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(DELIMITER_SAMPLE_LINES)
        .collect();

    let mut best = ',';
    let mut best_count = 0;
    for sep in SEPARATORS {
        let count: usize = sample.iter().map(|l| l.matches(sep).count()).sum();
        if count > best_count {
            best_count = count;
            best = sep;
        }
    }
    best
}

/// Type a raw CSV field the way a spreadsheet cell would be typed.
pub fn infer_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return json!(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => json!(f),
        _ => Value::String(raw.to_string()),
    }
}

/// Parse CSV text into a grid of typed cells.
pub fn parse_grid(content: &str, delimiter: char) -> Result<Vec<Vec<Value>>, String> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("line {}: {}", line + 1, e))?;
        grid.push(record.iter().map(infer_cell).collect());
    }
    Ok(grid)
}

/// Read a CSV export from disk into a grid of cells.
pub fn read_csv_grid(path: &Path) -> SheetResult<Vec<Vec<Value>>> {
    let bytes = std::fs::read(path).map_err(|source| SheetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    parse_grid(&content, delimiter).map_err(|message| SheetError::Csv {
        path: path.display().to_string(),
        message,
    })
}
