//! Spreadsheet reading.
//!
//! A [`Workbook`] is either a real spreadsheet file (`.xlsx`, `.xls`,
//! `.ods`, read with calamine) or a directory holding one CSV export per
//! sheet (`<sheet name>.csv`). Both produce a [`Sheet`]: trimmed header
//! names plus one JSON object per data row, where empty cells are `null`.
//!
//! The header row is an absolute, 0-indexed row number: blank rows above
//! the used range still count.

pub mod csv;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{SheetError, SheetResult};

/// One data row, keyed by header name.
pub type Row = Map<String, Value>;

/// A parsed sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    /// Header names in column order
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Build a sheet from a grid of cells, using `header_row` as the header.
    ///
    /// Blank header cells become `Unnamed: <col>`, repeated names get a
    /// `.1`, `.2`... suffix. Rows where every cell is empty are dropped.
    pub fn from_grid(name: &str, grid: Vec<Vec<Value>>, header_row: usize) -> SheetResult<Self> {
        if header_row >= grid.len() {
            return Err(SheetError::HeaderOutOfRange {
                sheet: name.to_string(),
                header_row,
                rows: grid.len(),
            });
        }

        let headers = build_headers(&grid[header_row]);

        let rows = grid
            .into_iter()
            .skip(header_row + 1)
            .filter(|cells| cells.iter().any(|c| !c.is_null()))
            .map(|cells| {
                let mut row = Map::new();
                for (i, header) in headers.iter().enumerate() {
                    let cell = cells.get(i).cloned().unwrap_or(Value::Null);
                    row.insert(header.clone(), cell);
                }
                row
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Name of the left-most column.
    pub fn first_column(&self) -> Option<&str> {
        self.headers.first().map(String::as_str)
    }
}

fn build_headers(cells: &[Value]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = cell_text(cell)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("Unnamed: {}", i));

            let count = seen.entry(base.clone()).or_insert(0);
            let header = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            header
        })
        .collect()
}

// =============================================================================
// Cells
// =============================================================================

/// Convert a calamine cell to a JSON value.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => json!(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                json!(*f as i64)
            } else {
                json!(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(format!("{}", dt)),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

/// Text form of a cell, `None` for empty cells.
///
/// Whole numbers print without a fractional part.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Numeric value of a cell; text cells are never numbers.
pub fn cell_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

// =============================================================================
// Workbook
// =============================================================================

/// A source of named sheets.
pub enum Workbook {
    Spreadsheet {
        path: PathBuf,
        sheets: Sheets<BufReader<File>>,
    },
    CsvDirectory {
        path: PathBuf,
    },
}

impl Workbook {
    /// Open a spreadsheet file or a directory of CSV exports.
    pub fn open(path: impl AsRef<Path>) -> SheetResult<Self> {
        let path = path.as_ref().to_path_buf();

        if path.is_dir() {
            return Ok(Self::CsvDirectory { path });
        }

        let sheets = open_workbook_auto(&path).map_err(|e| SheetError::Workbook {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self::Spreadsheet { path, sheets })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Spreadsheet { sheets, .. } => sheets.sheet_names(),
            Self::CsvDirectory { path } => {
                let mut names: Vec<String> = std::fs::read_dir(path)
                    .map(|entries| {
                        entries
                            .flatten()
                            .map(|e| e.path())
                            .filter(|p| {
                                p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"))
                            })
                            .filter_map(|p| {
                                p.file_stem().and_then(|s| s.to_str()).map(String::from)
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                names.sort();
                names
            }
        }
    }

    /// Read one sheet with its header on the given 0-indexed row.
    pub fn read_sheet(&mut self, name: &str, header_row: usize) -> SheetResult<Sheet> {
        let grid = match self {
            Self::Spreadsheet { path, sheets } => {
                if !sheets.sheet_names().iter().any(|n| n == name) {
                    return Err(SheetError::SheetNotFound {
                        path: path.display().to_string(),
                        sheet: name.to_string(),
                    });
                }

                let range = sheets.worksheet_range(name).map_err(|e| SheetError::Workbook {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;

                // Range starts at the first used cell; pad so row numbers stay absolute
                let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);
                let mut grid: Vec<Vec<Value>> = vec![Vec::new(); first_row];
                grid.extend(range.rows().map(|cells| cells.iter().map(cell_to_value).collect()));
                grid
            }
            Self::CsvDirectory { path } => {
                let file = path.join(format!("{}.csv", name));
                if !file.is_file() {
                    return Err(SheetError::SheetNotFound {
                        path: path.display().to_string(),
                        sheet: name.to_string(),
                    });
                }
                self::csv::read_csv_grid(&file)?
            }
        };

        Sheet::from_grid(name, grid, header_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[Value]]) -> Vec<Vec<Value>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_header_offset() {
        let g = grid(&[
            &[json!("C2A 2026 TAM")],
            &[],
            &[json!("Company Name"), json!("Country")],
            &[json!("Elekta"), json!("Sweden")],
        ]);
        let sheet = Sheet::from_grid("Industrial Full", g, 2).unwrap();

        assert_eq!(sheet.headers, vec!["Company Name", "Country"]);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0]["Company Name"], "Elekta");
    }

    #[test]
    fn test_headers_trimmed_and_named() {
        let g = grid(&[&[json!(" Revenue ($Bn) "), Value::Null, json!("Notes"), json!("Notes")]]);
        let sheet = Sheet::from_grid("s", g, 0).unwrap();

        assert_eq!(
            sheet.headers,
            vec!["Revenue ($Bn)", "Unnamed: 1", "Notes", "Notes.1"]
        );
    }

    #[test]
    fn test_blank_rows_dropped_and_short_rows_padded() {
        let g = grid(&[
            &[json!("Deal Name"), json!("Deal Stage")],
            &[Value::Null, Value::Null],
            &[json!("Acme - Renewal")],
        ]);
        let sheet = Sheet::from_grid("Pipeline", g, 0).unwrap();

        assert_eq!(sheet.rows.len(), 1);
        assert!(sheet.rows[0]["Deal Stage"].is_null());
    }

    #[test]
    fn test_header_out_of_range() {
        let g = grid(&[&[json!("only row")]]);
        let err = Sheet::from_grid("CRA TAM", g, 3).unwrap_err();
        assert!(matches!(err, SheetError::HeaderOutOfRange { header_row: 3, .. }));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_to_value(&Data::Float(5000.0)), json!(5000));
        assert_eq!(cell_to_value(&Data::Float(2.5)), json!(2.5));
        assert_eq!(cell_to_value(&Data::String(String::new())), Value::Null);
        assert_eq!(cell_to_value(&Data::Empty), Value::Null);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!(1)), Some("1".to_string()));
        assert_eq!(cell_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&json!("High")), Some("High".to_string()));
        assert_eq!(cell_text(&Value::Null), None);
    }

    #[test]
    fn test_csv_directory_workbook() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Pipeline.csv"),
            "Deal Name,Total Amount\nElekta: BOM,120000\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut workbook = Workbook::open(dir.path()).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Pipeline"]);

        let sheet = workbook.read_sheet("Pipeline", 0).unwrap();
        assert_eq!(sheet.rows[0]["Total Amount"], json!(120000));

        let missing = workbook.read_sheet("Account Assignments", 0);
        assert!(matches!(missing, Err(SheetError::SheetNotFound { .. })));
    }

    #[test]
    fn test_missing_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Workbook::open(dir.path().join("missing.xlsx"));
        assert!(matches!(result, Err(SheetError::Workbook { .. })));
    }
}
