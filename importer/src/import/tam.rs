//! TAM workbook import.

use super::{read_sheets, Importer};
use crate::backend::{to_rows, Backend};
use crate::error::ImportResult;
use crate::extract::extract_tam_account;
use crate::logs::{log_info, log_info_indent, log_success_indent};
use crate::models::{Table, TamAccount, Vertical};

/// Rows per insert request.
pub const TAM_BATCH_SIZE: usize = 50;

/// A TAM sheet and the vertical its accounts belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TamSheet {
    pub name: &'static str,
    pub vertical: Vertical,
    /// 0-indexed row holding the column headers
    pub header_row: usize,
}

pub const TAM_SHEETS: [TamSheet; 4] = [
    TamSheet {
        name: "Medical Device TAM",
        vertical: Vertical::MedicalDevice,
        header_row: 3,
    },
    TamSheet {
        name: "CRA TAM",
        vertical: Vertical::CraRegulatory,
        header_row: 3,
    },
    TamSheet {
        name: "Automotive TAM",
        vertical: Vertical::Automotive,
        header_row: 3,
    },
    TamSheet {
        name: "Industrial Full",
        vertical: Vertical::Industrial,
        header_row: 2,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSummary {
    pub sheet: String,
    pub accounts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TamReport {
    pub sheets: Vec<SheetSummary>,
    /// Every account built, in sheet then row order
    pub accounts: Vec<TamAccount>,
    /// Rows the backend stored; always 0 in a dry run
    pub inserted: usize,
}

impl<'a, B: Backend + ?Sized> Importer<'a, B> {
    /// Import the four TAM sheets.
    pub async fn import_tam(&self) -> ImportResult<TamReport> {
        let path = &self.settings.sources.tam;
        self.announce("TAM Accounts", path);

        let layout: Vec<(&str, usize)> =
            TAM_SHEETS.iter().map(|s| (s.name, s.header_row)).collect();
        let sheets = read_sheets(path, &layout)?;

        let mut report = TamReport {
            sheets: Vec::with_capacity(TAM_SHEETS.len()),
            accounts: Vec::new(),
            inserted: 0,
        };

        for (tam_sheet, sheet) in TAM_SHEETS.iter().zip(sheets) {
            log_info_indent(
                format!("Processing: {} ({})", tam_sheet.name, tam_sheet.vertical.label()),
                1,
            );

            let accounts: Vec<TamAccount> = sheet
                .rows
                .iter()
                .filter_map(|row| extract_tam_account(row, tam_sheet.vertical))
                .collect();
            log_info_indent(format!("Found {} companies", accounts.len()), 2);

            if self.dry_run {
                let sample = match accounts.first() {
                    Some(account) => serde_json::to_string(account)?,
                    None => "None".to_string(),
                };
                log_info_indent(format!("Sample record: {}", sample), 2);
            } else {
                let rows = to_rows(&accounts)?;
                for (i, batch) in rows.chunks(TAM_BATCH_SIZE).enumerate() {
                    let stored = self.backend.insert(Table::TamAccounts, batch.to_vec()).await?;
                    report.inserted += stored.len();
                    log_success_indent(
                        format!("Inserted batch {}: {} records", i + 1, batch.len()),
                        2,
                    );
                }
            }

            report.sheets.push(SheetSummary {
                sheet: tam_sheet.name.to_string(),
                accounts: accounts.len(),
            });
            report.accounts.extend(accounts);
        }

        log_info(format!(
            "Total TAM accounts {}imported: {}",
            self.would_be(),
            report.inserted
        ));
        Ok(report)
    }
}
