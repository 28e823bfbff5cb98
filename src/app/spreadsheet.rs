// Autoreg - app/spreadsheet.rs
//
// xlsx-backed output: opens the copied template, writes the data rows into
// the configured worksheet, and saves in place.

use crate::core::export::{self, CellSink, SpreadsheetLayout};
use crate::core::model::ClassifiedRecord;
use crate::util::error::OutputError;
use std::path::Path;
use umya_spreadsheet::Worksheet;

impl CellSink for Worksheet {
    fn set_cell(&mut self, coordinate: &str, value: &str) {
        // Always a string cell, so numeric-looking cookies are not reformatted.
        self.get_cell_mut(coordinate).set_value_string(value);
    }
}

/// Fill the spreadsheet at `path` (a copy of the template) with one row per record.
///
/// Returns the number of rows written.
pub fn write_spreadsheet(
    path: &Path,
    records: &[ClassifiedRecord],
    layout: &SpreadsheetLayout,
) -> Result<usize, OutputError> {
    let mut book =
        umya_spreadsheet::reader::xlsx::read(path).map_err(|e| OutputError::OpenSpreadsheet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let sheet = book
        .get_sheet_by_name_mut(&layout.sheet_name)
        .ok_or_else(|| OutputError::MissingSheet {
            path: path.to_path_buf(),
            sheet: layout.sheet_name.clone(),
        })?;

    let rows = export::write_rows(records, layout, sheet)?;

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| {
        OutputError::SaveSpreadsheet {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    tracing::info!(path = %path.display(), rows, "Spreadsheet saved");
    Ok(rows)
}
