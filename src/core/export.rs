// Autoreg - core/export.rs
//
// Record -> spreadsheet row contract.
// Core layer: writes to any CellSink, never touches the filesystem.

use crate::core::model::ClassifiedRecord;
use crate::util::constants;
use crate::util::error::OutputError;

/// Where classified records land in the mass-import sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetLayout {
    pub sheet_name: String,
    /// First data row (1-based). Rows above it hold template headers.
    pub start_row: u32,
    pub profile_name_column: String,
    pub cookie_column: String,
    pub user_agent_column: String,
    pub description_column: String,
}

impl Default for SpreadsheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: constants::DEFAULT_SHEET_NAME.to_string(),
            start_row: constants::DEFAULT_START_ROW,
            profile_name_column: constants::DEFAULT_PROFILE_NAME_COLUMN.to_string(),
            cookie_column: constants::DEFAULT_COOKIE_COLUMN.to_string(),
            user_agent_column: constants::DEFAULT_USER_AGENT_COLUMN.to_string(),
            description_column: constants::DEFAULT_DESCRIPTION_COLUMN.to_string(),
        }
    }
}

impl SpreadsheetLayout {
    /// Row that receives the record at `index` (0-based), or `None` when it
    /// would fall past the last worksheet row.
    pub fn row_for(&self, index: usize) -> Option<u32> {
        u32::try_from(index)
            .ok()
            .and_then(|i| self.start_row.checked_add(i))
            .filter(|row| *row <= constants::MAX_XLSX_ROW)
    }

    /// (column, value) pairs for one record, in column order of the contract.
    pub fn cells<'r>(&self, record: &'r ClassifiedRecord) -> [(&str, &'r str); 4] {
        [
            (self.profile_name_column.as_str(), record.profile_name.as_str()),
            (self.cookie_column.as_str(), record.cookie.as_str()),
            (self.user_agent_column.as_str(), record.user_agent.as_str()),
            (self.description_column.as_str(), record.description.as_str()),
        ]
    }
}

/// 1-based index of an A1-style column name (`A` = 1, `XFD` = 16384).
///
/// `None` for anything that is not ASCII letters or does not fit in a `u32`.
pub fn column_index(column: &str) -> Option<u32> {
    if column.is_empty() {
        return None;
    }
    column.bytes().try_fold(0u32, |acc, b| {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(b.to_ascii_uppercase() - b'A' + 1);
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Anything that accepts string values at A1-style cell coordinates.
pub trait CellSink {
    fn set_cell(&mut self, coordinate: &str, value: &str);
}

/// Write one row per record starting at `layout.start_row`, in input order.
///
/// Every record writes all four cells, including empty fields, so a row
/// exists for every record. Returns the number of rows written.
///
/// Fails before touching the sink when the last record would land past the
/// worksheet's final row.
pub fn write_rows<S: CellSink>(
    records: &[ClassifiedRecord],
    layout: &SpreadsheetLayout,
    sink: &mut S,
) -> Result<usize, OutputError> {
    if let Some(last) = records.len().checked_sub(1) {
        if layout.row_for(last).is_none() {
            return Err(OutputError::RowLimitExceeded {
                records: records.len(),
                start_row: layout.start_row,
                max_row: constants::MAX_XLSX_ROW,
            });
        }
    }

    for (index, record) in records.iter().enumerate() {
        let Some(row) = layout.row_for(index) else {
            break;
        };
        for (column, value) in layout.cells(record) {
            sink.set_cell(&format!("{column}{row}"), value);
        }
    }

    tracing::debug!(
        rows = records.len(),
        start_row = layout.start_row,
        "Rows written"
    );

    Ok(records.len())
}
