//! # taskgantt-loader
//!
//! Reads task spreadsheets into [`TaskRecord`]s.
//!
//! This crate provides:
//! - Workbook input (XLSX, XLSM, XLSB, XLS, ODS) through `calamine`
//! - CSV input through `csv`
//! - Header resolution with configurable aliases and month-naming detection
//!
//! Only the first worksheet is read. The first row holds the headers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use taskgantt_core::ColumnAliases;
//! use taskgantt_loader::load_file;
//!
//! let sheet = load_file(Path::new("tasks.xlsx"), &ColumnAliases::default())?;
//! println!("{} rows, {:?} month names", sheet.records.len(), sheet.naming);
//! # Ok::<(), taskgantt_loader::LoadError>(())
//! ```

pub mod delimited;
pub mod table;
pub mod workbook;

pub use table::{Cell, RawRow, RawTable};

use std::path::{Path, PathBuf};

use taskgantt_core::{ColumnAliases, MonthNaming, TaskRecord};
use thiserror::Error;

/// Loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported input format '{0}' (expected xlsx, xlsm, xlsb, xls, ods or csv)")]
    UnsupportedFormat(String),

    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("Input sheet is empty")]
    EmptySheet,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No month columns found (Jan-Dec or January-December)")]
    NoMonthColumns,
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Spreadsheet workbook read by calamine
    Workbook,
    /// Comma separated values
    Csv,
}

/// Detect input format from extension
pub fn detect_format(path: &Path) -> Result<InputFormat, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Workbook),
        "csv" => Ok(InputFormat::Csv),
        _ => Err(LoadError::UnsupportedFormat(extension)),
    }
}

/// Records read from one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSheet {
    /// Data rows in sheet order, blank rows removed
    pub records: Vec<TaskRecord>,
    /// Month naming used by the sheet's headers
    pub naming: MonthNaming,
    /// How many of the twelve month columns were present
    pub month_columns: usize,
}

/// Load a task spreadsheet from disk (format chosen by extension)
pub fn load_file(path: &Path, aliases: &ColumnAliases) -> Result<LoadedSheet, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let table = match detect_format(path)? {
        InputFormat::Workbook => workbook::read_first_sheet(path)?,
        InputFormat::Csv => delimited::read_csv(path)?,
    };
    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read input table"
    );

    load_table(table, aliases)
}

/// Turn an already-read table into records
pub fn load_table(table: RawTable, aliases: &ColumnAliases) -> Result<LoadedSheet, LoadError> {
    let columns = table::ColumnMap::resolve(&table.headers, aliases)?;
    let records = table
        .rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| columns.record(row))
        .collect();

    Ok(LoadedSheet {
        records,
        naming: columns.naming,
        month_columns: columns.month_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("a.xlsx")).unwrap(), InputFormat::Workbook);
        assert_eq!(detect_format(Path::new("a.XLS")).unwrap(), InputFormat::Workbook);
        assert_eq!(detect_format(Path::new("a.ods")).unwrap(), InputFormat::Workbook);
        assert_eq!(detect_format(Path::new("dir/a.csv")).unwrap(), InputFormat::Csv);
        assert!(matches!(
            detect_format(Path::new("a.json")),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "json"
        ));
        assert!(matches!(
            detect_format(Path::new("noext")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_reported_before_format() {
        let err = load_file(Path::new("/definitely/not/here.xlsx"), &ColumnAliases::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn missing_columns_message_lists_all() {
        let err = LoadError::MissingColumns(vec!["Location".into(), "Task".into()]);
        assert_eq!(err.to_string(), "Missing required columns: Location, Task");
    }
}
