//! Workbook input through calamine

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::{Cell, LoadError, RawRow, RawTable};

/// Read the first worksheet of a workbook.
///
/// The first non-empty row of the used range is the header row. Row numbers
/// are 1-based positions in the sheet, so they match what a user sees.
pub fn read_first_sheet(path: &Path) -> Result<RawTable, LoadError> {
    let workbook_error = |message: String| LoadError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)?
        .map_err(|e| workbook_error(e.to_string()))?;

    if let Some(name) = workbook.sheet_names().first() {
        tracing::debug!(sheet = %name, "reading first worksheet");
    }

    Ok(range_to_table(&range))
}

/// Convert a used range into a table
pub fn range_to_table(range: &Range<Data>) -> RawTable {
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let first_col = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows().enumerate();
    let Some((_, header_row)) = rows.next() else {
        return RawTable::default();
    };

    // Leading empty columns keep their position so indices stay aligned
    let mut headers = vec![String::new(); first_col];
    headers.extend(header_row.iter().map(|d| convert(d).text().unwrap_or_default()));

    let rows = rows
        .map(|(offset, cells)| {
            let mut values = vec![Cell::Empty; first_col];
            values.extend(cells.iter().map(convert));
            RawRow::new(first_row + offset + 1, values)
        })
        .collect();

    RawTable { headers, rows }
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
