//! CSV input
//!
//! Every field is read as text; a month marker of `0` therefore still counts
//! as active in a CSV, unlike a numeric zero in a workbook.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::{Cell, LoadError, RawRow, RawTable};

const BOM: char = '\u{feff}';

pub fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_csv_from(file)
}

/// Read CSV from any reader. Rows may have differing lengths.
pub fn read_csv_from<R: Read>(reader: R) -> Result<RawTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = reader.records();
    let Some(header) = records.next().transpose()? else {
        return Ok(RawTable::default());
    };

    let headers = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(BOM).trim().to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let number = record
            .position()
            .map_or(rows.len() + 2, |p| p.line() as usize);
        let cells = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(RawRow::new(number, cells));
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_headers_and_rows() {
        let input = "\u{feff}Task,Resource,Jan,Feb\nPlanning , PM ,X,\n";
        let table = read_csv_from(input.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Task", "Resource", "Jan", "Feb"]);
        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.number, 2);
        assert_eq!(row.cell(0).text().as_deref(), Some("Planning"));
        assert_eq!(row.cell(1).text().as_deref(), Some("PM"));
        assert!(row.cell(2).is_marker());
        assert!(!row.cell(3).is_marker());
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let input = "Task,Jan,Feb,Mar\nShort,X\nLong,X,X,X,extra\n";
        let table = read_csv_from(input.as_bytes()).unwrap();
        assert_eq!(table.rows[0].cells.len(), 2);
        assert!(!table.rows[0].cell(3).is_marker());
        assert_eq!(table.rows[1].number, 3);
    }

    #[test]
    fn zero_text_is_a_marker() {
        let table = read_csv_from("Task,Jan\nt,0\n".as_bytes()).unwrap();
        assert!(table.rows[0].cell(1).is_marker());
    }

    #[test]
    fn empty_input() {
        let table = read_csv_from("".as_bytes()).unwrap();
        assert_eq!(table, RawTable::default());
    }
}
