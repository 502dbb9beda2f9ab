//! Loading task spreadsheets from disk
//!
//! Workbook fixtures are written with rust_xlsxwriter into a temp dir and read
//! back through the public `load_file` entry point.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use taskgantt_core::{build_timeline, ColumnAliases, MonthNaming};
use taskgantt_loader::{load_file, LoadError};
use tempfile::TempDir;

/// A cell value in a fixture row
enum V<'a> {
    S(&'a str),
    N(f64),
    B(bool),
    Blank,
}

fn write_xlsx(dir: &Path, name: &str, headers: &[&str], rows: &[Vec<V<'_>>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, value) in row.iter().enumerate() {
            let c = c as u16;
            match value {
                V::S(s) => {
                    sheet.write_string(r, c, *s).unwrap();
                }
                V::N(n) => {
                    sheet.write_number(r, c, *n).unwrap();
                }
                V::B(b) => {
                    sheet.write_boolean(r, c, *b).unwrap();
                }
                V::Blank => {}
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

const ABBREVIATED: [&str; 16] = [
    "Task", "Business Driver", "Resource", "Location", "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn row<'a>(task: &'a str, resource: &'a str, months: &[u8]) -> Vec<V<'a>> {
    let mut cells = vec![V::S(task), V::S("Strategic"), V::S(resource), V::S("New York")];
    for month in 1..=12u8 {
        cells.push(if months.contains(&month) { V::S("X") } else { V::Blank });
    }
    cells
}

// =============================================================================
// Workbooks
// =============================================================================

#[test]
fn xlsx_with_abbreviated_months() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(
        dir.path(),
        "tasks.xlsx",
        &ABBREVIATED,
        &[
            row("Project Planning", "Project Manager", &[1, 2]),
            row("Testing", "QA Team", &[8, 9]),
        ],
    );

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    assert_eq!(sheet.naming, MonthNaming::Abbreviated);
    assert_eq!(sheet.month_columns, 12);
    assert_eq!(sheet.records.len(), 2);

    let planning = &sheet.records[0];
    assert_eq!(planning.row, 2);
    assert_eq!(planning.task, "Project Planning");
    assert_eq!(planning.resource, "Project Manager");
    assert_eq!(planning.location, "New York");
    assert_eq!(planning.active_months().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn xlsx_with_full_month_names_and_optional_columns() {
    let dir = TempDir::new().unwrap();
    let headers = [
        "Task", "Task 1", "Business Driver", "Resources", "Data", "Location", "January",
        "February", "March", "April", "May", "June", "July", "August", "September", "October",
        "November", "December",
    ];
    let mut cells = vec![
        V::S("System Design"),
        V::S("Design"),
        V::S("Technical"),
        V::S("System Architect"),
        V::S("Medium"),
        V::S("San Francisco"),
        V::Blank,
        V::Blank,
        V::S("X"),
        V::S("X"),
    ];
    cells.extend((0..8).map(|_| V::Blank));
    let path = write_xlsx(dir.path(), "full.xlsx", &headers, &[cells]);

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    assert_eq!(sheet.naming, MonthNaming::Full);

    let record = &sheet.records[0];
    assert_eq!(record.sub_category.as_deref(), Some("Design"));
    assert_eq!(record.resource, "System Architect");
    assert_eq!(record.data.as_deref(), Some("Medium"));
    assert_eq!(record.active_months().collect::<Vec<_>>(), vec![3, 4]);
}

#[test]
fn numeric_and_boolean_markers() {
    let dir = TempDir::new().unwrap();
    let mut cells = vec![V::S("Audit"), V::S("Quality"), V::S("QA"), V::S("London")];
    cells.extend([V::N(1.0), V::N(0.0), V::B(true), V::B(false), V::N(2.5)]);
    let path = write_xlsx(dir.path(), "numeric.xlsx", &ABBREVIATED, &[cells]);

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    assert_eq!(
        sheet.records[0].active_months().collect::<Vec<_>>(),
        vec![1, 3, 5]
    );
}

#[test]
fn blank_rows_are_dropped_but_row_numbers_kept() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(
        dir.path(),
        "gaps.xlsx",
        &ABBREVIATED,
        &[
            row("First", "PM", &[1]),
            (0..16).map(|_| V::Blank).collect(),
            row("Third", "PM", &[3]),
        ],
    );

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    let rows: Vec<_> = sheet.records.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![2, 4]);
}

#[test]
fn missing_location_is_rejected() {
    let dir = TempDir::new().unwrap();
    let headers = ["Task", "Business Driver", "Resource", "Jan", "Feb"];
    let path = write_xlsx(dir.path(), "noloc.xlsx", &headers, &[]);

    let err = load_file(&path, &ColumnAliases::default()).unwrap_err();
    match err {
        LoadError::MissingColumns(columns) => assert_eq!(columns, vec!["Location".to_string()]),
        other => panic!("expected missing columns, got {other}"),
    }
}

#[test]
fn unmarked_rows_are_loaded_then_skipped_by_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(
        dir.path(),
        "unmarked.xlsx",
        &ABBREVIATED,
        &[row("Scheduled", "PM", &[6]), row("Someday", "PM", &[])],
    );

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    assert_eq!(sheet.records.len(), 2);

    let report = build_timeline(sheet.records);
    assert_eq!(report.timeline.span_count(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].row(), 3);
}

#[test]
fn custom_aliases_from_config() {
    let dir = TempDir::new().unwrap();
    let headers = ["Task", "Business Driver", "Owner", "Location", "Jan"];
    let path = write_xlsx(
        dir.path(),
        "owner.xlsx",
        &headers,
        &[vec![V::S("t"), V::S("d"), V::S("Alice"), V::S("Paris"), V::S("X")]],
    );

    assert!(matches!(
        load_file(&path, &ColumnAliases::default()),
        Err(LoadError::MissingColumns(_))
    ));

    let aliases = ColumnAliases {
        resource: vec!["Owner".into()],
        ..ColumnAliases::default()
    };
    let sheet = load_file(&path, &aliases).unwrap();
    assert_eq!(sheet.records[0].resource, "Alice");
    assert_eq!(sheet.month_columns, 1);
}

// =============================================================================
// CSV
// =============================================================================

#[test]
fn csv_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.csv");
    std::fs::write(
        &path,
        "Task,Business Driver,Resources,Location,Jan,Feb,Mar\n\
         Planning,Strategic,PM,New York,X,X,\n\
         ,,,,,,\n\
         Review,Improvement,PM,New York,,,0\n",
    )
    .unwrap();

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    assert_eq!(sheet.records.len(), 2);
    assert_eq!(sheet.month_columns, 3);
    assert_eq!(sheet.records[1].task, "Review");
    assert_eq!(sheet.records[1].row, 4);
    // CSV cells are text, so "0" is a marker
    assert_eq!(sheet.records[1].active_months().collect::<Vec<_>>(), vec![3]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "{}").unwrap();

    let err = load_file(&path, &ColumnAliases::default()).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "json"));
}

#[test]
fn corrupt_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let err = load_file(&path, &ColumnAliases::default()).unwrap_err();
    assert!(matches!(err, LoadError::Workbook { .. }));
}

#[test]
fn sheet_without_data_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(dir.path(), "headers.xlsx", &ABBREVIATED, &[]);

    let sheet = load_file(&path, &ColumnAliases::default()).unwrap();
    assert!(sheet.records.is_empty());
}
