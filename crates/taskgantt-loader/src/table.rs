//! Format-independent table model and header resolution

use taskgantt_core::{ColumnAliases, MonthNaming, TaskRecord, MONTH_COUNT};

use crate::LoadError;

/// A single cell value, reduced to what the loader cares about
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Display text, `None` for empty or whitespace-only cells
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        }
    }

    /// Whether the cell marks a month as active.
    ///
    /// Any non-blank text counts. Numeric zero and `FALSE` do not.
    pub fn is_marker(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(s) => !s.trim().is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One data row with its 1-based sheet row number
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    pub number: usize,
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(number: usize, cells: Vec<Cell>) -> Self {
        Self { number, cells }
    }

    pub fn cell(&self, index: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.cells.get(index).unwrap_or(&EMPTY)
    }

    /// True when no cell has content
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.text().is_none())
    }
}

/// Headers plus data rows, as read from any input format
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Resolved positions of the logical columns
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    task: usize,
    driver: usize,
    resource: usize,
    location: usize,
    sub_category: Option<usize>,
    group: Option<usize>,
    data: Option<usize>,
    months: [Option<usize>; MONTH_COUNT],
    pub(crate) naming: MonthNaming,
}

impl ColumnMap {
    pub(crate) fn resolve(headers: &[String], aliases: &ColumnAliases) -> Result<Self, LoadError> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::EmptySheet);
        }

        let find = |names: &[String]| {
            headers
                .iter()
                .position(|h| ColumnAliases::matches(names, h))
        };

        let mut missing = Vec::new();
        let mut required = |names: &[String], fallback: &str| {
            let found = find(names);
            if found.is_none() {
                missing.push(names.first().map_or(fallback, String::as_str).to_string());
            }
            found.unwrap_or_default()
        };

        let task = required(&aliases.task, "Task");
        let driver = required(&aliases.driver, "Business Driver");
        let resource = required(&aliases.resource, "Resource");
        let location = required(&aliases.location, "Location");

        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let naming = detect_naming(headers).ok_or(LoadError::NoMonthColumns)?;
        let mut months = [None; MONTH_COUNT];
        for (index, header) in headers.iter().enumerate() {
            if let Some(month) = naming.month_of(header) {
                let slot = &mut months[usize::from(month) - 1];
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }

        Ok(Self {
            task,
            driver,
            resource,
            location,
            sub_category: find(&aliases.sub_category),
            group: find(&aliases.group),
            data: find(&aliases.data),
            months,
            naming,
        })
    }

    pub(crate) fn month_count(&self) -> usize {
        self.months.iter().flatten().count()
    }

    pub(crate) fn record(&self, row: &RawRow) -> TaskRecord {
        let text = |index: usize| row.cell(index).text().unwrap_or_default();
        let optional = |index: Option<usize>| index.and_then(|i| row.cell(i).text());

        let mut months: [Option<String>; MONTH_COUNT] = Default::default();
        for (cell, column) in months.iter_mut().zip(self.months) {
            *cell = column
                .map(|i| row.cell(i))
                .filter(|c| c.is_marker())
                .and_then(Cell::text);
        }

        TaskRecord {
            row: row.number,
            task: text(self.task),
            sub_category: optional(self.sub_category),
            driver: text(self.driver),
            resource: text(self.resource),
            group: optional(self.group),
            data: optional(self.data),
            location: text(self.location),
            months,
        }
    }
}

/// Pick the naming that matches more distinct headers.
/// "May" is shared by both; ties go to the abbreviated form.
fn detect_naming(headers: &[String]) -> Option<MonthNaming> {
    let count = |naming: MonthNaming| {
        let mut seen = [false; MONTH_COUNT];
        for header in headers {
            if let Some(month) = naming.month_of(header) {
                seen[usize::from(month) - 1] = true;
            }
        }
        seen.iter().filter(|s| **s).count()
    };

    let abbreviated = count(MonthNaming::Abbreviated);
    let full = count(MonthNaming::Full);

    match (abbreviated, full) {
        (0, 0) => None,
        (a, f) if f > a => Some(MonthNaming::Full),
        _ => Some(MonthNaming::Abbreviated),
    }
}
