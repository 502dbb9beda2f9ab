//! # taskgantt-core
//!
//! Core domain model and traits for taskgantt.
//!
//! This crate provides:
//! - Domain types: `TaskRecord`, `TaskSpan`, `GroupKey`, `TaskGroup`, `Timeline`
//! - Month range extraction and order-preserving grouping
//! - Color slot assignment shared by every renderer
//! - The `Renderer` trait, configuration, and error types
//!
//! ## Example
//!
//! ```rust
//! use taskgantt_core::{build_timeline, TaskRecord};
//!
//! let records = vec![
//!     TaskRecord::new("Testing")
//!         .resource("QA Team")
//!         .driver("Quality")
//!         .location("New York")
//!         .mark(3)
//!         .mark(5),
//!     TaskRecord::new("Idle").resource("QA Team"),
//! ];
//!
//! let report = build_timeline(records);
//! let span = &report.timeline.groups()[0].spans[0];
//! assert_eq!((span.start_month, span.end_month), (3, 5));
//! assert_eq!(report.skipped.len(), 1);
//! ```

pub mod color;
pub mod config;
pub mod group;
pub mod span;

pub use color::{ColorSlots, Palette, Rgb};
pub use config::{ColumnAliases, GanttConfig};
pub use group::{group_spans, GroupKey, GroupSummary, TaskGroup, Timeline};
pub use span::{extract_spans, Extraction, TaskSpan};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of month columns in every task row.
pub const MONTH_COUNT: usize = 12;

const ABBREVIATED_MONTHS: [&str; MONTH_COUNT] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FULL_MONTHS: [&str; MONTH_COUNT] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ============================================================================
// Month naming
// ============================================================================

/// How month columns are named in a spreadsheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthNaming {
    /// `Jan`, `Feb`, ... `Dec`
    #[default]
    Abbreviated,
    /// `January`, `February`, ... `December`
    Full,
}

impl MonthNaming {
    /// All twelve column names in calendar order
    pub const fn names(self) -> &'static [&'static str; MONTH_COUNT] {
        match self {
            Self::Abbreviated => &ABBREVIATED_MONTHS,
            Self::Full => &FULL_MONTHS,
        }
    }

    /// Name of a 1-based month, or `None` outside 1..=12
    pub fn name(self, month: u8) -> Option<&'static str> {
        let index = usize::from(month).checked_sub(1)?;
        self.names().get(index).copied()
    }

    /// 1-based month number for a column header, ignoring case and padding
    pub fn month_of(self, header: &str) -> Option<u8> {
        let header = header.trim();
        self.names()
            .iter()
            .position(|name| name.eq_ignore_ascii_case(header))
            .map(|index| index as u8 + 1)
    }
}

impl std::str::FromStr for MonthNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abbreviated" | "short" => Ok(Self::Abbreviated),
            "full" | "long" => Ok(Self::Full),
            other => Err(format!("unknown month naming '{other}' (expected 'abbreviated' or 'full')")),
        }
    }
}

// ============================================================================
// Task Record
// ============================================================================

/// One input row of the task spreadsheet
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// 1-based spreadsheet row the record was read from (0 when built in code)
    pub row: usize,
    /// Task name
    pub task: String,
    /// Optional sub-category ("Task 1" column)
    pub sub_category: Option<String>,
    /// Business driver
    pub driver: String,
    /// Resource (person or team)
    pub resource: String,
    /// Optional display group
    pub group: Option<String>,
    /// Optional free-text data
    pub data: Option<String>,
    /// Location
    pub location: String,
    /// Marker cells for January..December, `None` when blank
    pub months: [Option<String>; MONTH_COUNT],
}

impl TaskRecord {
    /// Create a record with the given task name and no markers
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Self::default()
        }
    }

    /// Set the source row number
    pub fn row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Mark a 1-based month with the conventional "X"
    pub fn mark(self, month: u8) -> Self {
        self.marker(month, "X")
    }

    /// Put arbitrary marker text into a 1-based month cell.
    /// Out-of-range months are ignored.
    pub fn marker(mut self, month: u8, text: impl Into<String>) -> Self {
        if let Some(cell) = usize::from(month)
            .checked_sub(1)
            .and_then(|index| self.months.get_mut(index))
        {
            *cell = Some(text.into());
        }
        self
    }

    /// Whether the 1-based month holds a non-blank marker
    pub fn is_active(&self, month: u8) -> bool {
        usize::from(month)
            .checked_sub(1)
            .and_then(|index| self.months.get(index))
            .is_some_and(|cell| is_marker(cell.as_deref()))
    }

    /// Active months in calendar order
    pub fn active_months(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MONTH_COUNT as u8).filter(|month| self.is_active(*month))
    }

    /// Group label, falling back to the resource when the row has none
    pub fn group_or_resource(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.resource)
    }

    /// Sub-category when present, otherwise the task name
    pub fn display_label(&self) -> &str {
        self.sub_category
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.task)
    }
}

/// Any cell with non-whitespace content counts as a marker
fn is_marker(cell: Option<&str>) -> bool {
    cell.is_some_and(|text| !text.trim().is_empty())
}

/// Result of running extraction and grouping over a set of records
#[derive(Clone, Debug, Default)]
pub struct BuildReport {
    /// Grouped spans ready for rendering
    pub timeline: Timeline,
    /// Rows dropped because no month was marked
    pub skipped: Vec<SpanError>,
}

/// Extract spans from records and group them in one step
pub fn build_timeline(records: impl IntoIterator<Item = TaskRecord>) -> BuildReport {
    let Extraction { spans, skipped } = extract_spans(records);
    BuildReport {
        timeline: group_spans(spans),
        skipped,
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a grouped timeline to the output format
    fn render(&self, timeline: &Timeline) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Per-row extraction error
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("row {row}: task '{task}' has no active month")]
    NoActiveMonth { row: usize, task: String },
}

impl SpanError {
    /// Spreadsheet row the error refers to
    pub fn row(&self) -> usize {
        match self {
            Self::NoActiveMonth { row, .. } => *row,
        }
    }
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

// ============================================================================
// Tests
// ============================================================================
