//! Month range extraction
//!
//! Turns a [`TaskRecord`] into a [`TaskSpan`]: the inclusive range between
//! its first and last marked month. Rows without any marker cannot be drawn
//! and are reported back as [`SpanError::NoActiveMonth`] instead.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{GroupKey, MonthNaming, SpanError, TaskRecord};

/// A task together with its active month range
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskSpan {
    /// The row this span was derived from
    pub record: TaskRecord,
    /// First marked month (1-based)
    pub start_month: u8,
    /// Last marked month (1-based), never before `start_month`
    pub end_month: u8,
    /// Number of marked cells, which may be fewer than the range width
    pub active_months: u8,
}

impl TaskSpan {
    /// Derive the span of a record.
    pub fn from_record(record: TaskRecord) -> Result<Self, SpanError> {
        let months: Vec<u8> = record.active_months().collect();
        let (Some(&start_month), Some(&end_month)) = (months.first(), months.last()) else {
            return Err(SpanError::NoActiveMonth {
                row: record.row,
                task: record.task,
            });
        };
        let active_months = months.len() as u8;

        Ok(Self {
            record,
            start_month,
            end_month,
            active_months,
        })
    }

    /// Covered months, inclusive
    pub fn months(&self) -> RangeInclusive<u8> {
        self.start_month..=self.end_month
    }

    /// Whether the bar covers the given month
    pub fn covers(&self, month: u8) -> bool {
        self.months().contains(&month)
    }

    /// Number of months between start and end, inclusive
    pub fn width(&self) -> u8 {
        self.end_month - self.start_month + 1
    }

    pub fn overlaps(&self, other: &TaskSpan) -> bool {
        self.start_month <= other.end_month && other.start_month <= self.end_month
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(
            &self.record.resource,
            &self.record.driver,
            &self.record.location,
        )
    }

    /// First day of the start month in `year`
    pub fn start_date(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, u32::from(self.start_month), 1)
    }

    /// Last day of the end month in `year`
    pub fn end_date(&self, year: i32) -> Option<NaiveDate> {
        last_day_of_month(year, u32::from(self.end_month))
    }

    /// "Mar 2026 - May 2026" style label
    pub fn period_label(&self, year: i32, naming: MonthNaming) -> String {
        let start = naming.name(self.start_month).unwrap_or_default();
        let end = naming.name(self.end_month).unwrap_or_default();
        format!("{start} {year} - {end} {year}")
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    first_of_next.pred_opt().filter(|d| d.month() == month)
}

/// Spans extracted from a batch of records
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// Spans in input order
    pub spans: Vec<TaskSpan>,
    /// Rows that had no active month, in input order
    pub skipped: Vec<SpanError>,
}

/// Extract spans from records, skipping (and collecting) rows without markers
pub fn extract_spans(records: impl IntoIterator<Item = TaskRecord>) -> Extraction {
    let mut extraction = Extraction::default();

    for record in records {
        match TaskSpan::from_record(record) {
            Ok(span) => extraction.spans.push(span),
            Err(err) => {
                tracing::warn!("skipping {err}");
                extraction.skipped.push(err);
            }
        }
    }

    tracing::debug!(
        spans = extraction.spans.len(),
        skipped = extraction.skipped.len(),
        "extracted month spans"
    );
    extraction
}
