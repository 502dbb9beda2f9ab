//! Order-preserving grouping of spans
//!
//! Spans are bucketed by `(Resource, Business Driver, Location)`. Groups keep
//! the order in which their key first appears in the input, and spans keep
//! input order inside their group, so the chart reads top-to-bottom the same
//! way the spreadsheet does.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::{ColorSlots, MonthNaming, TaskSpan};

/// Grouping key: resource, business driver, location
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub resource: String,
    pub driver: String,
    pub location: String,
}

impl GroupKey {
    pub fn new(
        resource: impl Into<String>,
        driver: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            driver: driver.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.resource, self.driver, self.location)
    }
}

/// All spans sharing one group key
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskGroup {
    pub key: GroupKey,
    /// Spans in input order
    pub spans: Vec<TaskSpan>,
}

impl TaskGroup {
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Aggregate the group for summary tables
    pub fn summary(&self) -> GroupSummary {
        let mut tasks = BTreeSet::new();
        let mut sub_categories = BTreeSet::new();
        let mut data = BTreeSet::new();
        let mut months = BTreeSet::new();
        let mut total_duration = 0u32;

        for span in &self.spans {
            let record = &span.record;
            tasks.insert(record.task.clone());
            if let Some(sub) = non_blank(record.sub_category.as_deref()) {
                sub_categories.insert(sub.to_string());
            }
            if let Some(value) = non_blank(record.data.as_deref()) {
                data.insert(value.to_string());
            }
            months.extend(span.months());
            total_duration += u32::from(span.active_months);
        }

        GroupSummary {
            key: self.key.clone(),
            tasks: tasks.into_iter().collect(),
            sub_categories: sub_categories.into_iter().collect(),
            data: data.into_iter().collect(),
            task_count: self.spans.len(),
            total_duration,
            months: months.into_iter().collect(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Per-group aggregate shown in "Resource Summary" tables
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    /// Distinct task names, sorted
    pub tasks: Vec<String>,
    /// Distinct sub-categories, sorted
    pub sub_categories: Vec<String>,
    /// Distinct data values, sorted
    pub data: Vec<String>,
    pub task_count: usize,
    /// Sum of marked months over all spans
    pub total_duration: u32,
    /// Union of covered months, ascending
    pub months: Vec<u8>,
}

impl GroupSummary {
    /// Covered months joined as names, e.g. "Mar, Apr, May"
    pub fn month_names(&self, naming: MonthNaming) -> String {
        self.months
            .iter()
            .filter_map(|m| naming.name(*m))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Grouped spans in first-seen order. Input to every renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    groups: Vec<TaskGroup>,
}

impl Timeline {
    pub fn groups(&self) -> &[TaskGroup] {
        &self.groups
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of spans across all groups
    pub fn span_count(&self) -> usize {
        self.groups.iter().map(TaskGroup::len).sum()
    }

    /// All spans, group by group
    pub fn spans(&self) -> impl Iterator<Item = &TaskSpan> {
        self.groups.iter().flat_map(|g| g.spans.iter())
    }

    /// Palette slots for every task name, in first-seen order
    pub fn color_slots(&self) -> ColorSlots {
        ColorSlots::from_names(self.spans().map(|s| s.record.task.as_str()))
    }

    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups.iter().map(TaskGroup::summary).collect()
    }
}

/// Partition spans by group key, preserving first-seen order
pub fn group_spans(spans: impl IntoIterator<Item = TaskSpan>) -> Timeline {
    let mut groups: Vec<TaskGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for span in spans {
        let key = span.group_key();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(TaskGroup {
                key,
                spans: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].spans.push(span);
    }

    tracing::debug!(groups = groups.len(), "grouped spans");
    Timeline { groups }
}
