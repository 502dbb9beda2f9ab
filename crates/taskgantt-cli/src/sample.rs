//! Sample input workbook
//!
//! Ten tasks across a year, in the column layout the loader expects.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use taskgantt_core::MonthNaming;

/// One row of the sample sheet
#[derive(Debug, Clone, Copy)]
pub struct SampleTask {
    pub task: &'static str,
    pub sub_category: &'static str,
    pub driver: &'static str,
    pub resource: &'static str,
    pub data: &'static str,
    pub location: &'static str,
    /// Marked months, 1-based
    pub months: &'static [u8],
}

pub const SAMPLE_HEADERS: [&str; 6] = [
    "Task",
    "Task 1",
    "Business Driver",
    "Resources",
    "Data",
    "Location",
];

pub const SAMPLE_TASKS: [SampleTask; 10] = [
    SampleTask {
        task: "Project Planning",
        sub_category: "Planning",
        driver: "Strategic",
        resource: "Project Manager",
        data: "High",
        location: "New York",
        months: &[1, 2],
    },
    SampleTask {
        task: "Requirements Gathering",
        sub_category: "Analysis",
        driver: "Strategic",
        resource: "Business Analyst",
        data: "Medium",
        location: "New York",
        months: &[2, 3],
    },
    SampleTask {
        task: "System Design",
        sub_category: "Design",
        driver: "Technical",
        resource: "System Architect",
        data: "Medium",
        location: "San Francisco",
        months: &[3, 4],
    },
    SampleTask {
        task: "Development Phase 1",
        sub_category: "Development",
        driver: "Technical",
        resource: "Developer Team A",
        data: "High",
        location: "San Francisco",
        months: &[4, 5, 6],
    },
    SampleTask {
        task: "Development Phase 2",
        sub_category: "Development",
        driver: "Technical",
        resource: "Developer Team B",
        data: "High",
        location: "Bangalore",
        months: &[6, 7, 8],
    },
    SampleTask {
        task: "Testing",
        sub_category: "QA",
        driver: "Quality",
        resource: "QA Team",
        data: "Medium",
        location: "New York",
        months: &[8, 9],
    },
    SampleTask {
        task: "Deployment",
        sub_category: "Operations",
        driver: "Operational",
        resource: "DevOps",
        data: "High",
        location: "London",
        months: &[10],
    },
    SampleTask {
        task: "Training",
        sub_category: "Training",
        driver: "Adoption",
        resource: "Trainer",
        data: "Low",
        location: "London",
        months: &[10, 11],
    },
    SampleTask {
        task: "Documentation",
        sub_category: "Documentation",
        driver: "Knowledge",
        resource: "Technical Writer",
        data: "Medium",
        location: "Bangalore",
        months: &[9, 10, 11],
    },
    SampleTask {
        task: "Post-Launch Review",
        sub_category: "Review",
        driver: "Improvement",
        resource: "Project Manager",
        data: "Low",
        location: "New York",
        months: &[12],
    },
];

/// Build the sample workbook with the given month header naming
pub fn sample_workbook(naming: MonthNaming) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Tasks")?;

    let month_offset = SAMPLE_HEADERS.len() as u16;
    for (col, name) in SAMPLE_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (col, name) in naming.names().iter().enumerate() {
        sheet.write_string_with_format(0, month_offset + col as u16, *name, &header)?;
    }

    for (i, task) in SAMPLE_TASKS.iter().enumerate() {
        let row = i as u32 + 1;
        let fields = [
            task.task,
            task.sub_category,
            task.driver,
            task.resource,
            task.data,
            task.location,
        ];
        for (col, value) in fields.iter().enumerate() {
            sheet.write_string(row, col as u16, *value)?;
        }
        for &month in task.months {
            sheet.write_string(row, month_offset + u16::from(month) - 1, "X")?;
        }
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_freeze_panes(1, 0)?;
    Ok(workbook)
}

/// Write the sample workbook to disk
pub fn write_sample(path: &Path, naming: MonthNaming) -> Result<(), XlsxError> {
    let mut workbook = sample_workbook(naming)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), tasks = SAMPLE_TASKS.len(), "wrote sample workbook");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use taskgantt_core::{build_timeline, TaskRecord};

    fn sample_records() -> Vec<TaskRecord> {
        SAMPLE_TASKS
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let record = TaskRecord::new(t.task)
                    .row(i + 2)
                    .sub_category(t.sub_category)
                    .driver(t.driver)
                    .resource(t.resource)
                    .data(t.data)
                    .location(t.location);
                t.months.iter().fold(record, |r, &m| r.mark(m))
            })
            .collect()
    }

    #[test]
    fn sample_spans() {
        let report = build_timeline(sample_records());
        assert!(report.skipped.is_empty());
        assert_eq!(report.timeline.span_count(), 10);
        // Both Project Manager rows differ in driver, so no group is shared
        assert_eq!(report.timeline.len(), 10);

        let dev = report
            .timeline
            .spans()
            .find(|s| s.record.task == "Development Phase 1")
            .unwrap();
        assert_eq!((dev.start_month, dev.end_month), (4, 6));
    }

    #[test]
    fn sample_workbook_layout() {
        let mut workbook = sample_workbook(MonthNaming::Full).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        let mut xlsx = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = xlsx.worksheet_range("Tasks").unwrap();

        assert_eq!(range.get_value((0, 3)), Some(&Data::String("Resources".into())));
        assert_eq!(range.get_value((0, 6)), Some(&Data::String("January".into())));
        assert_eq!(range.get_value((0, 17)), Some(&Data::String("December".into())));
        // Post-Launch Review, December
        assert_eq!(range.get_value((10, 0)), Some(&Data::String("Post-Launch Review".into())));
        assert_eq!(range.get_value((10, 17)), Some(&Data::String("X".into())));
    }
}
