//! Excel Gantt workbook renderer
//!
//! Generates an XLSX workbook with three sheets:
//! - Gantt Chart: one row per group, month cells filled with the task color
//! - Resource Summary: per-group aggregates, zebra striped
//! - Task Legend: task name and a solid color swatch
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Gantt Chart
//! | Resource        | Driver    | Location      | Jan      | Feb | Mar    | ...
//! |-----------------|-----------|---------------|----------|-----|--------|
//! | Project Manager | Strategic | New York      | Planning |#####|        |
//! |                 |           |               |          |     |        |
//! | System Architect| Technical | San Francisco |          |     | Design | ...
//! ```
//!
//! Cell placement is computed by [`GanttSheetLayout`] before anything is
//! written, so the chart layout can be inspected without parsing XLSX.

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use taskgantt_core::{
    ColorSlots, GroupKey, MonthNaming, Palette, RenderError, Renderer, Rgb, Timeline, MONTH_COUNT,
};

const HEADER_FILL: u32 = 0xDDDDDD;
const GROUP_FILL: u32 = 0xEEEEEE;
const STRIPE_FILL: u32 = 0xF5F5F5;
const BAR_TEXT: u32 = 0xFFFFFF;

/// Leading key columns on the Gantt Chart sheet
const KEY_COLUMNS: [&str; 3] = ["Resource", "Driver", "Location"];

const SUMMARY_COLUMNS: [&str; 9] = [
    "Resource",
    "Driver",
    "Location",
    "Tasks",
    "Task 1",
    "Data",
    "Task Count",
    "Total Duration (months)",
    "Months",
];

/// Excel Gantt workbook renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Month header naming on the chart and summary sheets
    pub naming: MonthNaming,
    /// Bar colors, indexed by color slot
    pub palette: Palette,
    /// Whether to add the Resource Summary sheet
    pub include_summary: bool,
    /// Whether to add the Task Legend sheet
    pub include_legend: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            naming: MonthNaming::Abbreviated,
            palette: Palette::category10(),
            include_summary: true,
            include_legend: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set month header naming
    pub fn naming(mut self, naming: MonthNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Replace the bar palette
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Disable Resource Summary sheet
    pub fn no_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }

    /// Disable Task Legend sheet
    pub fn no_legend(mut self) -> Self {
        self.include_legend = false;
        self
    }

    /// Render the workbook into an in-memory XLSX file
    pub fn render_to_bytes(&self, timeline: &Timeline) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = ExcelFormats::new();
        let slots = timeline.color_slots();

        let layout = GanttSheetLayout::from_timeline(timeline, &slots, &self.palette);
        self.add_gantt_sheet(&mut workbook, &layout, &formats)?;

        if self.include_summary {
            self.add_summary_sheet(&mut workbook, timeline, &formats)?;
        }

        if self.include_legend {
            self.add_legend_sheet(&mut workbook, &slots, &formats)?;
        }

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;

        tracing::debug!(
            groups = timeline.len(),
            tasks = slots.len(),
            bytes = buffer.len(),
            "rendered xlsx workbook"
        );
        Ok(buffer)
    }

    /// Add Gantt Chart sheet
    fn add_gantt_sheet(
        &self,
        workbook: &mut Workbook,
        layout: &GanttSheetLayout,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Gantt Chart")
            .map_err(|e| RenderError::Format(e.to_string()))?;

        let mut widths = ColumnWidths::default();
        let headers = KEY_COLUMNS.iter().chain(self.naming.names().iter());
        for (col, header) in headers.enumerate() {
            write_text(sheet, &mut widths, 0, col as u16, header, &formats.header)?;
        }

        for (index, row) in layout.rows().iter().enumerate() {
            let LayoutRow::Group { key, cells } = row else {
                continue;
            };
            let sheet_row = GanttSheetLayout::sheet_row(index);

            let key_cells = [&key.resource, &key.driver, &key.location];
            for (col, value) in key_cells.into_iter().enumerate() {
                write_text(sheet, &mut widths, sheet_row, col as u16, value, &formats.group_key)?;
            }

            for (month_index, cell) in cells.iter().enumerate() {
                let Some(bar) = cell else { continue };
                let col = GanttSheetLayout::month_column(month_index as u8 + 1);
                match &bar.label {
                    Some(label) => {
                        let format = formats.bar_start(bar.color);
                        write_text(sheet, &mut widths, sheet_row, col, label, &format)?;
                    }
                    None => {
                        sheet
                            .write_blank(sheet_row, col, &formats.bar_fill(bar.color))
                            .map_err(|e| RenderError::Format(e.to_string()))?;
                    }
                }
            }
        }

        widths.apply(sheet);
        sheet.set_freeze_panes(1, 0).ok();
        Ok(())
    }

    /// Add Resource Summary sheet
    fn add_summary_sheet(
        &self,
        workbook: &mut Workbook,
        timeline: &Timeline,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Resource Summary")
            .map_err(|e| RenderError::Format(e.to_string()))?;

        let mut widths = ColumnWidths::default();
        for (col, header) in SUMMARY_COLUMNS.iter().enumerate() {
            write_text(sheet, &mut widths, 0, col as u16, header, &formats.header)?;
        }

        for (index, summary) in timeline.summaries().iter().enumerate() {
            let row = index as u32 + 1;
            // First data row is striped, then every other one
            let (text, number) = if index % 2 == 0 {
                (&formats.stripe_text, &formats.stripe_number)
            } else {
                (&formats.text, &formats.number)
            };

            let texts = [
                summary.key.resource.clone(),
                summary.key.driver.clone(),
                summary.key.location.clone(),
                summary.tasks.join(", "),
                summary.sub_categories.join(", "),
                summary.data.join(", "),
            ];
            for (col, value) in texts.iter().enumerate() {
                write_text(sheet, &mut widths, row, col as u16, value, text)?;
            }

            let numbers = [summary.task_count as f64, f64::from(summary.total_duration)];
            for (offset, value) in numbers.into_iter().enumerate() {
                let col = 6 + offset as u16;
                sheet
                    .write_with_format(row, col, value, number)
                    .map_err(|e| RenderError::Format(e.to_string()))?;
                widths.observe(col, &value.to_string());
            }

            let months = summary.month_names(self.naming);
            write_text(sheet, &mut widths, row, 8, &months, text)?;
        }

        widths.apply(sheet);
        sheet.set_freeze_panes(1, 0).ok();
        Ok(())
    }

    /// Add Task Legend sheet
    fn add_legend_sheet(
        &self,
        workbook: &mut Workbook,
        slots: &ColorSlots,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Task Legend")
            .map_err(|e| RenderError::Format(e.to_string()))?;

        let mut widths = ColumnWidths::default();
        for (col, header) in ["Task", "Color"].iter().enumerate() {
            write_text(sheet, &mut widths, 0, col as u16, header, &formats.header)?;
        }

        for (index, name) in slots.sorted_names().into_iter().enumerate() {
            let row = index as u32 + 1;
            write_text(sheet, &mut widths, row, 0, name, &formats.text)?;
            if let Some(color) = slots.color(name, &self.palette) {
                sheet
                    .write_blank(row, 1, &formats.bar_fill(color))
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
        }

        sheet.set_column_width(0, widths.width(0)).ok();
        sheet.set_column_width(1, 12).ok();
        Ok(())
    }
}

fn write_text(
    sheet: &mut Worksheet,
    widths: &mut ColumnWidths,
    row: u32,
    col: u16,
    value: &str,
    format: &Format,
) -> Result<(), RenderError> {
    sheet
        .write_with_format(row, col, value, format)
        .map_err(|e| RenderError::Format(e.to_string()))?;
    widths.observe(col, value);
    Ok(())
}

/// Tracks the longest value per column for auto-fit
#[derive(Debug, Default)]
struct ColumnWidths {
    longest: Vec<usize>,
}

impl ColumnWidths {
    fn observe(&mut self, col: u16, value: &str) {
        let col = usize::from(col);
        if self.longest.len() <= col {
            self.longest.resize(col + 1, 0);
        }
        self.longest[col] = self.longest[col].max(value.chars().count());
    }

    /// `max(longest + 2, 10)`
    fn width(&self, col: u16) -> f64 {
        let longest = self.longest.get(usize::from(col)).copied().unwrap_or(0);
        (longest + 2).max(10) as f64
    }

    fn apply(&self, sheet: &mut Worksheet) {
        for col in 0..self.longest.len() as u16 {
            sheet.set_column_width(col, self.width(col)).ok();
        }
    }
}

/// Reusable Excel formats
struct ExcelFormats {
    header: Format,
    group_key: Format,
    text: Format,
    number: Format,
    stripe_text: Format,
    stripe_number: Format,
}

impl ExcelFormats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(HEADER_FILL),
            group_key: Format::new().set_bold().set_background_color(GROUP_FILL),
            text: Format::new(),
            number: Format::new().set_num_format("0"),
            stripe_text: Format::new().set_background_color(STRIPE_FILL),
            stripe_number: Format::new()
                .set_num_format("0")
                .set_background_color(STRIPE_FILL),
        }
    }

    /// Solid task color, no text
    fn bar_fill(&self, color: Rgb) -> Format {
        Format::new().set_background_color(color.value())
    }

    /// First cell of a bar: task color with white bold label
    fn bar_start(&self, color: Rgb) -> Format {
        self.bar_fill(color)
            .set_font_color(BAR_TEXT)
            .set_bold()
            .set_align(FormatAlign::Left)
    }
}

// ============================================================================
// Sheet layout
// ============================================================================

/// One filled month cell on the Gantt Chart sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarCell {
    pub task: String,
    pub color: Rgb,
    /// Sub-category or task name, set on the bar's first month only
    pub label: Option<String>,
}

/// One row below the header on the Gantt Chart sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutRow {
    /// Blank separator between groups
    Spacer,
    /// A group's key cells and its twelve month cells
    Group {
        key: GroupKey,
        cells: [Option<BarCell>; MONTH_COUNT],
    },
}

/// Cell placement for the Gantt Chart sheet.
///
/// All spans of a group share one row. A later span overwrites the month
/// cells of an earlier one, label included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GanttSheetLayout {
    rows: Vec<LayoutRow>,
}

impl GanttSheetLayout {
    pub fn from_timeline(timeline: &Timeline, slots: &ColorSlots, palette: &Palette) -> Self {
        let mut rows = Vec::with_capacity(timeline.len() * 2);

        for group in timeline.groups() {
            if !rows.is_empty() {
                rows.push(LayoutRow::Spacer);
            }

            let mut cells: [Option<BarCell>; MONTH_COUNT] = Default::default();
            for span in &group.spans {
                let task = &span.record.task;
                let color = slots
                    .color(task, palette)
                    .unwrap_or_else(|| palette.color(0));
                for month in span.months() {
                    cells[usize::from(month) - 1] = Some(BarCell {
                        task: task.clone(),
                        color,
                        label: (month == span.start_month)
                            .then(|| span.record.display_label().to_string()),
                    });
                }
            }

            rows.push(LayoutRow::Group {
                key: group.key.clone(),
                cells,
            });
        }

        Self { rows }
    }

    /// Rows below the header, in sheet order
    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    /// Zero-based worksheet row of a layout row (row 0 is the header)
    pub fn sheet_row(index: usize) -> u32 {
        index as u32 + 1
    }

    /// Zero-based worksheet column of a 1-based month
    pub fn month_column(month: u8) -> u16 {
        KEY_COLUMNS.len() as u16 + u16::from(month) - 1
    }

    /// Months filled in the given group row
    pub fn filled_months(&self, index: usize) -> Vec<u8> {
        match self.rows.get(index) {
            Some(LayoutRow::Group { cells, .. }) => cells
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_some())
                .map(|(i, _)| i as u8 + 1)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, timeline: &Timeline) -> Result<Vec<u8>, RenderError> {
        if timeline.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }
        self.render_to_bytes(timeline)
    }
}
