//! Static SVG timeline
//!
//! Same layout as the HTML chart without any scripting, for embedding in
//! documents or slides.

use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use taskgantt_core::{
    ColorSlots, MonthNaming, Palette, RenderError, Renderer, Timeline, MONTH_COUNT,
};

use crate::html::{assign_lanes, truncate};

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Title drawn above the chart
    pub title: String,
    /// Month header naming
    pub naming: MonthNaming,
    /// Bar colors, indexed by color slot
    pub palette: Palette,
    /// Width of the twelve month columns together, in pixels
    pub chart_width: u32,
    /// Height per lane in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Background color
    pub background_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            title: "Project Gantt Chart".into(),
            naming: MonthNaming::Abbreviated,
            palette: Palette::vivid(),
            chart_width: 960,
            row_height: 28,
            label_width: 360,
            header_height: 40,
            padding: 20,
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn naming(mut self, naming: MonthNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    fn month_width(&self) -> f64 {
        f64::from(self.chart_width) / MONTH_COUNT as f64
    }

    fn month_x(&self, month: u8) -> f64 {
        f64::from(self.padding + self.label_width) + f64::from(month - 1) * self.month_width()
    }

    /// Top of the first band; leaves room for the title line
    fn chart_top(&self) -> u32 {
        self.padding + 30 + self.header_height
    }

    fn render_header(&self) -> Group {
        let mut group = Group::new().set("class", "header");
        let y = self.padding + 30;

        group = group.add(
            Rectangle::new()
                .set("x", self.padding)
                .set("y", y)
                .set("width", self.label_width + self.chart_width)
                .set("height", self.header_height)
                .set("fill", "#f8f9fa"),
        );

        for (index, name) in self.naming.names().iter().enumerate() {
            let month = index as u8 + 1;
            group = group.add(
                Text::new(*name)
                    .set("x", self.month_x(month) + self.month_width() / 2.0)
                    .set("y", y + self.header_height / 2 + 4)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("font-weight", "bold")
                    .set("fill", self.text_color.as_str())
                    .set("text-anchor", "middle"),
            );
        }

        group
    }

    fn render_grid(&self, chart_bottom: u32) -> Group {
        let mut group = Group::new().set("class", "grid");
        let top = self.padding + 30;

        for month in 1..=MONTH_COUNT as u8 {
            let x = self.month_x(month);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", top)
                    .set("x2", x)
                    .set("y2", chart_bottom)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );
        }

        group
    }

    fn render_legend(&self, slots: &ColorSlots, y_offset: u32) -> Group {
        let mut group = Group::new().set("class", "legend");
        let box_size = 12.0;
        let spacing = 180.0;
        let per_row = ((f64::from(self.label_width + self.chart_width) / spacing) as usize).max(1);

        for (index, name) in slots.sorted_names().into_iter().enumerate() {
            let Some(color) = slots.color(name, &self.palette) else {
                continue;
            };
            let x = f64::from(self.padding) + (index % per_row) as f64 * spacing;
            let y = f64::from(y_offset) + 15.0 + (index / per_row) as f64 * 20.0;

            group = group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y - box_size + 2.0)
                    .set("width", box_size)
                    .set("height", box_size)
                    .set("rx", 2)
                    .set("fill", color.to_hex()),
            );
            group = group.add(
                Text::new(truncate(name, 24))
                    .set("x", x + box_size + 5.0)
                    .set("y", y)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 1)
                    .set("fill", self.text_color.as_str()),
            );
        }

        group
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, timeline: &Timeline) -> Result<String, RenderError> {
        if timeline.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }

        let slots = timeline.color_slots();
        let mut bars = Group::new().set("class", "bars");
        let mut labels = Group::new().set("class", "groups");
        let mut y = self.chart_top();

        for group in timeline.groups() {
            let lanes = assign_lanes(&group.spans);
            let lane_count = lanes.iter().max().map_or(1, |max| max + 1) as u32;
            let band_height = lane_count * self.row_height;

            labels = labels.add(
                Text::new(truncate(&group.key.to_string(), 48))
                    .set("x", self.padding + 8)
                    .set("y", y + band_height / 2 + 4)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("fill", self.text_color.as_str()),
            );
            labels = labels.add(
                Line::new()
                    .set("x1", self.padding)
                    .set("y1", y + band_height)
                    .set("x2", self.padding + self.label_width + self.chart_width)
                    .set("y2", y + band_height)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );

            for (span, lane) in group.spans.iter().zip(lanes) {
                let color = slots
                    .color(&span.record.task, &self.palette)
                    .unwrap_or_else(|| self.palette.color(0));
                let bar_height = (f64::from(self.row_height) * 0.6) as u32;
                let bar_y = y + lane as u32 * self.row_height + (self.row_height - bar_height) / 2;

                bars = bars.add(
                    Rectangle::new()
                        .set("x", self.month_x(span.start_month) + 2.0)
                        .set("y", bar_y)
                        .set("width", f64::from(span.width()) * self.month_width() - 4.0)
                        .set("height", bar_height)
                        .set("rx", 3)
                        .set("ry", 3)
                        .set("fill", color.to_hex())
                        .set("data-start", u32::from(span.start_month))
                        .set("data-end", u32::from(span.end_month)),
                );
            }

            y += band_height;
        }

        let chart_bottom = y;
        let legend_rows = slots.len().div_ceil(
            ((f64::from(self.label_width + self.chart_width) / 180.0) as usize).max(1),
        ) as u32;
        let width = self.padding * 2 + self.label_width + self.chart_width;
        let height = chart_bottom + 20 + legend_rows * 20 + self.padding;

        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg")
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", self.background_color.as_str()),
            )
            .add(
                Text::new(self.title.as_str())
                    .set("x", self.padding)
                    .set("y", self.padding + 15)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size + 4)
                    .set("font-weight", "bold")
                    .set("fill", self.text_color.as_str()),
            )
            .add(self.render_grid(chart_bottom))
            .add(self.render_header())
            .add(labels)
            .add(bars)
            .add(self.render_legend(&slots, chart_bottom + 10));

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}
