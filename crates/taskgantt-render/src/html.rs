//! Interactive HTML Gantt Chart Renderer
//!
//! Generates standalone HTML files with an embedded SVG month timeline.
//! Features:
//! - One band per (Resource, Driver, Location) group, twelve month columns
//! - Overlapping spans inside a group stacked into separate lanes
//! - Hover tooltips with every task field
//! - Task color legend and a Resource Summary tab
//! - Zoom controls
//!
//! The document has no external assets; everything is inlined.

use chrono::Datelike;
use serde::Serialize;
use taskgantt_core::{
    ColorSlots, GroupSummary, MonthNaming, Palette, RenderError, Renderer, TaskSpan, Timeline,
    MONTH_COUNT,
};

/// HTML Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlGanttRenderer {
    /// Document and chart title
    pub title: String,
    /// Calendar year used in tooltip dates
    pub year: i32,
    /// Month header naming
    pub naming: MonthNaming,
    /// Bar colors, indexed by color slot
    pub palette: Palette,
    /// Width of the twelve month columns together, in pixels
    pub chart_width: u32,
    /// Height per lane in pixels
    pub row_height: u32,
    /// Width of the group label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Theme (light or dark)
    pub theme: GanttTheme,
    /// Enable interactivity (tabs, tooltips, zoom)
    pub interactive: bool,
}

/// Color theme for the chart chrome (bars use the palette)
#[derive(Clone, Debug)]
pub struct GanttTheme {
    pub background_color: String,
    pub band_color: String,
    pub grid_color: String,
    pub text_color: String,
    pub header_bg: String,
    pub bar_text_color: String,
    pub highlight_color: String,
}

impl Default for GanttTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl GanttTheme {
    pub fn light() -> Self {
        Self {
            background_color: "#ffffff".into(),
            band_color: "#f7f9fb".into(),
            grid_color: "#e3e8ee".into(),
            text_color: "#2c3e50".into(),
            header_bg: "#f0f2f5".into(),
            bar_text_color: "#ffffff".into(),
            highlight_color: "#f39c12".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background_color: "#1a1a2e".into(),
            band_color: "#20203a".into(),
            grid_color: "#2d2d44".into(),
            text_color: "#eaeaea".into(),
            header_bg: "#16213e".into(),
            bar_text_color: "#ffffff".into(),
            highlight_color: "#f39c12".into(),
        }
    }
}

impl Default for HtmlGanttRenderer {
    fn default() -> Self {
        Self {
            title: "Project Gantt Chart".into(),
            year: chrono::Local::now().year(),
            naming: MonthNaming::Abbreviated,
            palette: Palette::vivid(),
            chart_width: 960,
            row_height: 30,
            label_width: 360,
            header_height: 40,
            padding: 20,
            theme: GanttTheme::default(),
            interactive: true,
        }
    }
}

impl HtmlGanttRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = year;
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

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = GanttTheme::dark();
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

    /// Disable interactivity
    pub fn static_chart(mut self) -> Self {
        self.interactive = false;
        self
    }

    fn month_width(&self) -> f64 {
        f64::from(self.chart_width) / MONTH_COUNT as f64
    }

    /// Left edge of a 1-based month column
    fn month_x(&self, month: u8) -> f64 {
        f64::from(self.padding + self.label_width) + f64::from(month - 1) * self.month_width()
    }

    fn chart_top(&self) -> u32 {
        self.padding + self.header_height
    }

    fn lay_out(&self, timeline: &Timeline) -> Vec<BandLayout> {
        let mut y = self.chart_top();
        timeline
            .groups()
            .iter()
            .map(|group| {
                let lanes = assign_lanes(&group.spans);
                let lane_count = lanes.iter().max().map_or(1, |max| max + 1);
                let band = BandLayout {
                    y,
                    height: lane_count as u32 * self.row_height,
                    lanes,
                };
                y += band.height;
                band
            })
            .collect()
    }

    fn generate_html(&self, timeline: &Timeline) -> Result<String, RenderError> {
        let slots = timeline.color_slots();
        let bands = self.lay_out(timeline);
        let chart_bottom = bands.last().map_or(self.chart_top(), |b| b.y + b.height);

        let total_width = self.padding * 2 + self.label_width + self.chart_width;
        let total_height = chart_bottom + self.padding;

        let svg_content = self.generate_svg(timeline, &bands, &slots, chart_bottom);
        let legend = self.generate_legend(&slots);
        let summary = self.generate_summary_table(&timeline.summaries());
        let css = self.generate_css();
        let (tabs, controls, js) = if self.interactive {
            (TABS, CONTROLS, self.generate_js(timeline)?)
        } else {
            ("", "", String::new())
        };
        let summary_class = if self.interactive { "tab-panel" } else { "tab-panel active" };

        tracing::debug!(
            groups = timeline.len(),
            bars = timeline.span_count(),
            "rendered html chart"
        );

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="gantt-container">
        <div class="gantt-header">
            <h1>{title}</h1>
{tabs}
        </div>
        <section id="tab-chart" class="tab-panel active">
{controls}
            <div class="gantt-wrapper" id="gantt-wrapper">
                <svg id="gantt-svg" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
{svg_content}
                </svg>
            </div>
            <div class="gantt-legend">
{legend}
            </div>
        </section>
        <section id="tab-summary" class="{summary_class}">
            <h2>Resource Summary</h2>
{summary}
        </section>
        <div id="tooltip" class="tooltip"></div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&self.title),
            css = css,
            tabs = tabs,
            controls = controls,
            width = total_width,
            height = total_height,
            svg_content = svg_content,
            legend = legend,
            summary_class = summary_class,
            summary = summary,
            js = js,
        ))
    }

    /// Generate the SVG content (without the outer <svg> tag)
    fn generate_svg(
        &self,
        timeline: &Timeline,
        bands: &[BandLayout],
        slots: &ColorSlots,
        chart_bottom: u32,
    ) -> String {
        let mut svg = String::new();

        svg.push_str(&format!(
            r#"                    <rect width="100%" height="100%" fill="{}"/>"#,
            self.theme.background_color
        ));
        svg.push('\n');

        svg.push_str(&self.render_bands(timeline, bands));
        svg.push_str(&self.render_grid(chart_bottom));
        svg.push_str(&self.render_header());

        let mut bar_index = 0;
        for (group, band) in timeline.groups().iter().zip(bands) {
            for (span, lane) in group.spans.iter().zip(&band.lanes) {
                svg.push_str(&self.render_bar(span, bar_index, band.y, *lane, slots));
                bar_index += 1;
            }
        }

        svg
    }

    /// Month names across the top
    fn render_header(&self) -> String {
        let mut svg = String::new();

        svg.push_str(&format!(
            r#"                    <rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            x = self.padding,
            y = self.padding,
            w = self.label_width + self.chart_width,
            h = self.header_height,
            fill = self.theme.header_bg
        ));
        svg.push('\n');

        svg.push_str(&format!(
            r#"                    <text x="{x}" y="{y}" font-size="12" font-weight="bold" fill="{color}">Resource | Driver | Location</text>"#,
            x = self.padding + 8,
            y = self.padding + self.header_height / 2 + 4,
            color = self.theme.text_color
        ));
        svg.push('\n');

        for (index, name) in self.naming.names().iter().enumerate() {
            let month = index as u8 + 1;
            let center = self.month_x(month) + self.month_width() / 2.0;
            svg.push_str(&format!(
                r#"                    <text x="{x:.1}" y="{y}" font-size="12" font-weight="bold" fill="{color}" text-anchor="middle">{label}</text>"#,
                x = center,
                y = self.padding + self.header_height / 2 + 4,
                color = self.theme.text_color,
                label = truncate(name, (self.month_width() / 8.0) as usize + 1)
            ));
            svg.push('\n');
        }

        svg
    }

    /// Alternating group bands with their labels
    fn render_bands(&self, timeline: &Timeline, bands: &[BandLayout]) -> String {
        let mut svg = String::new();
        let max_chars = (self.label_width.saturating_sub(16) / 7) as usize;

        for (index, (group, band)) in timeline.groups().iter().zip(bands).enumerate() {
            if index % 2 == 1 {
                svg.push_str(&format!(
                    r#"                    <rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
                    x = self.padding,
                    y = band.y,
                    w = self.label_width + self.chart_width,
                    h = band.height,
                    fill = self.theme.band_color
                ));
                svg.push('\n');
            }

            let label = group.key.to_string();
            svg.push_str(&format!(
                r#"                    <text x="{x}" y="{y}" font-size="12" fill="{color}" class="group-label"><title>{full}</title>{label}</text>"#,
                x = self.padding + 8,
                y = band.y + band.height / 2 + 4,
                color = self.theme.text_color,
                full = html_escape(&label),
                label = html_escape(&truncate(&label, max_chars.max(10)))
            ));
            svg.push('\n');
        }

        svg
    }

    /// Month boundaries and band separators
    fn render_grid(&self, chart_bottom: u32) -> String {
        let mut svg = String::new();
        let chart_top = self.chart_top();

        for month in 1..=MONTH_COUNT as u8 + 1 {
            let x = if usize::from(month) > MONTH_COUNT {
                f64::from(self.padding + self.label_width + self.chart_width)
            } else {
                self.month_x(month)
            };
            svg.push_str(&format!(
                r#"                    <line x1="{x:.1}" y1="{y1}" x2="{x:.1}" y2="{y2}" stroke="{color}" stroke-width="1"/>"#,
                x = x,
                y1 = self.padding,
                y2 = chart_bottom,
                color = self.theme.grid_color
            ));
            svg.push('\n');
        }

        svg.push_str(&format!(
            r#"                    <line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{color}" stroke-width="1"/>"#,
            x1 = self.padding,
            y = chart_top,
            x2 = self.padding + self.label_width + self.chart_width,
            color = self.theme.grid_color
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"                    <line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{color}" stroke-width="1"/>"#,
            x1 = self.padding,
            y = chart_bottom,
            x2 = self.padding + self.label_width + self.chart_width,
            color = self.theme.grid_color
        ));
        svg.push('\n');

        svg
    }

    /// A single task bar with its label
    fn render_bar(
        &self,
        span: &TaskSpan,
        index: usize,
        band_y: u32,
        lane: usize,
        slots: &ColorSlots,
    ) -> String {
        let mut svg = String::new();
        let task = &span.record.task;
        let color = slots
            .color(task, &self.palette)
            .unwrap_or_else(|| self.palette.color(0));

        let y = band_y + lane as u32 * self.row_height;
        let bar_height = (f64::from(self.row_height) * 0.7) as u32;
        let bar_y = y + (self.row_height - bar_height) / 2;
        let x = self.month_x(span.start_month) + 2.0;
        let width = f64::from(span.width()) * self.month_width() - 4.0;

        svg.push_str(&format!(
            r#"                    <rect x="{x:.1}" y="{y}" width="{w:.1}" height="{h}" rx="3" fill="{color}" class="task-bar" data-task="{index}" data-start="{start}" data-end="{end}"><title>{title}</title></rect>"#,
            x = x,
            y = bar_y,
            w = width,
            h = bar_height,
            color = color,
            index = index,
            start = span.start_month,
            end = span.end_month,
            title = html_escape(&BarTooltip::new(span, self.year).hover_text())
        ));
        svg.push('\n');

        let max_chars = ((width - 8.0) / 7.0).max(0.0) as usize;
        if max_chars >= 3 {
            svg.push_str(&format!(
                r#"                    <text x="{x:.1}" y="{y}" font-size="11" fill="{color}" pointer-events="none">{label}</text>"#,
                x = x + 6.0,
                y = bar_y + bar_height / 2 + 4,
                color = self.theme.bar_text_color,
                label = html_escape(&truncate(task, max_chars))
            ));
            svg.push('\n');
        }

        svg
    }

    fn generate_legend(&self, slots: &ColorSlots) -> String {
        let mut html = String::new();
        for name in slots.sorted_names() {
            let Some(color) = slots.color(name, &self.palette) else {
                continue;
            };
            html.push_str(&format!(
                r#"                <span class="legend-item"><span class="legend-box" style="background:{color}"></span>{name}</span>"#,
                color = color,
                name = html_escape(name)
            ));
            html.push('\n');
        }
        html
    }

    fn generate_summary_table(&self, summaries: &[GroupSummary]) -> String {
        let mut html = String::from("            <table class=\"summary\">\n                <thead><tr>");
        for header in [
            "Resource",
            "Driver",
            "Location",
            "Tasks",
            "Task 1",
            "Data",
            "Task Count",
            "Total Duration (months)",
            "Months",
        ] {
            html.push_str(&format!("<th>{header}</th>"));
        }
        html.push_str("</tr></thead>\n                <tbody>\n");

        for summary in summaries {
            let cells = [
                summary.key.resource.clone(),
                summary.key.driver.clone(),
                summary.key.location.clone(),
                summary.tasks.join(", "),
                summary.sub_categories.join(", "),
                summary.data.join(", "),
                summary.task_count.to_string(),
                summary.total_duration.to_string(),
                summary.month_names(self.naming),
            ];
            html.push_str("                    <tr>");
            for cell in &cells {
                html.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("                </tbody>\n            </table>");
        html
    }

    fn generate_css(&self) -> String {
        format!(
            r#"        :root {{
            --bg-color: {bg};
            --text-color: {text};
            --header-bg: {header};
            --grid-color: {grid};
            --highlight-color: {highlight};
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-color);
            color: var(--text-color);
            padding: 20px;
        }}
        .gantt-container {{
            max-width: 100%;
        }}
        .gantt-header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 16px;
        }}
        .gantt-header h1 {{
            font-size: 1.5rem;
            font-weight: 600;
        }}
        .gantt-controls {{
            margin-bottom: 8px;
            text-align: right;
        }}
        .gantt-controls button, .tabs button {{
            padding: 8px 16px;
            margin-left: 8px;
            border: 1px solid var(--text-color);
            background: transparent;
            color: var(--text-color);
            cursor: pointer;
            border-radius: 4px;
            font-size: 14px;
        }}
        .gantt-controls button:hover, .tabs button:hover {{
            background: rgba(128,128,128,0.2);
        }}
        .tabs button.active {{
            background: var(--header-bg);
            font-weight: 600;
        }}
        .tab-panel {{ display: none; margin-bottom: 24px; }}
        .tab-panel.active {{ display: block; }}
        .gantt-wrapper {{
            overflow-x: auto;
            border: 1px solid rgba(128,128,128,0.3);
            border-radius: 8px;
        }}
        .gantt-legend {{
            display: flex;
            flex-wrap: wrap;
            gap: 16px 24px;
            margin-top: 16px;
            font-size: 13px;
        }}
        .legend-item {{
            display: flex;
            align-items: center;
            gap: 6px;
        }}
        .legend-box {{
            width: 16px;
            height: 12px;
            border-radius: 2px;
        }}
        .task-bar {{
            cursor: pointer;
            transition: opacity 0.2s;
        }}
        .task-bar:hover {{
            opacity: 0.8;
            stroke: var(--highlight-color);
            stroke-width: 2;
        }}
        h2 {{
            font-size: 1.2rem;
            margin-bottom: 12px;
        }}
        table.summary {{
            border-collapse: collapse;
            font-size: 13px;
        }}
        table.summary th {{
            background: var(--header-bg);
            text-align: center;
        }}
        table.summary th, table.summary td {{
            border: 1px solid var(--grid-color);
            padding: 6px 10px;
        }}
        table.summary tbody tr:nth-child(odd) {{
            background: rgba(128,128,128,0.08);
        }}
        .tooltip {{
            position: fixed;
            background: rgba(0,0,0,0.9);
            color: white;
            padding: 12px;
            border-radius: 6px;
            font-size: 13px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
            z-index: 1000;
            max-width: 320px;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}
        .tooltip .task-name {{
            font-weight: 600;
            margin-bottom: 8px;
        }}
        .tooltip .task-dates {{
            color: #aaa;
        }}"#,
            bg = self.theme.background_color,
            text = self.theme.text_color,
            header = self.theme.header_bg,
            grid = self.theme.grid_color,
            highlight = self.theme.highlight_color,
        )
    }

    /// Generate JavaScript for interactivity
    fn generate_js(&self, timeline: &Timeline) -> Result<String, RenderError> {
        let tooltips: Vec<BarTooltip<'_>> = timeline
            .spans()
            .map(|span| BarTooltip::new(span, self.year))
            .collect();
        let task_data = serde_json::to_string(&tooltips)
            .map_err(|e| RenderError::Format(format!("Failed to encode tooltip data: {e}")))?
            // Keep the payload from closing the script element
            .replace("</", "<\\/");

        Ok(format!(
            r#"        const taskData = {task_data};

        // Tabs
        function showTab(name) {{
            document.querySelectorAll('.tab-panel').forEach(panel => {{
                panel.classList.toggle('active', panel.id === 'tab-' + name);
            }});
            document.querySelectorAll('.tabs button').forEach(button => {{
                button.classList.toggle('active', button.dataset.tab === name);
            }});
        }}

        // Zoom functionality
        let currentZoom = 1;
        const svg = document.getElementById('gantt-svg');

        function zoomIn() {{
            currentZoom = Math.min(currentZoom * 1.2, 3);
            applyZoom();
        }}

        function zoomOut() {{
            currentZoom = Math.max(currentZoom / 1.2, 0.5);
            applyZoom();
        }}

        function resetZoom() {{
            currentZoom = 1;
            applyZoom();
        }}

        function applyZoom() {{
            svg.style.transform = `scale(${{currentZoom}})`;
            svg.style.transformOrigin = 'top left';
        }}

        // Tooltip functionality
        const tooltip = document.getElementById('tooltip');

        function line(text, className) {{
            const div = document.createElement('div');
            if (className) div.className = className;
            div.textContent = text;
            return div;
        }}

        document.querySelectorAll('.task-bar').forEach(bar => {{
            bar.addEventListener('mouseenter', () => {{
                const data = taskData[Number(bar.getAttribute('data-task'))];
                if (!data) return;
                tooltip.replaceChildren(
                    line(data.task, 'task-name'),
                    line('Resource: ' + data.resource),
                    line('Driver: ' + data.driver),
                    line('Location: ' + data.location),
                    line('Group: ' + data.group),
                    ...(data.sub_category ? [line('Task 1: ' + data.sub_category)] : []),
                    ...(data.data ? [line('Data: ' + data.data)] : []),
                    line('Duration: ' + data.duration + (data.duration === 1 ? ' month' : ' months')),
                    line(data.start + ' → ' + data.end, 'task-dates'),
                );
                tooltip.classList.add('visible');
            }});

            bar.addEventListener('mousemove', (e) => {{
                tooltip.style.left = (e.clientX + 15) + 'px';
                tooltip.style.top = (e.clientY + 15) + 'px';
            }});

            bar.addEventListener('mouseleave', () => {{
                tooltip.classList.remove('visible');
            }});
        }});"#,
            task_data = task_data,
        ))
    }
}

const CONTROLS: &str = r#"            <div class="gantt-controls">
                <button onclick="zoomIn()" title="Zoom In">+</button>
                <button onclick="zoomOut()" title="Zoom Out">−</button>
                <button onclick="resetZoom()" title="Reset">Reset</button>
            </div>"#;

const TABS: &str = r#"            <div class="tabs">
                <button class="active" data-tab="chart" onclick="showTab('chart')">Gantt Chart</button>
                <button data-tab="summary" onclick="showTab('summary')">Resource Summary</button>
            </div>"#;

/// Vertical placement of one group band
#[derive(Debug)]
struct BandLayout {
    y: u32,
    height: u32,
    /// Lane per span, in span order
    lanes: Vec<usize>,
}

/// Tooltip payload for one bar
#[derive(Debug, Serialize)]
struct BarTooltip<'a> {
    task: &'a str,
    sub_category: Option<&'a str>,
    resource: &'a str,
    driver: &'a str,
    location: &'a str,
    group: &'a str,
    data: Option<&'a str>,
    duration: u8,
    start_month: u8,
    end_month: u8,
    start: String,
    end: String,
}

impl<'a> BarTooltip<'a> {
    fn new(span: &'a TaskSpan, year: i32) -> Self {
        let record = &span.record;
        let month_year = |date: Option<chrono::NaiveDate>| {
            date.map(|d| d.format("%b %Y").to_string()).unwrap_or_default()
        };
        Self {
            task: &record.task,
            sub_category: record.sub_category.as_deref(),
            resource: &record.resource,
            driver: &record.driver,
            location: &record.location,
            group: record.group_or_resource(),
            data: record.data.as_deref(),
            duration: span.active_months,
            start_month: span.start_month,
            end_month: span.end_month,
            start: month_year(span.start_date(year)),
            end: month_year(span.end_date(year)),
        }
    }

    /// Plain-text hover lines, used as the bar's `<title>`
    fn hover_text(&self) -> String {
        let mut lines = vec![self.task.to_string()];
        if let Some(sub_category) = self.sub_category {
            lines.push(format!("Task 1: {sub_category}"));
        }
        lines.push(format!("Resource: {}", self.resource));
        lines.push(format!("Driver: {}", self.driver));
        lines.push(format!("Location: {}", self.location));
        lines.push(format!("Group: {}", self.group));
        if let Some(data) = self.data {
            lines.push(format!("Data: {data}"));
        }
        let unit = if self.duration == 1 { "month" } else { "months" };
        lines.push(format!("Duration: {} {unit}", self.duration));
        lines.push(format!("{} → {}", self.start, self.end));
        lines.join("\n")
    }
}

/// Greedy lane packing: each span goes to the first lane whose last bar
/// ends before it starts. Non-overlapping spans share lane 0.
pub fn assign_lanes(spans: &[TaskSpan]) -> Vec<usize> {
    let mut lane_ends: Vec<u8> = Vec::new();
    spans
        .iter()
        .map(|span| {
            let free = lane_ends.iter().position(|end| *end < span.start_month);
            match free {
                Some(lane) => {
                    lane_ends[lane] = span.end_month;
                    lane
                }
                None => {
                    lane_ends.push(span.end_month);
                    lane_ends.len() - 1
                }
            }
        })
        .collect()
}

impl Renderer for HtmlGanttRenderer {
    type Output = String;

    fn render(&self, timeline: &Timeline) -> Result<String, RenderError> {
        if timeline.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }
        self.generate_html(timeline)
    }
}

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate a string with ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskgantt_core::{build_timeline, TaskRecord};

    fn record(task: &str, resource: &str, months: &[u8]) -> TaskRecord {
        months.iter().fold(
            TaskRecord::new(task)
                .resource(resource)
                .driver("Quality")
                .location("New York"),
            |r, m| r.mark(*m),
        )
    }

    fn create_test_timeline() -> Timeline {
        build_timeline(vec![
            record("Testing", "QA Team", &[3, 4, 5]).sub_category("QA"),
            record("Project Planning", "Project Manager", &[1, 2]).data("High"),
            record("Post-Launch Review", "Project Manager", &[12]),
        ])
        .timeline
    }

    fn span(months: &[u8]) -> TaskSpan {
        TaskSpan::from_record(record("t", "r", months)).unwrap()
    }

    #[test]
    fn html_gantt_renderer_creation() {
        let renderer = HtmlGanttRenderer::new();
        assert_eq!(renderer.chart_width, 960);
        assert_eq!(renderer.row_height, 30);
        assert_eq!(renderer.palette, Palette::vivid());
        assert!(renderer.interactive);
    }

    #[test]
    fn html_gantt_with_dark_theme() {
        let renderer = HtmlGanttRenderer::new().dark_theme();
        assert_eq!(renderer.theme.background_color, "#1a1a2e");
    }

    #[test]
    fn html_gantt_produces_valid_html() {
        let html = HtmlGanttRenderer::new()
            .title("Roadmap")
            .render(&create_test_timeline())
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<h1>Roadmap</h1>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("</svg>"));
        assert!(html.contains("QA Team | Quality | New York"));
        // No external assets
        assert!(!html.contains("<script src"));
        assert!(!html.contains("<link"));
    }

    #[test]
    fn bars_carry_month_range() {
        let html = HtmlGanttRenderer::new().render(&create_test_timeline()).unwrap();
        assert!(html.contains(r#"data-task="0" data-start="3" data-end="5""#));
        assert!(html.contains(r#"data-start="12" data-end="12""#));
        assert_eq!(html.matches("class=\"task-bar\"").count(), 3);
    }

    #[test]
    fn bar_geometry_spans_months() {
        let renderer = HtmlGanttRenderer::new();
        let html = renderer.render(&create_test_timeline()).unwrap();
        // 960px / 12 months = 80px per month; Mar starts at 20 + 360 + 160
        assert!(html.contains(r#"<rect x="542.0""#));
        assert!(html.contains(r#"width="236.0""#));
    }

    #[test]
    fn tooltip_data_has_all_fields() {
        let html = HtmlGanttRenderer::new()
            .year(2026)
            .render(&create_test_timeline())
            .unwrap();

        assert!(html.contains("const taskData = ["));
        assert!(html.contains(r#""task":"Testing""#));
        assert!(html.contains(r#""sub_category":"QA""#));
        assert!(html.contains(r#""duration":3"#));
        assert!(html.contains(r#""start":"Mar 2026""#));
        assert!(html.contains(r#""end":"May 2026""#));
        assert!(html.contains(r#""data":"High""#));
    }

    #[test]
    fn html_gantt_includes_interactivity() {
        let html = HtmlGanttRenderer::new().render(&create_test_timeline()).unwrap();
        assert!(html.contains("zoomIn()"));
        assert!(html.contains("showTab('summary')"));
        assert!(html.contains("tooltip"));
    }

    #[test]
    fn html_gantt_static_mode() {
        let html = HtmlGanttRenderer::new()
            .static_chart()
            .render(&create_test_timeline())
            .unwrap();
        assert!(!html.contains("taskData"));
        assert!(!html.contains("showTab("));
        // Summary is shown inline instead of behind a tab
        assert!(html.contains(r#"<section id="tab-summary" class="tab-panel active">"#));
        // No script, so no zoom buttons either
        assert!(!html.contains("gantt-controls\">"));
        assert!(!html.contains("zoomIn()"));
    }

    #[test]
    fn tooltip_shows_every_record_field() {
        let timeline = build_timeline(vec![TaskRecord::new("Onboarding")
            .sub_category("Training")
            .resource("Trainer")
            .driver("Adoption")
            .location("London")
            .group("Enablement")
            .data("Low")
            .mark(10)
            .mark(11)])
        .timeline;
        let html = HtmlGanttRenderer::new().year(2026).render(&timeline).unwrap();

        for shown in [
            "line(data.task, 'task-name')",
            "'Task 1: ' + data.sub_category",
            "'Resource: ' + data.resource",
            "'Driver: ' + data.driver",
            "'Location: ' + data.location",
            "'Group: ' + data.group",
            "'Data: ' + data.data",
            "'Duration: ' + data.duration",
            "data.start + ' → ' + data.end",
        ] {
            assert!(html.contains(shown), "tooltip does not show {shown}");
        }
        assert!(html.contains(r#""group":"Enablement""#));
    }

    #[test]
    fn static_bar_title_lists_every_field() {
        let timeline = build_timeline(vec![TaskRecord::new("Onboarding")
            .sub_category("Training")
            .resource("Trainer")
            .driver("Adoption")
            .location("London")
            .group("Enablement")
            .data("Low")
            .mark(10)
            .mark(11)])
        .timeline;
        let html = HtmlGanttRenderer::new()
            .year(2026)
            .static_chart()
            .render(&timeline)
            .unwrap();

        assert!(html.contains(
            "<title>Onboarding\nTask 1: Training\nResource: Trainer\nDriver: Adoption\n\
             Location: London\nGroup: Enablement\nData: Low\nDuration: 2 months\n\
             Oct 2026 → Nov 2026</title>"
        ));
    }

    #[test]
    fn summary_tab_lists_groups() {
        let html = HtmlGanttRenderer::new().render(&create_test_timeline()).unwrap();
        assert!(html.contains("Resource Summary"));
        assert!(html.contains("<td>Post-Launch Review, Project Planning</td>"));
        assert!(html.contains("<td>Jan, Feb, Dec</td>"));
        assert!(html.contains("<td>3</td>"));
    }

    #[test]
    fn legend_is_sorted_and_colored() {
        let html = HtmlGanttRenderer::new().render(&create_test_timeline()).unwrap();
        let planning = html.find(">Post-Launch Review</span>").unwrap();
        let testing = html.find(">Testing</span>").unwrap();
        assert!(planning < testing);
        // First-seen task gets the first palette color
        assert!(html.contains(r#"style="background:#636EFA"></span>Testing"#));
    }

    #[test]
    fn full_month_naming_in_header() {
        let html = HtmlGanttRenderer::new()
            .naming(MonthNaming::Full)
            .render(&create_test_timeline())
            .unwrap();
        assert!(html.contains(">September</text>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let timeline = build_timeline(vec![record("<b>Bold</b> & co", "R&D", &[1])]).timeline;
        let html = HtmlGanttRenderer::new().render(&timeline).unwrap();
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; co"));
        assert!(!html.contains("</b> & co\""));
        assert!(html.contains(r#"<\/b>"#));
    }

    #[test]
    fn html_gantt_empty_timeline_fails() {
        let result = HtmlGanttRenderer::new().render(&Timeline::default());
        assert!(matches!(result, Err(RenderError::InvalidData(_))));
    }

    #[test]
    fn lanes_stack_overlapping_spans() {
        let spans = vec![span(&[1, 3]), span(&[2, 4]), span(&[4, 5]), span(&[6])];
        assert_eq!(assign_lanes(&spans), vec![0, 1, 0, 0]);
    }

    #[test]
    fn lanes_for_disjoint_spans_share_one_row() {
        let spans = vec![span(&[1]), span(&[2]), span(&[12])];
        assert_eq!(assign_lanes(&spans), vec![0, 0, 0]);
        assert!(assign_lanes(&[]).is_empty());
    }

    #[test]
    fn overlapping_group_gets_taller_band() {
        let timeline = build_timeline(vec![
            record("a", "PM", &[1, 2, 3]),
            record("b", "PM", &[2, 3]),
            record("c", "PM", &[3]),
        ])
        .timeline;
        let renderer = HtmlGanttRenderer::new();
        let bands = renderer.lay_out(&timeline);
        assert_eq!(bands[0].height, 3 * renderer.row_height);
    }

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn truncate_works() {
        assert_eq!(truncate("Short", 20), "Short");
        assert_eq!(truncate("This is a very long name", 10), "This is a…");
    }

    #[test]
    fn html_gantt_row_height_option() {
        let renderer = HtmlGanttRenderer::new().row_height(48).chart_width(1200);
        assert_eq!(renderer.row_height, 48);
        assert_eq!(renderer.chart_width, 1200);
    }
}
