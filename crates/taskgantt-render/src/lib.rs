//! # taskgantt-render
//!
//! Rendering backends for taskgantt timelines.
//!
//! This crate provides:
//! - Interactive HTML Gantt chart rendering
//! - Excel workbook rendering (chart, resource summary, legend)
//! - Static SVG rendering
//! - [`render_artifact`] to produce any of them as bytes
//!
//! ## Example
//!
//! ```rust
//! use taskgantt_core::{build_timeline, Renderer, TaskRecord};
//! use taskgantt_render::{ExcelRenderer, HtmlGanttRenderer};
//!
//! let timeline = build_timeline(vec![TaskRecord::new("Testing")
//!     .resource("QA Team")
//!     .driver("Quality")
//!     .location("New York")
//!     .mark(8)
//!     .mark(9)])
//! .timeline;
//!
//! // Interactive HTML Gantt chart
//! let html = HtmlGanttRenderer::new().title("Roadmap").year(2026).render(&timeline)?;
//! assert!(html.contains("data-start=\"8\""));
//!
//! // Excel workbook
//! let xlsx_bytes = ExcelRenderer::new().render(&timeline)?;
//! assert_eq!(&xlsx_bytes[0..2], b"PK");
//! # Ok::<(), taskgantt_core::RenderError>(())
//! ```

pub mod excel;
pub mod html;
pub mod svg_chart;

pub use excel::{BarCell, ExcelRenderer, GanttSheetLayout, LayoutRow};
pub use html::{assign_lanes, GanttTheme, HtmlGanttRenderer};
pub use svg_chart::SvgRenderer;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::Datelike;
use taskgantt_core::{MonthNaming, Palette, RenderError, Renderer, Timeline};

/// Output artifact kinds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Self-contained interactive HTML page
    #[default]
    Html,
    /// XLSX workbook
    Xlsx,
    /// Static SVG image
    Svg,
}

impl OutputFormat {
    /// Infer the format from an output path: `.xlsx` and `.svg` are
    /// recognized, anything else is HTML.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("xlsx") => Self::Xlsx,
            Some("svg") => Self::Svg,
            _ => Self::Html,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xlsx => "xlsx",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown output format '{other}' (expected html, xlsx or svg)")),
        }
    }
}

/// Settings shared by every output format
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub title: String,
    pub year: i32,
    pub naming: MonthNaming,
    /// Overrides each renderer's own palette when set
    pub palette: Option<Palette>,
    pub dark: bool,
    pub interactive: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Project Gantt Chart".into(),
            year: chrono::Local::now().year(),
            naming: MonthNaming::Abbreviated,
            palette: None,
            dark: false,
            interactive: true,
        }
    }
}

/// Render a timeline in the requested format, fully in memory
pub fn render_artifact(
    format: OutputFormat,
    timeline: &Timeline,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    match format {
        OutputFormat::Html => {
            let mut renderer = HtmlGanttRenderer::new()
                .title(options.title.as_str())
                .year(options.year)
                .naming(options.naming);
            if let Some(palette) = &options.palette {
                renderer = renderer.palette(palette.clone());
            }
            if options.dark {
                renderer = renderer.dark_theme();
            }
            if !options.interactive {
                renderer = renderer.static_chart();
            }
            renderer.render(timeline).map(String::into_bytes)
        }
        OutputFormat::Xlsx => {
            let mut renderer = ExcelRenderer::new().naming(options.naming);
            if let Some(palette) = &options.palette {
                renderer = renderer.palette(palette.clone());
            }
            renderer.render(timeline)
        }
        OutputFormat::Svg => {
            let mut renderer = SvgRenderer::new()
                .title(options.title.as_str())
                .naming(options.naming);
            if let Some(palette) = &options.palette {
                renderer = renderer.palette(palette.clone());
            }
            renderer.render(timeline).map(String::into_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskgantt_core::{build_timeline, Rgb, TaskRecord};

    fn timeline() -> Timeline {
        build_timeline(vec![TaskRecord::new("Training")
            .resource("Trainer")
            .driver("Adoption")
            .location("London")
            .mark(10)
            .mark(11)])
        .timeline
    }

    #[test]
    fn format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.xlsx")), OutputFormat::Xlsx);
        assert_eq!(OutputFormat::from_path(Path::new("OUT.XLSX")), OutputFormat::Xlsx);
        assert_eq!(OutputFormat::from_path(Path::new("chart.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("chart.html")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(Path::new("chart")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(Path::new("chart.txt")), OutputFormat::Html);
    }

    #[test]
    fn format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("excel".parse::<OutputFormat>(), Ok(OutputFormat::Xlsx));
        assert_eq!("svg".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert!("pdf".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Xlsx.to_string(), "xlsx");
    }

    #[test]
    fn render_artifact_html() {
        let options = RenderOptions {
            title: "Q4".into(),
            year: 2025,
            dark: true,
            ..RenderOptions::default()
        };
        let bytes = render_artifact(OutputFormat::Html, &timeline(), &options).unwrap();
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("<h1>Q4</h1>"));
        assert!(html.contains("Oct 2025"));
        assert!(html.contains("#1a1a2e"));
    }

    #[test]
    fn render_artifact_uses_palette_override() {
        let options = RenderOptions {
            palette: Palette::new(vec![Rgb::new(0x123456)]),
            interactive: false,
            ..RenderOptions::default()
        };
        let bytes = render_artifact(OutputFormat::Html, &timeline(), &options).unwrap();
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("#123456"));
        assert!(!html.contains("taskData"));
    }

    #[test]
    fn render_artifact_xlsx_and_svg() {
        let options = RenderOptions::default();
        let xlsx = render_artifact(OutputFormat::Xlsx, &timeline(), &options).unwrap();
        assert_eq!(&xlsx[0..2], b"PK");

        let svg = render_artifact(OutputFormat::Svg, &timeline(), &options).unwrap();
        assert!(svg.starts_with(b"<svg"));
    }

    #[test]
    fn render_artifact_rejects_empty_timeline() {
        for format in [OutputFormat::Html, OutputFormat::Xlsx, OutputFormat::Svg] {
            let result = render_artifact(format, &Timeline::default(), &RenderOptions::default());
            assert!(
                matches!(result, Err(RenderError::InvalidData(ref msg)) if msg == "No tasks to render"),
                "{format} should reject an empty timeline"
            );
        }
    }
}
