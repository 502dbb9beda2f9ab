//! The chart pipeline: load, extract, group, render, write

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use taskgantt_core::{build_timeline, BuildReport, ColumnAliases, GanttConfig, MonthNaming};
use taskgantt_loader::load_file;
use taskgantt_render::{render_artifact, OutputFormat, RenderOptions};

/// Output path used when `--output` is omitted
pub const DEFAULT_OUTPUT: &str = "gantt_chart.html";

/// Arguments of the chart-generating invocation
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Input spreadsheet (xlsx, xlsm, xls, ods or csv)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (html, xlsx, svg); inferred from the output extension
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Calendar year for hover dates
    #[arg(long)]
    pub year: Option<i32>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the dark HTML theme
    #[arg(long)]
    pub dark: bool,

    /// Render HTML without tabs, tooltips or zoom
    #[arg(long = "static")]
    pub static_chart: bool,

    /// Count skipped rows without listing them
    #[arg(short, long)]
    pub quiet: bool,
}

/// Fully resolved run settings
#[derive(Clone, Debug)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub options: RenderOptions,
    pub columns: ColumnAliases,
}

impl Settings {
    /// Resolve arguments against the optional config file
    pub fn resolve(args: GenerateArgs) -> Result<Self> {
        let config = match &args.config {
            Some(path) => GanttConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GanttConfig::default(),
        };
        Self::from_parts(args, config)
    }

    /// Flag > config file > built-in default
    pub fn from_parts(args: GenerateArgs, config: GanttConfig) -> Result<Self> {
        let input = args.input.context("No input file given (use --input)")?;
        let output = args.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let format = args
            .format
            .unwrap_or_else(|| OutputFormat::from_path(&output));

        let defaults = RenderOptions::default();
        let palette = config.palette().context("Invalid palette in config")?;
        let options = RenderOptions {
            title: args.title.or(config.title).unwrap_or(defaults.title),
            year: args.year.or(config.year).unwrap_or(defaults.year),
            naming: defaults.naming,
            palette,
            dark: args.dark,
            interactive: !args.static_chart,
        };

        Ok(Self {
            input,
            output,
            format,
            options,
            columns: config.columns,
        })
    }
}

/// Input read and grouped, ready to render
#[derive(Debug)]
pub struct Prepared {
    pub report: BuildReport,
    pub naming: MonthNaming,
}

/// Load the input and build the timeline
pub fn prepare(settings: &Settings) -> Result<Prepared> {
    let input = &settings.input;
    tracing::info!(path = %input.display(), "reading tasks");

    let sheet = load_file(input, &settings.columns)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let naming = sheet.naming;
    let report = build_timeline(sheet.records);

    tracing::debug!(
        groups = report.timeline.len(),
        spans = report.timeline.span_count(),
        skipped = report.skipped.len(),
        "built timeline"
    );

    Ok(Prepared { report, naming })
}

/// Render the timeline and write the artifact, returning its size in bytes.
///
/// Nothing is written unless rendering succeeds.
pub fn write_artifact(settings: &Settings, prepared: &Prepared) -> Result<usize> {
    let options = RenderOptions {
        naming: prepared.naming,
        ..settings.options.clone()
    };

    let bytes = render_artifact(settings.format, &prepared.report.timeline, &options)
        .with_context(|| format!("Failed to render {} output", settings.format))?;
    write_output(&settings.output, &bytes)?;

    tracing::info!(
        path = %settings.output.display(),
        format = %settings.format,
        bytes = bytes.len(),
        "wrote artifact"
    );
    Ok(bytes.len())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
