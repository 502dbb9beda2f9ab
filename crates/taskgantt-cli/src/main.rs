//! taskgantt CLI - Month-based Gantt charts from task spreadsheets
//!
//! Reads a task sheet and writes an interactive HTML chart, an XLSX workbook
//! or a static SVG.

mod diagnostics;
mod generate;
mod sample;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskgantt_core::MonthNaming;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::diagnostics::{ExitCode, SkipReporter};
use crate::generate::{GenerateArgs, Settings};

#[derive(Parser)]
#[command(name = "taskgantt")]
#[command(author, version, about = "Month-based Gantt charts from task spreadsheets", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample input workbook
    Sample {
        /// Output workbook path
        #[arg(short, long, value_name = "FILE", default_value = "sample_tasks.xlsx")]
        output: PathBuf,

        /// Month header naming (full, abbreviated)
        #[arg(long, default_value = "full")]
        naming: MonthNaming,
    },
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::Failure
        }
    };
    tracing::debug!(code = code.code(), "exiting");
    code.into()
}

/// `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Sample { output, naming }) => {
            sample::write_sample(&output, naming)
                .with_context(|| format!("Failed to write sample to {}", output.display()))?;
            println!("Sample data saved to {}", output.display());
            Ok(())
        }
        None => run_generate(cli.generate),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let quiet = args.quiet;
    let settings = Settings::resolve(args)?;
    let prepared = generate::prepare(&settings)?;

    let timeline = &prepared.report.timeline;
    let written = if timeline.is_empty() {
        Err(anyhow::anyhow!(
            "No tasks with an active month in {} ({} rows skipped)",
            settings.input.display(),
            prepared.report.skipped.len()
        ))
    } else {
        generate::write_artifact(&settings, &prepared)
    };

    // Skipped rows are reported last, whether or not the write succeeded
    let mut reporter = SkipReporter::new(std::io::stderr().lock())
        .with_input(&settings.input)
        .quiet(quiet);
    reporter.report_all(&prepared.report.skipped)?;

    let bytes = written?;
    println!(
        "Wrote {} chart to {} ({} tasks in {} groups, {} bytes)",
        settings.format,
        settings.output.display(),
        timeline.span_count(),
        timeline.len(),
        bytes
    );
    Ok(())
}
