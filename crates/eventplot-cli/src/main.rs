// File: crates/eventplot-cli/src/main.rs
// Summary: `eventplot` CLI: generates per-event PNG charts and plots.zip from a tracking workbook.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventplot_core::pipeline::{self, GenerateConfig, DEFAULT_SHEET};
use eventplot_core::{EventSeries, SchemaMode, ARCHIVE_NAME, REPORT_NAME};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventplot")]
#[command(author, version, about = "Generate annotated progress charts per event")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SheetArgs {
    /// Input workbook (.xlsx)
    input: PathBuf,

    /// Sheet holding the tracking data
    #[arg(short, long, default_value = DEFAULT_SHEET)]
    sheet: String,

    /// End-date schema: auto, business-days, end-date
    #[arg(long, default_value = "auto")]
    schema: SchemaMode,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart per event and bundle them into plots.zip
    Generate {
        #[command(flatten)]
        sheet: SheetArgs,

        /// Output directory
        #[arg(short, long, default_value = "plots")]
        out: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: Option<i32>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<i32>,

        /// Only write plots.zip, not the individual PNG files
        #[arg(long)]
        no_images: bool,

        /// Also write report.csv with one line per event
        #[arg(long)]
        report: bool,
    },

    /// Load and group the sheet without rendering
    Inspect {
        #[command(flatten)]
        sheet: SheetArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { sheet, out, width, height, no_images, report } => {
            let mut cfg = config(&sheet);
            if let Some(w) = width {
                cfg.render.width = w;
            }
            if let Some(h) = height {
                cfg.render.height = h;
            }
            generate(&sheet.input, &cfg, &out, !no_images, report)
        }
        Commands::Inspect { sheet } => inspect(&sheet.input, &config(&sheet)),
    }
}

fn config(args: &SheetArgs) -> GenerateConfig {
    GenerateConfig { sheet: args.sheet.clone(), schema: args.schema, ..GenerateConfig::default() }
}

fn generate(input: &Path, cfg: &GenerateConfig, out: &Path, write_images: bool, write_report: bool) -> Result<()> {
    info!(input = %input.display(), "generating");
    let run = pipeline::generate_from_path(input, cfg)
        .with_context(|| format!("failed to generate charts from '{}'", input.display()))?;

    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    if write_images {
        // lowercased name -> first file written under it
        let mut written: HashMap<String, &str> = HashMap::new();
        for chart in run.rendered() {
            let key = chart.file_name.to_lowercase();
            if let Some(first) = written.get(&key) {
                warn!(file = %chart.file_name, first = %first, "file name differs only by case; kept in plots.zip only");
                println!("  skipped {}: clashes with {} on case-insensitive file systems", chart.file_name, first);
                continue;
            }
            written.insert(key, &chart.file_name);
            let path = out.join(&chart.file_name);
            std::fs::write(&path, &chart.png).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote chart");
        }
    }
    let zip_path = out.join(ARCHIVE_NAME);
    std::fs::write(&zip_path, &run.archive).with_context(|| format!("writing {}", zip_path.display()))?;
    println!("Wrote {}", zip_path.display());

    if write_report {
        let report_path = out.join(REPORT_NAME);
        let csv = run.to_csv().context("building run report")?;
        std::fs::write(&report_path, csv).with_context(|| format!("writing {}", report_path.display()))?;
        println!("Wrote {}", report_path.display());
    }

    let rendered = run.rendered().count();
    let failures: Vec<_> = run.failures().collect();
    println!("{} of {} events rendered ({} schema)", rendered, run.events.len(), run.source);
    for f in &failures {
        println!("  failed: {f}");
    }
    if rendered == 0 {
        anyhow::bail!("no chart could be produced");
    }
    Ok(())
}

fn inspect(input: &Path, cfg: &GenerateConfig) -> Result<()> {
    let (source, groups) = pipeline::inspect_path(input, cfg)
        .with_context(|| format!("failed to load '{}'", input.display()))?;
    println!("{} events ({} schema)", groups.len(), source);
    for group in &groups {
        match EventSeries::build(group) {
            Ok(series) => println!(
                "  {:<24} rows={:<4} usable={:<4} target={:<6} end={}",
                group.event,
                group.rows.len(),
                series.len(),
                series.completion_target,
                series.end_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            ),
            Err(e) => println!("  {:<24} rows={:<4} {e}", group.event, group.rows.len()),
        }
    }
    Ok(())
}
