//! Report Studio - student progress report PDF exporter
//!
//! Command-line front end for the export pipeline: export one pre-rendered
//! report snapshot, run a batch manifest, or manage stored settings.

use std::path::PathBuf;

use anyhow::Context;
use capture::{ImageRegion, MissingRegion, QualityTier, RenderRegion};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use export_engine::{BatchItem, ExportOptions, LogNotifier, ReportExporter};
use serde::Deserialize;
use store::{AppSettings, DirectorySink, JsonFileStore, SettingsManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "Export student progress reports as paginated PDFs", long_about = None)]
struct Cli {
    /// Directory holding settings and other application state
    #[arg(long, default_value = ".report-studio")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single rendered report snapshot as a PDF
    Export {
        /// Pre-rendered report snapshot (PNG or JPEG)
        snapshot: PathBuf,

        /// Student the report belongs to
        #[arg(long)]
        student: String,

        /// Rasterization quality tier
        #[arg(long, value_enum)]
        tier: Option<TierArg>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author (defaults to the configured organization)
        #[arg(long)]
        author: Option<String>,

        /// Directory the PDF is written into (defaults to the configured
        /// output directory, then the working directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Export date override (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Export every report listed in a JSON batch manifest
    Batch {
        /// Manifest file: {"items": [{"snapshot": "...", "studentName": "...", ...}]}
        manifest: PathBuf,

        /// Directory the PDFs are written into (defaults to the configured
        /// output directory, then the working directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Export date override (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show or change stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Set the organization used as the default PDF author
    SetOrganization { name: String },
    /// Set the default quality tier
    SetTier {
        #[arg(value_enum)]
        tier: TierArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Minimal,
    Standard,
    Hd,
}

impl From<TierArg> for QualityTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Minimal => QualityTier::Minimal,
            TierArg::Standard => QualityTier::Standard,
            TierArg::Hd => QualityTier::Hd,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchManifest {
    items: Vec<BatchManifestItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchManifestItem {
    snapshot: PathBuf,
    #[serde(flatten)]
    options: ExportOptions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut settings = SettingsManager::new(Box::new(JsonFileStore::new(&cli.data_dir)));
    settings.load().context("failed to load settings")?;

    match cli.command {
        Commands::Export {
            snapshot,
            student,
            tier,
            title,
            author,
            out_dir,
            date,
        } => {
            let tier = tier
                .map(QualityTier::from)
                .unwrap_or(settings.get().export.quality_tier);
            let mut options = ExportOptions::new(student).with_tier(tier);
            options.title = title;
            options.author = author;

            let exporter = build_exporter(settings.get().clone(), out_dir, date);
            let mut region = open_region(&snapshot);

            let outcome = exporter.export(region.as_mut(), &options);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !outcome.success {
                std::process::exit(1);
            }
        }
        Commands::Batch {
            manifest,
            out_dir,
            date,
        } => {
            let text = tokio::fs::read_to_string(&manifest)
                .await
                .with_context(|| format!("failed to read manifest {}", manifest.display()))?;
            let manifest: BatchManifest =
                serde_json::from_str(&text).context("failed to parse manifest")?;

            let exporter = build_exporter(settings.get().clone(), out_dir, date);
            let mut items: Vec<BatchItem> = manifest
                .items
                .into_iter()
                .map(|item| BatchItem::new(open_region(&item.snapshot), item.options))
                .collect();

            let report = exporter.export_batch(&mut items);
            println!("{}", serde_json::to_string_pretty(&report.outcomes)?);
            if !report.all_succeeded() {
                std::process::exit(1);
            }
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", serde_json::to_string_pretty(settings.get())?);
            }
            SettingsAction::SetOrganization { name } => {
                let mut current = settings.get().clone();
                current.organization.name = name;
                settings.update(current).context("failed to save settings")?;
                println!("{}", serde_json::to_string_pretty(settings.get())?);
            }
            SettingsAction::SetTier { tier } => {
                let mut current = settings.get().clone();
                current.export.quality_tier = tier.into();
                settings.update(current).context("failed to save settings")?;
                println!("{}", serde_json::to_string_pretty(settings.get())?);
            }
        },
    }

    Ok(())
}

fn build_exporter(
    settings: AppSettings,
    out_dir: Option<PathBuf>,
    date: Option<NaiveDate>,
) -> ReportExporter {
    let out_dir = out_dir
        .or_else(|| settings.export.output_dir.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let exporter = ReportExporter::new(
        settings,
        Box::new(DirectorySink::new(out_dir)),
        Box::new(LogNotifier),
    );
    match date {
        Some(date) => exporter.with_export_date(date),
        None => exporter,
    }
}

/// Open a snapshot region, degrading to the absent target on failure so the
/// pipeline reports it as a per-item export failure.
fn open_region(snapshot: &PathBuf) -> Box<dyn RenderRegion> {
    match ImageRegion::open(snapshot) {
        Ok(region) => Box::new(region),
        Err(err) => {
            tracing::warn!(snapshot = %snapshot.display(), "cannot open snapshot: {err}");
            Box::new(MissingRegion)
        }
    }
}
