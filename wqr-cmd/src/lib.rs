//! Command implementations for the WQR CLI.
//!
//! Provides subcommands for browsing sample results, writing chart series
//! for an external renderer, and exporting CSV data and PDF reports.

use clap::Subcommand;
use std::path::PathBuf;

pub mod export;
pub mod query;
pub mod render;
pub mod settings;

pub use settings::Settings;

#[derive(Subcommand)]
pub enum Command {
    /// List samples in display order with the category summary
    Samples {
        /// Show every sample instead of the first 15
        #[arg(long)]
        all: bool,
    },

    /// Show one sample with its parameter, metal and index series
    Sample {
        /// Sample identifier, e.g. WS-007
        sample_id: String,
    },

    /// Write chart series as JSON for the chart renderer
    Charts {
        /// Directory for pollution-indices.json and category-summary.json
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Download the raw CSV export
    ExportCsv {
        /// Directory to save Water_Analysis_Data.csv into
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Compose the overview PDF report
    ExportReport {
        /// Directory to save Water_Analysis_Report.pdf into
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: PathBuf,

        /// Directory holding rendered chart snapshots (<region>.png)
        #[arg(short = 's', long)]
        snapshots: PathBuf,
    },

    /// Compose the PDF report for one sample
    SampleReport {
        /// Sample identifier, e.g. WS-007
        sample_id: String,

        /// Directory to save Sample_Report_<id>.pdf into
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: PathBuf,

        /// Directory holding rendered chart snapshots (<region>.png)
        #[arg(short = 's', long)]
        snapshots: PathBuf,
    },
}

pub async fn run(settings: Settings, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Samples { all } => query::run_samples(&settings, all).await,
        Command::Sample { sample_id } => query::run_sample(&settings, &sample_id).await,
        Command::Charts { out_dir } => query::run_charts(&settings, &out_dir).await,
        Command::ExportCsv { out_dir } => export::run_export_csv(&settings, &out_dir).await,
        Command::ExportReport { out_dir, snapshots } => {
            export::run_export_report(&settings, &out_dir, &snapshots).await
        }
        Command::SampleReport {
            sample_id,
            out_dir,
            snapshots,
        } => export::run_sample_report(&settings, &sample_id, &out_dir, &snapshots).await,
    }
}
