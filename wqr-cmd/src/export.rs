//! Export commands. Ctrl-C cancels an export before anything is saved.
//!
//! The file sink logs where each file lands.

use anyhow::Context;
use log::warn;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use wqr_report::view::{DetailView, ResultsView};

use crate::settings::Settings;

fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling export");
            token.cancel();
        }
    });
}

fn prepare(out_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))
}

pub async fn run_export_csv(settings: &Settings, out_dir: &Path) -> anyhow::Result<()> {
    prepare(out_dir)?;
    let services = settings.services(out_dir, Path::new("."))?;
    let view = ResultsView::new(&services);
    cancel_on_interrupt(view.teardown_token());
    view.export_csv().await?;
    Ok(())
}

/// Load all samples, capture the overview panels and save the composed PDF.
pub async fn run_export_report(
    settings: &Settings,
    out_dir: &Path,
    snapshots: &Path,
) -> anyhow::Result<()> {
    prepare(out_dir)?;
    let services = settings.services(out_dir, snapshots)?;
    let view = ResultsView::new(&services);
    cancel_on_interrupt(view.teardown_token());
    view.load().await;
    if view.snapshot().samples.is_empty() {
        anyhow::bail!("No samples loaded, nothing to report");
    }
    view.export_report().await?;
    Ok(())
}

pub async fn run_sample_report(
    settings: &Settings,
    sample_id: &str,
    out_dir: &Path,
    snapshots: &Path,
) -> anyhow::Result<()> {
    prepare(out_dir)?;
    let services = settings.services(out_dir, snapshots)?;
    let view = DetailView::new(&services, sample_id);
    cancel_on_interrupt(view.teardown_token());
    view.load().await;
    view.export_report().await?;
    Ok(())
}
