//! Read-only commands: sample listing, sample detail and chart series.

use anyhow::Context;
use log::info;
use serde::Serialize;
use std::path::Path;
use wqr_report::view::{DetailView, ResultsView};

use crate::render;
use crate::settings::Settings;

/// Print the results table and summary cards.
pub async fn run_samples(settings: &Settings, all: bool) -> anyhow::Result<()> {
    let services = settings.services(Path::new("."), Path::new("."))?;
    let view = ResultsView::new(&services);
    view.load().await;
    if all {
        view.toggle_show_all();
    }
    let state = view.snapshot();

    print!("{}", render::sample_table(&state.visible_rows()));
    if !all {
        if let Some(label) = state.toggle_label() {
            println!("{} with --all", label);
        }
    }
    println!();
    println!("{}", render::summary_line(state.summary_cards(), state.total_samples));
    Ok(())
}

/// Print one sample's details and chart series.
pub async fn run_sample(settings: &Settings, sample_id: &str) -> anyhow::Result<()> {
    let services = settings.services(Path::new("."), Path::new("."))?;
    let view = DetailView::new(&services, sample_id);
    view.load().await;
    if view.detail().is_none() {
        anyhow::bail!("Sample {} could not be loaded", sample_id);
    }

    println!("Detailed Report: {}", sample_id);
    print!("{}", render::info_lines(&view.info_lines()));
    println!();
    print!("{}", render::series("Water Quality Parameters", &view.water_quality_series()));
    print!("{}", render::series("Heavy Metals", &view.metal_series()));
    print!("{}", render::series("Pollution Indices", &view.index_series()));
    Ok(())
}

/// Write the overview chart series as JSON files for the chart renderer.
pub async fn run_charts(settings: &Settings, out_dir: &Path) -> anyhow::Result<()> {
    let services = settings.services(out_dir, Path::new("."))?;
    let view = ResultsView::new(&services);
    view.load().await;
    let state = view.snapshot();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    write_json(&out_dir.join("pollution-indices.json"), &state.pollution)?;
    write_json(&out_dir.join("category-summary.json"), &state.categories)?;
    info!(
        "Wrote {} pollution groups and {} category slices to {}",
        state.pollution.len(),
        state.categories.len(),
        out_dir.display()
    );
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
