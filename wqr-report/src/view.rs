//! Coordinators for the results overview and the single-sample detail.
//!
//! A view owns its loaded state and a teardown token. Fetches and exports
//! started from a view are abandoned once the view is closed.

use log::{debug, error, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use wqr_core::model::{Sample, SampleDetail};
use wqr_core::repository::SampleRepository;
use wqr_data::charts::{
    summary_cards, to_category_summary, to_index_series, to_metal_series, to_pollution_series,
    to_water_quality_series, CategoryPalette,
};
use wqr_data::models::{CategorySummary, PollutionSeriesEntry, SeriesEntry, SummaryCards};
use wqr_data::ordering::RowWindow;
use wqr_utils::dates::format_sampling_date;
use wqr_utils::geo::format_coordinates;

use crate::capture::ReportCapture;
use crate::composer::{sample_report_filename, ReportComposer, REPORT_FILENAME};
use crate::delivery::FileSink;
use crate::error::ExportError;
use crate::notify::{Notification, Notifier};
use crate::tabular::{TabularExporter, CSV_FILENAME};

/// Everything a view needs from the outside world.
#[derive(Clone)]
pub struct Services {
    pub repository: Arc<dyn SampleRepository>,
    pub capture: ReportCapture,
    pub sink: Arc<dyn FileSink>,
    pub notifier: Arc<dyn Notifier>,
    pub palette: CategoryPalette,
}

impl Services {
    fn composer(&self) -> ReportComposer {
        ReportComposer::new(
            self.repository.clone(),
            self.capture.clone(),
            self.sink.clone(),
            self.notifier.clone(),
        )
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Loaded state of the results overview.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub loading: bool,
    pub samples: Vec<Sample>,
    pub categories: Vec<CategorySummary>,
    pub total_samples: Option<u64>,
    pub pollution: Vec<PollutionSeriesEntry>,
    pub window: RowWindow,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            samples: Vec::new(),
            categories: Vec::new(),
            total_samples: None,
            pollution: Vec::new(),
            window: RowWindow::default(),
        }
    }
}

impl ViewState {
    /// Table rows in display order, limited unless expanded.
    pub fn visible_rows(&self) -> Vec<&Sample> {
        self.window.rows(&self.samples)
    }

    pub fn summary_cards(&self) -> Option<SummaryCards> {
        summary_cards(&self.categories)
    }

    pub fn toggle_label(&self) -> Option<String> {
        self.window.toggle_label(self.samples.len())
    }
}

/// The results overview: sample table, summary cards, charts and exports.
pub struct ResultsView {
    services: Services,
    state: Mutex<ViewState>,
    composer: ReportComposer,
    tabular: TabularExporter,
    teardown: CancellationToken,
}

impl ResultsView {
    pub fn new(services: &Services) -> Self {
        Self {
            services: services.clone(),
            state: Mutex::new(ViewState::default()),
            composer: services.composer(),
            tabular: TabularExporter::new(
                services.repository.clone(),
                services.sink.clone(),
                services.notifier.clone(),
            ),
            teardown: CancellationToken::new(),
        }
    }

    /// Fetch samples, summary and pollution aggregates concurrently.
    ///
    /// Each fetch fills only its own part of the state; a failed fetch leaves
    /// its part empty and raises its own notification.
    pub async fn load(&self) {
        let fetches = async {
            tokio::join!(
                self.load_samples(),
                self.load_summary(),
                self.load_pollution()
            )
        };
        tokio::select! {
            biased;
            _ = self.teardown.cancelled() => debug!("Results view closed while loading"),
            _ = fetches => {}
        }
        lock(&self.state).loading = false;
    }

    async fn load_samples(&self) {
        match self.services.repository.list_samples().await {
            Ok(samples) => {
                info!("Loaded {} samples", samples.len());
                lock(&self.state).samples = samples;
            }
            Err(e) => self.fail("Sample fetch error", e),
        }
    }

    async fn load_summary(&self) {
        let summary = match self.services.repository.get_summary().await {
            Ok(summary) => summary,
            Err(e) => return self.fail("Summary error", e),
        };
        match to_category_summary(&summary.categories, &self.services.palette) {
            Ok(categories) => {
                let mut state = lock(&self.state);
                state.categories = categories;
                state.total_samples = Some(summary.total_samples);
            }
            Err(e) => self.fail("Summary error", e),
        }
    }

    async fn load_pollution(&self) {
        match self.services.repository.get_pollution_aggregates().await {
            Ok(aggregates) => lock(&self.state).pollution = to_pollution_series(&aggregates),
            Err(e) => self.fail("Chart data error", e),
        }
    }

    fn fail(&self, title: &str, e: impl std::fmt::Display) {
        error!("{}: {}", title, e);
        self.services
            .notifier
            .notify(Notification::error(title, e.to_string()));
    }

    pub fn snapshot(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn toggle_show_all(&self) {
        lock(&self.state).window.toggle();
    }

    pub fn composer(&self) -> &ReportComposer {
        &self.composer
    }

    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    /// Abandon in-flight loads and exports.
    pub fn close(&self) {
        self.teardown.cancel();
    }

    /// Overview PDF of every loaded sample.
    pub async fn export_report(&self) -> Result<(), ExportError> {
        let samples = lock(&self.state).samples.clone();
        self.composer
            .compose_overview(&samples, REPORT_FILENAME, &self.teardown)
            .await
    }

    pub async fn export_csv(&self) -> Result<(), ExportError> {
        self.tabular.export_csv(CSV_FILENAME, &self.teardown).await
    }
}

/// The detail page of one sample.
pub struct DetailView {
    services: Services,
    sample_id: String,
    detail: Mutex<Option<SampleDetail>>,
    composer: ReportComposer,
    teardown: CancellationToken,
}

impl DetailView {
    pub fn new(services: &Services, sample_id: impl Into<String>) -> Self {
        Self {
            services: services.clone(),
            sample_id: sample_id.into(),
            detail: Mutex::new(None),
            composer: services.composer(),
            teardown: CancellationToken::new(),
        }
    }

    pub async fn load(&self) {
        let outcome = tokio::select! {
            biased;
            _ = self.teardown.cancelled() => None,
            outcome = self.services.repository.get_sample(&self.sample_id) => Some(outcome),
        };
        match outcome {
            None => debug!("Detail view closed while loading {}", self.sample_id),
            Some(Ok(detail)) => *lock(&self.detail) = Some(detail),
            Some(Err(e)) => {
                error!("Failed to load sample {}: {}", self.sample_id, e);
                self.services
                    .notifier
                    .notify(Notification::error("Sample fetch error", e.to_string()));
            }
        }
    }

    pub fn detail(&self) -> Option<SampleDetail> {
        lock(&self.detail).clone()
    }

    fn project<T: Default>(&self, f: impl FnOnce(&SampleDetail) -> T) -> T {
        lock(&self.detail).as_ref().map(f).unwrap_or_default()
    }

    pub fn water_quality_series(&self) -> Vec<SeriesEntry> {
        self.project(|d| to_water_quality_series(&d.water_quality))
    }

    pub fn metal_series(&self) -> Vec<SeriesEntry> {
        self.project(|d| to_metal_series(&d.metals))
    }

    pub fn index_series(&self) -> Vec<SeriesEntry> {
        self.project(|d| to_index_series(&d.sample.indices))
    }

    /// Labelled summary lines of the loaded sample.
    pub fn info_lines(&self) -> Vec<(&'static str, String)> {
        self.project(|d| {
            let location = [&d.village, &d.block, &d.district, &d.state]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                ("Location", location),
                (
                    "Coordinates",
                    format_coordinates(d.sample.latitude, d.sample.longitude),
                ),
                ("Status", d.sample.category.to_string()),
                (
                    "Sampling Date",
                    d.sampling_date
                        .as_deref()
                        .map(format_sampling_date)
                        .unwrap_or_default(),
                ),
                ("Well Type", d.well_type.clone().unwrap_or_default()),
            ]
        })
    }

    pub fn composer(&self) -> &ReportComposer {
        &self.composer
    }

    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn close(&self) {
        self.teardown.cancel();
    }

    /// `Sample_Report_<sampleId>.pdf` for the loaded sample.
    pub async fn export_report(&self) -> Result<(), ExportError> {
        let detail = match self.detail() {
            Some(detail) => detail,
            None => {
                let e = ExportError::NotLoaded(self.sample_id.clone());
                self.services
                    .notifier
                    .notify(Notification::error("Download Failed", e.to_string()));
                return Err(e);
            }
        };
        let filename = sample_report_filename(&detail.sample.sample_id);
        self.composer
            .compose_sample(&detail, &filename, &self.teardown)
            .await
    }
}
