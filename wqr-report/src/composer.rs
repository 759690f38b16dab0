//! The capture → submit → deliver workflow for PDF reports.
//!
//! A run moves through `Idle → Capturing → Submitting → Delivering` and back
//! to `Idle`, whether it succeeds or fails. Capture failures only blank the
//! affected chart; a failed or cancelled submission ends the run before
//! anything is delivered.

use bytes::Bytes;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use wqr_core::error::RepositoryError;
use wqr_core::model::{Sample, SampleDetail};
use wqr_core::payload::{Image, OverviewCharts, OverviewPayload, SampleCharts, SamplePayload};
use wqr_core::repository::SampleRepository;

use crate::cancel::until_cancelled;
use crate::capture::{regions, ReportCapture};
use crate::delivery::{FileSink, PDF_MIME};
use crate::error::ExportError;
use crate::notify::{Notification, Notifier};

/// Filename of the overview report.
pub const REPORT_FILENAME: &str = "Water_Analysis_Report.pdf";

/// Filename of the report for one sample.
pub fn sample_report_filename(sample_id: &str) -> String {
    format!("Sample_Report_{}.pdf", sample_id)
}

/// Where a report run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Capturing,
    Submitting,
    Delivering,
}

enum ExportRequest<'a> {
    Overview(OverviewPayload<'a>),
    Sample(SamplePayload<'a>),
}

/// Builds reports from captured panels and delivers the composed document.
pub struct ReportComposer {
    repository: Arc<dyn SampleRepository>,
    capture: ReportCapture,
    sink: Arc<dyn FileSink>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<ExportState>,
}

impl ReportComposer {
    pub fn new(
        repository: Arc<dyn SampleRepository>,
        capture: ReportCapture,
        sink: Arc<dyn FileSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(ExportState::Idle);
        Self {
            repository,
            capture,
            sink,
            notifier,
            state,
        }
    }

    pub fn state(&self) -> ExportState {
        *self.state.borrow()
    }

    /// Follow state transitions of this composer's runs.
    pub fn subscribe(&self) -> watch::Receiver<ExportState> {
        self.state.subscribe()
    }

    /// Overview report of all samples with the pollution, pie and map panels.
    pub async fn compose_overview(
        &self,
        samples: &[Sample],
        filename: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ExportError> {
        self.run(filename, cancel, &regions::OVERVIEW, |images| {
            let mut images = images.into_iter();
            ExportRequest::Overview(OverviewPayload {
                samples,
                charts: OverviewCharts {
                    pollution_chart: images.next().flatten(),
                    pie_chart: images.next().flatten(),
                    map_snapshot: images.next().flatten(),
                },
            })
        })
        .await
    }

    /// Report for one sample with its parameter, metal and index panels.
    pub async fn compose_sample(
        &self,
        detail: &SampleDetail,
        filename: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ExportError> {
        self.run(filename, cancel, &regions::DETAIL, |images| {
            let mut images = images.into_iter();
            ExportRequest::Sample(SamplePayload {
                sample: detail,
                charts: SampleCharts {
                    pollution_chart: images.next().flatten(),
                    pie_chart: images.next().flatten(),
                    index_chart: images.next().flatten(),
                },
            })
        })
        .await
    }

    async fn run<'a, B>(
        &self,
        filename: &str,
        cancel: &CancellationToken,
        region_ids: &[&str],
        build: B,
    ) -> Result<(), ExportError>
    where
        B: FnOnce(Vec<Option<Image>>) -> ExportRequest<'a>,
    {
        self.notifier.notify(Notification::info(
            "Generating Report",
            "Preparing your PDF report with charts and map...",
        ));
        let outcome = self.pipeline(filename, cancel, region_ids, build).await;
        self.enter(ExportState::Idle);
        match &outcome {
            Ok(()) => {
                info!("Report {} delivered", filename);
                self.notifier.notify(Notification::info(
                    "Report Ready",
                    "Your PDF report has been downloaded.",
                ));
            }
            Err(e) => {
                error!("Report {} failed: {}", filename, e);
                self.notifier.notify(Notification::error(
                    "Download Failed",
                    format!("Something went wrong while generating the report: {}", e),
                ));
            }
        }
        outcome
    }

    async fn pipeline<'a, B>(
        &self,
        filename: &str,
        cancel: &CancellationToken,
        region_ids: &[&str],
        build: B,
    ) -> Result<(), ExportError>
    where
        B: FnOnce(Vec<Option<Image>>) -> ExportRequest<'a>,
    {
        self.enter(ExportState::Capturing);
        let images = until_cancelled(cancel, self.capture.capture_all(region_ids)).await?;
        let request = build(images);

        self.enter(ExportState::Submitting);
        let document = until_cancelled(cancel, self.submit(&request)).await??;

        self.enter(ExportState::Delivering);
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        self.sink
            .deliver(filename, PDF_MIME, document)
            .await
            .map_err(|source| ExportError::Delivery {
                filename: filename.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn submit(&self, request: &ExportRequest<'_>) -> Result<Bytes, RepositoryError> {
        match request {
            ExportRequest::Overview(payload) => self.repository.export_report(payload).await,
            ExportRequest::Sample(payload) => self.repository.export_sample_report(payload).await,
        }
    }

    fn enter(&self, state: ExportState) {
        debug!("Export state: {:?}", state);
        self.state.send_replace(state);
    }
}
