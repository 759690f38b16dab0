//! In-memory doubles shared by the workflow tests.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use wqr_core::error::{Operation, RepositoryError, Result};
use wqr_core::model::{PollutionAggregate, Sample, SampleDetail, SummaryResponse};
use wqr_core::payload::{Image, OverviewPayload, SamplePayload, PNG_SIGNATURE};
use wqr_core::repository::SampleRepository;
use wqr_core::{POLLUTION_FIXTURE, SAMPLES_FIXTURE, SAMPLE_DETAIL_FIXTURE, SUMMARY_FIXTURE};
use wqr_data::charts::CategoryPalette;

use crate::capture::{CaptureConfig, MemoryCapture, ReportCapture};
use crate::composer::ExportState;
use crate::delivery::FileSink;
use crate::notify::{Level, Notification, Notifier};
use crate::view::Services;

/// A PNG-signed image whose body is `tag`.
pub(crate) fn png(tag: &str) -> Image {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    Image::from_png(bytes).unwrap()
}

fn refused(operation: Operation) -> RepositoryError {
    RepositoryError::network(operation, "connection refused")
}

/// Serves canned responses. A `None` field makes that call fail.
pub(crate) struct FakeRepository {
    pub(crate) samples: Option<Vec<Sample>>,
    pub(crate) summary: Option<SummaryResponse>,
    pub(crate) pollution: Option<Vec<PollutionAggregate>>,
    pub(crate) detail: Option<SampleDetail>,
    pub(crate) csv: Option<Bytes>,
    pub(crate) document: Option<Bytes>,
    pub(crate) fetch_delay: Duration,
    pub(crate) submit_delay: Duration,
    pub(crate) submitted: Mutex<Vec<serde_json::Value>>,
    pub(crate) probe: Mutex<Option<watch::Receiver<ExportState>>>,
    pub(crate) states: Mutex<Vec<ExportState>>,
}

impl FakeRepository {
    pub(crate) fn from_fixtures() -> Self {
        Self {
            samples: Some(serde_json::from_str(SAMPLES_FIXTURE).unwrap()),
            summary: Some(serde_json::from_str(SUMMARY_FIXTURE).unwrap()),
            pollution: Some(serde_json::from_str(POLLUTION_FIXTURE).unwrap()),
            detail: Some(serde_json::from_str(SAMPLE_DETAIL_FIXTURE).unwrap()),
            csv: Some(Bytes::from_static(
                b"sampleId,latitude,longitude,hpi,mi,cd,category\nWS-001,12.9,77.5,12.5,1.2,0.3,safe\nWS-002,13.0,77.6,88.1,3.4,2.2,moderate\n",
            )),
            document: Some(Bytes::from_static(b"%PDF-1.7 composed")),
            fetch_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
            submitted: Mutex::new(Vec::new()),
            probe: Mutex::new(None),
            states: Mutex::new(Vec::new()),
        }
    }

    /// Record the export state seen at each submission.
    pub(crate) fn watch(&self, state: watch::Receiver<ExportState>) {
        *self.probe.lock().unwrap() = Some(state);
    }

    pub(crate) fn submitted(&self) -> Vec<serde_json::Value> {
        self.submitted.lock().unwrap().clone()
    }

    pub(crate) fn states_at_submit(&self) -> Vec<ExportState> {
        self.states.lock().unwrap().clone()
    }

    async fn fetch<T: Clone>(&self, operation: Operation, value: &Option<T>) -> Result<T> {
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        value.clone().ok_or_else(|| refused(operation))
    }

    async fn submit(&self, operation: Operation, payload: &impl Serialize) -> Result<Bytes> {
        if let Some(probe) = self.probe.lock().unwrap().as_ref() {
            self.states.lock().unwrap().push(*probe.borrow());
        }
        self.submitted
            .lock()
            .unwrap()
            .push(serde_json::to_value(payload).unwrap());
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
        self.document.clone().ok_or_else(|| refused(operation))
    }
}

#[async_trait]
impl SampleRepository for FakeRepository {
    async fn list_samples(&self) -> Result<Vec<Sample>> {
        self.fetch(Operation::ListSamples, &self.samples).await
    }

    async fn get_sample(&self, sample_id: &str) -> Result<SampleDetail> {
        let detail = self.fetch(Operation::GetSample, &self.detail).await?;
        if detail.sample.sample_id == sample_id {
            Ok(detail)
        } else {
            Err(RepositoryError::network(
                Operation::GetSample,
                "bad response status: 404 Not Found",
            ))
        }
    }

    async fn get_summary(&self) -> Result<SummaryResponse> {
        self.fetch(Operation::GetSummary, &self.summary).await
    }

    async fn get_pollution_aggregates(&self) -> Result<Vec<PollutionAggregate>> {
        self.fetch(Operation::GetPollutionAggregates, &self.pollution)
            .await
    }

    async fn export_csv(&self) -> Result<Bytes> {
        self.fetch(Operation::ExportCsv, &self.csv).await
    }

    async fn export_report(&self, payload: &OverviewPayload<'_>) -> Result<Bytes> {
        self.submit(Operation::ExportReport, payload).await
    }

    async fn export_sample_report(&self, payload: &SamplePayload<'_>) -> Result<Bytes> {
        self.submit(Operation::ExportSampleReport, payload).await
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Delivery {
    pub(crate) filename: String,
    pub(crate) mime: String,
    pub(crate) contents: Bytes,
}

/// Keeps delivered files in memory.
#[derive(Default)]
pub(crate) struct RecordingSink {
    fail: bool,
    deliveries: Mutex<Vec<Delivery>>,
    probe: Mutex<Option<watch::Receiver<ExportState>>>,
    states: Mutex<Vec<ExportState>>,
}

impl RecordingSink {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn watch(&self, state: watch::Receiver<ExportState>) {
        *self.probe.lock().unwrap() = Some(state);
    }

    pub(crate) fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub(crate) fn states_at_delivery(&self) -> Vec<ExportState> {
        self.states.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSink for RecordingSink {
    async fn deliver(&self, filename: &str, mime: &str, contents: Bytes) -> io::Result<PathBuf> {
        if let Some(probe) = self.probe.lock().unwrap().as_ref() {
            self.states.lock().unwrap().push(*probe.borrow());
        }
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.deliveries.lock().unwrap().push(Delivery {
            filename: filename.to_string(),
            mime: mime.to_string(),
            contents,
        });
        Ok(PathBuf::from(filename))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(crate) fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn titles(&self) -> Vec<String> {
        self.seen().into_iter().map(|n| n.title).collect()
    }

    pub(crate) fn errors(&self) -> Vec<Notification> {
        self.seen()
            .into_iter()
            .filter(|n| n.level == Level::Error)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Fakes wired into [`Services`], kept around for inspection.
pub(crate) struct Fixture {
    pub(crate) repository: Arc<FakeRepository>,
    pub(crate) sink: Arc<RecordingSink>,
    pub(crate) notifier: Arc<RecordingNotifier>,
    pub(crate) services: Services,
}

pub(crate) fn fixture(repository: FakeRepository, capture: MemoryCapture) -> Fixture {
    let repository = Arc::new(repository);
    let sink = Arc::new(RecordingSink::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let services = Services {
        repository: repository.clone(),
        capture: ReportCapture::new(
            Arc::new(capture),
            CaptureConfig {
                settle_delay: Duration::ZERO,
            },
        ),
        sink: sink.clone(),
        notifier: notifier.clone(),
        palette: CategoryPalette::default(),
    };
    Fixture {
        repository,
        sink,
        notifier,
        services,
    }
}
