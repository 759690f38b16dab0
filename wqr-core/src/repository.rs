//! The single interface through which sample data is fetched and exported.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::model::{PollutionAggregate, Sample, SampleDetail, SummaryResponse};
use crate::payload::{OverviewPayload, SamplePayload};

/// Access to the analysis service.
///
/// Every operation is independent and leaves local state untouched; callers
/// decide how a failure is reported.
#[async_trait]
pub trait SampleRepository: Send + Sync {
    async fn list_samples(&self) -> Result<Vec<Sample>>;

    async fn get_sample(&self, sample_id: &str) -> Result<SampleDetail>;

    async fn get_summary(&self) -> Result<SummaryResponse>;

    async fn get_pollution_aggregates(&self) -> Result<Vec<PollutionAggregate>>;

    /// Raw CSV export of every sample.
    async fn export_csv(&self) -> Result<Bytes>;

    /// Compose the overview PDF report.
    async fn export_report(&self, payload: &OverviewPayload<'_>) -> Result<Bytes>;

    /// Compose the PDF report for one sample.
    async fn export_sample_report(&self, payload: &SamplePayload<'_>) -> Result<Bytes>;
}
