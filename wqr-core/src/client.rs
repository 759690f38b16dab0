//! HTTP implementation of [`SampleRepository`] against the analysis service.

use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, warn};
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::ClientConfig;
use crate::error::{Operation, RepositoryError, Result};
use crate::model::{PollutionAggregate, Sample, SampleDetail, SummaryResponse};
use crate::payload::{OverviewPayload, SamplePayload};
use crate::repository::SampleRepository;

const SAMPLES_PATH: &str = "/api/samples";
const SUMMARY_PATH: &str = "/api/summary";
const POLLUTION_PATH: &str = "/api/charts/pollution-indices";
const EXPORT_PDF_PATH: &str = "/api/export/pdf";
const EXPORT_SAMPLE_PDF_PATH: &str = "/api/export/sample-pdf";
const EXPORT_CSV_PATH: &str = "/api/export/csv";

/// Decode a JSON response body, mapping shape mismatches to a data-integrity failure.
fn decode<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("{}: malformed response body: {}", operation, e);
        RepositoryError::data_integrity(operation, e)
    })
}

async fn read_body(operation: Operation, response: Response) -> Result<Bytes> {
    let status = response.status();
    if !status.is_success() {
        warn!("{}: bad response status {}", operation, status);
        return Err(RepositoryError::network(
            operation,
            format!("bad response status: {}", status),
        ));
    }
    response.bytes().await.map_err(|e| {
        warn!("{}: failed to read response body: {}", operation, e);
        RepositoryError::network(operation, e)
    })
}

/// Analysis service client sharing one connection pool across operations.
#[derive(Debug, Clone)]
pub struct HttpSampleRepository {
    client: Client,
    config: ClientConfig,
}

impl HttpSampleRepository {
    pub fn new(config: ClientConfig) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, operation: Operation, path: &str) -> Result<Url> {
        Url::parse(&self.config.endpoint(path))
            .map_err(|e| RepositoryError::network(operation, format!("invalid service url: {}", e)))
    }

    /// `/api/samples/:id`, with the id encoded as a single path segment.
    fn sample_url(&self, sample_id: &str) -> Result<Url> {
        let mut url = self.url(Operation::GetSample, SAMPLES_PATH)?;
        url.path_segments_mut()
            .map_err(|_| RepositoryError::network(Operation::GetSample, "service url cannot carry a path"))?
            .push(sample_id);
        Ok(url)
    }

    async fn get_bytes(&self, operation: Operation, url: Url) -> Result<Bytes> {
        debug!("GET {} ({})", url, operation);
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("{}: request failed: {}", operation, e);
            RepositoryError::network(operation, e)
        })?;
        read_body(operation, response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: Operation, url: Url) -> Result<T> {
        let body = self.get_bytes(operation, url).await?;
        decode(operation, &body)
    }

    /// POST a JSON payload and return the binary document.
    ///
    /// Bounded by `submit_timeout` instead of the client-wide request timeout,
    /// since composition can take far longer than a fetch.
    async fn submit<P: Serialize + Sync>(
        &self,
        operation: Operation,
        path: &str,
        payload: &P,
    ) -> Result<Bytes> {
        let url = self.url(operation, path)?;
        debug!("POST {} ({})", url, operation);
        let request = async {
            let response = self
                .client
                .post(url)
                .timeout(self.config.submit_timeout)
                .json(payload)
                .send()
                .await
                .map_err(|e| {
                    warn!("{}: request failed: {}", operation, e);
                    if e.is_timeout() {
                        self.no_response(operation)
                    } else {
                        RepositoryError::network(operation, e)
                    }
                })?;
            read_body(operation, response).await
        };
        match tokio::time::timeout(self.config.submit_timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "{}: no response within {:?}",
                    operation, self.config.submit_timeout
                );
                Err(self.no_response(operation))
            }
        }
    }

    fn no_response(&self, operation: Operation) -> RepositoryError {
        RepositoryError::network(
            operation,
            format!("no response within {:?}", self.config.submit_timeout),
        )
    }
}

#[async_trait]
impl SampleRepository for HttpSampleRepository {
    async fn list_samples(&self) -> Result<Vec<Sample>> {
        let url = self.url(Operation::ListSamples, SAMPLES_PATH)?;
        let samples: Vec<Sample> = self.get_json(Operation::ListSamples, url).await?;
        for sample in samples.iter().filter(|s| !s.has_valid_coordinates()) {
            warn!(
                "sample {} has out-of-range coordinates ({}, {})",
                sample.sample_id, sample.latitude, sample.longitude
            );
        }
        Ok(samples)
    }

    async fn get_sample(&self, sample_id: &str) -> Result<SampleDetail> {
        let url = self.sample_url(sample_id)?;
        self.get_json(Operation::GetSample, url).await
    }

    async fn get_summary(&self) -> Result<SummaryResponse> {
        let url = self.url(Operation::GetSummary, SUMMARY_PATH)?;
        self.get_json(Operation::GetSummary, url).await
    }

    async fn get_pollution_aggregates(&self) -> Result<Vec<PollutionAggregate>> {
        let url = self.url(Operation::GetPollutionAggregates, POLLUTION_PATH)?;
        self.get_json(Operation::GetPollutionAggregates, url).await
    }

    async fn export_csv(&self) -> Result<Bytes> {
        let url = self.url(Operation::ExportCsv, EXPORT_CSV_PATH)?;
        self.get_bytes(Operation::ExportCsv, url).await
    }

    async fn export_report(&self, payload: &OverviewPayload<'_>) -> Result<Bytes> {
        self.submit(Operation::ExportReport, EXPORT_PDF_PATH, payload)
            .await
    }

    async fn export_sample_report(&self, payload: &SamplePayload<'_>) -> Result<Bytes> {
        self.submit(Operation::ExportSampleReport, EXPORT_SAMPLE_PDF_PATH, payload)
            .await
    }
}
