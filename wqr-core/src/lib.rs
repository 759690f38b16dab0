//! Core types and analysis service client for water quality sample results.
//!
//! The data model mirrors the JSON served by the analysis service. The
//! [`repository::SampleRepository`] trait is the single seam through which
//! every other crate reaches the service; the HTTP implementation lives in
//! [`client`] behind the `api` feature so pure consumers stay light.

pub mod config;
pub mod error;
pub mod model;
pub mod payload;
pub mod repository;

#[cfg(feature = "api")]
pub mod client;

/// Embedded fixture: sixteen samples as served by `GET /api/samples`.
pub static SAMPLES_FIXTURE: &str = include_str!("../../fixtures/samples.json");

/// Embedded fixture: category summary matching [`SAMPLES_FIXTURE`].
pub static SUMMARY_FIXTURE: &str = include_str!("../../fixtures/summary.json");

/// Embedded fixture: per-site pollution index averages.
pub static POLLUTION_FIXTURE: &str = include_str!("../../fixtures/pollution-indices.json");

/// Embedded fixture: one sample detail record.
pub static SAMPLE_DETAIL_FIXTURE: &str = include_str!("../../fixtures/sample-detail.json");
