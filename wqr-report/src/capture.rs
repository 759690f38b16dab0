//! Capturing rendered chart and map panels as images.
//!
//! A panel is addressed by its region id. Capture is best effort: a region
//! that is missing or unreadable becomes `None` and the export carries on
//! without it.

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wqr_core::payload::Image;

use crate::error::CaptureError;

/// Region ids of the rendered panels.
pub mod regions {
    pub const POLLUTION_CHART: &str = "pollution-chart";
    pub const PIE_CHART: &str = "pie-chart";
    pub const MAP_VISUAL: &str = "map-visual";
    pub const INDEX_CHART: &str = "index-chart";

    /// Panels attached to the overview report, in payload order.
    pub const OVERVIEW: [&str; 3] = [POLLUTION_CHART, PIE_CHART, MAP_VISUAL];

    /// Panels attached to a single-sample report, in payload order.
    pub const DETAIL: [&str; 3] = [POLLUTION_CHART, PIE_CHART, INDEX_CHART];
}

/// Rasterizes one rendered region.
#[async_trait]
pub trait RegionCapture: Send + Sync {
    async fn capture(&self, region_id: &str) -> Result<Image, CaptureError>;
}

/// Capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Wait before capturing so in-flight layout and paint can finish.
    pub settle_delay: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(300),
        }
    }
}

/// Best-effort capture over any [`RegionCapture`] backend.
#[derive(Clone)]
pub struct ReportCapture {
    backend: Arc<dyn RegionCapture>,
    config: CaptureConfig,
}

impl ReportCapture {
    pub fn new(backend: Arc<dyn RegionCapture>, config: CaptureConfig) -> Self {
        Self { backend, config }
    }

    async fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
    }

    async fn capture_now(&self, region_id: &str) -> Option<Image> {
        match self.backend.capture(region_id).await {
            Ok(image) => {
                debug!("Captured region {} ({} bytes)", region_id, image.as_bytes().len());
                Some(image)
            }
            Err(CaptureError::MissingRegion(region)) => {
                debug!("Region {} is not rendered, continuing without it", region);
                None
            }
            Err(e) => {
                warn!("Capture failed, continuing without it: {}", e);
                None
            }
        }
    }

    /// Capture one region after the settle delay. Never fails.
    pub async fn capture(&self, region_id: &str) -> Option<Image> {
        self.settle().await;
        self.capture_now(region_id).await
    }

    /// Settle once, then capture every region independently.
    ///
    /// The result has one slot per requested id, in request order.
    pub async fn capture_all(&self, region_ids: &[&str]) -> Vec<Option<Image>> {
        self.settle().await;
        join_all(region_ids.iter().map(|id| self.capture_now(id))).await
    }
}

/// Reads `<region>.png` snapshots written by the chart renderer.
#[derive(Debug, Clone)]
pub struct DirectoryCapture {
    dir: PathBuf,
}

impl DirectoryCapture {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl RegionCapture for DirectoryCapture {
    async fn capture(&self, region_id: &str) -> Result<Image, CaptureError> {
        if region_id.is_empty() || region_id.contains(['/', '\\']) || region_id.starts_with('.') {
            return Err(CaptureError::MissingRegion(region_id.to_string()));
        }
        let path = self.dir.join(format!("{}.png", region_id));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CaptureError::MissingRegion(region_id.to_string()))
            }
            Err(source) => {
                return Err(CaptureError::Io {
                    region: region_id.to_string(),
                    source,
                })
            }
        };
        Image::from_png(bytes).ok_or_else(|| CaptureError::InvalidImage(region_id.to_string()))
    }
}

/// Serves images held in memory; regions not added are missing.
#[derive(Debug, Clone, Default)]
pub struct MemoryCapture {
    regions: HashMap<String, Image>,
}

impl MemoryCapture {
    pub fn with_region(mut self, region_id: &str, image: Image) -> Self {
        self.regions.insert(region_id.to_string(), image);
        self
    }
}

#[async_trait]
impl RegionCapture for MemoryCapture {
    async fn capture(&self, region_id: &str) -> Result<Image, CaptureError> {
        self.regions
            .get(region_id)
            .cloned()
            .ok_or_else(|| CaptureError::MissingRegion(region_id.to_string()))
    }
}
