//! Export request bodies for the document compositor.
//!
//! Payloads borrow the sample data they describe and own only the captured
//! images; they are built per export call and dropped once the response is
//! handled.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Serialize, Serializer};

use crate::model::{Sample, SampleDetail};

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// A captured raster image (PNG bytes).
///
/// Serializes as a `data:image/png;base64,...` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    png: Bytes,
}

impl Image {
    /// Wrap PNG bytes. Returns `None` when the PNG signature is missing.
    pub fn from_png(png: impl Into<Bytes>) -> Option<Image> {
        let png = png.into();
        if png.starts_with(&PNG_SIGNATURE) {
            Some(Image { png })
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

/// Chart images attached to the overview report. Missing captures are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewCharts {
    pub pollution_chart: Option<Image>,
    pub pie_chart: Option<Image>,
    pub map_snapshot: Option<Image>,
}

/// Chart images attached to a single-sample report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleCharts {
    pub pollution_chart: Option<Image>,
    pub pie_chart: Option<Image>,
    pub index_chart: Option<Image>,
}

/// Body of `POST /api/export/pdf`.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewPayload<'a> {
    pub samples: &'a [Sample],
    pub charts: OverviewCharts,
}

/// Body of `POST /api/export/sample-pdf`.
#[derive(Debug, Clone, Serialize)]
pub struct SamplePayload<'a> {
    pub sample: &'a SampleDetail,
    pub charts: SampleCharts,
}
