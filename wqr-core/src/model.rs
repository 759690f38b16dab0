use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Risk classification assigned upstream by the analysis service.
///
/// Any other value in a response is a data-integrity failure: decoding
/// rejects it rather than mapping it to a default.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Safe,
    Moderate,
    Unsafe,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Safe, Category::Moderate, Category::Unsafe];

    /// The wire identifier (`safe`, `moderate`, `unsafe`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Safe => "safe",
            Category::Moderate => "moderate",
            Category::Unsafe => "unsafe",
        }
    }

    /// Look up a category by its wire identifier.
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pollution indices computed by the analysis service.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Indices {
    /// Heavy-metal Pollution Index
    pub hpi: f64,
    /// Metal Index
    pub mi: f64,
    /// Contamination degree
    pub cd: f64,
}

/// A single water-source measurement as listed by `GET /api/samples`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Unique identifier; its embedded digits drive table ordering.
    pub sample_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub indices: Indices,
    pub category: Category,
}

impl Sample {
    /// True when latitude and longitude fall inside the geographic range.
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A sample with its full measurement record, from `GET /api/samples/:id`.
///
/// `water_quality` and `metals` keep the key order of the response body.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDetail {
    #[serde(flatten)]
    pub sample: Sample,
    #[serde(default)]
    pub water_quality: Map<String, Value>,
    #[serde(default)]
    pub metals: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_type: Option<String>,
}

/// Per-category sample count as served by `GET /api/summary`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: u64,
}

/// Body of `GET /api/summary`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub categories: Vec<CategoryCount>,
    pub total_samples: u64,
}

/// Per-site index averages from `GET /api/charts/pollution-indices`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PollutionAggregate {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "avgHPI", default)]
    pub avg_hpi: f64,
    #[serde(rename = "avgMI", default)]
    pub avg_mi: f64,
    #[serde(rename = "avgCD", default)]
    pub avg_cd: f64,
}
