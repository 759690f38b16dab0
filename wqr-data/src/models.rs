//! Chart-ready series structs.
//!
//! All structs derive `Serialize` with the field names an external chart
//! renderer expects, so they can be written out as JSON directly.

use serde::Serialize;
use wqr_core::model::Category;

/// One bar group of the per-site pollution index comparison chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PollutionSeriesEntry {
    /// Site identifier.
    pub name: String,
    #[serde(rename = "HPI")]
    pub hpi: f64,
    #[serde(rename = "MI")]
    pub mi: f64,
    #[serde(rename = "Cd")]
    pub cd: f64,
}

/// A generic (name, value) point for single-series bar and pie charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesEntry {
    pub name: String,
    pub value: f64,
}

/// One slice of the category distribution pie chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySummary {
    #[serde(skip)]
    pub category: Category,
    /// Capitalized category label (e.g. "Moderate").
    pub name: String,
    /// Number of samples in the category.
    pub value: u64,
    /// Display color from the palette.
    pub color: String,
}

/// Per-category counts shown on the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCards {
    pub safe: u64,
    pub moderate: u64,
    pub high_risk: u64,
}

impl SummaryCards {
    pub fn total(&self) -> u64 {
        self.safe + self.moderate + self.high_risk
    }
}
