//! Chart series derived from repository results.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use wqr_core::model::{Category, CategoryCount, Indices, PollutionAggregate};
use wqr_utils::text::capitalize;

use crate::models::{CategorySummary, PollutionSeriesEntry, SeriesEntry, SummaryCards};

/// Errors raised when service data contradicts the data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    /// A summary entry names a category outside safe/moderate/unsafe
    #[error("unexpected category id {0:?} in summary")]
    UnknownCategory(String),
}

/// Display color per risk category.
///
/// Loadable from JSON (`{"safe": ..., "moderate": ..., "unsafe": ...}`);
/// keys left out keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPalette {
    pub safe: String,
    pub moderate: String,
    #[serde(rename = "unsafe")]
    pub high_risk: String,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self {
            safe: "hsl(var(--safe))".to_string(),
            moderate: "hsl(var(--moderate))".to_string(),
            high_risk: "hsl(var(--unsafe))".to_string(),
        }
    }
}

impl CategoryPalette {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn color(&self, category: Category) -> &str {
        match category {
            Category::Safe => &self.safe,
            Category::Moderate => &self.moderate,
            Category::Unsafe => &self.high_risk,
        }
    }
}

/// Map per-site averages to bar chart groups.
pub fn to_pollution_series(aggregates: &[PollutionAggregate]) -> Vec<PollutionSeriesEntry> {
    aggregates
        .iter()
        .map(|aggregate| PollutionSeriesEntry {
            name: aggregate.id.clone(),
            hpi: aggregate.avg_hpi,
            mi: aggregate.avg_mi,
            cd: aggregate.avg_cd,
        })
        .collect()
}

/// Map category counts to pie chart slices.
///
/// An unknown category id fails the whole summary instead of being dropped,
/// so the displayed counts never silently disagree with the service total.
pub fn to_category_summary(
    categories: &[CategoryCount],
    palette: &CategoryPalette,
) -> Result<Vec<CategorySummary>, DataIntegrityError> {
    categories
        .iter()
        .map(|entry| {
            let category = Category::from_id(&entry.id)
                .ok_or_else(|| DataIntegrityError::UnknownCategory(entry.id.clone()))?;
            Ok(CategorySummary {
                category,
                name: capitalize(&entry.id),
                value: entry.count,
                color: palette.color(category).to_string(),
            })
        })
        .collect()
}

/// Counts for the three summary cards.
///
/// Only a complete set (exactly three entries, one per category) yields
/// cards; any other shape is still loading.
pub fn summary_cards(summary: &[CategorySummary]) -> Option<SummaryCards> {
    if summary.len() != Category::ALL.len() {
        return None;
    }
    let count = |category: Category| {
        summary
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.value)
    };
    Some(SummaryCards {
        safe: count(Category::Safe)?,
        moderate: count(Category::Moderate)?,
        high_risk: count(Category::Unsafe)?,
    })
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flatten(mapping: &Map<String, Value>, label: &str) -> Vec<SeriesEntry> {
    mapping
        .iter()
        .filter_map(|(name, value)| match numeric(value) {
            Some(value) => Some(SeriesEntry {
                name: name.clone(),
                value,
            }),
            None => {
                warn!("skipping non-numeric {} entry {}: {}", label, name, value);
                None
            }
        })
        .collect()
}

/// Water quality parameters of one sample as a bar series.
pub fn to_water_quality_series(water_quality: &Map<String, Value>) -> Vec<SeriesEntry> {
    flatten(water_quality, "water quality")
}

/// Metal concentrations of one sample as a pie series; zero entries are left out.
pub fn to_metal_series(metals: &Map<String, Value>) -> Vec<SeriesEntry> {
    flatten(metals, "metal")
        .into_iter()
        .filter(|entry| entry.value > 0.0)
        .collect()
}

/// The three pollution indices of one sample as a bar series.
pub fn to_index_series(indices: &Indices) -> Vec<SeriesEntry> {
    [("HPI", indices.hpi), ("MI", indices.mi), ("CD", indices.cd)]
        .into_iter()
        .map(|(name, value)| SeriesEntry {
            name: name.to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wqr_core::model::{SampleDetail, SummaryResponse};
    use wqr_core::{POLLUTION_FIXTURE, SAMPLE_DETAIL_FIXTURE, SUMMARY_FIXTURE};

    fn count(id: &str, count: u64) -> CategoryCount {
        CategoryCount {
            id: id.to_string(),
            count,
        }
    }

    fn mapping(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn pollution_series_renames_average_fields() {
        let aggregates: Vec<PollutionAggregate> = serde_json::from_str(POLLUTION_FIXTURE).unwrap();
        let series = to_pollution_series(&aggregates);
        assert_eq!(series.len(), 3);
        assert_eq!(
            series[0],
            PollutionSeriesEntry {
                name: "SiteA".to_string(),
                hpi: 12.5,
                mi: 3.1,
                cd: 0.8,
            }
        );
        assert_eq!(
            serde_json::to_value(&series[0]).unwrap(),
            json!({"name": "SiteA", "HPI": 12.5, "MI": 3.1, "Cd": 0.8})
        );
        assert_eq!(series[2].name, "SiteC");
    }

    #[test]
    fn category_summary_capitalizes_and_colors() {
        let summary: SummaryResponse = serde_json::from_str(SUMMARY_FIXTURE).unwrap();
        let slices = to_category_summary(&summary.categories, &CategoryPalette::default()).unwrap();
        let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Safe", "Moderate", "Unsafe"]);
        assert_eq!(slices[1].color, "hsl(var(--moderate))");
        assert_eq!(slices[2].value, 2);
        assert_eq!(
            serde_json::to_value(&slices[0]).unwrap(),
            json!({"name": "Safe", "value": 10, "color": "hsl(var(--safe))"})
        );
    }

    #[test]
    fn unknown_category_is_a_data_integrity_error() {
        let categories = vec![count("safe", 3), count("hazardous", 1)];
        let error = to_category_summary(&categories, &CategoryPalette::default()).unwrap_err();
        assert_eq!(error, DataIntegrityError::UnknownCategory("hazardous".to_string()));
    }

    #[test]
    fn summary_cards_sum_to_total() {
        let summary: SummaryResponse = serde_json::from_str(SUMMARY_FIXTURE).unwrap();
        let slices = to_category_summary(&summary.categories, &CategoryPalette::default()).unwrap();
        let cards = summary_cards(&slices).unwrap();
        assert_eq!((cards.safe, cards.moderate, cards.high_risk), (10, 4, 2));
        assert_eq!(cards.total(), summary.total_samples);
    }

    #[test]
    fn summary_cards_follow_category_not_position() {
        let categories = vec![count("unsafe", 2), count("safe", 10), count("moderate", 4)];
        let slices = to_category_summary(&categories, &CategoryPalette::default()).unwrap();
        let cards = summary_cards(&slices).unwrap();
        assert_eq!((cards.safe, cards.moderate, cards.high_risk), (10, 4, 2));
    }

    #[test]
    fn incomplete_summary_is_loading_state() {
        let palette = CategoryPalette::default();
        let two = to_category_summary(&[count("safe", 10), count("unsafe", 2)], &palette).unwrap();
        assert_eq!(summary_cards(&two), None);
        assert_eq!(summary_cards(&[]), None);
        let duplicated = to_category_summary(
            &[count("safe", 1), count("safe", 2), count("unsafe", 3)],
            &palette,
        )
        .unwrap();
        assert_eq!(summary_cards(&duplicated), None);
    }

    #[test]
    fn palette_loads_partial_json() {
        let palette = CategoryPalette::from_json(r##"{"unsafe": "#dc2626"}"##).unwrap();
        assert_eq!(palette.color(Category::Unsafe), "#dc2626");
        assert_eq!(palette.color(Category::Safe), "hsl(var(--safe))");
    }

    #[test]
    fn palette_fixture_sets_every_category() {
        let palette =
            CategoryPalette::from_json(include_str!("../../fixtures/palette.json")).unwrap();
        assert_eq!(palette.color(Category::Safe), "#16a34a");
        assert_eq!(palette.color(Category::Moderate), "#f59e0b");
        assert_eq!(palette.color(Category::Unsafe), "#dc2626");
    }

    #[test]
    fn metal_series_drops_zero_entries() {
        let metals = mapping(json!({"Lead": 0, "Arsenic": 2.3}));
        assert_eq!(
            to_metal_series(&metals),
            vec![SeriesEntry {
                name: "Arsenic".to_string(),
                value: 2.3,
            }]
        );
    }

    #[test]
    fn detail_series_keep_response_order() {
        let detail: SampleDetail = serde_json::from_str(SAMPLE_DETAIL_FIXTURE).unwrap();
        let water: Vec<String> = to_water_quality_series(&detail.water_quality)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(water, vec!["pH", "TDS", "Hardness", "Nitrate"]);
        let metals: Vec<String> = to_metal_series(&detail.metals)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(metals, vec!["Arsenic", "Cadmium"]);
    }

    #[test]
    fn non_numeric_values_are_skipped() {
        let water = mapping(json!({"pH": "7.1", "Colour": "clear", "TDS": 480}));
        let series = to_water_quality_series(&water);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, 7.1);
        assert_eq!(series[1].name, "TDS");
    }

    #[test]
    fn index_series_uses_upper_case_names() {
        let indices = Indices {
            hpi: 95.5,
            mi: 2.75,
            cd: 1.2,
        };
        let series = to_index_series(&indices);
        let names: Vec<&str> = series.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["HPI", "MI", "CD"]);
        assert_eq!(series[0].value, 95.5);
    }
}
