//! Table row ordering and the collapsed/expanded row window.

use std::cmp::Ordering;
use wqr_core::model::Sample;
use wqr_utils::text::digits;

/// Rows shown while the table is collapsed.
pub const COLLAPSED_ROWS: usize = 15;

/// The digits of a sample id, read as one unbounded non-negative number.
///
/// Stored without leading zeros, so ids without digits compare equal to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericKey(String);

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering key of a sample id: its digits read as one number of any length.
pub fn numeric_key(sample_id: &str) -> NumericKey {
    NumericKey(digits(sample_id).trim_start_matches('0').to_string())
}

/// Samples in ascending key order. Equal keys keep their input order.
pub fn order_rows(samples: &[Sample]) -> Vec<&Sample> {
    let mut rows: Vec<&Sample> = samples.iter().collect();
    rows.sort_by_key(|sample| numeric_key(&sample.sample_id));
    rows
}

/// Ordered rows, cut to [`COLLAPSED_ROWS`] unless `show_all` is set.
pub fn visible_rows(samples: &[Sample], show_all: bool) -> Vec<&Sample> {
    let mut rows = order_rows(samples);
    if !show_all {
        rows.truncate(COLLAPSED_ROWS);
    }
    rows
}

/// The "show all" toggle of the results table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowWindow {
    show_all: bool,
}

impl RowWindow {
    pub fn toggle(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn rows<'a>(&self, samples: &'a [Sample]) -> Vec<&'a Sample> {
        visible_rows(samples, self.show_all)
    }

    /// The toggle is only offered when there are rows to hide.
    pub fn toggle_offered(total: usize) -> bool {
        total > COLLAPSED_ROWS
    }

    pub fn toggle_label(&self, total: usize) -> Option<String> {
        if !Self::toggle_offered(total) {
            return None;
        }
        Some(if self.show_all {
            "Show Less".to_string()
        } else {
            format!("Show All ({})", total)
        })
    }
}
