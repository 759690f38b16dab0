//! Plain-text rendering of views for the terminal.

use std::fmt::Write;
use wqr_core::model::Sample;
use wqr_data::models::{SeriesEntry, SummaryCards};

const TABLE_HEADER: [&str; 7] = ["Sample ID", "Latitude", "Longitude", "HPI", "MI", "CD", "Category"];

/// Fixed-width table of samples in the given order.
pub fn sample_table(rows: &[&Sample]) -> String {
    let id_width = rows
        .iter()
        .map(|s| s.sample_id.chars().count())
        .chain(std::iter::once(TABLE_HEADER[0].len()))
        .max()
        .unwrap_or_default();
    let mut out = format!(
        "{:<w$}  {:>10}  {:>10}  {:>8}  {:>8}  {:>8}  {}\n",
        TABLE_HEADER[0],
        TABLE_HEADER[1],
        TABLE_HEADER[2],
        TABLE_HEADER[3],
        TABLE_HEADER[4],
        TABLE_HEADER[5],
        TABLE_HEADER[6],
        w = id_width
    );
    for s in rows {
        let _ = writeln!(
            out,
            "{:<w$}  {:>10.4}  {:>10.4}  {:>8.2}  {:>8.2}  {:>8.2}  {}",
            s.sample_id,
            s.latitude,
            s.longitude,
            s.indices.hpi,
            s.indices.mi,
            s.indices.cd,
            s.category,
            w = id_width
        );
    }
    out
}

/// One line with the per-category counts, or a placeholder while incomplete.
pub fn summary_line(cards: Option<SummaryCards>, total_samples: Option<u64>) -> String {
    match (cards, total_samples) {
        (Some(cards), Some(total)) => format!(
            "Safe: {}  Moderate: {}  Unsafe: {}  Total: {}",
            cards.safe, cards.moderate, cards.high_risk, total
        ),
        _ => "Summary unavailable".to_string(),
    }
}

pub fn series(title: &str, entries: &[SeriesEntry]) -> String {
    let mut out = format!("{}:\n", title);
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    for entry in entries {
        let _ = writeln!(out, "  {:<12} {}", entry.name, entry.value);
    }
    out
}

pub fn info_lines(lines: &[(&str, String)]) -> String {
    lines
        .iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wqr_core::model::{Category, Indices};

    fn sample(id: &str) -> Sample {
        Sample {
            sample_id: id.to_string(),
            latitude: 25.95912,
            longitude: 82.6371,
            indices: Indices {
                hpi: 95.5,
                mi: 2.75,
                cd: 1.2,
            },
            category: Category::Moderate,
        }
    }

    #[test]
    fn table_has_header_and_one_line_per_row() {
        let a = sample("WS-001");
        let b = sample("WS-0000010");
        let table = sample_table(&[&a, &b]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Sample ID "));
        assert!(lines[1].starts_with("WS-001    "));
        assert!(lines[1].contains("25.9591"));
        assert!(lines[1].contains("95.50"));
        assert!(lines[2].ends_with("moderate"));
    }

    #[test]
    fn summary_needs_cards_and_total() {
        let cards = SummaryCards {
            safe: 10,
            moderate: 4,
            high_risk: 2,
        };
        assert_eq!(
            summary_line(Some(cards), Some(16)),
            "Safe: 10  Moderate: 4  Unsafe: 2  Total: 16"
        );
        assert_eq!(summary_line(None, Some(16)), "Summary unavailable");
    }

    #[test]
    fn empty_series_is_marked() {
        assert_eq!(series("Metals", &[]), "Metals:\n  (none)\n");
        let entries = vec![SeriesEntry {
            name: "Arsenic".to_string(),
            value: 2.3,
        }];
        assert_eq!(series("Metals", &entries), "Metals:\n  Arsenic      2.3\n");
    }
}
