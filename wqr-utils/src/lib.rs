//! Shared formatting helpers for WQR crates.

/// Text helpers for labels and identifiers
pub mod text {
    /// Upper-case the first character, leaving the rest untouched.
    /// e.g., "moderate" -> "Moderate"
    pub fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Keep only the ASCII digits of an identifier.
    /// e.g., "WS-007" -> "007"
    pub fn digits(s: &str) -> String {
        s.chars().filter(char::is_ascii_digit).collect()
    }

}

/// Date formatting for sampling dates
pub mod dates {
    use chrono::{DateTime, NaiveDate};

    /// Format a sampling date as "YYYY-MM-DD".
    ///
    /// Accepts RFC 3339 timestamps (as stored by the analysis service) or
    /// plain dates. Anything else is returned unchanged.
    pub fn format_sampling_date(raw: &str) -> String {
        let raw = raw.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return timestamp.date_naive().format("%Y-%m-%d").to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
        raw.to_string()
    }

}

/// Coordinate formatting
pub mod geo {
    /// Format a coordinate pair to four decimal places.
    pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
        format!("{:.4}, {:.4}", latitude, longitude)
    }

}
