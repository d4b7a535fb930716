//! Case Record Module
//! Typed row model for the case-count table plus value normalization.

use thiserror::Error;

/// Reserved classification label meaning "all types aggregated" for a year.
pub const TOTAL_LABEL: &str = "Total";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid year value: {0:?}")]
pub struct FormatError(pub String);

/// The four fixed age bands that subdivide per-type case counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBand {
    Age0To4,
    Age5To9,
    Age10To14,
    Age15To19,
}

impl AgeBand {
    pub const ALL: [AgeBand; 4] = [
        AgeBand::Age0To4,
        AgeBand::Age5To9,
        AgeBand::Age10To14,
        AgeBand::Age15To19,
    ];

    /// Exact header of the corresponding CSV column.
    pub fn column_name(&self) -> &'static str {
        match self {
            AgeBand::Age0To4 => "0-4 anos",
            AgeBand::Age5To9 => "5-9 anos",
            AgeBand::Age10To14 => "10-14 anos",
            AgeBand::Age15To19 => "15-19 anos",
        }
    }

    /// Label shown in chart legends and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Age0To4 => "0-4 años",
            AgeBand::Age5To9 => "5-9 años",
            AgeBand::Age10To14 => "10-14 años",
            AgeBand::Age15To19 => "15-19 años",
        }
    }

    /// Index into `CaseRecord::age_counts`.
    pub fn index(&self) -> usize {
        match self {
            AgeBand::Age0To4 => 0,
            AgeBand::Age5To9 => 1,
            AgeBand::Age10To14 => 2,
            AgeBand::Age15To19 => 3,
        }
    }
}

/// One row of the source table: a (year, classification) case count with its
/// age-band breakdown. `classification` is already trimmed; the value
/// [`TOTAL_LABEL`] marks the aggregate row for the year.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub year: i32,
    pub classification: String,
    pub total: f64,
    pub age_counts: [f64; 4],
}

impl CaseRecord {
    pub fn is_total(&self) -> bool {
        self.classification == TOTAL_LABEL
    }

    pub fn age_count(&self, band: AgeBand) -> f64 {
        self.age_counts[band.index()]
    }
}

/// Parse a year value, stripping thousands separators first ("2,022" → 2022).
/// Non-numeric input is an error, never a silent zero.
pub fn normalize_year(raw: &str) -> Result<i32, FormatError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<i32>()
        .map_err(|_| FormatError(raw.to_string()))
}

/// Trim surrounding whitespace so visually identical categories compare equal.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_year_strips_thousands_separators() {
        assert_eq!(normalize_year("2,022"), Ok(2022));
        assert_eq!(normalize_year("2022"), Ok(2022));
        assert_eq!(normalize_year(" 2019 "), Ok(2019));
    }

    #[test]
    fn normalize_year_rejects_non_numeric() {
        assert!(normalize_year("abc").is_err());
        assert!(normalize_year("").is_err());
        assert!(normalize_year("20.5").is_err());
    }

    #[test]
    fn normalize_label_trims_whitespace() {
        assert_eq!(normalize_label("  Leucemia "), "Leucemia");
        assert_eq!(normalize_label("Total"), "Total");
    }

    #[test]
    fn total_sentinel_requires_exact_match() {
        let rec = CaseRecord {
            year: 2022,
            classification: normalize_label(" Total "),
            total: 50.0,
            age_counts: [10.0, 15.0, 15.0, 10.0],
        };
        assert!(rec.is_total());

        let rec = CaseRecord {
            classification: "Totales".to_string(),
            ..rec
        };
        assert!(!rec.is_total());
    }
}
