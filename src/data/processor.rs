//! Data Processor Module
//! Pure view pipeline over loaded records: split, filter, reshape, order.
//! Every function here is total; empty results are valid, not errors.

use std::collections::BTreeSet;

use crate::data::record::{AgeBand, CaseRecord};

/// One row of the long-form age distribution: a single (classification,
/// band) cell lifted out of the wide table.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeRow {
    pub classification: String,
    pub band: AgeBand,
    pub count: f64,
}

/// Per-type historical series for the line chart: (year, total) points in
/// ascending year order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSeries {
    pub classification: String,
    pub points: Vec<(i32, f64)>,
}

/// Handles the derived-view transformations. Views are always rebuilt from
/// the immutable dataset; nothing is mutated in place.
pub struct DataProcessor;

impl DataProcessor {
    /// Partition records into the "Total" sentinel subset and the per-type
    /// subset. Both halves preserve input ordering.
    pub fn split_totals(records: &[CaseRecord]) -> (Vec<CaseRecord>, Vec<CaseRecord>) {
        records.iter().cloned().partition(|r| r.is_total())
    }

    /// Records matching `year` exactly whose classification is in `allowed`.
    pub fn filter_by_year_and_types(
        records: &[CaseRecord],
        year: i32,
        allowed: &BTreeSet<String>,
    ) -> Vec<CaseRecord> {
        records
            .iter()
            .filter(|r| r.year == year && allowed.contains(&r.classification))
            .cloned()
            .collect()
    }

    /// Records whose classification is in `allowed`, any year. Feeds the
    /// historical line chart.
    pub fn filter_by_types(records: &[CaseRecord], allowed: &BTreeSet<String>) -> Vec<CaseRecord> {
        records
            .iter()
            .filter(|r| allowed.contains(&r.classification))
            .cloned()
            .collect()
    }

    /// Unpivot the four wide age-band columns into long form: exactly one
    /// output row per (input row x band). A pure reshape, not an aggregation.
    pub fn to_age_distribution(records: &[CaseRecord]) -> Vec<AgeRow> {
        let mut rows = Vec::with_capacity(records.len() * AgeBand::ALL.len());
        for record in records {
            for band in AgeBand::ALL {
                rows.push(AgeRow {
                    classification: record.classification.clone(),
                    band,
                    count: record.age_count(band),
                });
            }
        }
        rows
    }

    /// Sort ascending by numeric year. Ordering is computed on the integer
    /// value, never on a display string ("10" must not sort before "2").
    pub fn order_for_time_series(records: &[CaseRecord]) -> Vec<CaseRecord> {
        let mut ordered = records.to_vec();
        ordered.sort_by_key(|r| r.year);
        ordered
    }

    /// Group the allowed types into per-classification series covering every
    /// year present, ordered by numeric year within each series. Series are
    /// sorted by classification for a stable legend.
    pub fn time_series(records: &[CaseRecord], allowed: &BTreeSet<String>) -> Vec<TypeSeries> {
        let ordered = Self::order_for_time_series(&Self::filter_by_types(records, allowed));

        let mut series: Vec<TypeSeries> = Vec::new();
        for record in &ordered {
            match series
                .iter_mut()
                .find(|s| s.classification == record.classification)
            {
                Some(s) => s.points.push((record.year, record.total)),
                None => series.push(TypeSeries {
                    classification: record.classification.clone(),
                    points: vec![(record.year, record.total)],
                }),
            }
        }
        series.sort_by(|a, b| a.classification.cmp(&b.classification));
        series
    }

    /// Sorted, deduplicated list of years present in `records`.
    pub fn available_years(records: &[CaseRecord]) -> Vec<i32> {
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// Sorted, deduplicated list of classification labels in `records`.
    /// Callers pass the per-type subset so the sentinel never shows up as a
    /// selectable type.
    pub fn available_types(records: &[CaseRecord]) -> Vec<String> {
        let types: BTreeSet<String> = records.iter().map(|r| r.classification.clone()).collect();
        types.into_iter().collect()
    }
}
