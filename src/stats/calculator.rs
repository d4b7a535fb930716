//! KPI Calculator Module
//! Summary metrics for the selected year plus the total-vs-sum quality check.

use std::collections::BTreeSet;

use crate::data::CaseRecord;

/// The two summary numbers shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kpis {
    /// `Total general` of the year's "Total" row, 0 when the year has none.
    pub total_cases: i64,
    /// Distinct per-type classifications with a strictly positive count.
    pub active_type_count: usize,
}

/// A year whose "Total" row disagrees with the sum of its per-type rows.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMismatch {
    pub year: i32,
    pub reported: f64,
    pub summed: f64,
}

/// Handles KPI computation over the year-filtered subsets.
pub struct KpiCalculator;

impl KpiCalculator {
    /// Compute the KPIs from the "Total" subset and the per-type subset for
    /// one year. Total function: empty input yields zeroed KPIs, never an
    /// error.
    pub fn compute(totals_for_year: &[CaseRecord], types_for_year: &[CaseRecord]) -> Kpis {
        let total_cases = totals_for_year
            .first()
            .map(|r| r.total as i64)
            .unwrap_or(0);

        let active: BTreeSet<&str> = types_for_year
            .iter()
            .filter(|r| r.total > 0.0)
            .map(|r| r.classification.as_str())
            .collect();

        Kpis {
            total_cases,
            active_type_count: active.len(),
        }
    }

    /// Data-quality check: for each "Total" row, compare its count against
    /// the sum of the per-type rows for the same year. Mismatches are
    /// reported, not rejected; the source data is displayed as-is.
    pub fn year_mismatches(totals: &[CaseRecord], types: &[CaseRecord]) -> Vec<YearMismatch> {
        totals
            .iter()
            .filter_map(|total| {
                let summed: f64 = types
                    .iter()
                    .filter(|r| r.year == total.year)
                    .map(|r| r.total)
                    .sum();
                if (summed - total.total).abs() > f64::EPSILON {
                    Some(YearMismatch {
                        year: total.year,
                        reported: total.total,
                        summed,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use std::collections::BTreeSet;

    fn record(year: i32, classification: &str, total: f64) -> CaseRecord {
        CaseRecord {
            year,
            classification: classification.to_string(),
            total,
            age_counts: [0.0; 4],
        }
    }

    #[test]
    fn kpis_for_absent_year_are_zero() {
        assert_eq!(KpiCalculator::compute(&[], &[]), Kpis::default());
    }

    #[test]
    fn kpis_count_only_types_with_cases() {
        // One "Total" row for 2022 (50 cases), two type rows, one of them
        // empty: the active count must only see the nonzero one.
        let records = vec![
            record(2022, "Total", 50.0),
            record(2022, "Leucemia", 30.0),
            record(2022, "Linfoma", 0.0),
        ];
        let (totals, types) = DataProcessor::split_totals(&records);
        let allowed: BTreeSet<String> = DataProcessor::available_types(&types)
            .into_iter()
            .collect();

        let totals_2022: Vec<CaseRecord> =
            totals.into_iter().filter(|r| r.year == 2022).collect();
        let types_2022 = DataProcessor::filter_by_year_and_types(&types, 2022, &allowed);

        let kpis = KpiCalculator::compute(&totals_2022, &types_2022);
        assert_eq!(kpis.total_cases, 50);
        assert_eq!(kpis.active_type_count, 1);
    }

    #[test]
    fn kpis_survive_empty_type_selection() {
        // Deselecting every type empties the type views; a surviving "Total"
        // row still drives total_cases.
        let totals = vec![record(2022, "Total", 50.0)];
        let kpis = KpiCalculator::compute(&totals, &[]);
        assert_eq!(kpis.total_cases, 50);
        assert_eq!(kpis.active_type_count, 0);
    }

    #[test]
    fn duplicate_classifications_count_once() {
        let types = vec![
            record(2022, "Leucemia", 10.0),
            record(2022, "Leucemia", 5.0),
            record(2022, "Linfoma", 3.0),
        ];
        let kpis = KpiCalculator::compute(&[], &types);
        assert_eq!(kpis.active_type_count, 2);
    }

    #[test]
    fn mismatched_year_totals_are_reported() {
        let totals = vec![record(2021, "Total", 40.0), record(2022, "Total", 50.0)];
        let types = vec![
            record(2021, "Leucemia", 25.0),
            record(2021, "Linfoma", 15.0),
            record(2022, "Leucemia", 30.0),
        ];

        let mismatches = KpiCalculator::year_mismatches(&totals, &types);
        assert_eq!(
            mismatches,
            vec![YearMismatch {
                year: 2022,
                reported: 50.0,
                summed: 30.0,
            }]
        );
    }
}
