//! CSV Dataset Loader Module
//! Reads the case-count table with Polars and extracts typed records.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::data::record::{normalize_label, normalize_year, AgeBand, CaseRecord, FormatError};
use crate::data::DataProcessor;
use crate::stats::KpiCalculator;

pub const YEAR_COLUMN: &str = "Ano";
pub const CLASSIFICATION_COLUMN: &str = "Clasificacion del Cancer";
pub const TOTAL_COLUMN: &str = "Total general";

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Row {row}: {source}")]
    BadYear { row: usize, source: FormatError },
}

/// The immutable loaded table. Built once per session and shared read-only;
/// every derived view is recomputed from it.
pub struct CaseDataset {
    path: PathBuf,
    records: Vec<CaseRecord>,
}

impl CaseDataset {
    /// Load and validate the CSV at `path`. A year value that fails
    /// normalization aborts the whole load; there is no partial load.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let df = LazyCsvReader::new(path.to_path_buf())
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Self::check_required_columns(&df)?;

        // The year column may arrive as strings ("2,022") or plain integers;
        // casting to string routes both shapes through the same normalizer.
        let year_col = df.column(YEAR_COLUMN)?.cast(&DataType::String)?;
        let year_ca = year_col.str()?;
        let class_col = df.column(CLASSIFICATION_COLUMN)?.cast(&DataType::String)?;
        let class_ca = class_col.str()?;
        let total_col = df.column(TOTAL_COLUMN)?.cast(&DataType::Float64)?;
        let total_ca = total_col.f64()?;

        let mut band_cas = Vec::with_capacity(AgeBand::ALL.len());
        for band in AgeBand::ALL {
            let col = df.column(band.column_name())?.cast(&DataType::Float64)?;
            band_cas.push(col.f64()?.clone());
        }

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let raw_year = year_ca.get(i).unwrap_or("");
            let year = normalize_year(raw_year)
                .map_err(|source| DataLoadError::BadYear { row: i + 1, source })?;

            let classification = normalize_label(class_ca.get(i).unwrap_or(""));

            // Missing count cells read as 0 rather than poisoning the views.
            let total = total_ca.get(i).unwrap_or(0.0);
            let mut age_counts = [0.0; 4];
            for (slot, ca) in age_counts.iter_mut().zip(band_cas.iter()) {
                *slot = ca.get(i).unwrap_or(0.0);
            }

            records.push(CaseRecord {
                year,
                classification,
                total,
                age_counts,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    fn check_required_columns(df: &DataFrame) -> Result<(), DataLoadError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut required = vec![YEAR_COLUMN, CLASSIFICATION_COLUMN, TOTAL_COLUMN];
        required.extend(AgeBand::ALL.iter().map(|b| b.column_name()));

        let missing: Vec<String> = required
            .into_iter()
            .filter(|c| !names.iter().any(|n| n == c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DataLoadError::MissingColumns(missing))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Handles dataset loading, memoized by path: repeated loads of the same file
/// within a session return the cached dataset without re-reading.
pub struct DatasetLoader {
    dataset: Option<Arc<CaseDataset>>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self { dataset: None }
    }

    /// Load the CSV at `path`, or return the cached dataset when the path
    /// matches the previous load.
    pub fn load(&mut self, path: &Path) -> Result<Arc<CaseDataset>, DataLoadError> {
        if let Some(dataset) = &self.dataset {
            if dataset.path() == path {
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = Arc::new(CaseDataset::load(path)?);

        let (totals, types) = DataProcessor::split_totals(dataset.records());
        let years = DataProcessor::available_years(dataset.records());
        log::info!(
            "Loaded {} rows from {} ({} years, {} type rows)",
            dataset.len(),
            path.display(),
            years.len(),
            types.len()
        );
        for mismatch in KpiCalculator::year_mismatches(&totals, &types) {
            log::warn!(
                "Year {}: 'Total' row reports {} cases but per-type rows sum to {}",
                mismatch.year,
                mismatch.reported,
                mismatch.summed
            );
        }

        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Get the currently cached dataset, if any.
    pub fn dataset(&self) -> Option<&Arc<CaseDataset>> {
        self.dataset.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        "Ano,Clasificacion del Cancer,Total general,0-4 anos,5-9 anos,10-14 anos,15-19 anos";

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    #[test]
    fn load_extracts_normalized_records() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "cases.csv",
            &[
                "\"2,022\", Leucemia ,30,10,8,7,5",
                "\"2,022\",Total,50,15,13,12,10",
            ],
        );

        let dataset = CaseDataset::load(&path).unwrap();
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records()[0];
        assert_eq!(first.year, 2022);
        assert_eq!(first.classification, "Leucemia");
        assert_eq!(first.total, 30.0);
        assert_eq!(first.age_counts, [10.0, 8.0, 7.0, 5.0]);
        assert!(dataset.records()[1].is_total());
    }

    #[test]
    fn load_rejects_missing_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "Ano,Total general").unwrap();
        writeln!(file, "2022,50").unwrap();

        match CaseDataset::load(&path) {
            Err(DataLoadError::MissingColumns(cols)) => {
                assert!(cols.contains(&CLASSIFICATION_COLUMN.to_string()));
                assert!(cols.contains(&"0-4 anos".to_string()));
            }
            Ok(_) => panic!("load should reject a CSV with missing columns"),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn load_aborts_on_malformed_year() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "bad_year.csv",
            &["2022,Leucemia,30,10,8,7,5", "abc,Linfoma,20,5,5,5,5"],
        );

        match CaseDataset::load(&path) {
            Err(DataLoadError::BadYear { row, source }) => {
                assert_eq!(row, 2);
                assert_eq!(source.0, "abc");
            }
            Ok(_) => panic!("load should abort on a malformed year"),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(matches!(
            CaseDataset::load(&path),
            Err(DataLoadError::Csv(_))
        ));
    }

    #[test]
    fn loader_memoizes_by_path() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "cases.csv", &["2022,Total,50,15,13,12,10"]);

        let mut loader = DatasetLoader::new();
        let first = loader.load(&path).unwrap();

        // Rewrite the file; the memoized handle must still be returned.
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "2023,Total,99,0,0,0,0").unwrap();

        let second = loader.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.records()[0].year, 2022);
    }

    #[test]
    fn load_accepts_plain_integer_years() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "plain.csv", &["2019,Total,12,3,3,3,3"]);

        let dataset = CaseDataset::load(&path).unwrap();
        assert_eq!(dataset.records()[0].year, 2019);
    }
}
