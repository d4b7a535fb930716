//! Data module - CSV loading and view transformations

mod loader;
mod processor;
mod record;

pub use loader::{CaseDataset, DataLoadError, DatasetLoader};
pub use processor::{AgeRow, DataProcessor, TypeSeries};
pub use record::{normalize_label, normalize_year, AgeBand, CaseRecord, FormatError, TOTAL_LABEL};
