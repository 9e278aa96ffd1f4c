use std::path::PathBuf;

use nutri_warehouse::LoadSummary;

/// Counts and artifacts produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub table: String,
    /// True when products were downloaded during this run.
    pub downloaded: bool,
    pub products_extracted: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    /// An empty page ended the download before the page limit.
    pub source_exhausted: bool,
    pub rows_cleaned: Option<usize>,
    pub load: Option<LoadSummary>,
    pub rows_fetched: Option<usize>,
    pub rows_transformed: Option<usize>,
    pub original_csv: PathBuf,
    pub cleaned_csv: Option<PathBuf>,
    pub transformed_csv: Option<PathBuf>,
    /// Stage failures that did not stop the run.
    pub errors: Vec<String>,
}

impl PipelineReport {
    pub fn new(table: String, original_csv: PathBuf) -> Self {
        Self {
            table,
            downloaded: false,
            products_extracted: 0,
            pages_fetched: 0,
            pages_failed: 0,
            source_exhausted: false,
            rows_cleaned: None,
            load: None,
            rows_fetched: None,
            rows_transformed: None,
            original_csv,
            cleaned_csv: None,
            transformed_csv: None,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
