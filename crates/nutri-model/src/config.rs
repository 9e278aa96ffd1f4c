//! Pipeline configuration.
//!
//! The configuration is an explicit value built once (defaults, then an
//! optional TOML file, then environment overrides) and handed to the
//! pipeline entry point. Nothing reads it ambiently.
//!
//! ```toml
//! [api]
//! page_size = 200
//! num_pages = 3
//!
//! [warehouse]
//! backend = "memory"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Environment variables recognized by [`PipelineConfig::apply_overrides`].
pub const ENV_API_URL: &str = "OPENFOODFACTS_API_URL";
pub const ENV_PAGE_SIZE: &str = "OPENFOODFACTS_PAGE_SIZE";
pub const ENV_NUM_PAGES: &str = "OPENFOODFACTS_NUM_PAGES";
pub const ENV_PROJECT_ID: &str = "GOOGLE_CLOUD_PROJECT_ID";
pub const ENV_DATASET_ID: &str = "GOOGLE_CLOUD_DATASET_ID";
pub const ENV_TABLE_ID: &str = "GOOGLE_CLOUD_TABLE_ID";
pub const ENV_DATA_DIRECTORY: &str = "DATA_DIRECTORY";
pub const ENV_CSV_ORIGINAL: &str = "CSV_ORIGINAL_FILENAME";
pub const ENV_CSV_CLEANED: &str = "CSV_CLEANED_FILENAME";
pub const ENV_CSV_TRANSFORMED: &str = "CSV_TRANSFORMED_FILENAME";

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub api: ApiConfig,
    pub warehouse: WarehouseConfig,
    pub files: FileConfig,
}

/// Source API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the product database. Default: `https://world.openfoodfacts.org`.
    pub url: String,
    /// Products requested per page. Default: 1000.
    pub page_size: usize,
    /// Number of pages to request. Default: 20.
    pub num_pages: usize,
    /// Per-page request timeout in seconds. Default: 10.
    pub timeout_secs: u64,
    /// Timeout for the reachability check in seconds. Default: 5.
    pub connect_check_timeout_secs: u64,
    /// Pause between page requests in milliseconds. Default: 1000.
    pub page_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://world.openfoodfacts.org".to_string(),
            page_size: 1000,
            num_pages: 20,
            timeout_secs: 10,
            connect_check_timeout_secs: 5,
            page_delay_ms: 1000,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_check_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_check_timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// Which warehouse implementation backs the round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseBackend {
    /// Directory-backed tables under [`WarehouseConfig::root`].
    #[default]
    Local,
    /// Tables held in memory for the duration of the run.
    Memory,
}

/// Warehouse identifiers and load settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Default: `project-final-laka-93110`.
    pub project_id: String,
    /// Default: `Laka10`.
    pub dataset_id: String,
    /// Default: `openfoodfacts`.
    pub table_id: String,
    /// Default: [`WarehouseBackend::Local`].
    pub backend: WarehouseBackend,
    /// Root directory of the local backend. Default: `data/warehouse`.
    pub root: PathBuf,
    /// Malformed rows tolerated by a load before it fails. Default: 10.
    pub max_bad_records: usize,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            project_id: "project-final-laka-93110".to_string(),
            dataset_id: "Laka10".to_string(),
            table_id: "openfoodfacts".to_string(),
            backend: WarehouseBackend::default(),
            root: PathBuf::from("data/warehouse"),
            max_bad_records: 10,
        }
    }
}

impl WarehouseConfig {
    /// Fully qualified table reference (`project.dataset.table`).
    pub fn table_ref(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

/// Local file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default: `data`.
    pub data_directory: PathBuf,
    /// Default: `openfood_referentiel.csv`.
    pub csv_original_filename: String,
    /// Default: `openfood_referentiel_cleaned.csv`.
    pub csv_cleaned_filename: String,
    /// Default: `openfood_transformed.csv`.
    pub csv_transformed_filename: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            csv_original_filename: "openfood_referentiel.csv".to_string(),
            csv_cleaned_filename: "openfood_referentiel_cleaned.csv".to_string(),
            csv_transformed_filename: "openfood_transformed.csv".to_string(),
        }
    }
}

impl FileConfig {
    pub fn original_path(&self) -> PathBuf {
        self.data_directory.join(&self.csv_original_filename)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.data_directory.join(&self.csv_cleaned_filename)
    }

    pub fn transformed_path(&self) -> PathBuf {
        self.data_directory.join(&self.csv_transformed_filename)
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored. Numeric values that fail to parse are
    /// reported rather than skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api.url = url;
        }
        if let Some(value) = get(ENV_PAGE_SIZE) {
            self.api.page_size = parse_count(ENV_PAGE_SIZE, &value)?;
        }
        if let Some(value) = get(ENV_NUM_PAGES) {
            self.api.num_pages = parse_count(ENV_NUM_PAGES, &value)?;
        }
        if let Some(value) = get(ENV_PROJECT_ID) {
            self.warehouse.project_id = value;
        }
        if let Some(value) = get(ENV_DATASET_ID) {
            self.warehouse.dataset_id = value;
        }
        if let Some(value) = get(ENV_TABLE_ID) {
            self.warehouse.table_id = value;
        }
        if let Some(value) = get(ENV_DATA_DIRECTORY) {
            self.files.data_directory = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_CSV_ORIGINAL) {
            self.files.csv_original_filename = value;
        }
        if let Some(value) = get(ENV_CSV_CLEANED) {
            self.files.csv_cleaned_filename = value;
        }
        if let Some(value) = get(ENV_CSV_TRANSFORMED) {
            self.files.csv_transformed_filename = value;
        }
        Ok(())
    }

    /// Check invariants that the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.api.page_size == 0 {
            return Err(invalid("api.page_size", "0", "must be greater than zero"));
        }
        if self.api.num_pages == 0 {
            return Err(invalid("api.num_pages", "0", "must be greater than zero"));
        }
        if self.api.url.trim().is_empty() {
            return Err(invalid("api.url", "", "must not be empty"));
        }
        for (key, value) in [
            ("warehouse.project_id", &self.warehouse.project_id),
            ("warehouse.dataset_id", &self.warehouse.dataset_id),
            ("warehouse.table_id", &self.warehouse.table_id),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(key, value, "must not be empty"));
            }
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|error| invalid(key, value, &error.to_string()))
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
