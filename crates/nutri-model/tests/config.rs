//! Tests for pipeline configuration loading and overrides.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use nutri_model::config::{ENV_DATA_DIRECTORY, ENV_NUM_PAGES, ENV_PAGE_SIZE, ENV_TABLE_ID};
use nutri_model::{ConfigError, PipelineConfig, WarehouseBackend};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_documented_values() {
    let config = PipelineConfig::default();
    assert_eq!(config.api.url, "https://world.openfoodfacts.org");
    assert_eq!(config.api.page_size, 1000);
    assert_eq!(config.api.num_pages, 20);
    assert_eq!(
        config.warehouse.table_ref(),
        "project-final-laka-93110.Laka10.openfoodfacts"
    );
    assert_eq!(config.warehouse.max_bad_records, 10);
    assert_eq!(
        config.files.cleaned_path(),
        PathBuf::from("data/openfood_referentiel_cleaned.csv")
    );
    assert!(config.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults() {
    let toml = "[api]\npage_size = 50\n\n[warehouse]\nbackend = \"memory\"\n";
    let config = PipelineConfig::from_toml_str(toml, Path::new("inline.toml")).expect("parse");
    assert_eq!(config.api.page_size, 50);
    assert_eq!(config.api.num_pages, 20);
    assert_eq!(config.warehouse.backend, WarehouseBackend::Memory);
    assert_eq!(config.files.csv_original_filename, "openfood_referentiel.csv");
}

#[test]
fn reads_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "[files]\ndata_directory = \"out\"\n").expect("write");
    let config = PipelineConfig::from_toml_file(file.path()).expect("load");
    assert_eq!(
        config.files.transformed_path(),
        PathBuf::from("out/openfood_transformed.csv")
    );
}

#[test]
fn invalid_toml_reports_path() {
    let err = PipelineConfig::from_toml_str("[api\n", Path::new("broken.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn overrides_replace_values() {
    let mut config = PipelineConfig::default();
    config
        .apply_overrides(lookup(&[
            (ENV_PAGE_SIZE, "25"),
            (ENV_NUM_PAGES, " 2 "),
            (ENV_TABLE_ID, "products"),
            (ENV_DATA_DIRECTORY, "/tmp/nutri"),
        ]))
        .expect("apply overrides");
    assert_eq!(config.api.page_size, 25);
    assert_eq!(config.api.num_pages, 2);
    assert_eq!(config.warehouse.table_id, "products");
    assert_eq!(config.files.data_directory, PathBuf::from("/tmp/nutri"));
}

#[test]
fn empty_override_is_ignored() {
    let mut config = PipelineConfig::default();
    config
        .apply_overrides(lookup(&[(ENV_PAGE_SIZE, "  ")]))
        .expect("apply overrides");
    assert_eq!(config.api.page_size, 1000);
}

#[test]
fn invalid_numeric_override_is_an_error() {
    let mut config = PipelineConfig::default();
    let err = config
        .apply_overrides(lookup(&[(ENV_NUM_PAGES, "many")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_NUM_PAGES));
}

#[test]
fn zero_page_size_fails_validation() {
    let mut config = PipelineConfig::default();
    config.api.page_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn toml_round_trip() {
    let config = PipelineConfig::default();
    let text = config.to_toml_string().expect("serialize");
    let parsed = PipelineConfig::from_toml_str(&text, Path::new("round.toml")).expect("parse");
    assert_eq!(parsed, config);
}
