//! Product data ingestion.
//!
//! This crate turns source data into tables:
//!
//! - **Record extraction**: flatten a raw product record into a [`ProductRow`]
//! - **Product sources**: page through the product database (HTTP or in memory)
//! - **CSV tables**: read and write quoted CSV files as Polars DataFrames
//!
//! [`ProductRow`]: nutri_model::ProductRow

mod csv;
mod error;
mod extract;
mod frame;
mod http;
mod polars_utils;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Tables ===
pub use csv::{
    CsvLoad, CsvReadOptions, NULL_TOKENS, read_csv_table, write_csv, write_csv_table,
};

// === Record Extraction ===
pub use extract::{NUTRIMENT_KEYS, extract_product};
pub use frame::products_to_frame;

// === Product Sources ===
pub use http::OpenFoodFactsClient;
pub use source::{CollectOptions, CollectReport, MemorySource, ProductSource, collect_products};

// === Value Helpers ===
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, is_numeric_dtype, parse_f64};
