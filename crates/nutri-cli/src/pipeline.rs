//! End-to-end pipeline: acquire, clean, load, fetch, transform.
//!
//! Failures of the cleaning-from-file, warehouse load and warehouse fetch
//! steps are logged and recorded in the report; the run keeps going with
//! whatever data is available. An unreachable product API, an unwritable
//! data directory and a failing transform abort the run.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use nutri_ingest::{
    CollectOptions, CsvReadOptions, ProductSource, collect_products, products_to_frame,
    read_csv_table, write_csv_table,
};
use nutri_model::PipelineConfig;
use nutri_transform::{clean_csv_file, clean_table, transform_table};
use nutri_warehouse::{TableRef, Warehouse};

use crate::types::PipelineReport;

/// Runs the whole pipeline against `source` and `warehouse`.
///
/// `on_page` is called once per attempted download page.
pub fn run_pipeline<S, W>(
    config: &PipelineConfig,
    source: &S,
    warehouse: &mut W,
    on_page: impl FnMut(usize),
) -> Result<PipelineReport>
where
    S: ProductSource + ?Sized,
    W: Warehouse + ?Sized,
{
    let table = TableRef::from_config(&config.warehouse);
    let span = info_span!("pipeline", table = %table);
    let _guard = span.enter();
    let start = Instant::now();

    let files = &config.files;
    std::fs::create_dir_all(&files.data_directory).with_context(|| {
        format!(
            "create data directory {}",
            files.data_directory.display()
        )
    })?;

    let original = files.original_path();
    let cleaned = files.cleaned_path();
    let mut report = PipelineReport::new(table.to_string(), original.clone());

    if original.is_file() {
        info!(path = %original.display(), "using existing product file");
        match clean_csv_file(&original, &cleaned) {
            Ok(df) => report.rows_cleaned = Some(df.height()),
            Err(error) => {
                warn!(path = %original.display(), %error, "cleaning existing file failed");
                report
                    .errors
                    .push(format!("clean {}: {error}", original.display()));
            }
        }
    } else {
        download(config, source, &original, &cleaned, &mut report, on_page)?;
    }
    if cleaned.is_file() {
        report.cleaned_csv = Some(cleaned.clone());
    }

    let to_load = if cleaned.is_file() { &cleaned } else { &original };
    match warehouse.load_csv(to_load, &table) {
        Ok(summary) => {
            info!(rows = summary.rows_loaded, bad_records = summary.bad_records, "loaded into warehouse");
            report.load = Some(summary);
        }
        Err(error) => {
            warn!(path = %to_load.display(), %error, "warehouse load failed");
            report.errors.push(format!("load {table}: {error}"));
        }
    }

    let fetched = match warehouse.fetch_all(&table) {
        Ok(df) => df,
        Err(error) => {
            warn!(%error, "warehouse fetch failed");
            report.errors.push(format!("fetch {table}: {error}"));
            DataFrame::empty()
        }
    };
    report.rows_fetched = Some(fetched.height());

    if fetched.height() == 0 {
        warn!("no rows fetched from the warehouse, skipping transform");
    } else {
        let transformed = transform_table(fetched).context("transform fetched table")?;
        let path = files.transformed_path();
        write_csv_table(&transformed, &path)
            .with_context(|| format!("write transformed table {}", path.display()))?;
        info!(path = %path.display(), rows = transformed.height(), "saved transformed CSV");
        report.rows_transformed = Some(transformed.height());
        report.transformed_csv = Some(path);
    }

    info!(
        duration_ms = start.elapsed().as_millis(),
        errors = report.errors.len(),
        "pipeline finished"
    );
    Ok(report)
}

fn download<S>(
    config: &PipelineConfig,
    source: &S,
    original: &Path,
    cleaned: &Path,
    report: &mut PipelineReport,
    on_page: impl FnMut(usize),
) -> Result<()>
where
    S: ProductSource + ?Sized,
{
    if !source.check_connection() {
        bail!("cannot reach the product API at {}", config.api.url);
    }

    let options = CollectOptions {
        num_pages: config.api.num_pages,
        page_size: config.api.page_size,
        delay: config.api.page_delay(),
    };
    let collected = collect_products(source, &options, on_page);
    report.downloaded = true;
    report.products_extracted = collected.products.len();
    report.pages_fetched = collected.pages_fetched;
    report.pages_failed = collected.pages_failed;
    report.source_exhausted = collected.exhausted;
    info!(
        products = collected.products.len(),
        pages = collected.pages_fetched,
        failed = collected.pages_failed,
        "download finished"
    );

    let frame = products_to_frame(&collected.products).context("build product table")?;
    let saved = clean_table(frame).context("clean downloaded products")?;
    write_csv_table(&saved, original)
        .with_context(|| format!("write product file {}", original.display()))?;
    info!(path = %original.display(), rows = saved.height(), "saved product file");

    match clean_csv_file(original, cleaned) {
        Ok(df) => report.rows_cleaned = Some(df.height()),
        Err(error) => {
            warn!(%error, "cleaning saved file failed, keeping the in-memory table");
            report.rows_cleaned = Some(saved.height());
        }
    }
    Ok(())
}

/// Runs the cleaning stage from one CSV file to another.
pub fn clean_file(input: &Path, output: &Path) -> Result<usize> {
    let df = clean_csv_file(input, output)
        .with_context(|| format!("clean {}", input.display()))?;
    Ok(df.height())
}

/// Runs the transform stage from one CSV file to another.
pub fn transform_file(input: &Path, output: &Path) -> Result<usize> {
    let load = read_csv_table(input, &CsvReadOptions::default())
        .with_context(|| format!("read {}", input.display()))?;
    let transformed = transform_table(load.data).context("transform table")?;
    write_csv_table(&transformed, output)
        .with_context(|| format!("write {}", output.display()))?;
    Ok(transformed.height())
}
