use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span};

use nutri_cli::pipeline::{clean_file, run_pipeline, transform_file};
use nutri_cli::types::PipelineReport;
use nutri_ingest::OpenFoodFactsClient;
use nutri_model::{PipelineConfig, WarehouseBackend};
use nutri_warehouse::{LocalWarehouse, MemoryWarehouse, Warehouse};

use crate::cli::{ConfigArgs, RunArgs, StageArgs, WarehouseArg};

const ENV_FILE: &str = "config/.env";

pub fn run_full(args: &RunArgs) -> Result<PipelineReport> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(pages) = args.pages {
        config.api.num_pages = pages;
    }
    if let Some(page_size) = args.page_size {
        config.api.page_size = page_size;
    }
    if let Some(dir) = &args.data_dir {
        config.files.data_directory.clone_from(dir);
    }
    if let Some(backend) = args.warehouse {
        config.warehouse.backend = match backend {
            WarehouseArg::Local => WarehouseBackend::Local,
            WarehouseArg::Memory => WarehouseBackend::Memory,
        };
    }
    if let Some(table) = &args.table {
        table.apply_to(&mut config.warehouse);
    }
    config.validate().context("invalid configuration")?;

    let client = OpenFoodFactsClient::new(&config.api).context("create API client")?;
    let mut warehouse: Box<dyn Warehouse> = match config.warehouse.backend {
        WarehouseBackend::Local => Box::new(LocalWarehouse::new(
            config.warehouse.root.clone(),
            config.warehouse.max_bad_records,
        )),
        WarehouseBackend::Memory => {
            Box::new(MemoryWarehouse::new(config.warehouse.max_bad_records))
        }
    };

    let progress = page_progress(config.api.num_pages);
    let report = run_pipeline(&config, &client, warehouse.as_mut(), |_| progress.inc(1));
    progress.finish_and_clear();
    report
}

pub fn run_clean(args: &StageArgs) -> Result<()> {
    let span = info_span!("clean_file", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let rows = clean_file(&args.input, &args.output)?;
    info!(rows, duration_ms = start.elapsed().as_millis(), "clean finished");
    println!("Cleaned {rows} rows -> {}", args.output.display());
    Ok(())
}

pub fn run_transform(args: &StageArgs) -> Result<()> {
    let span = info_span!("transform_file", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let rows = transform_file(&args.input, &args.output)?;
    info!(rows, duration_ms = start.elapsed().as_millis(), "transform finished");
    println!("Transformed {rows} rows -> {}", args.output.display());
    Ok(())
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let text = config.to_toml_string().context("render configuration")?;
    print!("{text}");
    Ok(())
}

/// Defaults, then the optional TOML file, then `config/.env` and the
/// process environment.
fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    if dotenv::from_path(ENV_FILE).is_ok() {
        debug!(path = ENV_FILE, "loaded environment file");
    }
    let mut config = match path {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("apply environment overrides")?;
    Ok(config)
}

fn page_progress(pages: usize) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(pages as u64);
    bar.set_style(style);
    bar.set_message("pages");
    bar
}
