//! Command-line GetMap checker.
//!
//! Validates a set of WMS GetMap parameters against the configured layers and,
//! given a JSON table of feature rows, reports which rows the request's
//! CQL_FILTER keeps. Prints the report as JSON and exits non-zero when the
//! request is rejected.

mod check;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use wms_common::LayerCatalog;
use wms_protocol::FeatureTable;

use check::check_request;

#[derive(Parser, Debug)]
#[command(name = "wms-check")]
#[command(about = "Validate WMS GetMap parameters and preview CQL filter matches")]
struct Args {
    /// Request parameter as KEY=VALUE (repeatable), e.g. --param CRS=EPSG:3857
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Layer configuration file; the first layer sets the target CRS
    #[arg(long, env = "LAYERS_CONFIG", default_value = "config/layers.yaml")]
    layers_config: PathBuf,

    /// JSON file with "columns" and "rows" to run the CQL filter over
    #[arg(long)]
    rows: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn main() -> Result<ExitCode> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // Logs go to stderr so stdout stays parseable JSON.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = LayerCatalog::load(&args.layers_config)
        .with_context(|| format!("loading {}", args.layers_config.display()))?;
    debug!(
        layers = catalog.layers.len(),
        params = args.params.len(),
        "Checking request"
    );

    let rows = args.rows.as_deref().map(load_rows).transpose()?;

    let report = check_request(&args.params, &catalog, rows.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_rows(path: &std::path::Path) -> Result<FeatureTable> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let table: FeatureTable = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    table.validate()?;
    Ok(table)
}
