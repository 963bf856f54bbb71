//! Route density rasterizer.
//!
//! Reads a GeoJSON FeatureCollection of routes, counts how many routes
//! touch each cell of a raster covering their envelope, and writes the
//! counts as a GeoTIFF plus a histogram-equalized PNG.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use route_raster::{pipeline, CliArgs, RasterConfig};

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = RasterConfig::try_from(args).context("Invalid command-line options")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting route-raster");

    let summary = pipeline::run(&config)
        .with_context(|| format!("Failed to rasterize {}", config.input.display()))?;
    summary.log();
    Ok(())
}
