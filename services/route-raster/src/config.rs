//! Command-line options and validated run configuration.

use std::path::PathBuf;

use clap::Parser;
use renderer::{ColorRamp, ParseRampError};
use route_common::{CrsCode, CrsParseError};
use thiserror::Error;

pub const DEFAULT_INPUT: &str = "routes.geojson";
pub const DEFAULT_OUTPUT: &str = "route_density.tif";
pub const DEFAULT_WIDTH: usize = 2000;
pub const DEFAULT_HEIGHT: usize = 2000;

/// Route density rasterizer
#[derive(Parser, Debug, Clone)]
#[command(name = "route-raster")]
#[command(about = "Rasterize GeoJSON routes into a density GeoTIFF and a histogram-equalized PNG")]
pub struct CliArgs {
    /// Input GeoJSON FeatureCollection of LineString / MultiLineString routes
    #[arg(short, long, default_value = DEFAULT_INPUT, env = "ROUTE_RASTER_INPUT")]
    pub input: PathBuf,

    /// Output GeoTIFF path; the PNG is written next to it with a .png extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT, env = "ROUTE_RASTER_OUTPUT")]
    pub output: PathBuf,

    /// Raster width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH, env = "ROUTE_RASTER_WIDTH")]
    pub width: usize,

    /// Raster height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT, env = "ROUTE_RASTER_HEIGHT")]
    pub height: usize,

    /// Color ramp for the PNG (inferno, magma, plasma, viridis, cividis, greys, hot)
    #[arg(long, default_value = "inferno", env = "ROUTE_RASTER_RAMP")]
    pub ramp: String,

    /// Maximum per-vertex jitter in meters (0 disables)
    #[arg(long, default_value_t = 0.0, env = "ROUTE_RASTER_JITTER")]
    pub jitter: f64,

    /// Seed for the jitter random source (default: OS entropy)
    #[arg(long, env = "ROUTE_RASTER_SEED")]
    pub seed: Option<u64>,

    /// CRS of the output raster (EPSG:4326 or EPSG:3857)
    #[arg(long, default_value = "EPSG:4326", env = "ROUTE_RASTER_CRS")]
    pub crs: String,

    /// Rasterization worker threads (0 = one per core, 1 = sequential)
    #[arg(long, default_value_t = 0, env = "ROUTE_RASTER_WORKERS")]
    pub workers: usize,

    /// Write the run summary as JSON to this path
    #[arg(long, env = "ROUTE_RASTER_SUMMARY")]
    pub summary: Option<PathBuf>,

    /// Log level or filter directive, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "ROUTE_RASTER_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Raster dimensions must be positive, got {width}x{height}")]
    ZeroDimensions { width: usize, height: usize },

    #[error("Jitter radius must be a finite, non-negative number of meters, got {0}")]
    InvalidJitter(f64),

    #[error(transparent)]
    UnknownRamp(#[from] ParseRampError),

    #[error(transparent)]
    UnknownCrs(#[from] CrsParseError),

    #[error("Output {0} would be overwritten by the PNG; use a non-.png extension")]
    OutputConflict(PathBuf),
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub ramp: ColorRamp,
    /// Jitter radius in meters; 0 disables jitter
    pub jitter_m: f64,
    pub seed: Option<u64>,
    pub crs: CrsCode,
    pub workers: usize,
    pub summary_path: Option<PathBuf>,
}

impl RasterConfig {
    /// Configuration with default settings for the given paths.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ramp: ColorRamp::default(),
            jitter_m: 0.0,
            seed: None,
            crs: CrsCode::default(),
            workers: 0,
            summary_path: None,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn with_jitter(mut self, radius_m: f64, seed: Option<u64>) -> Self {
        self.jitter_m = radius_m;
        self.seed = seed;
        self
    }

    pub fn with_crs(mut self, crs: CrsCode) -> Self {
        self.crs = crs;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_summary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_path = Some(path.into());
        self
    }

    /// Check every setting that can be checked before touching the input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.jitter_m.is_finite() || self.jitter_m < 0.0 {
            return Err(ConfigError::InvalidJitter(self.jitter_m));
        }
        if self.png_path() == self.output {
            return Err(ConfigError::OutputConflict(self.output.clone()));
        }
        Ok(())
    }

    /// Path of the visualization artifact.
    pub fn png_path(&self) -> PathBuf {
        self.output.with_extension("png")
    }

    pub fn jitter_enabled(&self) -> bool {
        self.jitter_m > 0.0
    }
}

impl TryFrom<CliArgs> for RasterConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let ramp: ColorRamp = args.ramp.parse()?;
        let crs: CrsCode = args.crs.parse()?;

        let mut config = RasterConfig::new(args.input, args.output)
            .with_size(args.width, args.height)
            .with_ramp(ramp)
            .with_jitter(args.jitter, args.seed)
            .with_crs(crs)
            .with_workers(args.workers);
        config.summary_path = args.summary;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RasterConfig, ConfigError> {
        let mut argv = vec!["route-raster"];
        argv.extend_from_slice(args);
        RasterConfig::try_from(CliArgs::parse_from(argv))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!((config.width, config.height), (2000, 2000));
        assert_eq!(config.ramp, ColorRamp::Inferno);
        assert_eq!(config.crs, CrsCode::Epsg4326);
        assert!(!config.jitter_enabled());
        assert_eq!(config.png_path(), PathBuf::from("route_density.png"));
    }

    #[test]
    fn test_explicit_options() {
        let config = parse(&[
            "--input", "in.geojson", "--output", "out/grid.tiff", "--width", "640",
            "--height", "480", "--ramp", "viridis", "--jitter", "25", "--seed", "7",
            "--crs", "EPSG:3857", "--workers", "2",
        ])
        .unwrap();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.ramp, ColorRamp::Viridis);
        assert_eq!(config.jitter_m, 25.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.crs, CrsCode::Epsg3857);
        assert_eq!(config.workers, 2);
        assert_eq!(config.png_path(), PathBuf::from("out/grid.png"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(parse(&["--ramp", "jet"]), Err(ConfigError::UnknownRamp(_))));
        assert!(matches!(parse(&["--crs", "EPSG:27700"]), Err(ConfigError::UnknownCrs(_))));
        assert!(matches!(parse(&["--width", "0"]), Err(ConfigError::ZeroDimensions { .. })));
        assert!(matches!(
            parse(&["--jitter=-5"]),
            Err(ConfigError::InvalidJitter(_))
        ));
        assert!(matches!(
            parse(&["--output", "density.png"]),
            Err(ConfigError::OutputConflict(_))
        ));
    }

    #[test]
    fn test_log_level_not_bound_to_rust_log() {
        use clap::CommandFactory;

        // RUST_LOG is read by EnvFilter in main, not by clap
        let command = CliArgs::command();
        let log_level = command
            .get_arguments()
            .find(|arg| arg.get_id() == "log_level")
            .unwrap();
        assert!(log_level.get_env().is_none());

        let summary = command.get_arguments().find(|arg| arg.get_id() == "summary").unwrap();
        assert_eq!(summary.get_env().unwrap(), "ROUTE_RASTER_SUMMARY");
    }

    #[test]
    fn test_nan_jitter_rejected() {
        let config = RasterConfig::new("a.geojson", "b.tif").with_jitter(f64::NAN, None);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidJitter(_))));
    }
}
