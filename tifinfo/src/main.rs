//! tifinfo CLI.
//!
//! Scans a directory of GeoTIFFs and writes a summary CSV (bounds, WGS84
//! corners, geotransform and mean elevation per file) and optionally one
//! per-pixel elevation dump per raster.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

use tifinfo::collect::global_variables::{
    DEFAULT_BAND, DEFAULT_ELEVATION_DIR, DEFAULT_EXTENSION, DEFAULT_GEOTIFF_BIG_DIRECTORY,
    DEFAULT_GEOTIFF_DIRECTORY, DEFAULT_SUMMARY_FILE,
};
use tifinfo::{ElevationDumpConfig, ReprojectorKind, SurveyConfig, SurveyDriver};

/// Single-dash spellings accepted by earlier versions of the tool
const LEGACY_FLAGS: [(&str, &str); 5] = [
    ("-wsf", "--write_geotiff_summary"),
    ("-wef", "--write_elevation_files"),
    ("-widx", "--write_elevation_idx"),
    ("-gd", "--geotiff_directory"),
    ("-gbd", "--geotiff_big_directory"),
];

#[derive(Parser, Debug)]
#[command(name = "tifinfo", version)]
#[command(about = "Summarize GeoTIFF bounds, WGS84 corners and elevation statistics")]
struct Cli {
    /// Write the aggregate CSV summary (-wsf)
    #[arg(long = "write_geotiff_summary", env = "TIFINFO_WRITE_SUMMARY")]
    write_geotiff_summary: bool,

    /// Write one per-pixel elevation file per raster (-wef)
    #[arg(long = "write_elevation_files", env = "TIFINFO_WRITE_ELEVATION_FILES")]
    write_elevation_files: bool,

    /// Include row/col columns in elevation files (-widx)
    #[arg(long = "write_elevation_idx", env = "TIFINFO_WRITE_ELEVATION_IDX")]
    write_elevation_idx: bool,

    /// Directory scanned for rasters (-gd)
    #[arg(
        long = "geotiff_directory",
        env = "TIFINFO_GEOTIFF_DIRECTORY",
        default_value = DEFAULT_GEOTIFF_DIRECTORY
    )]
    geotiff_directory: PathBuf,

    /// Scan the large batch directory instead (-gbd)
    #[arg(long = "geotiff_big_directory")]
    geotiff_big_directory: bool,

    #[arg(long, hide = true)]
    foo: bool,

    /// Summary CSV path
    #[arg(long = "summary_file", env = "TIFINFO_SUMMARY_FILE", default_value = DEFAULT_SUMMARY_FILE)]
    summary_file: PathBuf,

    /// Existing directory receiving the elevation files
    #[arg(long = "elevation_dir", env = "TIFINFO_ELEVATION_DIR", default_value = DEFAULT_ELEVATION_DIR)]
    elevation_dir: PathBuf,

    /// File name suffix selecting rasters
    #[arg(long, env = "TIFINFO_EXTENSION", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// 1-based band read as elevation
    #[arg(long, env = "TIFINFO_BAND", default_value_t = DEFAULT_BAND)]
    band: usize,

    /// Coordinate transformation backend (gdal or proj)
    #[arg(long, env = "TIFINFO_REPROJECTOR", default_value_t = ReprojectorKind::Gdal)]
    reprojector: ReprojectorKind,

    /// Process files in parallel; output order is unchanged
    #[arg(long, env = "TIFINFO_PARALLEL")]
    parallel: bool,

    /// Hide the progress bar
    #[arg(long = "no_progress")]
    no_progress: bool,

    /// Exit with status 1 when any file failed (the summary is still written)
    #[arg(long = "fail_on_error")]
    fail_on_error: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long = "log_level", env = "TIFINFO_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Raise the log level; repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<SurveyConfig> {
        if self.band == 0 {
            anyhow::bail!("--band is 1-based, got 0");
        }
        if self.foo {
            debug!("--foo has no effect");
        }

        let input_dir = if self.geotiff_big_directory {
            PathBuf::from(DEFAULT_GEOTIFF_BIG_DIRECTORY)
        } else {
            self.geotiff_directory
        };

        let elevation = self.write_elevation_files.then(|| ElevationDumpConfig {
            dir: self.elevation_dir,
            with_index: self.write_elevation_idx,
        });

        Ok(SurveyConfig {
            input_dir,
            extension: self.extension,
            write_summary: self.write_geotiff_summary,
            summary_path: self.summary_file,
            elevation,
            band: self.band,
            reprojector: self.reprojector,
            parallel: self.parallel,
            show_progress: !self.no_progress,
        })
    }
}

/// Rewrite legacy single-dash flags to their long form
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| arg == *legacy)
                .map(|(_, long)| OsString::from(*long))
                .unwrap_or(arg)
        })
        .collect()
}

fn log_level(name: &str, verbose: u8) -> Level {
    let base = match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let levels = [
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];
    let index = levels.iter().position(|l| *l == base).unwrap_or(2);
    levels[(index + verbose as usize).min(levels.len() - 1)]
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(log_level(&cli.log_level, cli.verbose));

    let fail_on_error = cli.fail_on_error;
    let config = cli.into_config()?;
    info!(
        dir = ?config.input_dir,
        summary = config.write_summary,
        elevation_files = config.elevation.is_some(),
        reprojector = %config.reprojector,
        "Starting tifinfo"
    );

    let report = SurveyDriver::new(config).run()?;

    if fail_on_error && report.failed() > 0 {
        anyhow::bail!("{} of {} files failed", report.failed(), report.outcomes.len());
    }

    Ok(())
}
