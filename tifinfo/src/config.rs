use std::path::PathBuf;

use crate::collect::global_variables::{
    DEFAULT_BAND, DEFAULT_ELEVATION_DIR, DEFAULT_EXTENSION, DEFAULT_GEOTIFF_DIRECTORY,
    DEFAULT_SUMMARY_FILE,
};
use crate::geometric::reproject::ReprojectorKind;

/// Where and how per-pixel elevation dumps are written
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationDumpConfig {
    /// Must exist before the run starts
    pub dir: PathBuf,
    /// Prefix each value with its row and column
    pub with_index: bool,
}

impl Default for ElevationDumpConfig {
    fn default() -> Self {
        ElevationDumpConfig {
            dir: PathBuf::from(DEFAULT_ELEVATION_DIR),
            with_index: false,
        }
    }
}

/// Settings for one survey run
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyConfig {
    pub input_dir: PathBuf,
    /// Suffix matched against each entry's file name
    pub extension: String,
    pub write_summary: bool,
    pub summary_path: PathBuf,
    /// `None` disables per-pixel dumps
    pub elevation: Option<ElevationDumpConfig>,
    /// 1-based band index read as elevation
    pub band: usize,
    pub reprojector: ReprojectorKind,
    /// Spread files over the rayon pool (needs the `rayon` feature)
    pub parallel: bool,
    pub show_progress: bool,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig {
            input_dir: PathBuf::from(DEFAULT_GEOTIFF_DIRECTORY),
            extension: DEFAULT_EXTENSION.to_string(),
            write_summary: false,
            summary_path: PathBuf::from(DEFAULT_SUMMARY_FILE),
            elevation: None,
            band: DEFAULT_BAND,
            reprojector: ReprojectorKind::default(),
            parallel: false,
            show_progress: false,
        }
    }
}

impl SurveyConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        SurveyConfig {
            input_dir: input_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, path: impl Into<PathBuf>) -> Self {
        self.write_summary = true;
        self.summary_path = path.into();
        self
    }

    pub fn with_elevation_dumps(mut self, dir: impl Into<PathBuf>, with_index: bool) -> Self {
        self.elevation = Some(ElevationDumpConfig {
            dir: dir.into(),
            with_index,
        });
        self
    }
}
